//! HR account administration, available to the Manager.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::CredentialPolicy;
use crate::error::{EmsError, EmsResult};
use crate::models::{Hr, HrUpdate, NewHr};
use crate::store::HrRepository;
use crate::validation;

/// Details the Manager enters for a new HR account.
#[derive(Debug, Clone, PartialEq)]
pub struct HrForm {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    /// Salary.
    pub salary: Decimal,
    /// Highest degree.
    pub degree: String,
}

/// Creates an HR account.
pub async fn add_hr<S: HrRepository>(
    store: &S,
    credentials: &CredentialPolicy,
    form: HrForm,
) -> EmsResult<Hr> {
    let name = validation::person_name(&form.name)?;
    let email = validation::email(&form.email)?;
    let password = validation::password(&form.password, credentials.min_password_length)?;
    let contact_number = validation::contact_number(&form.contact_number)?;
    let degree = validation::degree(&form.degree)?;
    validation::salary_amount(form.salary)?;

    let hr = store
        .insert_hr(NewHr {
            name,
            email,
            password,
            contact_number,
            salary: form.salary,
            degree,
        })
        .await?;

    info!(hr_id = hr.id, "HR added");
    Ok(hr)
}

/// Deletes an HR account.
pub async fn remove_hr<S: HrRepository>(store: &S, hr_id: i64) -> EmsResult<()> {
    if !store.delete_hr(hr_id).await? {
        return Err(EmsError::not_found("HR", hr_id));
    }
    info!(hr_id, "HR removed");
    Ok(())
}

/// Applies a partial update to an HR account.
pub async fn update_hr<S: HrRepository>(store: &S, hr_id: i64, update: &HrUpdate) -> EmsResult<Hr> {
    if let Some(name) = &update.name {
        validation::person_name(name)?;
    }
    if let Some(email) = &update.email {
        validation::email(email)?;
    }
    if let Some(contact) = &update.contact_number {
        validation::contact_number(contact)?;
    }
    if let Some(degree) = &update.degree {
        validation::degree(degree)?;
    }
    if let Some(salary) = update.salary {
        validation::salary_amount(salary)?;
    }

    if !store.update_hr(hr_id, update).await? {
        return Err(EmsError::not_found("HR", hr_id));
    }
    info!(hr_id, "HR updated");
    find_hr(store, hr_id).await
}

/// One HR account, or `NotFound`.
pub async fn find_hr<S: HrRepository>(store: &S, hr_id: i64) -> EmsResult<Hr> {
    store
        .find_hr(hr_id)
        .await?
        .ok_or_else(|| EmsError::not_found("HR", hr_id))
}

/// All HR accounts ordered by id.
pub async fn list_hrs<S: HrRepository>(store: &S) -> EmsResult<Vec<Hr>> {
    Ok(store.list_hrs().await?)
}
