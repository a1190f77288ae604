//! Employee administration and the self-service profile.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::{CredentialPolicy, DepartmentCatalog};
use crate::error::{EmsError, EmsResult};
use crate::models::{Employee, EmployeeUpdate, NewEmployee};
use crate::store::{EmployeeRepository, StoreError};
use crate::validation;

const DUPLICATE_CONTACT: &str = "Email or contact number already exists";

/// Details HR enters for a new employee.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    /// Full name.
    pub name: String,
    /// Initial password.
    pub password: String,
    /// Age in years.
    pub age: u32,
    /// Gender.
    pub gender: String,
    /// Postal address.
    pub address: String,
    /// Department from the catalog.
    pub department: String,
    /// Position within the department.
    pub position: String,
    /// Starting salary.
    pub salary: Decimal,
    /// Email address.
    pub email: String,
    /// Ten-digit contact number.
    pub contact_number: String,
    /// Highest degree.
    pub degree: String,
}

/// Fields an employee may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    /// New age.
    pub age: Option<u32>,
    /// New address.
    pub address: Option<String>,
    /// New contact number.
    pub contact_number: Option<String>,
    /// New degree.
    pub degree: Option<String>,
}

impl From<ProfileUpdate> for EmployeeUpdate {
    fn from(profile: ProfileUpdate) -> Self {
        EmployeeUpdate {
            age: profile.age,
            address: profile.address,
            contact_number: profile.contact_number,
            degree: profile.degree,
            ..Default::default()
        }
    }
}

fn duplicate_as_contact_clash(error: StoreError) -> EmsError {
    match error {
        StoreError::Duplicate(_) => EmsError::Duplicate {
            message: DUPLICATE_CONTACT.to_string(),
        },
        other => other.into(),
    }
}

fn check_fields(update: &EmployeeUpdate) -> EmsResult<()> {
    if let Some(password) = &update.password {
        validation::required("password", password)?;
    }
    if let Some(email) = &update.email {
        validation::email(email)?;
    }
    if let Some(contact) = &update.contact_number {
        validation::contact_number(contact)?;
    }
    if let Some(age) = update.age {
        validation::age(&age.to_string())?;
    }
    if let Some(degree) = &update.degree {
        validation::degree(degree)?;
    }
    if let Some(salary) = update.salary {
        if salary <= Decimal::ZERO {
            return Err(EmsError::validation("salary", "must be a positive number"));
        }
        validation::salary_amount(salary)?;
    }
    Ok(())
}

fn check_placement(update: &EmployeeUpdate, catalog: &DepartmentCatalog) -> EmsResult<()> {
    if update.department.is_some() || update.position.is_some() {
        // Department and position only change together, through the catalog.
        match (&update.department, &update.position) {
            (Some(department), Some(position)) if catalog.has_position(department, position) => {}
            _ => {
                return Err(EmsError::validation(
                    "position",
                    "department and position must match the catalog",
                ));
            }
        }
    }
    Ok(())
}

/// Adds an employee who joins on `today`.
pub async fn add_employee<S: EmployeeRepository>(
    store: &S,
    catalog: &DepartmentCatalog,
    credentials: &CredentialPolicy,
    form: EmployeeForm,
    today: NaiveDate,
) -> EmsResult<Employee> {
    let name = validation::person_name(&form.name)?;
    let password = validation::password(&form.password, credentials.min_password_length)?;
    let age = validation::age(&form.age.to_string())?;
    let gender = validation::gender(&form.gender)?;
    let address = validation::required("address", &form.address)?;
    let email = validation::email(&form.email)?;
    let contact_number = validation::contact_number(&form.contact_number)?;
    let degree = validation::degree(&form.degree)?;

    if !catalog.has_position(&form.department, &form.position) {
        return Err(EmsError::validation(
            "position",
            format!(
                "'{}' is not a position in department '{}'",
                form.position, form.department
            ),
        ));
    }
    if form.salary <= Decimal::ZERO {
        return Err(EmsError::validation("salary", "must be a positive number"));
    }
    validation::salary_amount(form.salary)?;

    let employee = store
        .insert_employee(NewEmployee {
            name,
            password,
            age,
            gender,
            address,
            department: form.department,
            position: form.position,
            salary: form.salary,
            email,
            contact_number,
            joining_date: today,
            degree,
        })
        .await
        .map_err(duplicate_as_contact_clash)?;

    info!(
        employee_id = employee.id,
        department = %employee.department,
        position = %employee.position,
        "Employee added"
    );
    Ok(employee)
}

async fn apply_update<S: EmployeeRepository>(
    store: &S,
    employee_id: i64,
    update: &EmployeeUpdate,
) -> EmsResult<Employee> {
    let updated = store
        .update_employee(employee_id, update)
        .await
        .map_err(duplicate_as_contact_clash)?;
    if !updated {
        return Err(EmsError::not_found("Employee", employee_id));
    }
    info!(employee_id, "Employee updated");
    find_employee(store, employee_id).await
}

/// Applies an HR edit to an employee.
pub async fn update_employee<S: EmployeeRepository>(
    store: &S,
    catalog: &DepartmentCatalog,
    employee_id: i64,
    update: &EmployeeUpdate,
) -> EmsResult<Employee> {
    check_fields(update)?;
    check_placement(update, catalog)?;
    apply_update(store, employee_id, update).await
}

/// Applies an employee's edit of their own profile.
pub async fn update_profile<S: EmployeeRepository>(
    store: &S,
    employee_id: i64,
    profile: ProfileUpdate,
) -> EmsResult<Employee> {
    let update = EmployeeUpdate::from(profile);
    if let Some(address) = &update.address {
        validation::required("address", address)?;
    }
    check_fields(&update)?;
    apply_update(store, employee_id, &update).await
}

/// Removes an employee together with their leaves, attendance, requests and ratings.
pub async fn delete_employee<S: EmployeeRepository>(store: &S, employee_id: i64) -> EmsResult<()> {
    if !store.delete_employee(employee_id).await? {
        return Err(EmsError::not_found("Employee", employee_id));
    }
    info!(employee_id, "Employee deleted");
    Ok(())
}

/// All employees ordered by id.
pub async fn list_employees<S: EmployeeRepository>(store: &S) -> EmsResult<Vec<Employee>> {
    Ok(store.list_employees().await?)
}

/// One employee, or `NotFound`.
pub async fn find_employee<S: EmployeeRepository>(store: &S, employee_id: i64) -> EmsResult<Employee> {
    store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| EmsError::not_found("Employee", employee_id))
}

/// Employees whose name contains `fragment`, ignoring case.
pub async fn search_by_name<S: EmployeeRepository>(
    store: &S,
    fragment: &str,
) -> EmsResult<Vec<Employee>> {
    let fragment = validation::required("name", fragment)?;
    Ok(store.search_employees(&fragment).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn form(email: &str, contact: &str) -> EmployeeForm {
        EmployeeForm {
            name: "Kiran Rao".to_string(),
            password: "kiran123".to_string(),
            age: 26,
            gender: "male".to_string(),
            address: "77 Station Road".to_string(),
            department: "IT".to_string(),
            position: "Backend Developer".to_string(),
            salary: Decimal::new(65000, 0),
            email: email.to_string(),
            contact_number: contact.to_string(),
            degree: "BTech".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    async fn add(store: &MemoryStore, email: &str, contact: &str) -> EmsResult<Employee> {
        add_employee(
            store,
            &DepartmentCatalog::default(),
            &CredentialPolicy::default(),
            form(email, contact),
            today(),
        )
        .await
    }

    #[tokio::test]
    async fn test_add_employee_sets_joining_date_and_normalizes_gender() {
        let store = MemoryStore::new();
        let employee = add(&store, "kiran@example.com", "9012345678").await.unwrap();
        assert_eq!(employee.joining_date, today());
        assert_eq!(employee.gender, "Male");
    }

    #[tokio::test]
    async fn test_duplicate_email_or_contact_is_reported() {
        let store = MemoryStore::new();
        add(&store, "kiran@example.com", "9012345678").await.unwrap();

        for (email, contact) in [
            ("kiran@example.com", "9012345679"),
            ("other@example.com", "9012345678"),
        ] {
            match add(&store, email, contact).await {
                Err(EmsError::Duplicate { message }) => assert_eq!(message, DUPLICATE_CONTACT),
                other => panic!("Expected Duplicate, got {:?}", other),
            }
        }
        assert_eq!(list_employees(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_position_outside_department() {
        let store = MemoryStore::new();
        let mut bad = form("kiran@example.com", "9012345678");
        bad.position = "Auditor".to_string();
        let result = add_employee(
            &store,
            &DepartmentCatalog::default(),
            &CredentialPolicy::default(),
            bad,
            today(),
        )
        .await;
        assert!(matches!(result, Err(EmsError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_profile_update_changes_only_profile_fields() {
        let store = MemoryStore::new();
        let employee = add(&store, "kiran@example.com", "9012345678").await.unwrap();

        let updated = update_profile(
            &store,
            employee.id,
            ProfileUpdate {
                address: Some("1 New Street".to_string()),
                age: Some(27),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.address, "1 New Street");
        assert_eq!(updated.age, 27);
        assert_eq!(updated.email, employee.email);

        let bad = update_profile(
            &store,
            employee.id,
            ProfileUpdate {
                contact_number: Some("12345".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(bad, Err(EmsError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_delete_and_search() {
        let store = MemoryStore::new();
        let employee = add(&store, "kiran@example.com", "9012345678").await.unwrap();

        assert_eq!(search_by_name(&store, "RAO").await.unwrap().len(), 1);
        assert!(search_by_name(&store, " ").await.is_err());

        delete_employee(&store, employee.id).await.unwrap();
        assert!(matches!(
            delete_employee(&store, employee.id).await,
            Err(EmsError::NotFound { .. })
        ));
        assert!(matches!(
            find_employee(&store, employee.id).await,
            Err(EmsError::NotFound { .. })
        ));
    }
}
