//! Credential checks for the three roles.
//!
//! Passwords are compared as stored; account security is out of scope.

use tracing::{info, warn};

use crate::error::{EmsError, EmsResult};
use crate::models::{Employee, Hr, Manager};
use crate::store::{EmployeeRepository, HrRepository, ManagerRepository};
use crate::validation;

/// Returns the employee if the id and password match.
pub async fn login_employee<S: EmployeeRepository>(
    store: &S,
    id: i64,
    password: &str,
) -> EmsResult<Employee> {
    match store.find_employee(id).await? {
        Some(employee) if employee.password == password => {
            info!(employee_id = id, "Employee logged in");
            Ok(employee)
        }
        _ => {
            warn!(employee_id = id, "Employee login rejected");
            Err(EmsError::InvalidCredentials { role: "Employee" })
        }
    }
}

/// Returns the HR record if the id and password match.
pub async fn login_hr<S: HrRepository>(store: &S, id: i64, password: &str) -> EmsResult<Hr> {
    match store.find_hr(id).await? {
        Some(hr) if hr.password == password => {
            info!(hr_id = id, "HR logged in");
            Ok(hr)
        }
        _ => {
            warn!(hr_id = id, "HR login rejected");
            Err(EmsError::InvalidCredentials { role: "HR" })
        }
    }
}

/// Returns the manager if the id and password match.
pub async fn login_manager<S: ManagerRepository>(
    store: &S,
    id: i64,
    password: &str,
) -> EmsResult<Manager> {
    match store.find_manager(id).await? {
        Some(manager) if manager.password == password => {
            info!(manager_id = id, "Manager logged in");
            Ok(manager)
        }
        _ => {
            warn!(manager_id = id, "Manager login rejected");
            Err(EmsError::InvalidCredentials { role: "Manager" })
        }
    }
}

/// Replaces the manager's password after re-checking the current one.
pub async fn change_manager_password<S: ManagerRepository>(
    store: &S,
    manager_id: i64,
    current: &str,
    new_password: &str,
    min_len: usize,
) -> EmsResult<()> {
    let manager = login_manager(store, manager_id, current).await?;
    let new_password = validation::password(new_password, min_len)?;

    if !store.set_manager_password(manager.id, &new_password).await? {
        return Err(EmsError::not_found("Manager", manager_id));
    }
    info!(manager_id, "Manager password changed");
    Ok(())
}
