//! Salary administration.
//!
//! Two distinct operations: [`correct_salary`] fixes a salary to any
//! positive amount, while [`promote`] requires a raise and may also move the
//! employee to another position in the same department.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::DepartmentCatalog;
use crate::error::{EmsError, EmsResult};
use crate::models::{Employee, EmployeeUpdate};
use crate::store::EmployeeRepository;
use crate::validation;

/// The result of a promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// The employee after the promotion.
    pub employee: Employee,
    /// Salary before the promotion.
    pub previous_salary: Decimal,
    /// Position before the promotion.
    pub previous_position: String,
}

async fn load<S: EmployeeRepository>(store: &S, employee_id: i64) -> EmsResult<Employee> {
    store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| EmsError::not_found("Employee", employee_id))
}

/// The employee's salary on record.
pub async fn current_salary<S: EmployeeRepository>(store: &S, employee_id: i64) -> EmsResult<Decimal> {
    Ok(load(store, employee_id).await?.salary)
}

/// Sets a salary to any positive whole amount.
///
/// `raw` is the amount as typed; non-numeric and non-positive input is
/// rejected before the store is touched.
pub async fn correct_salary<S: EmployeeRepository>(
    store: &S,
    employee_id: i64,
    raw: &str,
) -> EmsResult<Employee> {
    let salary = validation::positive_salary(raw)?;
    let mut employee = load(store, employee_id).await?;

    let update = EmployeeUpdate {
        salary: Some(salary),
        ..Default::default()
    };
    if !store.update_employee(employee_id, &update).await? {
        return Err(EmsError::not_found("Employee", employee_id));
    }

    info!(
        employee_id,
        previous = %employee.salary,
        salary = %salary,
        "Salary corrected"
    );
    employee.salary = salary;
    Ok(employee)
}

/// Raises an employee's salary and optionally changes their position.
///
/// # Errors
///
/// - `SalaryNotIncreased` unless `new_salary` is strictly greater than the
///   current salary.
/// - `Validation` if `new_position` is not in the employee's department.
pub async fn promote<S: EmployeeRepository>(
    store: &S,
    catalog: &DepartmentCatalog,
    employee_id: i64,
    new_salary: Decimal,
    new_position: Option<&str>,
) -> EmsResult<Promotion> {
    validation::salary_amount(new_salary)?;
    let mut employee = load(store, employee_id).await?;

    if new_salary <= employee.salary {
        return Err(EmsError::SalaryNotIncreased {
            current: employee.salary,
            proposed: new_salary,
        });
    }
    if let Some(position) = new_position {
        if !catalog.has_position(&employee.department, position) {
            return Err(EmsError::validation(
                "position",
                format!("'{position}' is not a position in {}", employee.department),
            ));
        }
    }

    let update = EmployeeUpdate {
        salary: Some(new_salary),
        position: new_position.map(str::to_string),
        ..Default::default()
    };
    if !store.update_employee(employee_id, &update).await? {
        return Err(EmsError::not_found("Employee", employee_id));
    }

    let previous_salary = employee.salary;
    let previous_position = employee.position.clone();
    update.apply_to(&mut employee);

    info!(
        employee_id,
        previous = %previous_salary,
        salary = %new_salary,
        position = %employee.position,
        "Employee promoted"
    );
    Ok(Promotion {
        employee,
        previous_salary,
        previous_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEmployee;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    async fn store_with_employee() -> (MemoryStore, i64) {
        let store = MemoryStore::new();
        let employee = store
            .insert_employee(NewEmployee {
                name: "Meera Iyer".to_string(),
                password: "pass".to_string(),
                age: 40,
                gender: "Female".to_string(),
                address: "9 Lake View".to_string(),
                department: "Finance".to_string(),
                position: "Accountant".to_string(),
                salary: Decimal::new(50000, 0),
                email: "meera@example.com".to_string(),
                contact_number: "9988776655".to_string(),
                joining_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                degree: "MCom".to_string(),
            })
            .await
            .unwrap();
        (store, employee.id)
    }

    #[tokio::test]
    async fn test_correction_accepts_any_positive_amount() {
        let (store, id) = store_with_employee().await;

        let lowered = correct_salary(&store, id, "42000").await.unwrap();
        assert_eq!(lowered.salary, Decimal::new(42000, 0));
        assert_eq!(current_salary(&store, id).await.unwrap(), Decimal::new(42000, 0));
    }

    #[tokio::test]
    async fn test_correction_rejects_bad_input_without_change() {
        let (store, id) = store_with_employee().await;

        for raw in ["0", "-5", "abc", ""] {
            assert!(matches!(
                correct_salary(&store, id, raw).await,
                Err(EmsError::Validation { .. })
            ));
        }
        assert_eq!(current_salary(&store, id).await.unwrap(), Decimal::new(50000, 0));
    }

    #[tokio::test]
    async fn test_promotion_requires_a_raise() {
        let (store, id) = store_with_employee().await;
        let catalog = DepartmentCatalog::default();

        let same = promote(&store, &catalog, id, Decimal::new(50000, 0), None).await;
        assert!(matches!(same, Err(EmsError::SalaryNotIncreased { .. })));

        let raise = promote(
            &store,
            &catalog,
            id,
            Decimal::new(58000, 0),
            Some("Finance Manager"),
        )
        .await
        .unwrap();
        assert_eq!(raise.previous_salary, Decimal::new(50000, 0));
        assert_eq!(raise.previous_position, "Accountant");
        assert_eq!(raise.employee.position, "Finance Manager");

        let stored = store.find_employee(id).await.unwrap().unwrap();
        assert_eq!(stored.salary, Decimal::new(58000, 0));
    }

    #[tokio::test]
    async fn test_promotion_position_must_be_in_department() {
        let (store, id) = store_with_employee().await;
        let result = promote(
            &store,
            &DepartmentCatalog::default(),
            id,
            Decimal::new(60000, 0),
            Some("SEO Specialist"),
        )
        .await;
        assert!(matches!(result, Err(EmsError::Validation { .. })));
        assert_eq!(current_salary(&store, id).await.unwrap(), Decimal::new(50000, 0));
    }

    #[tokio::test]
    async fn test_salary_above_twelve_digits_is_rejected() {
        let (store, id) = store_with_employee().await;

        let huge = promote(
            &store,
            &DepartmentCatalog::default(),
            id,
            Decimal::from(validation::MAX_SALARY + 1),
            None,
        )
        .await;
        assert!(matches!(huge, Err(EmsError::Validation { .. })));
        assert!(matches!(
            correct_salary(&store, id, "79228162514264337593543950335").await,
            Err(EmsError::Validation { .. })
        ));
        assert_eq!(current_salary(&store, id).await.unwrap(), Decimal::new(50000, 0));

        let top = promote(
            &store,
            &DepartmentCatalog::default(),
            id,
            Decimal::from(validation::MAX_SALARY),
            None,
        )
        .await
        .unwrap();
        assert_eq!(top.employee.salary, Decimal::from(validation::MAX_SALARY));
    }

    #[tokio::test]
    async fn test_unknown_employee_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            correct_salary(&store, 3, "1000").await,
            Err(EmsError::NotFound { .. })
        ));
    }
}
