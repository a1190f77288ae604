//! Salary and attendance aggregates for the HR and Manager reports.
//!
//! The aggregation itself is done by pure functions over loaded records
//! ([`department_totals`], [`summarize_payroll`], [`summarize_hours`]); the
//! async wrappers only fetch the records.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EmsError, EmsResult};
use crate::models::{AttendanceRecord, DayType, Employee, Hr};
use crate::store::{AttendanceRepository, EmployeeRepository, HrRepository};

/// Salary totals for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSalary {
    /// Department name.
    pub department: String,
    /// Employees in the department.
    pub headcount: usize,
    /// Sum of their salaries.
    pub total: Decimal,
}

/// Headcount and salary total for one group of staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollLine {
    /// Number of people.
    pub headcount: usize,
    /// Sum of salaries.
    pub total: Decimal,
}

/// Payroll split between employees and HR staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollSummary {
    /// All employees.
    pub employees: PayrollLine,
    /// All HR staff.
    pub hrs: PayrollLine,
}

impl PayrollSummary {
    /// Combined salary bill.
    pub fn grand_total(&self) -> EmsResult<Decimal> {
        add_salary(self.employees.total, self.hrs.total)
    }
}

/// Completed attendance for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeHours {
    /// Employee id.
    pub employee_id: i64,
    /// Employee name, empty if the employee no longer exists.
    pub name: String,
    /// Completed full days.
    pub full_days: usize,
    /// Completed half days.
    pub half_days: usize,
    /// Sum of completed hours.
    pub total_hours: Decimal,
}

fn add_salary(total: Decimal, salary: Decimal) -> EmsResult<Decimal> {
    total
        .checked_add(salary)
        .ok_or_else(|| EmsError::validation("salary", "total exceeds the supported range"))
}

fn sum_salaries(salaries: impl IntoIterator<Item = Decimal>) -> EmsResult<Decimal> {
    salaries.into_iter().try_fold(Decimal::ZERO, add_salary)
}

/// Per-department salary totals, ordered by department name.
///
/// Fails with a validation error if a total overflows.
pub fn department_totals(employees: &[Employee]) -> EmsResult<Vec<DepartmentSalary>> {
    let mut totals: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for employee in employees {
        let entry = totals
            .entry(employee.department.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = add_salary(entry.1, employee.salary)?;
    }
    Ok(totals
        .into_iter()
        .map(|(department, (headcount, total))| DepartmentSalary {
            department: department.to_string(),
            headcount,
            total,
        })
        .collect())
}

/// Payroll summary over already-loaded records.
pub fn summarize_payroll(employees: &[Employee], hrs: &[Hr]) -> EmsResult<PayrollSummary> {
    Ok(PayrollSummary {
        employees: PayrollLine {
            headcount: employees.len(),
            total: sum_salaries(employees.iter().map(|e| e.salary))?,
        },
        hrs: PayrollLine {
            headcount: hrs.len(),
            total: sum_salaries(hrs.iter().map(|h| h.salary))?,
        },
    })
}

/// Completed hours per employee, ordered by employee id.
///
/// Records without a check-out are ignored.
pub fn summarize_hours(employees: &[Employee], records: &[AttendanceRecord]) -> Vec<EmployeeHours> {
    let names: BTreeMap<i64, &str> = employees.iter().map(|e| (e.id, e.name.as_str())).collect();
    let mut by_employee: BTreeMap<i64, EmployeeHours> = BTreeMap::new();

    for record in records {
        let (Some(hours), Some(day_type)) = (record.total_hours, record.day_type) else {
            continue;
        };
        let entry = by_employee
            .entry(record.employee_id)
            .or_insert_with(|| EmployeeHours {
                employee_id: record.employee_id,
                name: names
                    .get(&record.employee_id)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                full_days: 0,
                half_days: 0,
                total_hours: Decimal::ZERO,
            });
        entry.total_hours += hours;
        match day_type {
            DayType::FullDay => entry.full_days += 1,
            DayType::HalfDay => entry.half_days += 1,
        }
    }
    by_employee.into_values().collect()
}

/// Distinct departments of current employees, sorted.
pub async fn departments<S: EmployeeRepository>(store: &S) -> EmsResult<Vec<String>> {
    let employees = store.list_employees().await?;
    let names: BTreeSet<String> = employees.into_iter().map(|e| e.department).collect();
    Ok(names.into_iter().collect())
}

/// Salary total for one department; zero headcount if it has no employees.
pub async fn department_salary_total<S: EmployeeRepository>(
    store: &S,
    department: &str,
) -> EmsResult<DepartmentSalary> {
    let employees = store.list_employees().await?;
    Ok(department_totals(&employees)?
        .into_iter()
        .find(|d| d.department == department)
        .unwrap_or_else(|| DepartmentSalary {
            department: department.to_string(),
            headcount: 0,
            total: Decimal::ZERO,
        }))
}

/// Employee and HR payroll.
pub async fn payroll_summary<S>(store: &S) -> EmsResult<PayrollSummary>
where
    S: EmployeeRepository + HrRepository,
{
    let employees = store.list_employees().await?;
    let hrs = store.list_hrs().await?;
    summarize_payroll(&employees, &hrs)
}

/// Completed hours for every employee with attendance.
pub async fn attendance_hours_by_employee<S>(store: &S) -> EmsResult<Vec<EmployeeHours>>
where
    S: EmployeeRepository + AttendanceRepository,
{
    let employees = store.list_employees().await?;
    let records = store.list_attendance(None).await?;
    Ok(summarize_hours(&employees, &records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn employee(id: i64, department: &str, salary: i64) -> Employee {
        Employee {
            id,
            name: format!("Employee {id}"),
            password: String::new(),
            age: 30,
            gender: "Other".to_string(),
            address: "Somewhere".to_string(),
            department: department.to_string(),
            position: "Analyst".to_string(),
            salary: Decimal::from(salary),
            email: format!("e{id}@example.com"),
            contact_number: format!("{:010}", id),
            joining_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            degree: "BA".to_string(),
        }
    }

    fn record(id: i64, employee_id: i64, hours: Option<(i64, DayType)>) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id,
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap() + chrono::Days::new(id as u64),
            check_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            check_out: hours.map(|_| NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
            total_hours: hours.map(|(h, _)| Decimal::from(h)),
            day_type: hours.map(|(_, d)| d),
        }
    }

    #[test]
    fn test_department_totals_group_and_sort() {
        let employees = vec![
            employee(1, "IT", 50000),
            employee(2, "Finance", 40000),
            employee(3, "IT", 60000),
        ];
        let totals = department_totals(&employees).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].department, "Finance");
        assert_eq!(totals[1].headcount, 2);
        assert_eq!(totals[1].total, Decimal::from(110000));
    }

    #[test]
    fn test_payroll_summary_splits_groups() {
        let hr = Hr {
            id: 1,
            name: "Priya Nair".to_string(),
            email: "priya@example.com".to_string(),
            password: String::new(),
            contact_number: "9000011111".to_string(),
            salary: Decimal::from(70000),
            degree: "MBA".to_string(),
        };
        let summary = summarize_payroll(&[employee(1, "IT", 50000)], &[hr]).unwrap();
        assert_eq!(summary.employees.headcount, 1);
        assert_eq!(summary.hrs.total, Decimal::from(70000));
        assert_eq!(summary.grand_total().unwrap(), Decimal::from(120000));
    }

    #[test]
    fn test_hours_skip_open_records() {
        let employees = vec![employee(1, "IT", 1), employee(2, "IT", 1)];
        let records = vec![
            record(1, 1, Some((8, DayType::FullDay))),
            record(2, 1, Some((4, DayType::HalfDay))),
            record(3, 2, None),
        ];
        let hours = summarize_hours(&employees, &records);
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].total_hours, Decimal::from(12));
        assert_eq!((hours[0].full_days, hours[0].half_days), (1, 1));
        assert_eq!(hours[0].name, "Employee 1");
    }

    #[test]
    fn test_salary_overflow_is_an_error() {
        let mut rich = employee(1, "IT", 0);
        rich.salary = Decimal::MAX;
        let employees = vec![rich.clone(), Employee { id: 2, ..rich }];

        assert!(matches!(
            department_totals(&employees),
            Err(EmsError::Validation { .. })
        ));
        assert!(matches!(
            summarize_payroll(&employees, &[]),
            Err(EmsError::Validation { .. })
        ));

        let split = PayrollSummary {
            employees: PayrollLine { headcount: 1, total: Decimal::MAX },
            hrs: PayrollLine { headcount: 1, total: Decimal::ONE },
        };
        assert!(split.grand_total().is_err());
    }

    #[tokio::test]
    async fn test_payroll_at_salary_cap_does_not_overflow() {
        let store = crate::store::MemoryStore::new();
        for i in 1..=3 {
            store
                .insert_employee(crate::models::NewEmployee {
                    name: format!("Employee {i}"),
                    password: "pass".to_string(),
                    age: 30,
                    gender: "Other".to_string(),
                    address: "Somewhere".to_string(),
                    department: "IT".to_string(),
                    position: "Analyst".to_string(),
                    salary: Decimal::from(crate::validation::MAX_SALARY),
                    email: format!("e{i}@example.com"),
                    contact_number: format!("{:010}", i),
                    joining_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    degree: "BA".to_string(),
                })
                .await
                .unwrap();
        }
        let summary = payroll_summary(&store).await.unwrap();
        assert_eq!(
            summary.grand_total().unwrap(),
            Decimal::from(crate::validation::MAX_SALARY * 3)
        );
    }

    #[tokio::test]
    async fn test_department_total_for_empty_department() {
        let store = crate::store::MemoryStore::new();
        let total = department_salary_total(&store, "Legal").await.unwrap();
        assert_eq!(total.headcount, 0);
        assert_eq!(total.total, Decimal::ZERO);
        assert!(departments(&store).await.unwrap().is_empty());
    }
}
