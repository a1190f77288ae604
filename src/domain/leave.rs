//! Leave requests and their one-time review.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::LeavePolicy;
use crate::error::{EmsError, EmsResult};
use crate::models::{Decision, Employee, Leave, LeaveType, NewLeave, RequestStatus};
use crate::store::{EmployeeRepository, LeaveRepository};

/// A leave together with the requesting employee's name.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveView {
    /// The leave record.
    pub leave: Leave,
    /// Name of the employee who applied.
    pub employee_name: String,
}

/// Checks the date rules for a new leave.
///
/// The start must fall after `today` (or on it when the policy allows), and
/// the end may not precede the start.
pub fn validate_leave_dates(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    policy: &LeavePolicy,
) -> EmsResult<()> {
    let start_ok = if policy.allow_start_today {
        start >= today
    } else {
        start > today
    };
    if !start_ok {
        let rule = if policy.allow_start_today {
            "must be today or later"
        } else {
            "must be after today"
        };
        return Err(EmsError::validation("start_date", rule));
    }
    if end < start {
        return Err(EmsError::validation(
            "end_date",
            "cannot be before the start date",
        ));
    }
    Ok(())
}

/// Files a pending leave for an employee.
pub async fn apply_leave<S: LeaveRepository>(
    store: &S,
    employee_id: i64,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
    policy: &LeavePolicy,
) -> EmsResult<Leave> {
    validate_leave_dates(start_date, end_date, today, policy)?;

    let leave = store
        .insert_leave(NewLeave {
            employee_id,
            leave_type,
            start_date,
            end_date,
        })
        .await?;

    info!(
        employee_id,
        leave_id = leave.id,
        leave_type = %leave_type,
        %start_date,
        %end_date,
        "Leave applied"
    );
    Ok(leave)
}

async fn with_names<S: EmployeeRepository>(
    store: &S,
    leaves: Vec<Leave>,
) -> EmsResult<Vec<LeaveView>> {
    let names: HashMap<i64, String> = store
        .list_employees()
        .await?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    Ok(leaves
        .into_iter()
        .map(|leave| LeaveView {
            employee_name: names.get(&leave.employee_id).cloned().unwrap_or_default(),
            leave,
        })
        .collect())
}

/// All leaves awaiting review.
pub async fn pending_leaves<S>(store: &S) -> EmsResult<Vec<LeaveView>>
where
    S: LeaveRepository + EmployeeRepository,
{
    let leaves = store.list_leaves_by_status(RequestStatus::Pending).await?;
    with_names(store, leaves).await
}

/// Every leave one employee has filed. Fails if the employee does not exist.
pub async fn leave_history<S>(store: &S, employee_id: i64) -> EmsResult<Vec<LeaveView>>
where
    S: LeaveRepository + EmployeeRepository,
{
    let employee = store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| EmsError::not_found("Employee", employee_id))?;
    employee_leaves(store, &employee).await
}

/// The signed-in employee's own leaves.
pub async fn employee_leaves<S: LeaveRepository>(
    store: &S,
    employee: &Employee,
) -> EmsResult<Vec<LeaveView>> {
    Ok(store
        .list_leaves_for_employee(employee.id)
        .await?
        .into_iter()
        .map(|leave| LeaveView {
            leave,
            employee_name: employee.name.clone(),
        })
        .collect())
}

/// Approves or rejects a pending leave.
///
/// A leave is decided at most once: a missing id is `NotFound`, and a leave
/// that is no longer pending is `InvalidTransition`.
pub async fn decide_leave<S: LeaveRepository>(
    store: &S,
    leave_id: i64,
    decision: Decision,
) -> EmsResult<Leave> {
    let Some(mut leave) = store.find_leave(leave_id).await? else {
        return Err(EmsError::not_found("Leave", leave_id));
    };
    let target = decision.target_status();

    if !leave.status.is_pending() || !store.resolve_leave(leave_id, target).await? {
        // Re-read so the error names the status that won.
        let current = store
            .find_leave(leave_id)
            .await?
            .map_or(leave.status, |l| l.status);
        warn!(leave_id, status = %current, "Leave already decided");
        return Err(EmsError::InvalidTransition {
            entity: "Leave",
            id: leave_id,
            status: current.to_string(),
        });
    }

    leave.status = target;
    info!(leave_id, employee_id = leave.employee_id, status = %target, "Leave decided");
    Ok(leave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEmployee;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn store_with_employee() -> (MemoryStore, Employee) {
        let store = MemoryStore::new();
        let employee = store
            .insert_employee(NewEmployee {
                name: "Ravi Kumar".to_string(),
                password: "pass".to_string(),
                age: 35,
                gender: "Male".to_string(),
                address: "4 Park Lane".to_string(),
                department: "Marketing".to_string(),
                position: "Brand Manager".to_string(),
                salary: Decimal::new(61000, 0),
                email: "ravi@example.com".to_string(),
                contact_number: "9123456780".to_string(),
                joining_date: day("2025-06-01"),
                degree: "BA".to_string(),
            })
            .await
            .unwrap();
        (store, employee)
    }

    #[test]
    fn test_start_must_be_after_today_by_default() {
        let today = day("2026-10-14");
        let strict = LeavePolicy::default();
        assert!(validate_leave_dates(today, today, today, &strict).is_err());
        assert!(validate_leave_dates(day("2026-10-15"), day("2026-10-15"), today, &strict).is_ok());

        let relaxed = LeavePolicy {
            allow_start_today: true,
        };
        assert!(validate_leave_dates(today, today, today, &relaxed).is_ok());
        assert!(validate_leave_dates(day("2026-10-13"), today, today, &relaxed).is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let result = validate_leave_dates(
            day("2026-10-20"),
            day("2026-10-19"),
            day("2026-10-14"),
            &LeavePolicy::default(),
        );
        assert!(matches!(
            result,
            Err(EmsError::Validation { field, .. }) if field == "end_date"
        ));
    }

    #[tokio::test]
    async fn test_leave_is_pending_then_decided_once() {
        let (store, employee) = store_with_employee().await;
        let leave = apply_leave(
            &store,
            employee.id,
            LeaveType::Vacation,
            day("2026-10-20"),
            day("2026-10-24"),
            day("2026-10-14"),
            &LeavePolicy::default(),
        )
        .await
        .unwrap();
        assert_eq!(leave.status, RequestStatus::Pending);

        let pending = pending_leaves(&store).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].employee_name, "Ravi Kumar");

        let approved = decide_leave(&store, leave.id, Decision::Approve).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);

        let again = decide_leave(&store, leave.id, Decision::Reject).await;
        match again {
            Err(EmsError::InvalidTransition { status, .. }) => assert_eq!(status, "APPROVED"),
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
        assert!(pending_leaves(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deciding_unknown_leave_is_not_found() {
        let (store, _) = store_with_employee().await;
        assert!(matches!(
            decide_leave(&store, 99, Decision::Approve).await,
            Err(EmsError::NotFound { entity: "Leave", .. })
        ));
    }

    #[tokio::test]
    async fn test_history_for_unknown_employee_is_not_found() {
        let (store, employee) = store_with_employee().await;
        assert!(leave_history(&store, employee.id).await.unwrap().is_empty());
        assert!(matches!(
            leave_history(&store, employee.id + 1).await,
            Err(EmsError::NotFound { .. })
        ));
    }
}
