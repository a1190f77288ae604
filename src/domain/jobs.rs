//! Job postings and employee position-change requests.

use tracing::info;

use crate::config::DepartmentCatalog;
use crate::error::{EmsError, EmsResult};
use crate::models::{
    Decision, EmployeeUpdate, JobPosting, NewJobPosting, NewPositionChange,
    PositionChangeRequest, RequestStatus,
};
use crate::store::{EmployeeRepository, JobPostingRepository, PositionChangeRepository};

/// Publishes openings for a catalog position.
pub async fn post_job<S: JobPostingRepository>(
    store: &S,
    catalog: &DepartmentCatalog,
    department: &str,
    position: &str,
    openings: u32,
) -> EmsResult<JobPosting> {
    if !catalog.has_position(department, position) {
        return Err(EmsError::validation(
            "position",
            format!("'{position}' is not a position in department '{department}'"),
        ));
    }
    if openings == 0 {
        return Err(EmsError::validation("openings", "must be a positive number"));
    }

    let posting = store
        .insert_job_posting(NewJobPosting {
            department: department.to_string(),
            position: position.to_string(),
            openings,
        })
        .await?;

    info!(posting_id = posting.id, department, position, openings, "Job posted");
    Ok(posting)
}

/// Postings in one department, or all of them.
pub async fn open_postings<S: JobPostingRepository>(
    store: &S,
    department: Option<&str>,
) -> EmsResult<Vec<JobPosting>> {
    Ok(store.list_job_postings(department).await?)
}

/// Files a request to move into a position posted in the employee's own department.
pub async fn request_position_change<S>(
    store: &S,
    employee_id: i64,
    new_position: &str,
) -> EmsResult<PositionChangeRequest>
where
    S: EmployeeRepository + JobPostingRepository + PositionChangeRepository,
{
    let employee = store
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| EmsError::not_found("Employee", employee_id))?;

    if employee.position == new_position {
        return Err(EmsError::validation(
            "position",
            "already holds this position",
        ));
    }
    let posted = store
        .list_job_postings(Some(&employee.department))
        .await?
        .iter()
        .any(|p| p.position == new_position);
    if !posted {
        return Err(EmsError::validation(
            "position",
            format!("no opening for '{new_position}' in {}", employee.department),
        ));
    }

    let request = store
        .insert_position_change(NewPositionChange {
            employee_id,
            department: employee.department,
            old_position: employee.position,
            new_position: new_position.to_string(),
        })
        .await?;

    info!(
        request_id = request.id,
        employee_id,
        new_position,
        "Position change requested"
    );
    Ok(request)
}

/// Requests awaiting review.
pub async fn pending_position_changes<S: PositionChangeRepository>(
    store: &S,
) -> EmsResult<Vec<PositionChangeRequest>> {
    Ok(store.list_position_changes(RequestStatus::Pending).await?)
}

/// Approves or rejects a pending request. Approval moves the employee.
pub async fn decide_position_change<S>(
    store: &S,
    request_id: i64,
    decision: Decision,
) -> EmsResult<PositionChangeRequest>
where
    S: EmployeeRepository + PositionChangeRepository,
{
    let Some(mut request) = store.find_position_change(request_id).await? else {
        return Err(EmsError::not_found("Position change request", request_id));
    };
    let target = decision.target_status();
    let already_decided = |status: RequestStatus| EmsError::InvalidTransition {
        entity: "Position change request",
        id: request_id,
        status: status.to_string(),
    };
    if !request.status.is_pending() {
        return Err(already_decided(request.status));
    }

    // The employee moves before the request leaves PENDING, so a failed
    // update leaves the request open for another decision.
    if target == RequestStatus::Approved {
        let update = EmployeeUpdate {
            position: Some(request.new_position.clone()),
            ..Default::default()
        };
        if !store.update_employee(request.employee_id, &update).await? {
            return Err(EmsError::not_found("Employee", request.employee_id));
        }
    }
    if !store.resolve_position_change(request_id, target).await? {
        return Err(already_decided(request.status));
    }
    request.status = target;

    info!(
        request_id,
        employee_id = request.employee_id,
        status = %target,
        "Position change decided"
    );
    Ok(request)
}
