//! Job posting and position-change request models.

use serde::{Deserialize, Serialize};

use super::RequestStatus;

/// An open position posted by HR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Unique identifier.
    pub id: i64,
    /// Department of the opening.
    pub department: String,
    /// Position title.
    pub position: String,
    /// Number of openings.
    pub openings: u32,
}

/// Fields required to create a job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    /// Department of the opening.
    pub department: String,
    /// Position title.
    pub position: String,
    /// Number of openings.
    pub openings: u32,
}

impl NewJobPosting {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_posting(self, id: i64) -> JobPosting {
        JobPosting {
            id,
            department: self.department,
            position: self.position,
            openings: self.openings,
        }
    }
}

/// An employee-initiated request to move to another posted position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionChangeRequest {
    /// Unique identifier.
    pub id: i64,
    /// The requesting employee.
    pub employee_id: i64,
    /// The employee's department.
    pub department: String,
    /// Position held when the request was made.
    pub old_position: String,
    /// Requested position.
    pub new_position: String,
    /// Review status.
    pub status: RequestStatus,
}

/// Fields required to file a position-change request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPositionChange {
    /// The requesting employee.
    pub employee_id: i64,
    /// The employee's department.
    pub department: String,
    /// Current position.
    pub old_position: String,
    /// Requested position.
    pub new_position: String,
}

impl NewPositionChange {
    /// Builds the stored record, always pending.
    pub fn into_request(self, id: i64) -> PositionChangeRequest {
        PositionChangeRequest {
            id,
            employee_id: self.employee_id,
            department: self.department,
            old_position: self.old_position,
            new_position: self.new_position,
            status: RequestStatus::Pending,
        }
    }
}
