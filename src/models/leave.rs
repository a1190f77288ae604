//! Leave request model and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RequestStatus;
use crate::error::EmsError;

/// The kind of leave an employee can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    /// Sick leave.
    #[serde(rename = "Sick Leave")]
    Sick,
    /// Vacation leave.
    #[serde(rename = "Vacation Leave")]
    Vacation,
    /// Casual leave.
    #[serde(rename = "Casual Leave")]
    Casual,
}

impl LeaveType {
    /// All leave types in menu order.
    pub const ALL: [LeaveType; 3] = [LeaveType::Sick, LeaveType::Vacation, LeaveType::Casual];

    /// The stored and displayed label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Sick => "Sick Leave",
            LeaveType::Vacation => "Vacation Leave",
            LeaveType::Casual => "Casual Leave",
        }
    }

    /// Maps a 1-based menu choice to a leave type.
    pub fn from_choice(choice: &str) -> Option<LeaveType> {
        match choice.trim() {
            "1" => Some(LeaveType::Sick),
            "2" => Some(LeaveType::Vacation),
            "3" => Some(LeaveType::Casual),
            _ => None,
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = EmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeaveType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EmsError::validation("leave_type", format!("unknown leave type '{s}'")))
    }
}

/// A leave request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    /// Unique identifier.
    pub id: i64,
    /// The requesting employee.
    pub employee_id: i64,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Review status.
    pub status: RequestStatus,
}

impl Leave {
    /// Number of calendar days covered, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Fields required to file a leave request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeave {
    /// The requesting employee.
    pub employee_id: i64,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
}

impl NewLeave {
    /// Builds the stored record, always pending.
    pub fn into_leave(self, id: i64) -> Leave {
        Leave {
            id,
            employee_id: self.employee_id,
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            status: RequestStatus::Pending,
        }
    }
}
