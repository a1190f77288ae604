//! Attendance record model.
//!
//! A record is created on check-in and completed on check-out of the same
//! calendar date.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmsError;

/// Classification of a completed working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    /// Worked at least the full-day threshold.
    #[serde(rename = "Full Day")]
    FullDay,
    /// Worked less than the full-day threshold.
    #[serde(rename = "Half Day")]
    HalfDay,
}

impl DayType {
    /// The stored and displayed label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::FullDay => "Full Day",
            DayType::HalfDay => "Half Day",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = EmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full Day" => Ok(DayType::FullDay),
            "Half Day" => Ok(DayType::HalfDay),
            other => Err(EmsError::validation(
                "day_type",
                format!("unknown day type '{other}'"),
            )),
        }
    }
}

/// One employee's attendance for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: i64,
    /// The employee.
    pub employee_id: i64,
    /// Calendar date of the check-in.
    pub date: NaiveDate,
    /// Check-in time.
    pub check_in: NaiveTime,
    /// Check-out time, once checked out.
    pub check_out: Option<NaiveTime>,
    /// Hours between check-in and check-out, once checked out.
    pub total_hours: Option<Decimal>,
    /// Full/half day classification, once checked out.
    pub day_type: Option<DayType>,
}

impl AttendanceRecord {
    /// Returns true once the check-out has been recorded.
    pub fn is_complete(&self) -> bool {
        self.check_out.is_some()
    }
}
