//! Core data models for the employee management console.
//!
//! One record type per table of the persistent store, plus the insert and
//! partial-update shapes the store accepts.

mod attendance;
mod employee;
mod hr;
mod job;
mod leave;
mod manager;
mod performance;
mod status;

pub use attendance::{AttendanceRecord, DayType};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use hr::{Hr, HrUpdate, NewHr};
pub use job::{JobPosting, NewJobPosting, NewPositionChange, PositionChangeRequest};
pub use leave::{Leave, LeaveType, NewLeave};
pub use manager::Manager;
pub use performance::{NewRating, PerformanceRating};
pub use status::{Decision, RequestStatus};
