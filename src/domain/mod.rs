//! Role-independent operations.
//!
//! Every workflow that more than one role performs lives here once and is
//! called by the HR, Employee and Manager consoles. Functions take the
//! narrowest repository trait they need, validate their inputs, log the
//! mutation, and return [`crate::error::EmsResult`].

pub mod attendance;
pub mod auth;
pub mod hr_admin;
pub mod jobs;
pub mod leave;
pub mod ratings;
pub mod reports;
pub mod salary;
pub mod staff;

pub use attendance::{AttendanceState, CheckOutSummary};
pub use hr_admin::HrForm;
pub use leave::LeaveView;
pub use reports::{DepartmentSalary, EmployeeHours, PayrollLine, PayrollSummary};
pub use salary::Promotion;
pub use staff::{EmployeeForm, ProfileUpdate};
