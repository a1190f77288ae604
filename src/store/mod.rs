//! Persistent store.
//!
//! One repository trait per table, each with explicit find/insert/update/
//! delete methods. Every mutation is a single atomic statement; there are
//! no multi-statement transactions. [`Store`] bundles all repositories and
//! is implemented by [`SqliteStore`] and [`MemoryStore`].

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    AttendanceRecord, DayType, Employee, EmployeeUpdate, Hr, HrUpdate, JobPosting, Leave,
    Manager, NewEmployee, NewHr, NewJobPosting, NewLeave, NewPositionChange, NewRating,
    PerformanceRating, PositionChangeRequest, RequestStatus,
};

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// The database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored value could not be decoded.
    #[error("Corrupt value in column '{column}': {value}")]
    Corrupt {
        /// The column holding the bad value.
        column: &'static str,
        /// The raw stored value.
        value: String,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Employee table.
#[allow(async_fn_in_trait)]
pub trait EmployeeRepository {
    /// All employees ordered by id.
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;
    /// Looks up one employee.
    async fn find_employee(&self, id: i64) -> StoreResult<Option<Employee>>;
    /// Employees whose name contains the fragment, case-insensitively.
    async fn search_employees(&self, name_fragment: &str) -> StoreResult<Vec<Employee>>;
    /// Inserts an employee; email and contact number must be unique.
    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee>;
    /// Applies a partial update. Returns false if the id does not exist.
    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> StoreResult<bool>;
    /// Deletes an employee and the records that reference it.
    async fn delete_employee(&self, id: i64) -> StoreResult<bool>;
}

/// HR table.
#[allow(async_fn_in_trait)]
pub trait HrRepository {
    /// All HR records ordered by id.
    async fn list_hrs(&self) -> StoreResult<Vec<Hr>>;
    /// Looks up one HR record.
    async fn find_hr(&self, id: i64) -> StoreResult<Option<Hr>>;
    /// Inserts an HR record.
    async fn insert_hr(&self, hr: NewHr) -> StoreResult<Hr>;
    /// Applies a partial update. Returns false if the id does not exist.
    async fn update_hr(&self, id: i64, update: &HrUpdate) -> StoreResult<bool>;
    /// Deletes an HR record.
    async fn delete_hr(&self, id: i64) -> StoreResult<bool>;
}

/// Manager table.
#[allow(async_fn_in_trait)]
pub trait ManagerRepository {
    /// Looks up a manager.
    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>>;
    /// Number of manager rows.
    async fn count_managers(&self) -> StoreResult<u64>;
    /// Inserts a manager.
    async fn insert_manager(&self, name: &str, password: &str) -> StoreResult<Manager>;
    /// Replaces a manager's password.
    async fn set_manager_password(&self, id: i64, password: &str) -> StoreResult<bool>;
}

/// Leaves table.
#[allow(async_fn_in_trait)]
pub trait LeaveRepository {
    /// Inserts a pending leave.
    async fn insert_leave(&self, leave: NewLeave) -> StoreResult<Leave>;
    /// Looks up one leave.
    async fn find_leave(&self, id: i64) -> StoreResult<Option<Leave>>;
    /// Leaves with the given status ordered by id.
    async fn list_leaves_by_status(&self, status: RequestStatus) -> StoreResult<Vec<Leave>>;
    /// One employee's leaves ordered by id.
    async fn list_leaves_for_employee(&self, employee_id: i64) -> StoreResult<Vec<Leave>>;
    /// Moves a leave out of PENDING. Returns false unless it was pending.
    async fn resolve_leave(&self, id: i64, status: RequestStatus) -> StoreResult<bool>;
}

/// Employee attendance table.
#[allow(async_fn_in_trait)]
pub trait AttendanceRepository {
    /// The record for an employee on a date.
    async fn find_attendance(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>>;
    /// Creates the day's record with a check-in time.
    async fn insert_check_in(
        &self,
        employee_id: i64,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> StoreResult<AttendanceRecord>;
    /// Sets check-out, hours and day type on a record not yet checked out.
    /// Returns false if the record is missing or already complete.
    async fn complete_attendance(
        &self,
        id: i64,
        check_out: NaiveTime,
        total_hours: Decimal,
        day_type: DayType,
    ) -> StoreResult<bool>;
    /// Records for one employee, or all employees, ordered by date.
    async fn list_attendance(&self, employee_id: Option<i64>)
    -> StoreResult<Vec<AttendanceRecord>>;
}

/// Job posting table.
#[allow(async_fn_in_trait)]
pub trait JobPostingRepository {
    /// Inserts a posting.
    async fn insert_job_posting(&self, posting: NewJobPosting) -> StoreResult<JobPosting>;
    /// Postings in one department, or all, ordered by id.
    async fn list_job_postings(&self, department: Option<&str>) -> StoreResult<Vec<JobPosting>>;
}

/// Job position change request table.
#[allow(async_fn_in_trait)]
pub trait PositionChangeRepository {
    /// Inserts a pending request.
    async fn insert_position_change(
        &self,
        request: NewPositionChange,
    ) -> StoreResult<PositionChangeRequest>;
    /// Looks up one request.
    async fn find_position_change(&self, id: i64) -> StoreResult<Option<PositionChangeRequest>>;
    /// Requests with the given status ordered by id.
    async fn list_position_changes(
        &self,
        status: RequestStatus,
    ) -> StoreResult<Vec<PositionChangeRequest>>;
    /// Moves a request out of PENDING. Returns false unless it was pending.
    async fn resolve_position_change(&self, id: i64, status: RequestStatus) -> StoreResult<bool>;
}

/// Employee performance table.
#[allow(async_fn_in_trait)]
pub trait PerformanceRepository {
    /// Appends a rating.
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<PerformanceRating>;
    /// All ratings ordered by id.
    async fn list_ratings(&self) -> StoreResult<Vec<PerformanceRating>>;
}

/// Every repository the console needs.
pub trait Store:
    EmployeeRepository
    + HrRepository
    + ManagerRepository
    + LeaveRepository
    + AttendanceRepository
    + JobPostingRepository
    + PositionChangeRepository
    + PerformanceRepository
{
}

impl<T> Store for T where
    T: EmployeeRepository
        + HrRepository
        + ManagerRepository
        + LeaveRepository
        + AttendanceRepository
        + JobPostingRepository
        + PositionChangeRepository
        + PerformanceRepository
{
}

/// Inserts the configured manager if the table is empty.
pub async fn seed_manager<S: ManagerRepository>(
    store: &S,
    name: &str,
    password: &str,
) -> StoreResult<Option<Manager>> {
    if store.count_managers().await? > 0 {
        return Ok(None);
    }
    let manager = store.insert_manager(name, password).await?;
    tracing::info!(manager_id = manager.id, "Seeded manager account");
    Ok(Some(manager))
}
