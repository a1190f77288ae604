//! SQLite implementation of the store.
//!
//! Money and hours are stored as decimal TEXT; dates and times go through
//! sqlx's chrono support as ISO TEXT. The schema is created on open with
//! `CREATE TABLE IF NOT EXISTS`.

use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::{debug, info};

use super::{
    AttendanceRepository, EmployeeRepository, HrRepository, JobPostingRepository,
    LeaveRepository, ManagerRepository, PerformanceRepository, PositionChangeRepository,
    StoreError, StoreResult,
};
use crate::models::{
    AttendanceRecord, DayType, Employee, EmployeeUpdate, Hr, HrUpdate, JobPosting, Leave,
    Manager, NewEmployee, NewHr, NewJobPosting, NewLeave, NewPositionChange, NewRating,
    PerformanceRating, PositionChangeRequest, RequestStatus,
};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS employee (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        password TEXT NOT NULL,
        age INTEGER NOT NULL,
        gender TEXT NOT NULL,
        address TEXT NOT NULL,
        department TEXT NOT NULL,
        position TEXT NOT NULL,
        salary TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        contact_number TEXT NOT NULL UNIQUE,
        joining_date TEXT NOT NULL,
        degree TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS hr (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        contact_number TEXT NOT NULL,
        salary TEXT NOT NULL,
        degree TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS manager (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS leave_request (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
        leave_type TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'PENDING'
    )",
    "CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT,
        total_hours TEXT,
        day_type TEXT,
        UNIQUE(employee_id, date)
    )",
    "CREATE TABLE IF NOT EXISTS job_posting (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        department TEXT NOT NULL,
        position TEXT NOT NULL,
        openings INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS position_change_request (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
        department TEXT NOT NULL,
        old_position TEXT NOT NULL,
        new_position TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'PENDING'
    )",
    "CREATE TABLE IF NOT EXISTS performance_rating (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employee(id) ON DELETE CASCADE,
        rated_by TEXT NOT NULL,
        score INTEGER NOT NULL,
        comments TEXT NOT NULL
    )",
];

const EMPLOYEE_COLUMNS: &str = "id, name, password, age, gender, address, department, position, \
     salary, email, contact_number, joining_date, degree";
const HR_COLUMNS: &str = "id, name, email, password, contact_number, salary, degree";
const LEAVE_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, status";
const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, date, check_in, check_out, total_hours, day_type";
const POSITION_CHANGE_COLUMNS: &str =
    "id, employee_id, department, old_position, new_position, status";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate(db_err.message().to_string());
            }
        }
        StoreError::Database(err.to_string())
    }
}

fn decimal(column: &'static str, raw: &str) -> StoreResult<Decimal> {
    Decimal::from_str(raw).map_err(|_| StoreError::Corrupt {
        column,
        value: raw.to_string(),
    })
}

fn parsed<T: FromStr>(column: &'static str, raw: &str) -> StoreResult<T> {
    raw.parse().map_err(|_| StoreError::Corrupt {
        column,
        value: raw.to_string(),
    })
}

fn narrowed<T: TryFrom<i64>>(column: &'static str, raw: i64) -> StoreResult<T> {
    T::try_from(raw).map_err(|_| StoreError::Corrupt {
        column,
        value: raw.to_string(),
    })
}

#[derive(FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    password: String,
    age: i64,
    gender: String,
    address: String,
    department: String,
    position: String,
    salary: String,
    email: String,
    contact_number: String,
    joining_date: NaiveDate,
    degree: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> StoreResult<Self> {
        Ok(Employee {
            id: row.id,
            name: row.name,
            password: row.password,
            age: narrowed("employee.age", row.age)?,
            gender: row.gender,
            address: row.address,
            department: row.department,
            position: row.position,
            salary: decimal("employee.salary", &row.salary)?,
            email: row.email,
            contact_number: row.contact_number,
            joining_date: row.joining_date,
            degree: row.degree,
        })
    }
}

#[derive(FromRow)]
struct HrRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    contact_number: String,
    salary: String,
    degree: String,
}

impl TryFrom<HrRow> for Hr {
    type Error = StoreError;

    fn try_from(row: HrRow) -> StoreResult<Self> {
        Ok(Hr {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            contact_number: row.contact_number,
            salary: decimal("hr.salary", &row.salary)?,
            degree: row.degree,
        })
    }
}

#[derive(FromRow)]
struct ManagerRow {
    id: i64,
    name: String,
    password: String,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Manager {
            id: row.id,
            name: row.name,
            password: row.password,
        }
    }
}

#[derive(FromRow)]
struct LeaveRow {
    id: i64,
    employee_id: i64,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
}

impl TryFrom<LeaveRow> for Leave {
    type Error = StoreError;

    fn try_from(row: LeaveRow) -> StoreResult<Self> {
        Ok(Leave {
            id: row.id,
            employee_id: row.employee_id,
            leave_type: parsed("leave_request.leave_type", &row.leave_type)?,
            start_date: row.start_date,
            end_date: row.end_date,
            status: parsed("leave_request.status", &row.status)?,
        })
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    id: i64,
    employee_id: i64,
    date: NaiveDate,
    check_in: NaiveTime,
    check_out: Option<NaiveTime>,
    total_hours: Option<String>,
    day_type: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> StoreResult<Self> {
        Ok(AttendanceRecord {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            check_in: row.check_in,
            check_out: row.check_out,
            total_hours: row
                .total_hours
                .as_deref()
                .map(|h| decimal("attendance.total_hours", h))
                .transpose()?,
            day_type: row
                .day_type
                .as_deref()
                .map(|d| parsed::<DayType>("attendance.day_type", d))
                .transpose()?,
        })
    }
}

#[derive(FromRow)]
struct JobPostingRow {
    id: i64,
    department: String,
    position: String,
    openings: i64,
}

impl TryFrom<JobPostingRow> for JobPosting {
    type Error = StoreError;

    fn try_from(row: JobPostingRow) -> StoreResult<Self> {
        Ok(JobPosting {
            id: row.id,
            department: row.department,
            position: row.position,
            openings: narrowed("job_posting.openings", row.openings)?,
        })
    }
}

#[derive(FromRow)]
struct PositionChangeRow {
    id: i64,
    employee_id: i64,
    department: String,
    old_position: String,
    new_position: String,
    status: String,
}

impl TryFrom<PositionChangeRow> for PositionChangeRequest {
    type Error = StoreError;

    fn try_from(row: PositionChangeRow) -> StoreResult<Self> {
        Ok(PositionChangeRequest {
            id: row.id,
            employee_id: row.employee_id,
            department: row.department,
            old_position: row.old_position,
            new_position: row.new_position,
            status: parsed("position_change_request.status", &row.status)?,
        })
    }
}

#[derive(FromRow)]
struct RatingRow {
    id: i64,
    employee_id: i64,
    rated_by: String,
    score: i64,
    comments: String,
}

impl TryFrom<RatingRow> for PerformanceRating {
    type Error = StoreError;

    fn try_from(row: RatingRow) -> StoreResult<Self> {
        Ok(PerformanceRating {
            id: row.id,
            employee_id: row.employee_id,
            rated_by: row.rated_by,
            score: narrowed("performance_rating.score", row.score)?,
            comments: row.comments,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Store backed by a SQLite database through sqlx.
///
/// A single pooled connection serves the one interactive session.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database file and ensures the schema.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        info!(path = %path.display(), "Database opened");
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // The database lives exactly as long as its one connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!(tables = SCHEMA.len(), "Schema ensured");
        Ok(())
    }
}

impl EmployeeRepository for SqliteStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn find_employee(&self, id: i64) -> StoreResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Employee::try_from).transpose()
    }

    async fn search_employees(&self, name_fragment: &str) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee \
             WHERE instr(lower(name), lower(?)) > 0 ORDER BY id"
        ))
        .bind(name_fragment)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let result = sqlx::query(
            "INSERT INTO employee (name, password, age, gender, address, department, position, \
             salary, email, contact_number, joining_date, degree) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&employee.name)
        .bind(&employee.password)
        .bind(i64::from(employee.age))
        .bind(&employee.gender)
        .bind(&employee.address)
        .bind(&employee.department)
        .bind(&employee.position)
        .bind(employee.salary.to_string())
        .bind(&employee.email)
        .bind(&employee.contact_number)
        .bind(employee.joining_date)
        .bind(&employee.degree)
        .execute(&self.pool)
        .await?;
        Ok(employee.into_employee(result.last_insert_rowid()))
    }

    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> StoreResult<bool> {
        if update.is_empty() {
            return Ok(self.find_employee(id).await?.is_some());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE employee SET ");
        let mut fields = builder.separated(", ");
        if let Some(password) = &update.password {
            fields.push("password = ").push_bind_unseparated(password.clone());
        }
        if let Some(age) = update.age {
            fields.push("age = ").push_bind_unseparated(i64::from(age));
        }
        if let Some(address) = &update.address {
            fields.push("address = ").push_bind_unseparated(address.clone());
        }
        if let Some(department) = &update.department {
            fields
                .push("department = ")
                .push_bind_unseparated(department.clone());
        }
        if let Some(position) = &update.position {
            fields.push("position = ").push_bind_unseparated(position.clone());
        }
        if let Some(salary) = update.salary {
            fields.push("salary = ").push_bind_unseparated(salary.to_string());
        }
        if let Some(email) = &update.email {
            fields.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(contact_number) = &update.contact_number {
            fields
                .push("contact_number = ")
                .push_bind_unseparated(contact_number.clone());
        }
        if let Some(degree) = &update.degree {
            fields.push("degree = ").push_bind_unseparated(degree.clone());
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_employee(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employee WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl HrRepository for SqliteStore {
    async fn list_hrs(&self) -> StoreResult<Vec<Hr>> {
        let rows = sqlx::query_as::<_, HrRow>(&format!("SELECT {HR_COLUMNS} FROM hr ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    async fn find_hr(&self, id: i64) -> StoreResult<Option<Hr>> {
        let row = sqlx::query_as::<_, HrRow>(&format!("SELECT {HR_COLUMNS} FROM hr WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Hr::try_from).transpose()
    }

    async fn insert_hr(&self, hr: NewHr) -> StoreResult<Hr> {
        let result = sqlx::query(
            "INSERT INTO hr (name, email, password, contact_number, salary, degree) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&hr.name)
        .bind(&hr.email)
        .bind(&hr.password)
        .bind(&hr.contact_number)
        .bind(hr.salary.to_string())
        .bind(&hr.degree)
        .execute(&self.pool)
        .await?;
        Ok(hr.into_hr(result.last_insert_rowid()))
    }

    async fn update_hr(&self, id: i64, update: &HrUpdate) -> StoreResult<bool> {
        if update.is_empty() {
            return Ok(self.find_hr(id).await?.is_some());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE hr SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = &update.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(email) = &update.email {
            fields.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(contact_number) = &update.contact_number {
            fields
                .push("contact_number = ")
                .push_bind_unseparated(contact_number.clone());
        }
        if let Some(salary) = update.salary {
            fields.push("salary = ").push_bind_unseparated(salary.to_string());
        }
        if let Some(degree) = &update.degree {
            fields.push("degree = ").push_bind_unseparated(degree.clone());
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_hr(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM hr WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl ManagerRepository for SqliteStore {
    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(
            "SELECT id, name, password FROM manager WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Manager::from))
    }

    async fn count_managers(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manager")
            .fetch_one(&self.pool)
            .await?;
        narrowed("manager.count", count)
    }

    async fn insert_manager(&self, name: &str, password: &str) -> StoreResult<Manager> {
        let result = sqlx::query("INSERT INTO manager (name, password) VALUES (?, ?)")
            .bind(name)
            .bind(password)
            .execute(&self.pool)
            .await?;
        Ok(Manager {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            password: password.to_string(),
        })
    }

    async fn set_manager_password(&self, id: i64, password: &str) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE manager SET password = ? WHERE id = ?")
            .bind(password)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl LeaveRepository for SqliteStore {
    async fn insert_leave(&self, leave: NewLeave) -> StoreResult<Leave> {
        let result = sqlx::query(
            "INSERT INTO leave_request (employee_id, leave_type, start_date, end_date, status) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(leave.employee_id)
        .bind(leave.leave_type.as_str())
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(RequestStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;
        Ok(leave.into_leave(result.last_insert_rowid()))
    }

    async fn find_leave(&self, id: i64) -> StoreResult<Option<Leave>> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_request WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Leave::try_from).transpose()
    }

    async fn list_leaves_by_status(&self, status: RequestStatus) -> StoreResult<Vec<Leave>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_request WHERE status = ? ORDER BY id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn list_leaves_for_employee(&self, employee_id: i64) -> StoreResult<Vec<Leave>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_request WHERE employee_id = ? ORDER BY id"
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn resolve_leave(&self, id: i64, status: RequestStatus) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE leave_request SET status = ? WHERE id = ? AND status = 'PENDING'",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

impl AttendanceRepository for SqliteStore {
    async fn find_attendance(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE employee_id = ? AND date = ?"
        ))
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn insert_check_in(
        &self,
        employee_id: i64,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> StoreResult<AttendanceRecord> {
        let result =
            sqlx::query("INSERT INTO attendance (employee_id, date, check_in) VALUES (?, ?, ?)")
                .bind(employee_id)
                .bind(date)
                .bind(check_in)
                .execute(&self.pool)
                .await?;
        Ok(AttendanceRecord {
            id: result.last_insert_rowid(),
            employee_id,
            date,
            check_in,
            check_out: None,
            total_hours: None,
            day_type: None,
        })
    }

    async fn complete_attendance(
        &self,
        id: i64,
        check_out: NaiveTime,
        total_hours: Decimal,
        day_type: DayType,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE attendance SET check_out = ?, total_hours = ?, day_type = ? \
             WHERE id = ? AND check_out IS NULL",
        )
        .bind(check_out)
        .bind(total_hours.to_string())
        .bind(day_type.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_attendance(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let rows = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE employee_id = ? \
                     ORDER BY date, id"
                ))
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceRow>(&format!(
                    "SELECT {ATTENDANCE_COLUMNS} FROM attendance ORDER BY date, id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        convert_all(rows)
    }
}

impl JobPostingRepository for SqliteStore {
    async fn insert_job_posting(&self, posting: NewJobPosting) -> StoreResult<JobPosting> {
        let result = sqlx::query(
            "INSERT INTO job_posting (department, position, openings) VALUES (?, ?, ?)",
        )
        .bind(&posting.department)
        .bind(&posting.position)
        .bind(i64::from(posting.openings))
        .execute(&self.pool)
        .await?;
        Ok(posting.into_posting(result.last_insert_rowid()))
    }

    async fn list_job_postings(&self, department: Option<&str>) -> StoreResult<Vec<JobPosting>> {
        let rows = match department {
            Some(department) => {
                sqlx::query_as::<_, JobPostingRow>(
                    "SELECT id, department, position, openings FROM job_posting \
                     WHERE department = ? ORDER BY id",
                )
                .bind(department)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JobPostingRow>(
                    "SELECT id, department, position, openings FROM job_posting ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        convert_all(rows)
    }
}

impl PositionChangeRepository for SqliteStore {
    async fn insert_position_change(
        &self,
        request: NewPositionChange,
    ) -> StoreResult<PositionChangeRequest> {
        let result = sqlx::query(
            "INSERT INTO position_change_request \
             (employee_id, department, old_position, new_position, status) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.employee_id)
        .bind(&request.department)
        .bind(&request.old_position)
        .bind(&request.new_position)
        .bind(RequestStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;
        Ok(request.into_request(result.last_insert_rowid()))
    }

    async fn find_position_change(&self, id: i64) -> StoreResult<Option<PositionChangeRequest>> {
        let row = sqlx::query_as::<_, PositionChangeRow>(&format!(
            "SELECT {POSITION_CHANGE_COLUMNS} FROM position_change_request WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(PositionChangeRequest::try_from).transpose()
    }

    async fn list_position_changes(
        &self,
        status: RequestStatus,
    ) -> StoreResult<Vec<PositionChangeRequest>> {
        let rows = sqlx::query_as::<_, PositionChangeRow>(&format!(
            "SELECT {POSITION_CHANGE_COLUMNS} FROM position_change_request \
             WHERE status = ? ORDER BY id"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn resolve_position_change(&self, id: i64, status: RequestStatus) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE position_change_request SET status = ? WHERE id = ? AND status = 'PENDING'",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

impl PerformanceRepository for SqliteStore {
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<PerformanceRating> {
        let result = sqlx::query(
            "INSERT INTO performance_rating (employee_id, rated_by, score, comments) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(rating.employee_id)
        .bind(&rating.rated_by)
        .bind(i64::from(rating.score))
        .bind(&rating.comments)
        .execute(&self.pool)
        .await?;
        Ok(rating.into_rating(result.last_insert_rowid()))
    }

    async fn list_ratings(&self) -> StoreResult<Vec<PerformanceRating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            "SELECT id, employee_id, rated_by, score, comments FROM performance_rating ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }
}
