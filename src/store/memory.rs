//! In-memory store used by tests and benchmarks.
//!
//! Enforces the same uniqueness and cascade rules as the SQLite schema.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

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

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    employees: Table<Employee>,
    hrs: Table<Hr>,
    managers: Table<Manager>,
    leaves: Table<Leave>,
    attendance: Table<AttendanceRecord>,
    job_postings: Table<JobPosting>,
    position_changes: Table<PositionChangeRequest>,
    ratings: Table<PerformanceRating>,
}

impl Tables {
    fn check_employee_unique(
        &self,
        skip_id: Option<i64>,
        email: Option<&str>,
        contact_number: Option<&str>,
    ) -> StoreResult<()> {
        for (id, other) in &self.employees.rows {
            if Some(*id) == skip_id {
                continue;
            }
            if email.is_some_and(|e| e == other.email) {
                return Err(StoreError::Duplicate(
                    "UNIQUE constraint failed: employee.email".to_string(),
                ));
            }
            if contact_number.is_some_and(|c| c == other.contact_number) {
                return Err(StoreError::Duplicate(
                    "UNIQUE constraint failed: employee.contact_number".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn require_employee(&self, employee_id: i64) -> StoreResult<()> {
        if self.employees.rows.contains_key(&employee_id) {
            Ok(())
        } else {
            Err(StoreError::Database(
                "FOREIGN KEY constraint failed".to_string(),
            ))
        }
    }
}

/// Store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmployeeRepository for MemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.tables.read().await.employees.rows.values().cloned().collect())
    }

    async fn find_employee(&self, id: i64) -> StoreResult<Option<Employee>> {
        Ok(self.tables.read().await.employees.rows.get(&id).cloned())
    }

    async fn search_employees(&self, name_fragment: &str) -> StoreResult<Vec<Employee>> {
        let needle = name_fragment.to_ascii_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .rows
            .values()
            .filter(|e| e.name.to_ascii_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let mut tables = self.tables.write().await;
        tables.check_employee_unique(
            None,
            Some(&employee.email),
            Some(&employee.contact_number),
        )?;
        let id = tables.employees.allocate();
        let employee = employee.into_employee(id);
        tables.employees.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, id: i64, update: &EmployeeUpdate) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.employees.rows.contains_key(&id) {
            return Ok(false);
        }
        tables.check_employee_unique(
            Some(id),
            update.email.as_deref(),
            update.contact_number.as_deref(),
        )?;
        if let Some(employee) = tables.employees.rows.get_mut(&id) {
            update.apply_to(employee);
        }
        Ok(true)
    }

    async fn delete_employee(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.employees.rows.remove(&id).is_none() {
            return Ok(false);
        }
        tables.leaves.rows.retain(|_, l| l.employee_id != id);
        tables.attendance.rows.retain(|_, a| a.employee_id != id);
        tables.position_changes.rows.retain(|_, p| p.employee_id != id);
        tables.ratings.rows.retain(|_, r| r.employee_id != id);
        Ok(true)
    }
}

impl HrRepository for MemoryStore {
    async fn list_hrs(&self) -> StoreResult<Vec<Hr>> {
        Ok(self.tables.read().await.hrs.rows.values().cloned().collect())
    }

    async fn find_hr(&self, id: i64) -> StoreResult<Option<Hr>> {
        Ok(self.tables.read().await.hrs.rows.get(&id).cloned())
    }

    async fn insert_hr(&self, hr: NewHr) -> StoreResult<Hr> {
        let mut tables = self.tables.write().await;
        let id = tables.hrs.allocate();
        let hr = hr.into_hr(id);
        tables.hrs.rows.insert(id, hr.clone());
        Ok(hr)
    }

    async fn update_hr(&self, id: i64, update: &HrUpdate) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.hrs.rows.get_mut(&id) {
            Some(hr) => {
                update.apply_to(hr);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_hr(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.hrs.rows.remove(&id).is_some())
    }
}

impl ManagerRepository for MemoryStore {
    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>> {
        Ok(self.tables.read().await.managers.rows.get(&id).cloned())
    }

    async fn count_managers(&self) -> StoreResult<u64> {
        Ok(self.tables.read().await.managers.rows.len() as u64)
    }

    async fn insert_manager(&self, name: &str, password: &str) -> StoreResult<Manager> {
        let mut tables = self.tables.write().await;
        let id = tables.managers.allocate();
        let manager = Manager {
            id,
            name: name.to_string(),
            password: password.to_string(),
        };
        tables.managers.rows.insert(id, manager.clone());
        Ok(manager)
    }

    async fn set_manager_password(&self, id: i64, password: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.managers.rows.get_mut(&id) {
            Some(manager) => {
                manager.password = password.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl LeaveRepository for MemoryStore {
    async fn insert_leave(&self, leave: NewLeave) -> StoreResult<Leave> {
        let mut tables = self.tables.write().await;
        tables.require_employee(leave.employee_id)?;
        let id = tables.leaves.allocate();
        let leave = leave.into_leave(id);
        tables.leaves.rows.insert(id, leave.clone());
        Ok(leave)
    }

    async fn find_leave(&self, id: i64) -> StoreResult<Option<Leave>> {
        Ok(self.tables.read().await.leaves.rows.get(&id).cloned())
    }

    async fn list_leaves_by_status(&self, status: RequestStatus) -> StoreResult<Vec<Leave>> {
        let tables = self.tables.read().await;
        Ok(tables
            .leaves
            .rows
            .values()
            .filter(|l| l.status == status)
            .cloned()
            .collect())
    }

    async fn list_leaves_for_employee(&self, employee_id: i64) -> StoreResult<Vec<Leave>> {
        let tables = self.tables.read().await;
        Ok(tables
            .leaves
            .rows
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn resolve_leave(&self, id: i64, status: RequestStatus) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.leaves.rows.get_mut(&id) {
            Some(leave) if leave.status.is_pending() => {
                leave.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl AttendanceRepository for MemoryStore {
    async fn find_attendance(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .rows
            .values()
            .find(|a| a.employee_id == employee_id && a.date == date)
            .cloned())
    }

    async fn insert_check_in(
        &self,
        employee_id: i64,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> StoreResult<AttendanceRecord> {
        let mut tables = self.tables.write().await;
        tables.require_employee(employee_id)?;
        if tables
            .attendance
            .rows
            .values()
            .any(|a| a.employee_id == employee_id && a.date == date)
        {
            return Err(StoreError::Duplicate(
                "UNIQUE constraint failed: attendance.employee_id, attendance.date".to_string(),
            ));
        }
        let id = tables.attendance.allocate();
        let record = AttendanceRecord {
            id,
            employee_id,
            date,
            check_in,
            check_out: None,
            total_hours: None,
            day_type: None,
        };
        tables.attendance.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn complete_attendance(
        &self,
        id: i64,
        check_out: NaiveTime,
        total_hours: Decimal,
        day_type: DayType,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.attendance.rows.get_mut(&id) {
            Some(record) if record.check_out.is_none() => {
                record.check_out = Some(check_out);
                record.total_hours = Some(total_hours);
                record.day_type = Some(day_type);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_attendance(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<AttendanceRecord> = tables
            .attendance
            .rows
            .values()
            .filter(|a| employee_id.is_none_or(|id| a.employee_id == id))
            .cloned()
            .collect();
        records.sort_by(|left, right| left.date.cmp(&right.date).then(left.id.cmp(&right.id)));
        Ok(records)
    }
}

impl JobPostingRepository for MemoryStore {
    async fn insert_job_posting(&self, posting: NewJobPosting) -> StoreResult<JobPosting> {
        let mut tables = self.tables.write().await;
        let id = tables.job_postings.allocate();
        let posting = posting.into_posting(id);
        tables.job_postings.rows.insert(id, posting.clone());
        Ok(posting)
    }

    async fn list_job_postings(&self, department: Option<&str>) -> StoreResult<Vec<JobPosting>> {
        let tables = self.tables.read().await;
        Ok(tables
            .job_postings
            .rows
            .values()
            .filter(|p| department.is_none_or(|d| p.department == d))
            .cloned()
            .collect())
    }
}

impl PositionChangeRepository for MemoryStore {
    async fn insert_position_change(
        &self,
        request: NewPositionChange,
    ) -> StoreResult<PositionChangeRequest> {
        let mut tables = self.tables.write().await;
        tables.require_employee(request.employee_id)?;
        let id = tables.position_changes.allocate();
        let request = request.into_request(id);
        tables.position_changes.rows.insert(id, request.clone());
        Ok(request)
    }

    async fn find_position_change(&self, id: i64) -> StoreResult<Option<PositionChangeRequest>> {
        Ok(self.tables.read().await.position_changes.rows.get(&id).cloned())
    }

    async fn list_position_changes(
        &self,
        status: RequestStatus,
    ) -> StoreResult<Vec<PositionChangeRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .position_changes
            .rows
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect())
    }

    async fn resolve_position_change(&self, id: i64, status: RequestStatus) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.position_changes.rows.get_mut(&id) {
            Some(request) if request.status.is_pending() => {
                request.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl PerformanceRepository for MemoryStore {
    async fn insert_rating(&self, rating: NewRating) -> StoreResult<PerformanceRating> {
        let mut tables = self.tables.write().await;
        tables.require_employee(rating.employee_id)?;
        let id = tables.ratings.allocate();
        let rating = rating.into_rating(id);
        tables.ratings.rows.insert(id, rating.clone());
        Ok(rating)
    }

    async fn list_ratings(&self) -> StoreResult<Vec<PerformanceRating>> {
        Ok(self.tables.read().await.ratings.rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(email: &str, contact: &str) -> NewEmployee {
        NewEmployee {
            name: "Asha Menon".to_string(),
            password: "secret".to_string(),
            age: 28,
            gender: "Female".to_string(),
            address: "12 Hill Road".to_string(),
            department: "Finance".to_string(),
            position: "Auditor".to_string(),
            salary: Decimal::new(52000, 0),
            email: email.to_string(),
            contact_number: contact.to_string(),
            joining_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            degree: "MBA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store
            .insert_employee(new_employee("a@example.com", "9000000001"))
            .await
            .unwrap();
        let b = store
            .insert_employee(new_employee("b@example.com", "9000000002"))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn test_update_to_taken_contact_number_is_duplicate() {
        let store = MemoryStore::new();
        store
            .insert_employee(new_employee("a@example.com", "9000000001"))
            .await
            .unwrap();
        let b = store
            .insert_employee(new_employee("b@example.com", "9000000002"))
            .await
            .unwrap();

        let update = EmployeeUpdate {
            contact_number: Some("9000000001".to_string()),
            ..Default::default()
        };
        let result = store.update_employee(b.id, &update).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        let own = EmployeeUpdate {
            contact_number: Some("9000000002".to_string()),
            ..Default::default()
        };
        assert!(store.update_employee(b.id, &own).await.unwrap());
    }

    #[tokio::test]
    async fn test_leave_for_unknown_employee_is_rejected() {
        let store = MemoryStore::new();
        let result = store
            .insert_leave(NewLeave {
                employee_id: 42,
                leave_type: crate::models::LeaveType::Casual,
                start_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_delete_employee_cascades() {
        let store = MemoryStore::new();
        let employee = store
            .insert_employee(new_employee("a@example.com", "9000000001"))
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        store
            .insert_check_in(employee.id, day, NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .await
            .unwrap();
        store
            .insert_rating(NewRating {
                employee_id: employee.id,
                rated_by: "Manager".to_string(),
                score: 4,
                comments: "Solid quarter".to_string(),
            })
            .await
            .unwrap();

        assert!(store.delete_employee(employee.id).await.unwrap());
        assert!(store.list_attendance(None).await.unwrap().is_empty());
        assert!(store.list_ratings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_job_postings_filter_by_department() {
        let store = MemoryStore::new();
        for (department, position) in [("IT", "QA Engineer"), ("Finance", "Auditor")] {
            store
                .insert_job_posting(NewJobPosting {
                    department: department.to_string(),
                    position: position.to_string(),
                    openings: 2,
                })
                .await
                .unwrap();
        }
        let it = store.list_job_postings(Some("IT")).await.unwrap();
        assert_eq!(it.len(), 1);
        assert_eq!(it[0].position, "QA Engineer");
        assert_eq!(store.list_job_postings(None).await.unwrap().len(), 2);
    }
}
