//! End-to-end console sessions.
//!
//! Each test scripts stdin for one or more sessions against a shared store
//! and checks what the console printed and what was persisted.

use std::io::Cursor;
use std::sync::Mutex;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use ems_console::clock::{Clock, FixedClock};
use ems_console::config::ConfigLoader;
use ems_console::domain::staff;
use ems_console::console::{self, AppState, Console, Role};
use ems_console::models::{DayType, Employee, Hr, NewEmployee, NewHr, RequestStatus};
use ems_console::store::{
    self, AttendanceRepository, EmployeeRepository, HrRepository, LeaveRepository, MemoryStore,
    PositionChangeRepository, SqliteStore, Store,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Runs the console over `script` and returns everything it printed.
async fn drive<S: Store>(
    store: &S,
    config: &ConfigLoader,
    now: NaiveDateTime,
    role: Option<Role>,
    script: &str,
) -> String {
    let state = AppState::new(store, config, FixedClock(now));
    let mut terminal = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    console::run_app(&state, &mut terminal, role).await.unwrap();
    String::from_utf8(terminal.into_output()).unwrap()
}

/// A clock that moves forward one minute every time it is read.
struct TickingClock(Mutex<NaiveDateTime>);

impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let mut current = self.0.lock().unwrap();
        let reading = *current;
        *current = reading + Duration::minutes(1);
        reading
    }
}

async fn hire<S: Store>(store: &S) -> Employee {
    store
        .insert_employee(NewEmployee {
            name: "Asha Rao".to_string(),
            password: "pass1".to_string(),
            age: 29,
            gender: "Female".to_string(),
            address: "12 Lake Road".to_string(),
            department: "IT".to_string(),
            position: "Software Engineer".to_string(),
            salary: Decimal::new(50000, 0),
            email: "asha@example.com".to_string(),
            contact_number: "9876543210".to_string(),
            joining_date: date("2026-01-05"),
            degree: "B.Tech".to_string(),
        })
        .await
        .unwrap()
}

async fn hire_hr<S: Store>(store: &S) -> Hr {
    store
        .insert_hr(NewHr {
            name: "Priya Nair".to_string(),
            email: "priya@example.com".to_string(),
            password: "hrpass".to_string(),
            contact_number: "9000011111".to_string(),
            salary: Decimal::new(70000, 0),
            degree: "MBA".to_string(),
        })
        .await
        .unwrap()
}

async fn seeded_store() -> (MemoryStore, ConfigLoader) {
    let store = MemoryStore::new();
    store::seed_manager(&store, "Manager", "admin").await.unwrap();
    (store, ConfigLoader::default_config())
}

// =============================================================================
// Top-level menu
// =============================================================================

#[tokio::test]
async fn test_exit_from_top_menu() {
    let (store, config) = seeded_store().await;
    let out = drive(&store, &config, at("2026-10-14", "09:00:00"), None, "4\n").await;

    assert!(out.contains("--- Employee Management System ---"));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn test_invalid_top_menu_choice_is_reported() {
    let (store, config) = seeded_store().await;
    let out = drive(&store, &config, at("2026-10-14", "09:00:00"), None, "9\n4\n").await;

    assert!(out.contains("Invalid choice. Please try again."));
    assert_eq!(out.matches("--- Employee Management System ---").count(), 2);
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let (store, config) = seeded_store().await;
    // No Exit choice: input simply runs out inside the manager login.
    let out = drive(&store, &config, at("2026-10-14", "09:00:00"), None, "3\n1\n").await;

    assert!(out.contains("--- Manager Login ---"));
    assert!(!out.contains("Goodbye!"));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_manager_login_retries_after_bad_password() {
    let (store, config) = seeded_store().await;
    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Manager),
        "1\nwrong\n1\nadmin\n3\n",
    )
    .await;

    assert!(out.contains("Invalid Manager ID or Password"));
    assert!(out.contains("Welcome, Manager!"));
    assert!(out.contains("Logged out."));
}

#[tokio::test]
async fn test_blank_login_returns_to_top_menu() {
    let (store, config) = seeded_store().await;
    let out = drive(&store, &config, at("2026-10-14", "09:00:00"), None, "2\n\n4\n").await;

    assert!(out.contains("--- Employee Login ---"));
    assert!(!out.contains("Welcome"));
    assert!(out.contains("Goodbye!"));
}

// =============================================================================
// Employee administration
// =============================================================================

#[tokio::test]
async fn test_hr_adds_employee_and_rejects_duplicate_contact() {
    let (store, config) = seeded_store().await;
    let hr = hire_hr(&store).await;

    // IT is department 1; QA Engineer is its fifth position.
    let form = "Ravi Kumar\npass1\n31\nm\n4 Park Lane\n1\n5\n48000\nravi@example.com\n9000000001\nBSc\n";
    let second = "Ravi Menon\npass2\n40\nm\n9 Hill Road\n1\n1\n52000\nmenon@example.com\n9000000001\nMBA\n";
    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Hr),
        &format!("{}\nhrpass\n1\n1\n{form}1\n{second}4\nravi\n6\n8\n", hr.id),
    )
    .await;

    assert!(out.contains("Employee Ravi Kumar added with ID 1."));
    assert!(out.contains("Duplicate record: Email or contact number already exists"));
    assert!(out.contains("QA Engineer"));

    let employees = store.list_employees().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].joining_date, date("2026-10-14"));
    assert_eq!(employees[0].gender, "Male");
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_check_in_then_check_out_full_day() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;
    let login = format!("{}\npass1\n", employee.id);

    let morning = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Employee),
        &format!("{login}1\n1\n7\n"),
    )
    .await;
    assert!(morning.contains("Today (2026-10-14): not checked in"));
    assert!(morning.contains("Checked in at 09:00:00."));

    let evening = drive(
        &store,
        &config,
        at("2026-10-14", "17:30:00"),
        Some(Role::Employee),
        &format!("{login}1\n2\n7\n"),
    )
    .await;
    assert!(evening.contains("Today (2026-10-14): checked in"));
    assert!(evening.contains("Total hours: 8.5"));
    assert!(evening.contains("(Full Day)"));

    let record = store
        .find_attendance(employee.id, date("2026-10-14"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.total_hours, Some(Decimal::new(85, 1)));
    assert_eq!(record.day_type, Some(DayType::FullDay));
}

#[tokio::test]
async fn test_check_in_uses_time_of_choice() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;

    let state = AppState::new(
        &store,
        &config,
        TickingClock(Mutex::new(at("2026-10-14", "09:00:00"))),
    );
    let script = format!("{}\npass1\n1\n1\n7\n", employee.id);
    let mut terminal = Console::new(Cursor::new(script.into_bytes()), Vec::new(), false);
    console::run_app(&state, &mut terminal, Some(Role::Employee))
        .await
        .unwrap();
    let out = String::from_utf8(terminal.into_output()).unwrap();

    assert!(out.contains("Today (2026-10-14): not checked in"));
    assert!(out.contains("Checked in at 09:01:00."));
    let record = store
        .find_attendance(employee.id, date("2026-10-14"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.check_in, at("2026-10-14", "09:01:00").time());
}

#[tokio::test]
async fn test_check_out_without_check_in() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;

    let out = drive(
        &store,
        &config,
        at("2026-10-14", "17:00:00"),
        Some(Role::Employee),
        &format!("{}\npass1\n1\n2\n7\n", employee.id),
    )
    .await;

    assert!(out.contains("You must check-in first!"));
    assert!(out.contains("Logged out."));
    assert!(store.list_attendance(Some(employee.id)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_attendance_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ems.db");
    let config = ConfigLoader::default_config();

    let employee_id = {
        let db = SqliteStore::open(&path).await.unwrap();
        let employee = hire(&db).await;
        drive(
            &db,
            &config,
            at("2026-10-14", "10:00:00"),
            Some(Role::Employee),
            &format!("{}\npass1\n1\n1\n7\n", employee.id),
        )
        .await;
        employee.id
    };

    let db = SqliteStore::open(&path).await.unwrap();
    let out = drive(
        &db,
        &config,
        at("2026-10-14", "13:00:00"),
        Some(Role::Employee),
        &format!("{employee_id}\npass1\n1\n2\n7\n"),
    )
    .await;
    assert!(out.contains("Total hours: 3"));
    assert!(out.contains("(Half Day)"));
}

// =============================================================================
// Leave workflow
// =============================================================================

#[tokio::test]
async fn test_leave_applied_then_approved_once() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;
    let hr = hire_hr(&store).await;
    let now = at("2026-10-14", "09:00:00");

    // Today is rejected as a start date and re-prompted.
    let applied = drive(
        &store,
        &config,
        now,
        Some(Role::Employee),
        &format!(
            "{}\npass1\n2\n2\n2026-10-14\n2026-10-20\n2026-10-18\n2026-10-22\n7\n",
            employee.id
        ),
    )
    .await;
    assert!(applied.contains("Invalid start_date"));
    assert!(applied.contains("Invalid end_date"));
    assert!(applied.contains("status PENDING"));

    let leave = store
        .list_leaves_for_employee(employee.id)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(leave.start_date, date("2026-10-20"));
    assert_eq!(leave.end_date, date("2026-10-22"));

    let decided = drive(
        &store,
        &config,
        now,
        Some(Role::Hr),
        &format!("{}\nhrpass\n2\n2\n{}\nA\n2\n4\n8\n", hr.id, leave.id),
    )
    .await;
    assert!(decided.contains(&format!("Leave {} APPROVED.", leave.id)));
    assert!(decided.contains("No pending leave requests."));

    let stored = store.find_leave(leave.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
}

#[tokio::test]
async fn test_employee_sees_own_leaves() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;

    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Employee),
        &format!("{}\npass1\n3\n2\n1\n2026-11-02\n2026-11-03\n3\n7\n", employee.id),
    )
    .await;

    assert!(out.contains("You have not applied for any leave."));
    assert!(out.contains("Sick Leave"));
    assert!(out.contains("2026-11-02"));
}

// =============================================================================
// Salary
// =============================================================================

#[tokio::test]
async fn test_salary_correction_rejects_non_numeric_input() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;
    let hr = hire_hr(&store).await;

    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Hr),
        &format!(
            "{hr}\nhrpass\n3\n2\n{emp}\nabc\n2\n{emp}\n55000\n3\n8\n",
            hr = hr.id,
            emp = employee.id
        ),
    )
    .await;

    assert!(out.contains("Current salary: 50000"));
    assert!(out.contains("Invalid salary: must be a numeric value"));
    assert!(out.contains("Salary for Asha Rao updated to 55000."));

    let stored = store.find_employee(employee.id).await.unwrap().unwrap();
    assert_eq!(stored.salary, Decimal::new(55000, 0));
}

#[tokio::test]
async fn test_promotion_requires_higher_salary() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;

    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Manager),
        &format!("1\nadmin\n2\n8\n{emp}\n40000\nn\n8\n{emp}\n60000\nn\n11\n3\n", emp = employee.id),
    )
    .await;

    assert!(out.contains("must be greater than current salary 50000"));
    assert!(out.contains("Asha Rao promoted: salary 50000 -> 60000"));
}

// =============================================================================
// Job postings and position changes
// =============================================================================

#[tokio::test]
async fn test_position_change_request_approved_by_manager() {
    let (store, config) = seeded_store().await;
    let employee = hire(&store).await;
    let hr = hire_hr(&store).await;
    let now = at("2026-10-14", "09:00:00");

    // IT is the first department; Data Analyst its second position.
    let posted = drive(
        &store,
        &config,
        now,
        Some(Role::Hr),
        &format!("{}\nhrpass\n5\n1\n1\n2\n3\n3\n8\n", hr.id),
    )
    .await;
    assert!(posted.contains("Data Analyst"));

    let requested = drive(
        &store,
        &config,
        now,
        Some(Role::Employee),
        &format!("{}\npass1\n5\n1\n7\n", employee.id),
    )
    .await;
    assert!(requested.contains("Requested change from Software Engineer to Data Analyst"));

    let request = store
        .list_position_changes(RequestStatus::Pending)
        .await
        .unwrap()
        .remove(0);

    let decided = drive(
        &store,
        &config,
        now,
        Some(Role::Manager),
        &format!("1\nadmin\n2\n7\n{}\nA\n11\n3\n", request.id),
    )
    .await;
    assert!(decided.contains(&format!("Request {} APPROVED.", request.id)));

    let updated = store.find_employee(employee.id).await.unwrap().unwrap();
    assert_eq!(updated.position, "Data Analyst");
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_name_search_agrees_across_stores() {
    let memory = MemoryStore::new();
    let sqlite = SqliteStore::open_in_memory().await.unwrap();
    hire(&memory).await;
    hire(&sqlite).await;

    for (fragment, expected) in [
        ("asha", 1),
        ("HA R", 1),
        ("Rao", 1),
        ("%", 0),
        ("A_ha", 0),
        ("_", 0),
        ("Asha%", 0),
        ("Ravi", 0),
    ] {
        let in_memory = staff::search_by_name(&memory, fragment).await.unwrap();
        let in_sqlite = staff::search_by_name(&sqlite, fragment).await.unwrap();
        assert_eq!(in_memory.len(), expected, "memory store, fragment {fragment:?}");
        assert_eq!(in_sqlite.len(), expected, "sqlite store, fragment {fragment:?}");
    }
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_manager_payroll_report() {
    let (store, config) = seeded_store().await;
    hire(&store).await;
    hire_hr(&store).await;

    let out = drive(
        &store,
        &config,
        at("2026-10-14", "09:00:00"),
        Some(Role::Manager),
        "1\nadmin\n2\n6\n11\n3\n",
    )
    .await;

    assert!(out.contains("Employees"));
    assert!(out.contains("120000"));
    assert!(out.contains("Salary bill"));
}
