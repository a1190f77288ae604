//! The Employee session.

use std::io::{BufRead, Write};

use tracing::Instrument;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{self, AttendanceState, ProfileUpdate};
use crate::error::{EmsError, EmsResult};
use crate::models::{Employee, LeaveType};
use crate::store::Store;
use crate::validation;

use super::common::{leave_table, posting_table, read_id};
use super::io::Console;
use super::state::AppState;
use super::table::render_table;

const MENU: &[&str] = &[
    "Mark Attendance",
    "Apply Leave",
    "View Applied Leaves",
    "Check Salary",
    "Request Job Position Change",
    "View & Update Profile",
    "Logout",
];

async fn login<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<Option<Employee>> {
    console.heading("Employee Login")?;
    loop {
        let id = console.prompt_optional("Employee ID (blank to go back): ", |raw| {
            validation::record_id("employee_id", raw)
        })?;
        let Some(id) = id else {
            return Ok(None);
        };
        let password = console.prompt("Password: ")?;
        match domain::auth::login_employee(state.store(), id, &password).await {
            Ok(employee) => return Ok(Some(employee)),
            Err(e @ EmsError::InvalidCredentials { .. }) => console.error(e)?,
            Err(e) => return Err(e),
        }
    }
}

/// Logs an employee in and runs their menu until logout.
pub async fn run<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let Some(employee) = login(state, console).await? else {
        return Ok(());
    };
    let span = tracing::info_span!(
        "session",
        role = "employee",
        employee_id = employee.id,
        session_id = %Uuid::new_v4()
    );
    menu_loop(state, console, employee).instrument(span).await
}

async fn menu_loop<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: Employee,
) -> EmsResult<()> {
    console.success(format!("Welcome, {}!", employee.name))?;
    loop {
        let choice = console.menu("Employee Menu", MENU)?;
        let result = match choice.as_str() {
            "1" => mark_attendance(state, console, &employee).await,
            "2" => apply_leave(state, console, &employee).await,
            "3" => view_leaves(state, console, &employee).await,
            "4" => check_salary(state, console, &employee).await,
            "5" => request_position_change(state, console, &employee).await,
            "6" => update_profile(state, console, &employee).await,
            "7" => return console.info("Logged out."),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn mark_attendance<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    let today = state.clock().today();
    let status = domain::attendance::attendance_state(state.store(), employee.id, today).await?;
    let label = match status {
        AttendanceState::NoRecord => "not checked in",
        AttendanceState::CheckedIn => "checked in",
        AttendanceState::Completed => "checked out",
    };
    console.info(format!("Today ({today}): {label}"))?;

    let choice = console.menu("Mark Attendance", &["Check-In", "Check-Out", "Back"])?;
    // Stamped when the choice is made, not when the menu was shown.
    match choice.as_str() {
        "1" => {
            let now = state.clock().now();
            let record = domain::attendance::check_in(state.store(), employee.id, now).await?;
            console.success(format!("Checked in at {}.", record.check_in))
        }
        "2" => {
            let now = state.clock().now();
            let summary = domain::attendance::check_out(
                state.store(),
                employee.id,
                now,
                &state.settings().attendance,
            )
            .await?;
            console.success(format!(
                "Checked out. Total hours: {} ({}).",
                summary.total_hours, summary.day_type
            ))
        }
        "3" => Ok(()),
        _ => console.error("Invalid choice. Please try again."),
    }
}

async fn apply_leave<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    console.heading("Apply Leave")?;
    let index = console.choose("Select leave type: ", &LeaveType::ALL)?;
    let leave_type = LeaveType::ALL[index];

    let today = state.clock().today();
    let policy = &state.settings().leave;
    let start = console.prompt_valid("Start date (YYYY-MM-DD): ", |raw| {
        let start = validation::date("start_date", raw)?;
        domain::leave::validate_leave_dates(start, start, today, policy)?;
        Ok(start)
    })?;
    let end = console.prompt_valid("End date (YYYY-MM-DD): ", |raw| {
        let end = validation::date("end_date", raw)?;
        domain::leave::validate_leave_dates(start, end, today, policy)?;
        Ok(end)
    })?;

    let leave = domain::leave::apply_leave(
        state.store(),
        employee.id,
        leave_type,
        start,
        end,
        today,
        policy,
    )
    .await?;
    console.success(format!(
        "Leave applied (ID {}), status {}.",
        leave.id, leave.status
    ))
}

async fn view_leaves<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    let leaves = domain::leave::employee_leaves(state.store(), employee).await?;
    if leaves.is_empty() {
        return console.info("You have not applied for any leave.");
    }
    console.block(&leave_table(&leaves))
}

async fn check_salary<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    let salary = domain::salary::current_salary(state.store(), employee.id).await?;
    console.info(format!("Your current salary: {salary}"))
}

async fn request_position_change<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    let current = domain::staff::find_employee(state.store(), employee.id).await?;
    let postings = domain::jobs::open_postings(state.store(), Some(&current.department)).await?;
    if postings.is_empty() {
        return console.info(format!("No job postings in {}.", current.department));
    }
    console.block(&posting_table(&postings))?;

    let posting_id = read_id(console, "Enter Posting ID: ", "posting_id")?;
    let Some(posting) = postings.iter().find(|p| p.id == posting_id) else {
        return Err(EmsError::not_found("Job posting", posting_id));
    };
    let request =
        domain::jobs::request_position_change(state.store(), employee.id, &posting.position)
            .await?;
    console.success(format!(
        "Requested change from {} to {} (request {}).",
        request.old_position, request.new_position, request.id
    ))
}

async fn update_profile<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    employee: &Employee,
) -> EmsResult<()> {
    let current = domain::staff::find_employee(state.store(), employee.id).await?;
    let rows = vec![
        vec!["Name".to_string(), current.name.clone()],
        vec!["Age".to_string(), current.age.to_string()],
        vec!["Address".to_string(), current.address.clone()],
        vec!["Department".to_string(), current.department.clone()],
        vec!["Position".to_string(), current.position.clone()],
        vec!["Email".to_string(), current.email.clone()],
        vec!["Contact".to_string(), current.contact_number.clone()],
        vec!["Degree".to_string(), current.degree.clone()],
        vec!["Joined".to_string(), current.joining_date.to_string()],
    ];
    console.block(&render_table(&["Field", "Value"], &rows))?;

    console.info("Leave a field blank to keep it.")?;
    let profile = ProfileUpdate {
        age: console.prompt_optional("New age: ", validation::age)?,
        address: console.prompt_optional("New address: ", |raw| {
            validation::required("address", raw)
        })?,
        contact_number: console.prompt_optional("New contact number: ", validation::contact_number)?,
        degree: console.prompt_optional("New degree: ", validation::degree)?,
    };
    if profile == ProfileUpdate::default() {
        return console.info("No changes made.");
    }

    domain::staff::update_profile(state.store(), employee.id, profile).await?;
    console.success("Profile updated.")
}
