//! The Manager session.

use std::io::{BufRead, Write};

use tracing::Instrument;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{self, HrForm};
use crate::error::{EmsError, EmsResult};
use crate::models::{Decision, HrUpdate, Manager};
use crate::store::Store;
use crate::validation;

use super::common::{self, hr_table, position_change_table, rating_table, read_id};
use super::io::Console;
use super::state::AppState;
use super::table::{render_bar_chart, render_table};

const MENU: &[&str] = &["Manage HRs", "Manage Employees", "Logout"];

const EMPLOYEE_MENU: &[&str] = &[
    "View Leave History",
    "Approve/Reject Leaves",
    "Change Password",
    "View Employee Performance",
    "Remove Employee",
    "Salary Report (Employees & HRs)",
    "Job Position Change Requests",
    "Promote Employee",
    "View Attendance",
    "Attendance Analytics",
    "Back",
];

async fn login<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<Option<Manager>> {
    console.heading("Manager Login")?;
    loop {
        let id = console.prompt_optional("Manager ID (blank to go back): ", |raw| {
            validation::record_id("manager_id", raw)
        })?;
        let Some(id) = id else {
            return Ok(None);
        };
        let password = console.prompt("Password: ")?;
        match domain::auth::login_manager(state.store(), id, &password).await {
            Ok(manager) => return Ok(Some(manager)),
            Err(e @ EmsError::InvalidCredentials { .. }) => console.error(e)?,
            Err(e) => return Err(e),
        }
    }
}

/// Logs the manager in and runs the menu until logout.
pub async fn run<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let Some(manager) = login(state, console).await? else {
        return Ok(());
    };
    let span = tracing::info_span!(
        "session",
        role = "manager",
        manager_id = manager.id,
        session_id = %Uuid::new_v4()
    );
    menu_loop(state, console, manager).instrument(span).await
}

async fn menu_loop<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    manager: Manager,
) -> EmsResult<()> {
    console.success(format!("Welcome, {}!", manager.name))?;
    loop {
        let choice = console.menu("Manager Menu", MENU)?;
        let result = match choice.as_str() {
            "1" => manage_hrs(state, console).await,
            "2" => manage_employees(state, console, &manager).await,
            "3" => return console.info("Logged out."),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn manage_hrs<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Manage HRs",
            &["Add HR", "Remove HR", "Update HR", "View All HRs", "Back"],
        )?;
        let result = match choice.as_str() {
            "1" => add_hr(state, console).await,
            "2" => remove_hr(state, console).await,
            "3" => update_hr(state, console).await,
            "4" => view_hrs(state, console).await,
            "5" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn add_hr<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    console.heading("Add HR")?;
    let min_len = state.settings().credentials.min_password_length;
    let form = HrForm {
        name: console.prompt_valid("Name: ", validation::person_name)?,
        email: console.prompt_valid("Email: ", validation::email)?,
        password: console.prompt_valid("Password: ", |raw| validation::password(raw, min_len))?,
        contact_number: console.prompt_valid("Contact number: ", validation::contact_number)?,
        salary: console.prompt_valid("Salary: ", validation::numeric_salary)?,
        degree: console.prompt_valid("Degree: ", validation::degree)?,
    };

    let hr = domain::hr_admin::add_hr(state.store(), &state.settings().credentials, form).await?;
    console.success(format!("HR {} added with ID {}.", hr.name, hr.id))
}

async fn remove_hr<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let hr_id = read_id(console, "Enter HR ID to remove: ", "hr_id")?;
    domain::hr_admin::remove_hr(state.store(), hr_id).await?;
    console.success(format!("HR {hr_id} removed."))
}

async fn update_hr<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let hr_id = read_id(console, "Enter HR ID to update: ", "hr_id")?;
    let hr = domain::hr_admin::find_hr(state.store(), hr_id).await?;
    console.block(&hr_table(std::slice::from_ref(&hr)))?;
    console.info("Leave a field blank to keep it.")?;

    let update = HrUpdate {
        name: console.prompt_optional("New name: ", validation::person_name)?,
        email: console.prompt_optional("New email: ", validation::email)?,
        contact_number: console.prompt_optional("New contact number: ", validation::contact_number)?,
        salary: console.prompt_optional("New salary: ", validation::numeric_salary)?,
        degree: console.prompt_optional("New degree: ", validation::degree)?,
    };
    if update.is_empty() {
        return console.info("No changes made.");
    }

    domain::hr_admin::update_hr(state.store(), hr_id, &update).await?;
    console.success(format!("HR {hr_id} updated."))
}

async fn view_hrs<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let hrs = domain::hr_admin::list_hrs(state.store()).await?;
    if hrs.is_empty() {
        return console.info("No HR records.");
    }
    console.block(&hr_table(&hrs))
}

async fn manage_employees<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    manager: &Manager,
) -> EmsResult<()> {
    loop {
        let choice = console.menu("Manage Employees", EMPLOYEE_MENU)?;
        let result = match choice.as_str() {
            "1" => common::leave_history(state, console).await,
            "2" => common::decide_leave(state, console).await,
            "3" => change_password(state, console, manager).await,
            "4" => view_performance(state, console).await,
            "5" => common::remove_employee(state, console).await,
            "6" => payroll_report(state, console).await,
            "7" => position_changes(state, console).await,
            "8" => promote(state, console).await,
            "9" => common::attendance_report(state, console).await,
            "10" => common::attendance_analytics(state, console).await,
            "11" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn change_password<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    manager: &Manager,
) -> EmsResult<()> {
    let min_len = state.settings().credentials.min_password_length;
    let current = console.prompt("Current password: ")?;
    let new_password =
        console.prompt_valid("New password: ", |raw| validation::password(raw, min_len))?;
    let confirm = console.prompt("Confirm new password: ")?;
    if confirm != new_password {
        return Err(EmsError::validation("password", "passwords do not match"));
    }

    domain::auth::change_manager_password(
        state.store(),
        manager.id,
        &current,
        &new_password,
        min_len,
    )
    .await?;
    console.success("Password changed.")
}

async fn view_performance<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let ratings = domain::ratings::all_ratings(state.store()).await?;
    if ratings.is_empty() {
        return console.info("No ratings recorded.");
    }
    console.block(&rating_table(&ratings))
}

async fn payroll_report<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let summary = domain::reports::payroll_summary(state.store()).await?;
    let grand_total = summary.grand_total()?;
    let rows = vec![
        vec![
            "Employees".to_string(),
            summary.employees.headcount.to_string(),
            summary.employees.total.to_string(),
        ],
        vec![
            "HRs".to_string(),
            summary.hrs.headcount.to_string(),
            summary.hrs.total.to_string(),
        ],
        vec![
            "Total".to_string(),
            (summary.employees.headcount + summary.hrs.headcount).to_string(),
            grand_total.to_string(),
        ],
    ];
    console.block(&render_table(&["Group", "Headcount", "Total Salary"], &rows))?;
    console.block(&render_bar_chart(
        "Salary bill",
        &[
            ("Employees".to_string(), summary.employees.total),
            ("HRs".to_string(), summary.hrs.total),
        ],
        40,
    ))
}

async fn position_changes<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let pending = domain::jobs::pending_position_changes(state.store()).await?;
    if pending.is_empty() {
        return console.info("No pending position change requests.");
    }
    console.block(&position_change_table(&pending))?;

    let request_id = read_id(console, "Enter Request ID: ", "request_id")?;
    let decision = console.prompt_valid("Approve (A) or Reject (R): ", |raw| {
        raw.parse::<Decision>()
    })?;
    let request =
        domain::jobs::decide_position_change(state.store(), request_id, decision).await?;
    console.success(format!("Request {} {}.", request.id, request.status))
}

async fn promote<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID to promote: ", "employee_id")?;
    let employee = domain::staff::find_employee(state.store(), employee_id).await?;
    console.info(format!(
        "{}: {} in {}, salary {}",
        employee.name, employee.position, employee.department, employee.salary
    ))?;

    let new_salary = console.prompt_valid("New salary: ", validation::positive_salary)?;
    let positions = state
        .catalog()
        .department(&employee.department)
        .map(|d| d.positions.clone())
        .unwrap_or_default();
    let new_position = if positions.is_empty() {
        None
    } else {
        let answer = console.prompt("Change position too? (y/n): ")?;
        if answer.eq_ignore_ascii_case("y") {
            console.line("Positions:")?;
            Some(positions[console.choose("Select position: ", &positions)?].clone())
        } else {
            None
        }
    };

    let promotion = domain::salary::promote(
        state.store(),
        state.catalog(),
        employee_id,
        new_salary,
        new_position.as_deref(),
    )
    .await?;
    console.success(format!(
        "{} promoted: salary {} -> {}, position {} -> {}.",
        promotion.employee.name,
        promotion.previous_salary,
        promotion.employee.salary,
        promotion.previous_position,
        promotion.employee.position
    ))
}
