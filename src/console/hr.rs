//! The HR session.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;
use tracing::Instrument;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{self, EmployeeForm};
use crate::error::{EmsError, EmsResult};
use crate::models::{EmployeeUpdate, Hr};
use crate::store::Store;
use crate::validation;

use super::common::{
    self, attendance_table, employee_table, hours_chart, posting_table, rating_table, read_id,
};
use super::io::Console;
use super::state::AppState;
use super::table::{render_bar_chart, render_table};

const MENU: &[&str] = &[
    "Manage Employees",
    "Manage Leaves",
    "Manage Salaries",
    "Salary Report",
    "Job Posting",
    "Employee Rating",
    "Attendance Report",
    "Logout",
];

async fn login<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<Option<Hr>> {
    console.heading("HR Login")?;
    loop {
        let id = console.prompt_optional("HR ID (blank to go back): ", |raw| {
            validation::record_id("hr_id", raw)
        })?;
        let Some(id) = id else {
            return Ok(None);
        };
        let password = console.prompt("Password: ")?;
        match domain::auth::login_hr(state.store(), id, &password).await {
            Ok(hr) => return Ok(Some(hr)),
            Err(e @ EmsError::InvalidCredentials { .. }) => console.error(e)?,
            Err(e) => return Err(e),
        }
    }
}

/// Logs an HR user in and runs their menu until logout.
pub async fn run<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let Some(hr) = login(state, console).await? else {
        return Ok(());
    };
    let span = tracing::info_span!(
        "session",
        role = "hr",
        hr_id = hr.id,
        session_id = %Uuid::new_v4()
    );
    menu_loop(state, console, hr).instrument(span).await
}

async fn menu_loop<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    hr: Hr,
) -> EmsResult<()> {
    console.success(format!("Welcome, {}!", hr.name))?;
    loop {
        let choice = console.menu("HR Menu", MENU)?;
        let result = match choice.as_str() {
            "1" => manage_employees(state, console).await,
            "2" => manage_leaves(state, console).await,
            "3" => manage_salaries(state, console).await,
            "4" => salary_report(state, console).await,
            "5" => job_postings(state, console).await,
            "6" => ratings(state, console, &hr).await,
            "7" => attendance_report(state, console).await,
            "8" => return console.info("Logged out."),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn manage_employees<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Manage Employees",
            &[
                "Add Employee",
                "Delete Employee",
                "Update Employee",
                "Search Employee",
                "View All Employees",
                "Back",
            ],
        )?;
        let result = match choice.as_str() {
            "1" => add_employee(state, console).await,
            "2" => common::remove_employee(state, console).await,
            "3" => update_employee(state, console).await,
            "4" => search_employee(state, console).await,
            "5" => view_employees(state, console).await,
            "6" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn add_employee<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    console.heading("Add Employee")?;
    let min_len = state.settings().credentials.min_password_length;

    let name = console.prompt_valid("Name: ", validation::person_name)?;
    let password = console.prompt_valid("Password: ", |raw| validation::password(raw, min_len))?;
    let age = console.prompt_valid("Age: ", validation::age)?;
    let gender = console.prompt_valid("Gender (Male/Female/Other): ", validation::gender)?;
    let address = console.prompt_valid("Address: ", |raw| validation::required("address", raw))?;

    let catalog = state.catalog();
    let names = catalog.names();
    console.line("Departments:")?;
    let department = names[console.choose("Select department: ", &names)?].to_string();
    let positions = catalog
        .department(&department)
        .map(|d| d.positions.clone())
        .unwrap_or_default();
    console.line("Positions:")?;
    let position = positions[console.choose("Select position: ", &positions)?].clone();

    let salary = console.prompt_valid("Salary: ", validation::positive_salary)?;
    let email = console.prompt_valid("Email: ", validation::email)?;
    let contact_number = console.prompt_valid("Contact number: ", validation::contact_number)?;
    let degree = console.prompt_valid("Degree: ", validation::degree)?;

    let employee = domain::staff::add_employee(
        state.store(),
        catalog,
        &state.settings().credentials,
        EmployeeForm {
            name,
            password,
            age,
            gender,
            address,
            department,
            position,
            salary,
            email,
            contact_number,
            degree,
        },
        state.clock().today(),
    )
    .await?;
    console.success(format!(
        "Employee {} added with ID {}.",
        employee.name, employee.id
    ))
}

async fn update_employee<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID to update: ", "employee_id")?;
    let employee = domain::staff::find_employee(state.store(), employee_id).await?;
    console.block(&employee_table(std::slice::from_ref(&employee)))?;
    console.info("Leave a field blank to keep it.")?;

    let min_len = state.settings().credentials.min_password_length;
    let update = EmployeeUpdate {
        password: console.prompt_optional("New password: ", |raw| {
            validation::password(raw, min_len)
        })?,
        age: console.prompt_optional("New age: ", validation::age)?,
        email: console.prompt_optional("New email: ", validation::email)?,
        contact_number: console.prompt_optional("New contact number: ", validation::contact_number)?,
        degree: console.prompt_optional("New degree: ", validation::degree)?,
        ..Default::default()
    };
    if update.is_empty() {
        return console.info("No changes made.");
    }

    domain::staff::update_employee(state.store(), state.catalog(), employee_id, &update).await?;
    console.success(format!("Employee {employee_id} updated."))
}

async fn search_employee<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let fragment = console.prompt_valid("Name to search: ", |raw| {
        validation::required("name", raw)
    })?;
    let found = domain::staff::search_by_name(state.store(), &fragment).await?;
    if found.is_empty() {
        return console.info(format!("No employees match '{fragment}'."));
    }
    console.block(&employee_table(&found))
}

async fn view_employees<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employees = domain::staff::list_employees(state.store()).await?;
    if employees.is_empty() {
        return console.info("No employees on record.");
    }
    console.block(&employee_table(&employees))
}

async fn manage_leaves<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Manage Leaves",
            &[
                "View Pending Leaves",
                "Approve/Reject Leave",
                "Leave History",
                "Back",
            ],
        )?;
        let result = match choice.as_str() {
            "1" => common::show_pending_leaves(state, console).await,
            "2" => common::decide_leave(state, console).await,
            "3" => common::leave_history(state, console).await,
            "4" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn manage_salaries<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Manage Salaries",
            &["View Salary", "Update Salary", "Back"],
        )?;
        let result = match choice.as_str() {
            "1" => view_salary(state, console).await,
            "2" => correct_salary(state, console).await,
            "3" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn view_salary<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID: ", "employee_id")?;
    let employee = domain::staff::find_employee(state.store(), employee_id).await?;
    console.info(format!(
        "{} ({}, {}): salary {}",
        employee.name, employee.department, employee.position, employee.salary
    ))
}

async fn correct_salary<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID: ", "employee_id")?;
    let current = domain::salary::current_salary(state.store(), employee_id).await?;
    console.info(format!("Current salary: {current}"))?;

    let raw = console.prompt("New salary: ")?;
    let employee = domain::salary::correct_salary(state.store(), employee_id, &raw).await?;
    console.success(format!(
        "Salary for {} updated to {}.",
        employee.name, employee.salary
    ))
}

async fn salary_report<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let departments = domain::reports::departments(state.store()).await?;
    if departments.is_empty() {
        return console.info("No employees on record.");
    }

    let mut bars: Vec<(String, Decimal)> = Vec::with_capacity(departments.len());
    let mut rows = Vec::with_capacity(departments.len());
    for department in &departments {
        let total = domain::reports::department_salary_total(state.store(), department).await?;
        rows.push(vec![
            total.department.clone(),
            total.headcount.to_string(),
            total.total.to_string(),
        ]);
        bars.push((total.department, total.total));
    }
    console.block(&render_table(&["Department", "Employees", "Total Salary"], &rows))?;
    console.block(&render_bar_chart("Salary by department", &bars, 40))
}

async fn job_postings<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Job Posting",
            &["Post a Job", "View Job Postings", "Back"],
        )?;
        let result = match choice.as_str() {
            "1" => post_job(state, console).await,
            "2" => view_postings(state, console).await,
            "3" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn post_job<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let catalog = state.catalog();
    let names = catalog.names();
    console.line("Departments:")?;
    let department = names[console.choose("Select department: ", &names)?];
    let positions = catalog
        .department(department)
        .map(|d| d.positions.clone())
        .unwrap_or_default();
    console.line("Positions:")?;
    let position = &positions[console.choose("Select position: ", &positions)?];
    let openings = console.prompt_valid("Number of openings: ", |raw| {
        validation::positive_count("openings", raw)
    })?;

    let posting =
        domain::jobs::post_job(state.store(), catalog, department, position, openings).await?;
    console.success(format!(
        "Posted {} opening(s) for {} in {} (posting {}).",
        posting.openings, posting.position, posting.department, posting.id
    ))
}

async fn view_postings<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let postings = domain::jobs::open_postings(state.store(), None).await?;
    if postings.is_empty() {
        return console.info("No job postings.");
    }
    console.block(&posting_table(&postings))
}

async fn ratings<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    hr: &Hr,
) -> EmsResult<()> {
    loop {
        let choice = console.menu(
            "Employee Rating",
            &["Rate Employee", "View Ratings", "Back"],
        )?;
        let result = match choice.as_str() {
            "1" => rate_employee(state, console, hr).await,
            "2" => view_ratings(state, console).await,
            "3" => return Ok(()),
            _ => console.error("Invalid choice. Please try again."),
        };
        console.settle(result)?;
    }
}

async fn rate_employee<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
    hr: &Hr,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID: ", "employee_id")?;
    let employee = domain::staff::find_employee(state.store(), employee_id).await?;
    let score = console.prompt_valid(
        &format!("Rating for {} (1-5): ", employee.name),
        validation::rating,
    )?;
    let comments = console.prompt("Comments: ")?;

    let rating =
        domain::ratings::rate_employee(state.store(), employee_id, &hr.name, score, &comments)
            .await?;
    console.success(format!(
        "Rated {} with {}/5 (rating {}).",
        employee.name, rating.score, rating.id
    ))
}

async fn view_ratings<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let ratings = domain::ratings::all_ratings(state.store()).await?;
    if ratings.is_empty() {
        return console.info("No ratings recorded.");
    }
    console.block(&rating_table(&ratings))
}

async fn attendance_report<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let records = domain::attendance::attendance_records(state.store(), None).await?;
    if records.is_empty() {
        return console.info("No attendance records found.");
    }
    console.block(&attendance_table(&records))?;
    let hours = domain::reports::attendance_hours_by_employee(state.store()).await?;
    console.block(&hours_chart(&hours))
}
