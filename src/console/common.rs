//! Screens shared by the HR and Manager sessions, and record-to-row helpers.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::domain::{self, EmployeeHours, LeaveView};
use crate::error::EmsResult;
use crate::models::{
    AttendanceRecord, Decision, Employee, Hr, JobPosting, PerformanceRating,
    PositionChangeRequest,
};
use crate::store::Store;
use crate::validation;

use super::io::Console;
use super::state::AppState;
use super::table::{render_bar_chart, render_table};

const CHART_WIDTH: usize = 40;

pub(crate) fn employee_table(employees: &[Employee]) -> String {
    let rows: Vec<Vec<String>> = employees
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.name.clone(),
                e.age.to_string(),
                e.gender.clone(),
                e.department.clone(),
                e.position.clone(),
                e.salary.to_string(),
                e.email.clone(),
                e.contact_number.clone(),
                e.joining_date.to_string(),
                e.degree.clone(),
            ]
        })
        .collect();
    render_table(
        &[
            "ID", "Name", "Age", "Gender", "Department", "Position", "Salary", "Email",
            "Contact", "Joined", "Degree",
        ],
        &rows,
    )
}

pub(crate) fn leave_table(leaves: &[LeaveView]) -> String {
    let rows: Vec<Vec<String>> = leaves
        .iter()
        .map(|v| {
            vec![
                v.leave.id.to_string(),
                v.leave.employee_id.to_string(),
                v.employee_name.clone(),
                v.leave.leave_type.to_string(),
                v.leave.start_date.to_string(),
                v.leave.end_date.to_string(),
                v.leave.days().to_string(),
                v.leave.status.to_string(),
            ]
        })
        .collect();
    render_table(
        &[
            "Leave ID", "Employee ID", "Name", "Type", "Start", "End", "Days", "Status",
        ],
        &rows,
    )
}

pub(crate) fn attendance_table(records: &[AttendanceRecord]) -> String {
    let dash = || "-".to_string();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.employee_id.to_string(),
                r.date.to_string(),
                r.check_in.to_string(),
                r.check_out.map_or_else(dash, |t| t.to_string()),
                r.total_hours.map_or_else(dash, |h| h.to_string()),
                r.day_type.map_or_else(dash, |d| d.to_string()),
            ]
        })
        .collect();
    render_table(
        &["Employee ID", "Date", "Check-In", "Check-Out", "Hours", "Day Type"],
        &rows,
    )
}

pub(crate) fn hr_table(hrs: &[Hr]) -> String {
    let rows: Vec<Vec<String>> = hrs
        .iter()
        .map(|h| {
            vec![
                h.id.to_string(),
                h.name.clone(),
                h.email.clone(),
                h.contact_number.clone(),
                h.salary.to_string(),
                h.degree.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Email", "Contact", "Salary", "Degree"], &rows)
}

pub(crate) fn posting_table(postings: &[JobPosting]) -> String {
    let rows: Vec<Vec<String>> = postings
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.department.clone(),
                p.position.clone(),
                p.openings.to_string(),
            ]
        })
        .collect();
    render_table(&["Posting ID", "Department", "Position", "Openings"], &rows)
}

pub(crate) fn position_change_table(requests: &[PositionChangeRequest]) -> String {
    let rows: Vec<Vec<String>> = requests
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.employee_id.to_string(),
                r.department.clone(),
                r.old_position.clone(),
                r.new_position.clone(),
                r.status.to_string(),
            ]
        })
        .collect();
    render_table(
        &["Request ID", "Employee ID", "Department", "Current", "Requested", "Status"],
        &rows,
    )
}

pub(crate) fn rating_table(ratings: &[PerformanceRating]) -> String {
    let rows: Vec<Vec<String>> = ratings
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.employee_id.to_string(),
                r.rated_by.clone(),
                r.score.to_string(),
                r.comments.clone(),
            ]
        })
        .collect();
    render_table(&["Rating ID", "Employee ID", "Rated By", "Score", "Comments"], &rows)
}

pub(crate) fn hours_chart(hours: &[EmployeeHours]) -> String {
    let bars: Vec<(String, Decimal)> = hours
        .iter()
        .map(|h| (format!("{} ({})", h.name, h.employee_id), h.total_hours))
        .collect();
    render_bar_chart("Total hours worked", &bars, CHART_WIDTH)
}

pub(crate) fn read_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
    field: &'static str,
) -> EmsResult<i64> {
    console.prompt_valid(label, |raw| validation::record_id(field, raw))
}

/// Lists leaves awaiting a decision.
pub async fn show_pending_leaves<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let pending = domain::leave::pending_leaves(state.store()).await?;
    if pending.is_empty() {
        return console.info("No pending leave requests.");
    }
    console.block(&leave_table(&pending))
}

/// Approves or rejects one pending leave.
pub async fn decide_leave<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let pending = domain::leave::pending_leaves(state.store()).await?;
    if pending.is_empty() {
        return console.info("No pending leave requests.");
    }
    console.block(&leave_table(&pending))?;

    let leave_id = read_id(console, "Enter Leave ID: ", "leave_id")?;
    let decision = console.prompt_valid("Approve (A) or Reject (R): ", |raw| {
        raw.parse::<Decision>()
    })?;
    let leave = domain::leave::decide_leave(state.store(), leave_id, decision).await?;
    console.success(format!("Leave {} {}.", leave.id, leave.status))
}

/// Shows every leave of one employee.
pub async fn leave_history<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID: ", "employee_id")?;
    let leaves = domain::leave::leave_history(state.store(), employee_id).await?;
    if leaves.is_empty() {
        return console.info("No leave records found.");
    }
    console.block(&leave_table(&leaves))
}

/// Shows attendance for one employee, or everyone when the id is left blank.
pub async fn attendance_report<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = console.prompt_optional("Employee ID (blank for all): ", |raw| {
        validation::record_id("employee_id", raw)
    })?;
    let records = domain::attendance::attendance_records(state.store(), employee_id).await?;
    if records.is_empty() {
        return console.info("No attendance records found.");
    }
    console.block(&attendance_table(&records))
}

/// Shows completed hours per employee as a table and a bar chart.
pub async fn attendance_analytics<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let hours = domain::reports::attendance_hours_by_employee(state.store()).await?;
    if hours.is_empty() {
        return console.info("No completed attendance yet.");
    }
    let rows: Vec<Vec<String>> = hours
        .iter()
        .map(|h| {
            vec![
                h.employee_id.to_string(),
                h.name.clone(),
                h.full_days.to_string(),
                h.half_days.to_string(),
                h.total_hours.to_string(),
            ]
        })
        .collect();
    console.block(&render_table(
        &["Employee ID", "Name", "Full Days", "Half Days", "Total Hours"],
        &rows,
    ))?;
    console.block(&hours_chart(&hours))
}

/// Deletes an employee after confirmation.
pub async fn remove_employee<S: Store, C: Clock, R: BufRead, W: Write>(
    state: &AppState<'_, S, C>,
    console: &mut Console<R, W>,
) -> EmsResult<()> {
    let employee_id = read_id(console, "Enter Employee ID to remove: ", "employee_id")?;
    let employee = domain::staff::find_employee(state.store(), employee_id).await?;
    let answer = console.prompt(&format!("Remove {} ({})? (y/n): ", employee.name, employee.id))?;
    if !answer.eq_ignore_ascii_case("y") {
        return console.info("Cancelled.");
    }
    domain::staff::delete_employee(state.store(), employee_id).await?;
    console.success(format!("Employee {employee_id} removed."))
}
