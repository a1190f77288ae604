//! Daily attendance: check-in, check-out and day classification.
//!
//! Each employee has at most one record per calendar date. A record moves
//! through [`AttendanceState::NoRecord`] → [`AttendanceState::CheckedIn`] →
//! [`AttendanceState::Completed`] and never back.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::AttendancePolicy;
use crate::error::{EmsError, EmsResult};
use crate::models::{AttendanceRecord, DayType};
use crate::store::{AttendanceRepository, StoreError};

const SECONDS_PER_HOUR: i64 = 3600;

/// Where an employee's attendance stands for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    /// Nothing recorded yet.
    NoRecord,
    /// Checked in, not yet out.
    CheckedIn,
    /// Checked in and out.
    Completed,
}

impl AttendanceState {
    /// Derives the state from the day's record, if any.
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => AttendanceState::NoRecord,
            Some(r) if r.is_complete() => AttendanceState::Completed,
            Some(_) => AttendanceState::CheckedIn,
        }
    }
}

/// The outcome of a successful check-out.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutSummary {
    /// The completed record.
    pub record: AttendanceRecord,
    /// Hours worked, rounded to two places.
    pub total_hours: Decimal,
    /// Full or half day.
    pub day_type: DayType,
}

/// Elapsed hours between two times on the same date.
///
/// Returns `InvalidAttendance` if `check_out` is earlier than `check_in`;
/// times never wrap past midnight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use ems_console::domain::attendance::hours_between;
/// use rust_decimal::Decimal;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
/// assert_eq!(hours_between(start, end).unwrap(), Decimal::new(85, 1));
/// ```
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> EmsResult<Decimal> {
    if check_out < check_in {
        return Err(EmsError::InvalidAttendance {
            message: format!("check-out {check_out} is earlier than check-in {check_in}"),
        });
    }
    let seconds = (check_out - check_in).num_seconds();
    Ok(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

/// Full Day iff `hours` reaches the policy threshold.
pub fn classify_day(hours: Decimal, policy: &AttendancePolicy) -> DayType {
    if hours >= policy.full_day_hours {
        DayType::FullDay
    } else {
        DayType::HalfDay
    }
}

/// The employee's attendance state on `date`.
pub async fn attendance_state<S: AttendanceRepository>(
    store: &S,
    employee_id: i64,
    date: NaiveDate,
) -> EmsResult<AttendanceState> {
    let record = store.find_attendance(employee_id, date).await?;
    Ok(AttendanceState::of(record.as_ref()))
}

/// Records a check-in at `now` for the date of `now`.
pub async fn check_in<S: AttendanceRepository>(
    store: &S,
    employee_id: i64,
    now: NaiveDateTime,
) -> EmsResult<AttendanceRecord> {
    let date = now.date();
    if store.find_attendance(employee_id, date).await?.is_some() {
        return Err(EmsError::AlreadyCheckedIn { date });
    }

    let record = match store.insert_check_in(employee_id, date, now.time()).await {
        Ok(record) => record,
        Err(StoreError::Duplicate(_)) => return Err(EmsError::AlreadyCheckedIn { date }),
        Err(e) => return Err(e.into()),
    };

    info!(employee_id, %date, check_in = %record.check_in, "Checked in");
    Ok(record)
}

/// Completes the day's record at `now`.
///
/// Fails without touching the store if there is no check-in for the date
/// of `now`, if the record is already complete, or if `now` precedes the
/// check-in time.
pub async fn check_out<S: AttendanceRepository>(
    store: &S,
    employee_id: i64,
    now: NaiveDateTime,
    policy: &AttendancePolicy,
) -> EmsResult<CheckOutSummary> {
    let date = now.date();
    let Some(mut record) = store.find_attendance(employee_id, date).await? else {
        warn!(employee_id, %date, "Check-out without check-in");
        return Err(EmsError::MustCheckInFirst);
    };
    if record.is_complete() {
        return Err(EmsError::AlreadyCheckedOut { date });
    }

    let check_out = now.time();
    let hours = hours_between(record.check_in, check_out)?;
    let day_type = classify_day(hours, policy);
    let total_hours = hours.round_dp(2);

    if !store
        .complete_attendance(record.id, check_out, total_hours, day_type)
        .await?
    {
        return Err(EmsError::AlreadyCheckedOut { date });
    }

    record.check_out = Some(check_out);
    record.total_hours = Some(total_hours);
    record.day_type = Some(day_type);

    info!(
        employee_id,
        %date,
        total_hours = %total_hours,
        day_type = %day_type,
        "Checked out"
    );
    Ok(CheckOutSummary {
        record,
        total_hours,
        day_type,
    })
}

/// Attendance records for one employee, or everyone when `None`.
pub async fn attendance_records<S: AttendanceRepository>(
    store: &S,
    employee_id: Option<i64>,
) -> EmsResult<Vec<AttendanceRecord>> {
    Ok(store.list_attendance(employee_id).await?)
}
