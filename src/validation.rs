//! Field-format validation.
//!
//! Every validator is a pure function from raw console input to a typed
//! value, returning [`EmsError::Validation`] naming the field on failure.
//! The console re-prompts on these errors; the domain layer calls the same
//! functions so rules hold regardless of the front end.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EmsError, EmsResult};

/// Youngest accepted employee age.
pub const MIN_AGE: u32 = 16;
/// Oldest accepted employee age.
pub const MAX_AGE: u32 = 100;
/// Largest accepted salary, twelve digits.
pub const MAX_SALARY: u64 = 999_999_999_999;

fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

/// A contact number: exactly ten ASCII digits.
pub fn contact_number(raw: &str) -> EmsResult<String> {
    let raw = raw.trim();
    if raw.len() == 10 && is_all_digits(raw) {
        Ok(raw.to_string())
    } else {
        Err(EmsError::validation(
            "contact_number",
            "must be exactly 10 digits",
        ))
    }
}

/// An email address with an `@` followed by a domain containing a `.`.
///
/// # Examples
///
/// ```
/// use ems_console::validation::email;
///
/// assert!(email("asha@example.com").is_ok());
/// assert!(email("asha.example@com").is_err());
/// ```
pub fn email(raw: &str) -> EmsResult<String> {
    let raw = raw.trim();
    let valid = raw.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .find('.')
                .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
    });
    if valid {
        Ok(raw.to_string())
    } else {
        Err(EmsError::validation(
            "email",
            "must contain '@' followed by a domain with '.'",
        ))
    }
}

fn letters_and_spaces(field: &'static str, raw: &str) -> EmsResult<String> {
    let raw = raw.trim();
    if !raw.is_empty()
        && raw.chars().any(|c| c.is_alphabetic())
        && raw.chars().all(|c| c.is_alphabetic() || c == ' ')
    {
        Ok(raw.to_string())
    } else {
        Err(EmsError::validation(field, "should only contain letters"))
    }
}

/// A person's name: letters and spaces.
pub fn person_name(raw: &str) -> EmsResult<String> {
    letters_and_spaces("name", raw)
}

/// A degree title: letters and spaces.
pub fn degree(raw: &str) -> EmsResult<String> {
    letters_and_spaces("degree", raw)
}

/// Free text that must not be blank.
pub fn required(field: &'static str, raw: &str) -> EmsResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        Err(EmsError::validation(field, "must not be empty"))
    } else {
        Ok(raw.to_string())
    }
}

/// A password at least `min_len` characters long.
pub fn password(raw: &str, min_len: usize) -> EmsResult<String> {
    let raw = raw.trim();
    if raw.chars().count() >= min_len {
        Ok(raw.to_string())
    } else {
        Err(EmsError::validation(
            "password",
            format!("must be at least {min_len} characters"),
        ))
    }
}

/// A salary that must be a positive whole number.
pub fn positive_salary(raw: &str) -> EmsResult<Decimal> {
    let amount = numeric_salary(raw)?;
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(EmsError::validation("salary", "must be a positive number"))
    }
}

/// A salary written as digits only; zero is allowed.
pub fn numeric_salary(raw: &str) -> EmsResult<Decimal> {
    let raw = raw.trim();
    if !is_all_digits(raw) {
        return Err(EmsError::validation("salary", "must be a numeric value"));
    }
    let amount = Decimal::from_str(raw).map_err(|_| salary_too_large())?;
    salary_amount(amount)
}

/// Range check for a salary that is already a [`Decimal`].
///
/// Accepts whole amounts from zero up to [`MAX_SALARY`].
pub fn salary_amount(amount: Decimal) -> EmsResult<Decimal> {
    if amount.is_sign_negative() || !amount.fract().is_zero() {
        Err(EmsError::validation("salary", "must be a numeric value"))
    } else if amount > Decimal::from(MAX_SALARY) {
        Err(salary_too_large())
    } else {
        Ok(amount)
    }
}

fn salary_too_large() -> EmsError {
    EmsError::validation("salary", format!("must not exceed {MAX_SALARY}"))
}

/// An age between [`MIN_AGE`] and [`MAX_AGE`].
pub fn age(raw: &str) -> EmsResult<u32> {
    let raw = raw.trim();
    match raw.parse::<u32>() {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(age),
        _ => Err(EmsError::validation(
            "age",
            format!("must be a whole number between {MIN_AGE} and {MAX_AGE}"),
        )),
    }
}

/// A performance score from 1 to 5.
pub fn rating(raw: &str) -> EmsResult<u8> {
    match raw.trim() {
        s @ ("1" | "2" | "3" | "4" | "5") => Ok(s.as_bytes()[0] - b'0'),
        _ => Err(EmsError::validation("rating", "enter a value between 1-5")),
    }
}

/// A count greater than zero.
pub fn positive_count(field: &'static str, raw: &str) -> EmsResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(EmsError::validation(field, "must be a positive number")),
    }
}

/// A calendar date in `YYYY-MM-DD` form.
pub fn date(field: &'static str, raw: &str) -> EmsResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| EmsError::validation(field, "expected a date as YYYY-MM-DD"))
}

/// A positive numeric record id.
pub fn record_id(field: &'static str, raw: &str) -> EmsResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(EmsError::validation(field, "must be a numeric ID")),
    }
}

/// Gender, normalized to `Male`, `Female` or `Other`.
pub fn gender(raw: &str) -> EmsResult<String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "male" | "m" => Ok("Male".to_string()),
        "female" | "f" => Ok("Female".to_string()),
        "other" | "o" => Ok("Other".to_string()),
        _ => Err(EmsError::validation("gender", "enter Male, Female or Other")),
    }
}
