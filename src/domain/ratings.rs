//! Append-only performance ratings.

use tracing::info;

use crate::error::{EmsError, EmsResult};
use crate::models::{NewRating, PerformanceRating};
use crate::store::{EmployeeRepository, PerformanceRepository};
use crate::validation;

/// Records a 1-5 rating of an employee by `rated_by`.
pub async fn rate_employee<S>(
    store: &S,
    employee_id: i64,
    rated_by: &str,
    score: u8,
    comments: &str,
) -> EmsResult<PerformanceRating>
where
    S: EmployeeRepository + PerformanceRepository,
{
    let score = validation::rating(&score.to_string())?;
    if store.find_employee(employee_id).await?.is_none() {
        return Err(EmsError::not_found("Employee", employee_id));
    }

    let rating = store
        .insert_rating(NewRating {
            employee_id,
            rated_by: rated_by.to_string(),
            score,
            comments: comments.trim().to_string(),
        })
        .await?;

    info!(rating_id = rating.id, employee_id, score, "Employee rated");
    Ok(rating)
}

/// Every rating ever recorded, oldest first.
pub async fn all_ratings<S: PerformanceRepository>(store: &S) -> EmsResult<Vec<PerformanceRating>> {
    Ok(store.list_ratings().await?)
}
