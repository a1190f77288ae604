//! Performance rating model.

use serde::{Deserialize, Serialize};

/// An append-only performance rating given by HR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRating {
    /// Unique identifier.
    pub id: i64,
    /// The rated employee.
    pub employee_id: i64,
    /// Name of the HR member who gave the rating.
    pub rated_by: String,
    /// Score from 1 to 5.
    pub score: u8,
    /// Free-form comment.
    pub comments: String,
}

/// Fields required to record a rating.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    /// The rated employee.
    pub employee_id: i64,
    /// Name of the rater.
    pub rated_by: String,
    /// Score from 1 to 5.
    pub score: u8,
    /// Free-form comment.
    pub comments: String,
}

impl NewRating {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_rating(self, id: i64) -> PerformanceRating {
        PerformanceRating {
            id,
            employee_id: self.employee_id,
            rated_by: self.rated_by,
            score: self.score,
            comments: self.comments,
        }
    }
}
