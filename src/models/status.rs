//! Review status shared by leave and position-change requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmsError;

/// Lifecycle of a reviewable request.
///
/// A request starts `Pending` and is decided exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Declined by a reviewer.
    Rejected,
}

impl RequestStatus {
    /// The stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    /// Returns true while the request can still be decided.
    pub fn is_pending(&self) -> bool {
        *self == RequestStatus::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = EmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" => Ok(RequestStatus::Approved),
            "REJECTED" => Ok(RequestStatus::Rejected),
            other => Err(EmsError::validation(
                "status",
                format!("unknown request status '{other}'"),
            )),
        }
    }
}

/// A reviewer's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

impl Decision {
    /// The status a pending request moves to under this decision.
    pub fn target_status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = EmsError;

    /// Parses the console answer `A` or `R` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Decision::Approve),
            "R" => Ok(Decision::Reject),
            _ => Err(EmsError::validation(
                "decision",
                "enter 'A' for Approve or 'R' for Reject",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("DONE".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_decision_parses_lowercase() {
        assert_eq!("a".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!(" r ".parse::<Decision>().unwrap(), Decision::Reject);
        assert!("x".parse::<Decision>().is_err());
    }

    #[test]
    fn test_decision_target_status() {
        assert_eq!(Decision::Approve.target_status(), RequestStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), RequestStatus::Rejected);
    }
}
