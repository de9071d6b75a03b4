use thiserror::Error;

use crate::api::{ClockTime, ScheduleId};

/// Rejected before a mutation leaves the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select a company")]
    MissingCompany,
    #[error("select a site")]
    MissingSite,
    #[error("end time {end} must be after start time {start}")]
    InvertedRange { start: ClockTime, end: ClockTime },
    #[error("schedule is {minutes} minutes, minimum is {min}")]
    TooShort { minutes: i32, min: i32 },
    #[error("invalid time: {0:?}")]
    BadClock(String),
    #[error("invalid date: {0:?}")]
    BadDate(String),
}

/// Failure reported by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("schedule {0} does not exist")]
    NotFound(ScheduleId),
    #[error("rejected by store: {0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("store is not configured")]
    NotConfigured,
}

impl StoreError {
    /// Transport-level failures that mean "no network" rather than a bad request.
    pub fn is_offline(&self) -> bool {
        match self {
            StoreError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

/// A schedule points at a company or site the directory doesn't know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub id: i64,
}
