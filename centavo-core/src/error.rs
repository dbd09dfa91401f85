//! Error taxonomy for the centavo engine.
//!
//! The engine never guesses: malformed persisted input is a hard error, and
//! every division is guarded explicitly. Unknown frequency strings are rejected
//! at deserialization time, so they cannot reach the amortizer at all.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinanceError {
    /// A date string that is not strict `YYYY-MM-DD`. Empty strings included:
    /// persisted data must never silently coerce to "today".
    #[error("invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// A timezone name that is not a valid IANA identifier.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Calendar arithmetic walked off the end of chrono's representable range.
    #[error("date arithmetic out of range starting from {0}")]
    DateOutOfRange(NaiveDate),

    /// A goal that must be rejected before evaluation: non-positive target, or
    /// a window that ends before it starts.
    #[error("invalid goal definition: {0}")]
    InvalidGoalDefinition(String),

    /// A one-time entry handed to the recurrence projector.
    #[error("one-time entries do not recur")]
    NotRecurring,
}
