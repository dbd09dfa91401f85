//! Frequency amortizer: converts an amount tagged with a source frequency into
//! an equivalent amount at a target period granularity.
//!
//! Recurring obligations (rent, a monthly salary) are smoothed across the days
//! they conceptually span, so a daily goal is not falsely satisfied only on pay
//! day and falsely failed every other day. One-time amounts are point-in-time
//! and never smoothed: they contribute their full value, and it is the caller's
//! job to confine them to the right date bucket.

use crate::goal::GoalPeriod;
use crate::ledger::Frequency;

/// Convert `amount` at `source` frequency into its `target`-period equivalent.
///
/// Non-one-time amounts go through a daily-equivalent rate using the fixed
/// divisors (daily 1, weekly 7, bi-weekly 15, monthly 30, yearly 365), then
/// scale up by the target's span. One-time amounts are returned unscaled for
/// every target.
pub fn amortize(amount: f64, source: Frequency, target: GoalPeriod) -> f64 {
    match source.span_days() {
        None => amount,
        Some(source_days) => amount / source_days * target.span_days(),
    }
}
