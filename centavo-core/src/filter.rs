//! Ledger filter: selects the transactions a goal is allowed to count.

use chrono::{Datelike, NaiveDate};

use crate::goal::{Goal, GoalPeriod};
use crate::ledger::Transaction;

/// Transactions inside the goal's validity window.
///
/// Only income counts toward goal attainment: goals model "earn at least X",
/// not spending caps, so expenses are excluded from goal math entirely. That
/// is a policy choice, not an oversight. The result is a set; callers that
/// need ordering must sort explicitly.
pub fn select_in_window<'a>(transactions: &'a [Transaction], goal: &Goal) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| {
            t.is_income()
                && t.date >= goal.start_date
                && goal.end_date.is_none_or(|end| t.date <= end)
        })
        .collect()
}

/// Second-stage filter for the "current period" view: restricts in-window
/// transactions to the sub-period containing `reference` (same calendar day,
/// ISO week, month, or year depending on the goal period).
pub fn select_current_sub_period<'a>(
    transactions: &[&'a Transaction],
    period: GoalPeriod,
    reference: NaiveDate,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| in_same_sub_period(t.date, reference, period))
        .copied()
        .collect()
}

fn in_same_sub_period(date: NaiveDate, reference: NaiveDate, period: GoalPeriod) -> bool {
    match period {
        GoalPeriod::Daily => date == reference,
        GoalPeriod::Weekly => date.iso_week() == reference.iso_week(),
        GoalPeriod::Monthly => date.year() == reference.year() && date.month() == reference.month(),
        GoalPeriod::Yearly => date.year() == reference.year(),
    }
}
