//! Recurrence projector: advances payment dates and materializes occurrences.
//!
//! Everything here is pure computation. Persisting the materialized
//! transactions and the advanced dates is the storage collaborator's job, and
//! so is making sure a rule is not checked-and-persisted twice concurrently.
//! The deterministic occurrence id (`"<rule id>:<date>"`) is the natural
//! unique key for that constraint.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::ledger::{Frequency, Transaction, TransactionKind};

/// A template for future transaction materialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub name: String,
    /// Gross base amount; materialized with zero deduction.
    pub amount: f64,
    /// Never `OneTime`.
    pub frequency: Frequency,
    pub next_payment_date: NaiveDate,
    pub active: bool,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a due-check pass: occurrences to persist and the advanced
/// payment date per triggered rule.
#[derive(Debug, Clone, Default)]
pub struct DueCheck {
    pub to_materialize: Vec<Transaction>,
    pub updated_next_dates: BTreeMap<String, NaiveDate>,
}

/// The next occurrence after `date` for a recurring frequency.
///
/// Monthly advancement preserves the day of month and clamps to the last valid
/// day when the target month is shorter (Jan 31 -> Feb 29 in a leap year);
/// yearly does the same for Feb 29. One-time input is a caller bug surfaced as
/// `NotRecurring`.
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate, FinanceError> {
    let next = match frequency {
        Frequency::OneTime => return Err(FinanceError::NotRecurring),
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::BiWeekly => date.checked_add_days(Days::new(15)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.ok_or(FinanceError::DateOutOfRange(date))
}

/// Materialize one occurrence of a rule, dated at its current due date.
///
/// The amount carries over as both gross and net (zero deduction), and the
/// occurrence is a plain record, not itself a rule.
pub fn materialize(recurrence: &Recurrence) -> Transaction {
    let description = recurrence
        .description
        .clone()
        .unwrap_or_else(|| format!("Recurring: {}", recurrence.name));
    Transaction::new(
        format!(
            "{}:{}",
            recurrence.id,
            recurrence.next_payment_date.format("%Y-%m-%d")
        ),
        recurrence.owner_id.clone(),
        recurrence.kind,
        recurrence.category.clone(),
        description,
        recurrence.amount,
        0.0,
        "#8b5cf6",
        recurrence.next_payment_date,
        recurrence.frequency,
    )
}

/// Select every active rule due on or before `reference`, materialize one
/// occurrence each, and compute its advanced payment date.
///
/// A rule overdue by several periods advances one step per check; repeated
/// checks catch it up.
pub fn check_due(recurrences: &[Recurrence], reference: NaiveDate) -> Result<DueCheck, FinanceError> {
    let mut due = DueCheck::default();
    for rec in recurrences {
        if !rec.active || rec.next_payment_date > reference {
            continue;
        }
        due.to_materialize.push(materialize(rec));
        due.updated_next_dates.insert(
            rec.id.clone(),
            next_occurrence(rec.next_payment_date, rec.frequency)?,
        );
    }
    Ok(due)
}
