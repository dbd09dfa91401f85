//! Transaction records: the raw ledger the goal engine aggregates over.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// The recurrence class a single record represents.
///
/// A record tagged `Monthly` means "this is a monthly-scale amount" (a salary,
/// rent) and gets smoothed by the amortizer; it is not necessarily a generated
/// instance of a recurrence rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "bi-weekly")]
    BiWeekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl Frequency {
    /// Fixed day-count divisor used for amortization.
    ///
    /// `None` for one-time amounts: they are point-in-time and never divided.
    pub fn span_days(&self) -> Option<f64> {
        match self {
            Frequency::OneTime => None,
            Frequency::Daily => Some(1.0),
            Frequency::Weekly => Some(7.0),
            Frequency::BiWeekly => Some(15.0),
            Frequency::Monthly => Some(30.0),
            Frequency::Yearly => Some(365.0),
        }
    }
}

/// A financial event, immutable once settled.
///
/// `date` is the day the money is considered earned/spent, not the creation
/// timestamp. `net_amount` is the only amount goal math ever reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub gross_amount: f64,
    #[serde(default)]
    pub deduction_percentage: f64,
    pub net_amount: f64,
    /// Display color for the category; persisted alongside, not core-semantic.
    pub color: String,
    pub date: NaiveDate,
    pub frequency: Frequency,
    /// True for the record that spawned a recurrence rule, false for a
    /// materialized occurrence.
    #[serde(default)]
    pub is_recurring_rule: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Net amount after applying a deduction percentage to the gross.
pub fn net_from_gross(gross_amount: f64, deduction_percentage: f64) -> f64 {
    gross_amount * (1.0 - deduction_percentage.clamp(0.0, 100.0) / 100.0)
}

impl Transaction {
    /// Create a new transaction; the net amount is derived from the gross and
    /// the deduction percentage (clamped into [0, 100]).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        gross_amount: f64,
        deduction_percentage: f64,
        color: impl Into<String>,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        let deduction_percentage = deduction_percentage.clamp(0.0, 100.0);
        let now = Utc::now();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            kind,
            category: category.into(),
            description: description.into(),
            gross_amount,
            deduction_percentage,
            net_amount: net_from_gross(gross_amount, deduction_percentage),
            color: color.into(),
            date,
            frequency,
            is_recurring_rule: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark this record as the one that spawned a recurrence rule.
    pub fn as_recurring_rule(mut self) -> Self {
        self.is_recurring_rule = true;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Preset palette offered by category pickers.
pub const PRESET_COLORS: &[&str] = &[
    "#10b981", "#3b82f6", "#8b5cf6", "#f59e0b", "#ef4444", "#ec4899", "#06b6d4", "#84cc16",
    "#f97316", "#6366f1",
];

/// Default category labels per transaction kind.
pub fn preset_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &["Salary", "Freelance", "Investments", "Other"],
        TransactionKind::Expense => &[
            "Food",
            "Transport",
            "Entertainment",
            "Utilities",
            "Health",
            "Education",
            "Other",
        ],
    }
}
