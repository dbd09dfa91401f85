//! Goal definitions: periodic targets the ledger is measured against.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

/// Granularity of a goal. Daily goals are scored as an average-rate metric;
/// weekly/monthly/yearly goals accumulate raw totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GoalPeriod {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl GoalPeriod {
    /// Day-count a target period conceptually spans.
    pub fn span_days(&self) -> f64 {
        match self {
            GoalPeriod::Daily => 1.0,
            GoalPeriod::Weekly => 7.0,
            GoalPeriod::Monthly => 30.0,
            GoalPeriod::Yearly => 365.0,
        }
    }
}

/// A target the user wants the ledger to satisfy over a period.
///
/// Progress is never persisted; it is always recomputed from the live
/// transaction set at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: f64,
    pub period: GoalPeriod,
    /// Window opens here, inclusive.
    pub start_date: NaiveDate,
    /// Window closes here, inclusive; open-ended through "now" when unset.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Carried shortfall from a prior closed period, added to the target.
    #[serde(default)]
    pub accumulated_deficit: f64,
    /// Rest days excluded from the effective-days denominator of daily goals.
    /// Never filters which transactions count.
    #[serde(default)]
    pub off_days: BTreeSet<NaiveDate>,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
        period: GoalPeriod,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            name: name.into(),
            target_amount,
            period,
            start_date,
            end_date: None,
            accumulated_deficit: 0.0,
            off_days: BTreeSet::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Reject malformed definitions before any evaluation runs.
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.target_amount <= 0.0 {
            return Err(FinanceError::InvalidGoalDefinition(format!(
                "target amount must be positive, got {}",
                self.target_amount
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(FinanceError::InvalidGoalDefinition(format!(
                    "end date {} is before start date {}",
                    end, self.start_date
                )));
            }
        }
        Ok(())
    }

    /// Target plus any deficit carried forward from a closed period.
    pub fn effective_target(&self) -> f64 {
        self.target_amount + self.accumulated_deficit.max(0.0)
    }

    /// Toggle a rest day. The day-picker action behind `off_days`.
    pub fn set_off_day(&mut self, date: NaiveDate, off: bool) {
        if off {
            self.off_days.insert(date);
        } else {
            self.off_days.remove(&date);
        }
    }

    /// Count of off days that fall within [start_date, reference].
    pub fn excluded_days_through(&self, reference: NaiveDate) -> i64 {
        self.off_days
            .iter()
            .filter(|d| **d >= self.start_date && **d <= reference)
            .count() as i64
    }
}
