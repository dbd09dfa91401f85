//! Dashboard summaries: totals, savings rate, and chart-ready aggregations.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

/// Headline figures for the dashboard KPI cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    /// Percent of income kept after expenses; 0 when there is no income.
    pub savings_rate: f64,
}

/// One slice of the expenses-by-category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    pub color: String,
}

/// Income/expense totals for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: f64,
    pub expenses: f64,
}

/// The color most often recorded for a category, with its occurrence count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryColor {
    pub category: String,
    pub color: String,
    pub count: usize,
}

pub fn dashboard_stats(transactions: &[Transaction]) -> DashboardStats {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.net_amount)
        .sum();
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.net_amount)
        .sum();
    let net_balance = total_income - total_expenses;
    let savings_rate = if total_income > 0.0 {
        net_balance / total_income * 100.0
    } else {
        0.0
    };
    DashboardStats {
        total_income,
        total_expenses,
        net_balance,
        savings_rate,
    }
}

/// Expense totals per category, largest first, each slice colored with the
/// category's most-used color.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(t.category.as_str()).or_default() += t.net_amount;
    }
    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            color: most_used_color(transactions, category).unwrap_or_default(),
            category: category.to_string(),
            amount,
        })
        .collect();
    slices.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    slices
}

/// Income/expense totals per calendar date, ascending.
pub fn daily_flows(transactions: &[Transaction]) -> Vec<DailyFlow> {
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = days.entry(t.date).or_default();
        if t.is_income() {
            entry.0 += t.net_amount;
        } else {
            entry.1 += t.net_amount;
        }
    }
    days.into_iter()
        .map(|(date, (income, expenses))| DailyFlow {
            date,
            income,
            expenses,
        })
        .collect()
}

/// Most frequently used color per category across the whole ledger.
///
/// Ties break lexicographically by color so the result is stable across runs.
pub fn category_colors(transactions: &[Transaction]) -> Vec<CategoryColor> {
    let mut counts: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
    for t in transactions {
        *counts
            .entry(t.category.as_str())
            .or_default()
            .entry(t.color.as_str())
            .or_default() += 1;
    }
    let mut out: Vec<CategoryColor> = counts
        .into_iter()
        .filter_map(|(category, colors)| {
            colors
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(color, count)| CategoryColor {
                    category: category.to_string(),
                    color: color.to_string(),
                    count,
                })
        })
        .collect();
    out.sort_by(|a, b| a.category.cmp(&b.category));
    out
}

/// Most-used color for one category, if the category appears at all.
pub fn most_used_color(transactions: &[Transaction], category: &str) -> Option<String> {
    category_colors(transactions)
        .into_iter()
        .find(|c| c.category == category)
        .map(|c| c.color)
}
