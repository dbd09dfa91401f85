//! Goal evaluator: turns a raw ledger plus a goal definition into a single
//! "are we on track" answer.
//!
//! Daily goals use the amortized-sum metric: every in-window income is
//! converted to its daily-equivalent rate and the rates are summed. Each
//! transaction already arrives as a per-day figure, so there is no further
//! division by elapsed days; `effective_days` is reported as a statistic only.
//! Weekly/monthly/yearly goals accumulate raw net amounts over the window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortize::amortize;
use crate::dates::days_between_inclusive;
use crate::error::FinanceError;
use crate::filter::select_in_window;
use crate::goal::{Goal, GoalPeriod};
use crate::ledger::Transaction;

/// Result of evaluating one goal against a ledger snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Daily-equivalent rate for daily goals, accumulated total otherwise.
    pub metric_value: f64,
    /// Percentage of the effective target reached, 0 when the target is 0.
    pub progress_percent: f64,
    pub on_track: bool,
    /// Shortfall against the effective target, never negative.
    pub deficit: f64,
    /// Days elapsed in the window minus excluded off days, floor 1.
    pub effective_days: i64,
    /// Off days that fell inside [start_date, reference].
    pub excluded_days: i64,
}

/// Evaluate a goal against the full transaction snapshot as of `reference`.
///
/// Pure: inputs are never mutated, and the existing `accumulated_deficit` is
/// reported against, never advanced (see [`close_period`]).
pub fn evaluate(
    goal: &Goal,
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Result<GoalProgress, FinanceError> {
    goal.validate()?;

    let in_window = select_in_window(transactions, goal);

    let excluded_days = goal.excluded_days_through(reference);
    let total_days_passed = days_between_inclusive(goal.start_date, reference);
    let effective_days = (total_days_passed - excluded_days).max(1);

    let metric_value: f64 = match goal.period {
        GoalPeriod::Daily => in_window
            .iter()
            .map(|t| amortize(t.net_amount, t.frequency, GoalPeriod::Daily))
            .sum(),
        _ => in_window.iter().map(|t| t.net_amount).sum(),
    };

    let effective_target = goal.effective_target();
    let progress_percent = if effective_target > 0.0 {
        metric_value / effective_target * 100.0
    } else {
        0.0
    };

    Ok(GoalProgress {
        metric_value,
        progress_percent,
        on_track: metric_value >= effective_target,
        deficit: (effective_target - metric_value).max(0.0),
        effective_days,
        excluded_days,
    })
}

/// Evaluate every goal in a set; the result pairs each goal id with its
/// progress. The first invalid goal fails the whole batch.
pub fn evaluate_all(
    goals: &[Goal],
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Result<Vec<(String, GoalProgress)>, FinanceError> {
    goals
        .iter()
        .map(|g| Ok((g.id.clone(), evaluate(g, transactions, reference)?)))
        .collect()
}

/// Close-of-period action: the deficit to carry into the next period.
///
/// This is the only place the accumulated deficit advances. `evaluate` always
/// reports live progress against the goal's existing deficit; rolling the
/// shortfall forward is an explicit caller decision, manual or scheduled.
pub fn close_period(goal: &Goal, metric_value_at_close: f64) -> f64 {
    (goal.effective_target() - metric_value_at_close).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Frequency, TransactionKind};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn income(id: &str, amount: f64, date: NaiveDate, frequency: Frequency) -> Transaction {
        Transaction::new(
            id,
            "u1",
            TransactionKind::Income,
            "Salary",
            "",
            amount,
            0.0,
            "#10b981",
            date,
            frequency,
        )
    }

    // Spec-style scenario: two January incomes against a 1000 monthly target.
    #[test]
    fn monthly_goal_accumulates_raw_net_amounts() {
        let goal = Goal::new("g1", "u1", "Sales", 1000.0, GoalPeriod::Monthly, d(2024, 1, 1));
        let txs = vec![
            income("t1", 400.0, d(2024, 1, 10), Frequency::OneTime),
            income("t2", 300.0, d(2024, 1, 20), Frequency::OneTime),
        ];
        let p = evaluate(&goal, &txs, d(2024, 1, 31)).unwrap();
        assert!((p.metric_value - 700.0).abs() < 1e-9);
        assert!((p.progress_percent - 70.0).abs() < 1e-9);
        assert!(!p.on_track);
        assert!((p.deficit - 300.0).abs() < 1e-9);
    }

    // A 3000 monthly salary is worth exactly 100/day against a daily goal.
    #[test]
    fn daily_goal_amortizes_monthly_income() {
        let goal = Goal::new("g1", "u1", "Daily rate", 100.0, GoalPeriod::Daily, d(2024, 1, 1));
        let txs = vec![income("t1", 3000.0, d(2024, 1, 1), Frequency::Monthly)];
        let p = evaluate(&goal, &txs, d(2024, 1, 15)).unwrap();
        assert!((p.metric_value - 100.0).abs() < 1e-9);
        assert!(p.on_track);
        assert_eq!(p.deficit, 0.0);
    }

    #[test]
    fn out_of_window_transactions_never_change_the_result() {
        let goal = Goal::new("g1", "u1", "Save", 500.0, GoalPeriod::Monthly, d(2024, 1, 1))
            .with_end_date(d(2024, 1, 31));
        let mut txs = vec![income("in", 200.0, d(2024, 1, 15), Frequency::OneTime)];
        let before = evaluate(&goal, &txs, d(2024, 1, 31)).unwrap();

        txs.push(income("early", 999.0, d(2023, 12, 31), Frequency::Monthly));
        txs.push(income("late", 999.0, d(2024, 2, 1), Frequency::Monthly));
        let after = evaluate(&goal, &txs, d(2024, 1, 31)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn on_track_and_deficit_agree() {
        let goal = Goal::new("g1", "u1", "Save", 500.0, GoalPeriod::Weekly, d(2024, 1, 1));
        for collected in [0.0, 250.0, 500.0, 750.0] {
            let txs = vec![income("t", collected, d(2024, 1, 2), Frequency::OneTime)];
            let p = evaluate(&goal, &txs, d(2024, 1, 7)).unwrap();
            assert!(p.deficit >= 0.0);
            assert_eq!(p.on_track, p.deficit == 0.0);
            assert_eq!(p.on_track, p.metric_value >= goal.effective_target());
        }
    }

    #[test]
    fn effective_days_floor_is_one_on_start_day() {
        let start = d(2024, 1, 1);
        let mut goal = Goal::new("g1", "u1", "Tips", 10.0, GoalPeriod::Daily, start);
        goal.set_off_day(start, true);
        let p = evaluate(&goal, &[], start).unwrap();
        assert_eq!(p.effective_days, 1);
        assert_eq!(p.excluded_days, 1);
    }

    #[test]
    fn off_days_shrink_effective_days_but_not_the_metric() {
        let mut goal = Goal::new("g1", "u1", "Tips", 10.0, GoalPeriod::Daily, d(2024, 1, 1));
        goal.set_off_day(d(2024, 1, 3), true);
        goal.set_off_day(d(2024, 1, 4), true);
        let txs = vec![income("t", 70.0, d(2024, 1, 2), Frequency::Weekly)];
        let p = evaluate(&goal, &txs, d(2024, 1, 10)).unwrap();
        assert_eq!(p.effective_days, 8); // 10 days passed, 2 excluded
        assert_eq!(p.excluded_days, 2);
        // Metric is the amortized sum; off days never divide into it.
        assert!((p.metric_value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn carried_deficit_raises_the_bar() {
        let mut goal = Goal::new("g1", "u1", "Sales", 1000.0, GoalPeriod::Monthly, d(2024, 1, 1));
        goal.accumulated_deficit = 300.0;
        let txs = vec![income("t", 1000.0, d(2024, 1, 10), Frequency::OneTime)];
        let p = evaluate(&goal, &txs, d(2024, 1, 31)).unwrap();
        assert!(!p.on_track);
        assert!((p.deficit - 300.0).abs() < 1e-9);
        assert!((p.progress_percent - 1000.0 / 1300.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_goal_fails_before_evaluating() {
        let goal = Goal::new("g1", "u1", "Broken", -5.0, GoalPeriod::Daily, d(2024, 1, 1));
        assert!(evaluate(&goal, &[], d(2024, 1, 2)).is_err());
    }

    #[test]
    fn close_period_rolls_the_shortfall_forward() {
        let mut goal = Goal::new("g1", "u1", "Sales", 1000.0, GoalPeriod::Monthly, d(2024, 1, 1));
        assert_eq!(close_period(&goal, 700.0), 300.0);
        // Overshooting clears the carry, never goes negative.
        assert_eq!(close_period(&goal, 1400.0), 0.0);
        // An existing carry compounds into the next close.
        goal.accumulated_deficit = 300.0;
        assert_eq!(close_period(&goal, 1000.0), 300.0);
    }

    #[test]
    fn evaluate_all_pairs_goal_ids_with_progress() {
        let goals = vec![
            Goal::new("g1", "u1", "A", 100.0, GoalPeriod::Monthly, d(2024, 1, 1)),
            Goal::new("g2", "u1", "B", 50.0, GoalPeriod::Weekly, d(2024, 1, 1)),
        ];
        let txs = vec![income("t", 100.0, d(2024, 1, 2), Frequency::OneTime)];
        let reports = evaluate_all(&goals, &txs, d(2024, 1, 7)).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].0, "g1");
        assert!(reports[0].1.on_track);
        assert!(reports[1].1.on_track);
    }
}
