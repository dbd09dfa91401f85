//! centavo-core: ledger aggregation and goal-evaluation engine.
//!
//! A pure, synchronous computation layer: callers own a snapshot of
//! transactions, goals, and recurrence rules, and re-invoke the engine
//! whenever the snapshot changes. Nothing here performs I/O or mutates its
//! inputs.

pub mod amortize;
pub mod dates;
pub mod error;
pub mod evaluate;
pub mod filter;
pub mod goal;
pub mod ledger;
pub mod recurrence;
pub mod summary;

pub use amortize::amortize;
pub use dates::{days_between_inclusive, display_date, format_date, parse_date, today, today_in_tz};
pub use error::FinanceError;
pub use evaluate::{GoalProgress, close_period, evaluate, evaluate_all};
pub use filter::{select_current_sub_period, select_in_window};
pub use goal::{Goal, GoalPeriod};
pub use ledger::{
    Frequency, PRESET_COLORS, Transaction, TransactionKind, net_from_gross, preset_categories,
};
pub use recurrence::{DueCheck, Recurrence, check_due, materialize, next_occurrence};
pub use summary::{
    CategoryColor, CategorySlice, DailyFlow, DashboardStats, category_colors, daily_flows,
    dashboard_stats, expenses_by_category, most_used_color,
};
