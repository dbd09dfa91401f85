use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use centavo_core::{
    GoalPeriod, check_due, close_period, dashboard_stats, display_date, evaluate, evaluate_all,
    expenses_by_category, format_date, parse_date, today,
};

mod store;

use store::{Snapshot, read_snapshot, write_snapshot};

#[derive(Parser, Debug)]
#[command(name = "centavo", version, about = "Personal finance goals from the terminal")]
struct Cli {
    /// Path to the ledger snapshot (default: ~/.centavo/ledger.json)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty ledger snapshot if none exists
    Init,

    /// Totals, savings rate, and the expense breakdown
    Summary,

    /// Progress report for every goal
    Goals {
        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
    },

    /// Show due recurrences; --apply materializes them into the ledger
    Due {
        #[arg(long)]
        on: Option<String>,

        /// Persist materialized transactions and advanced payment dates
        #[arg(long)]
        apply: bool,
    },

    /// Close a goal's period: fold the live shortfall into its carried deficit
    CloseGoal {
        /// Goal id
        id: String,

        #[arg(long)]
        on: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ledger_path = match cli.ledger {
        Some(path) => path,
        None => store::default_ledger_path()?,
    };

    match cli.command {
        Command::Init => {
            if ledger_path.exists() {
                println!("Ledger already exists at {}", ledger_path.display());
            } else {
                write_snapshot(&ledger_path, &Snapshot::default())?;
                println!("Created empty ledger at {}", ledger_path.display());
            }
        }

        Command::Summary => {
            let snapshot = read_snapshot(&ledger_path)?;
            print_summary(&snapshot);
        }

        Command::Goals { on } => {
            let snapshot = read_snapshot(&ledger_path)?;
            let reference = resolve_reference(on)?;
            print_goals(&snapshot, reference)?;
        }

        Command::Due { on, apply } => {
            let mut snapshot = read_snapshot(&ledger_path)?;
            let reference = resolve_reference(on)?;
            let due = check_due(&snapshot.recurrences, reference)?;

            if due.to_materialize.is_empty() {
                println!("Nothing due as of {}", format_date(reference));
                return Ok(());
            }

            for t in &due.to_materialize {
                println!(
                    "[{:?}] {} | {} | ${:.2} on {}",
                    t.kind,
                    t.category,
                    t.description,
                    t.net_amount,
                    display_date(t.date)
                );
            }

            if apply {
                let count = due.to_materialize.len();
                snapshot.transactions.extend(due.to_materialize);
                for rec in &mut snapshot.recurrences {
                    if let Some(next) = due.updated_next_dates.get(&rec.id) {
                        rec.next_payment_date = *next;
                    }
                }
                write_snapshot(&ledger_path, &snapshot)?;
                println!("\nApplied {} occurrence(s) to {}", count, ledger_path.display());
            } else {
                println!("\nRun with --apply to write these into the ledger");
            }
        }

        Command::CloseGoal { id, on } => {
            let mut snapshot = read_snapshot(&ledger_path)?;
            let reference = resolve_reference(on)?;

            let Some(goal) = snapshot.goals.iter_mut().find(|g| g.id == id) else {
                bail!("no goal with id '{}'", id);
            };

            let progress = evaluate(goal, &snapshot.transactions, reference)?;
            let carried = close_period(goal, progress.metric_value);
            goal.accumulated_deficit = carried;
            println!(
                "Closed '{}' at metric ${:.2}; carrying ${:.2} into the next period",
                goal.name, progress.metric_value, carried
            );
            write_snapshot(&ledger_path, &snapshot)?;
        }
    }

    Ok(())
}

fn resolve_reference(on: Option<String>) -> Result<NaiveDate> {
    match on {
        Some(s) => parse_date(&s).with_context(|| format!("--on {}", s)),
        None => Ok(today()),
    }
}

fn print_summary(snapshot: &Snapshot) {
    let stats = dashboard_stats(&snapshot.transactions);
    println!("Income:       ${:.2}", stats.total_income);
    println!("Expenses:     ${:.2}", stats.total_expenses);
    println!("Net balance:  ${:.2}", stats.net_balance);
    println!("Savings rate: {:.1}%", stats.savings_rate);

    let slices = expenses_by_category(&snapshot.transactions);
    if !slices.is_empty() {
        println!("\nExpenses by category:");
        for slice in slices {
            println!("  {:<16} ${:.2}", slice.category, slice.amount);
        }
    }
}

fn print_goals(snapshot: &Snapshot, reference: NaiveDate) -> Result<()> {
    if snapshot.goals.is_empty() {
        println!("No goals defined yet");
        return Ok(());
    }

    let reports = evaluate_all(&snapshot.goals, &snapshot.transactions, reference)?;
    println!("Goal progress as of {}\n", display_date(reference));

    for (goal, (_, p)) in snapshot.goals.iter().zip(&reports) {
        let marker = if p.on_track { "on track" } else { "behind" };
        println!(
            "[{:?}] {} — ${:.2} of ${:.2} ({:.0}%) — {}",
            goal.period,
            goal.name,
            p.metric_value,
            goal.effective_target(),
            p.progress_percent,
            marker
        );
        if p.deficit > 0.0 {
            println!("    short by ${:.2}", p.deficit);
        }
        if goal.period == GoalPeriod::Daily {
            println!(
                "    {} effective day(s), {} off day(s) excluded",
                p.effective_days, p.excluded_days
            );
        }
    }
    Ok(())
}
