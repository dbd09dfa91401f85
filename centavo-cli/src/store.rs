//! JSON snapshot store under ~/.centavo: the reference storage collaborator.
//!
//! The engine has no persistence of its own; this file owns the single
//! writer for the snapshot, which also keeps recurrence materialization from
//! running twice concurrently.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use centavo_core::{Goal, Recurrence, Transaction};

pub fn centavo_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".centavo"))
}

pub fn ensure_centavo_home() -> Result<PathBuf> {
    let dir = centavo_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_ledger_path() -> Result<PathBuf> {
    Ok(ensure_centavo_home()?.join("ledger.json"))
}

/// The full persisted state: one user's transactions, goals, and rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub recurrences: Vec<Recurrence>,
}

/// Load and validate a snapshot. A malformed goal fails the load: evaluating
/// against bad definitions would only produce silently wrong numbers.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        bail!(
            "no ledger at {} (run `centavo init` first)",
            path.display()
        );
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    for goal in &snapshot.goals {
        goal.validate()
            .with_context(|| format!("goal '{}' ({})", goal.name, goal.id))?;
    }
    Ok(snapshot)
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use centavo_core::GoalPeriod;
    use chrono::NaiveDate;

    #[test]
    fn snapshot_parses_wire_format_fields() {
        let raw = r##"{
            "transactions": [{
                "id": "t1",
                "ownerId": "u1",
                "type": "income",
                "category": "Salary",
                "description": "March paycheck",
                "grossAmount": 1000.0,
                "deductionPercentage": 10.0,
                "netAmount": 900.0,
                "color": "#10b981",
                "date": "2024-03-01",
                "frequency": "monthly",
                "createdAt": "2024-03-01T12:00:00Z",
                "updatedAt": "2024-03-01T12:00:00Z"
            }],
            "goals": [{
                "id": "g1",
                "ownerId": "u1",
                "name": "Rent",
                "targetAmount": 800.0,
                "period": "monthly",
                "startDate": "2024-03-01"
            }]
        }"##;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].net_amount, 900.0);
        assert_eq!(snapshot.goals[0].period, GoalPeriod::Monthly);
        assert_eq!(
            snapshot.goals[0].start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(snapshot.recurrences.is_empty());
    }

    #[test]
    fn empty_snapshot_round_trips() {
        let json = serde_json::to_string(&Snapshot::default()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert!(back.transactions.is_empty() && back.goals.is_empty());
    }
}
