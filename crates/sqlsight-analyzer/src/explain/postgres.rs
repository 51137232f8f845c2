//! PostgreSQL EXPLAIN Parser
//!
//! Extracts scans, cost and row counts from the default text output of
//! `EXPLAIN` and `EXPLAIN ANALYZE`.
//!
//! # Examples
//!
//! ```
//! use sqlsight_analyzer::explain::postgres::parse_postgres_explain;
//!
//! let text = "Seq Scan on users  (cost=0.00..458.00 rows=10000 width=244)";
//! let plan = parse_postgres_explain(text);
//! assert_eq!(plan.scans[0].table.as_deref(), Some("users"));
//! assert_eq!(plan.total_cost, 458.0);
//! ```

use crate::explain::plan::{ParsedPlan, PlanScanRecord};
use regex::Regex;
use std::sync::LazyLock;

static SEQ_SCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Seq Scan on (\w+)").expect("valid seq scan pattern"));

static INDEX_SCAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Index Scan using (\w+) on (\w+)").expect("valid index scan pattern")
});

static COST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cost=(\d+\.\d+)\.\.(\d+\.\d+)").expect("valid cost pattern"));

static ROWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rows=(\d+)").expect("valid rows pattern"));

static ACTUAL_ROWS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"actual time=\d+(?:\.\d+)?\.\.\d+(?:\.\d+)?\s+rows=(\d+)")
        .expect("valid actual rows pattern")
});

/// Parses PostgreSQL text EXPLAIN output.
///
/// Sequential scans are listed before index scans. Fields whose pattern does
/// not occur stay at zero.
pub fn parse_postgres_explain(text: &str) -> ParsedPlan {
    let mut scans: Vec<PlanScanRecord> = SEQ_SCAN
        .captures_iter(text)
        .map(|caps| PlanScanRecord::new("Seq Scan").with_table(&caps[1]))
        .collect();

    scans.extend(INDEX_SCAN.captures_iter(text).map(|caps| {
        PlanScanRecord::new("Index Scan")
            .with_index(&caps[1])
            .with_table(&caps[2])
    }));

    let total_cost = COST
        .captures(text)
        .and_then(|caps| caps[2].parse().ok())
        .unwrap_or(0.0);

    let estimated_rows = first_number(&ROWS, text);
    let actual_rows = first_number(&ACTUAL_ROWS, text);

    tracing::trace!(
        scans = scans.len(),
        total_cost,
        estimated_rows,
        actual_rows,
        "parsed postgres plan"
    );

    ParsedPlan {
        scans,
        total_cost,
        estimated_rows,
        actual_rows,
    }
}

fn first_number(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests;
