//! Query EXPLAIN Parser Module
//!
//! This module extracts scan records from free-text EXPLAIN output:
//! - PostgreSQL (default text format, with or without ANALYZE)
//! - MySQL (traditional tabular format)
//!
//! Other dialects yield a passthrough record instead of an error.
//!
//! # Example
//!
//! ```
//! use sqlsight_analyzer::explain::{parse_plan, visualize_plan};
//! use sqlsight_syntax::Dialect;
//!
//! let analysis = parse_plan(
//!     "Seq Scan on users  (cost=0.00..458.00 rows=10000 width=244)",
//!     Dialect::Postgres,
//! );
//! assert_eq!(
//!     visualize_plan(&analysis),
//!     "Execution Plan Tree:\n  └─ Seq Scan on users\n\nTotal Cost: 458.00"
//! );
//! ```

pub mod mysql;
pub mod plan;
pub mod postgres;
mod visualize;

pub use mysql::parse_mysql_explain;
pub use plan::{ParsedPlan, PlanAnalysis, PlanScanRecord, UNSUPPORTED_MESSAGE};
pub use postgres::parse_postgres_explain;
pub use visualize::visualize_plan;

use sqlsight_syntax::Dialect;

/// Parses EXPLAIN output produced by `dialect`
pub fn parse_plan(text: &str, dialect: Dialect) -> PlanAnalysis {
    match dialect {
        Dialect::Postgres => PlanAnalysis::Parsed(parse_postgres_explain(text)),
        Dialect::MySql => PlanAnalysis::Parsed(parse_mysql_explain(text)),
        _ => {
            tracing::debug!(%dialect, "no EXPLAIN parser for dialect");
            PlanAnalysis::unsupported(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dispatch_by_dialect() {
        let text = "Seq Scan on users  (cost=0.00..1.00 rows=1 width=4)";

        assert_eq!(parse_plan(text, Dialect::Postgres).scans().len(), 1);
        // The postgres text has no tabular header
        assert!(parse_plan(text, Dialect::MySql).scans().is_empty());
    }

    #[test]
    fn test_unsupported_dialects_pass_through() {
        for dialect in [Dialect::Sqlite, Dialect::TSql, Dialect::Oracle, Dialect::Generic] {
            assert_eq!(
                parse_plan("SCAN users", dialect),
                PlanAnalysis::Unsupported {
                    raw: "SCAN users".to_string(),
                    message: UNSUPPORTED_MESSAGE.to_string(),
                }
            );
        }
    }
}
