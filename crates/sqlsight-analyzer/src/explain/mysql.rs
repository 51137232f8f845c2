//! MySQL EXPLAIN Parser
//!
//! Parses the traditional tabular EXPLAIN output, either with the `|` borders
//! printed by the mysql client or tab-separated as printed by `mysql -B`:
//!
//! ```text
//! id | select_type | table | partitions | type | possible_keys | key | key_len | ref | rows | filtered | Extra
//! ```
//!
//! # Examples
//!
//! ```
//! use sqlsight_analyzer::explain::mysql::parse_mysql_explain;
//!
//! let text = "\
//! | id | select_type | table | type | key  | rows |
//! |  1 | SIMPLE      | users | ALL  | NULL | 1000 |";
//!
//! let plan = parse_mysql_explain(text);
//! assert_eq!(plan.scans[0].warning.as_deref(), Some("Full Table Scan"));
//! ```

use crate::explain::plan::{ParsedPlan, PlanScanRecord};

/// Warning attached to scans with access type `ALL`
pub const FULL_TABLE_SCAN: &str = "Full Table Scan";

const NULL: &str = "NULL";

/// Parses MySQL tabular EXPLAIN output.
///
/// Rows are only accepted after a header naming both `select_type` and
/// `table`, and only when they have as many cells as the header.
pub fn parse_mysql_explain(text: &str) -> ParsedPlan {
    let mut header: Option<Header> = None;
    let mut scans = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if is_separator(trimmed) {
            continue;
        }

        if trimmed.contains("select_type") && trimmed.contains("table") {
            header = Some(Header::parse(trimmed));
            continue;
        }

        let Some(header) = &header else {
            continue;
        };

        let cells = split_cells(trimmed, header.delimiter);
        if cells.len() != header.names.len() {
            continue;
        }

        scans.push(header.scan_record(&cells));
    }

    tracing::trace!(scans = scans.len(), "parsed mysql plan");
    ParsedPlan::from_scans(scans)
}

/// Column names of the tabular output and the delimiter that separates them
struct Header {
    names: Vec<String>,
    delimiter: char,
}

impl Header {
    fn parse(line: &str) -> Self {
        let delimiter = if line.contains('|') { '|' } else { '\t' };
        let names = split_cells(line, delimiter)
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        Self { names, delimiter }
    }

    /// Value of column `name` in a data row, with `NULL` mapped to `None`
    fn cell<'a>(&self, cells: &[&'a str], name: &str) -> Option<&'a str> {
        let position = self.names.iter().position(|n| n == name)?;
        cells.get(position).copied().filter(|value| *value != NULL)
    }

    fn scan_record(&self, cells: &[&str]) -> PlanScanRecord {
        let access_type = self.cell(cells, "type");
        let mut record = PlanScanRecord::new(access_type.unwrap_or("Unknown"));

        if let Some(table) = self.cell(cells, "table") {
            record = record.with_table(table);
        }
        if let Some(key) = self.cell(cells, "key") {
            record = record.with_key(key);
        }
        if let Some(rows) = self.cell(cells, "rows").and_then(|r| r.parse().ok()) {
            record = record.with_rows(rows);
        }
        if access_type == Some("ALL") {
            record = record.with_warning(FULL_TABLE_SCAN);
        }

        record
    }
}

fn is_separator(line: &str) -> bool {
    line.is_empty() || line.starts_with('+') || line.contains("---")
}

/// Splits a row into trimmed, non-empty cells
fn split_cells(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}
