//! Plan Model - flat scan records extracted from EXPLAIN text

use serde::{Deserialize, Serialize};

/// Message carried by the passthrough record of unsupported dialects
pub const UNSUPPORTED_MESSAGE: &str = "Parsing not implemented for this dialect yet.";

/// Result of parsing EXPLAIN output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanAnalysis {
    /// Output of a dialect the parser understands
    Parsed(ParsedPlan),
    /// Input passed through unchanged
    Unsupported { raw: String, message: String },
}

impl PlanAnalysis {
    /// Wraps text the parser does not understand
    pub fn unsupported(raw: impl Into<String>) -> Self {
        Self::Unsupported {
            raw: raw.into(),
            message: UNSUPPORTED_MESSAGE.to_string(),
        }
    }

    /// Returns the parsed plan, if any
    pub fn as_parsed(&self) -> Option<&ParsedPlan> {
        match self {
            Self::Parsed(plan) => Some(plan),
            Self::Unsupported { .. } => None,
        }
    }

    /// Returns the scan records, empty for passthrough records
    pub fn scans(&self) -> &[PlanScanRecord] {
        self.as_parsed().map_or(&[], |plan| plan.scans.as_slice())
    }
}

/// Plan data extracted from EXPLAIN output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPlan {
    /// Scans in extraction order
    pub scans: Vec<PlanScanRecord>,
    /// Total estimated cost, zero when unknown
    pub total_cost: f64,
    /// Estimated rows of the first costed node, zero when unknown
    pub estimated_rows: u64,
    /// Actual rows of the first analyzed node, zero when unknown
    pub actual_rows: u64,
}

impl ParsedPlan {
    /// Creates a plan holding only scan records
    pub fn from_scans(scans: Vec<PlanScanRecord>) -> Self {
        Self {
            scans,
            ..Self::default()
        }
    }

    /// Returns true if no scans were found
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }
}

/// A single table access found in the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanScanRecord {
    /// Access method, e.g. "Seq Scan" or MySQL's "ALL"
    #[serde(rename = "type")]
    pub scan_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PlanScanRecord {
    /// Creates a record with only the access method set
    pub fn new(scan_type: impl Into<String>) -> Self {
        Self {
            scan_type: scan_type.into(),
            table: None,
            index: None,
            rows: None,
            key: None,
            warning: None,
        }
    }

    /// Sets the scanned table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the index used by the scan
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Sets the key chosen by the optimizer
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the estimated row count
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Attaches a warning
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
