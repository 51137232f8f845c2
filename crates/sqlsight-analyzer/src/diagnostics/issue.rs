//! Issue types reported by the rule engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Likely to slow the query down
    Performance,
    /// Likely to return surprising results
    Correctness,
}

/// Severity level for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Stable identifiers of the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    SelectStar,
    MissingWhere,
    LeadingWildcard,
    FunctionOnColumn,
    OrCondition,
    JoinExplosion,
    NullPitfall,
    ImplicitCast,
    NonDeterministicLimit,
}

impl IssueCode {
    /// Returns the wire identifier of this code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectStar => "SELECT_STAR",
            Self::MissingWhere => "MISSING_WHERE",
            Self::LeadingWildcard => "LEADING_WILDCARD",
            Self::FunctionOnColumn => "FUNCTION_ON_COLUMN",
            Self::OrCondition => "OR_CONDITION",
            Self::JoinExplosion => "JOIN_EXPLOSION",
            Self::NullPitfall => "NULL_PITFALL",
            Self::ImplicitCast => "IMPLICIT_CAST",
            Self::NonDeterministicLimit => "NON_DETERMINISTIC_LIMIT",
        }
    }

    pub fn kind(&self) -> IssueKind {
        match self {
            Self::NullPitfall | Self::NonDeterministicLimit => IssueKind::Correctness,
            _ => IssueKind::Performance,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingWhere | Self::LeadingWildcard | Self::NullPitfall => Severity::High,
            Self::SelectStar
            | Self::FunctionOnColumn
            | Self::JoinExplosion
            | Self::ImplicitCast => Severity::Medium,
            Self::OrCondition | Self::NonDeterministicLimit => Severity::Low,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Category of the finding
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    /// Human-readable explanation
    pub message: String,
    pub code: IssueCode,
}

impl Issue {
    /// Creates an issue with the category and severity of its code
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            kind: code.kind(),
            severity: code.severity(),
            message: message.into(),
            code,
        }
    }
}
