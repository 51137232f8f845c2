//! Diagnostic Rule Engine
//!
//! Evaluates a fixed battery of independent rules against a query tree and
//! scores its structural complexity:
//! - SELECT_STAR, MISSING_WHERE, LEADING_WILDCARD, FUNCTION_ON_COLUMN
//! - OR_CONDITION, JOIN_EXPLOSION, NULL_PITFALL, IMPLICIT_CAST
//! - NON_DETERMINISTIC_LIMIT
//!
//! # Example
//!
//! ```
//! use sqlsight_analyzer::diagnostics::{IssueCode, QueryAnalyzer};
//! use sqlsight_syntax::{parse, Dialect};
//!
//! let parsed = parse("SELECT * FROM users", Dialect::Postgres).unwrap();
//! let analyzer = QueryAnalyzer::new();
//! let issues = analyzer.analyze(&parsed.tree);
//! assert!(issues.iter().any(|i| i.code == IssueCode::SelectStar));
//! assert_eq!(analyzer.complexity(&parsed.tree).score, 1);
//! ```

mod analyzer;
mod complexity;
mod issue;
pub mod rules;

pub use analyzer::QueryAnalyzer;
pub use complexity::{ComplexityBreakdown, ComplexityScore};
pub use issue::{Issue, IssueCode, IssueKind, Severity};
pub use rules::{Rule, default_rules};
