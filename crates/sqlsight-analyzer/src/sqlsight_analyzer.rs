//! sqlsight Analyzer - the advisory engines
//!
//! This crate provides functionality for:
//! - Detecting performance and correctness anti-patterns in a query tree
//! - Scoring structural query complexity
//! - Suggesting single-column, composite and covering indexes
//! - Parsing EXPLAIN output from PostgreSQL and MySQL and rendering it as a tree
//! - Summarizing the difference between an original and a rewritten query

pub mod config;
pub mod diagnostics;
pub mod explain;
pub mod indexes;
pub mod rewrite;

pub use config::AdvisorConfig;
pub use diagnostics::{ComplexityScore, Issue, IssueCode, QueryAnalyzer};
pub use explain::{ParsedPlan, PlanAnalysis, PlanScanRecord, parse_plan, visualize_plan};
pub use indexes::{IndexSuggester, IndexSuggestion, Priority};
pub use rewrite::{Alternative, QueryRewriter, SimplifyingRewriter};
