//! Rewrite Module
//!
//! Compares an original query with its rewritten form and proposes
//! alternatives:
//! - [`summarize_improvements`] lists the changes visible in the text
//! - [`estimate_cost_reduction`] turns a complexity drop into an estimate
//! - [`SimplifyingRewriter`] is the default [`QueryRewriter`]
//!
//! # Example
//!
//! ```
//! use sqlsight_analyzer::rewrite::{QueryRewriter, SimplifyingRewriter, summarize_improvements};
//! use sqlsight_syntax::Dialect;
//!
//! let original = "SELECT id FROM users WHERE 1 = 1 AND age > 21";
//! let optimized = SimplifyingRewriter.rewrite(original, Dialect::Postgres);
//! let improvements = summarize_improvements(original, &optimized);
//! assert!(improvements.iter().any(|i| i.starts_with("Removed tautologies")));
//! ```

mod diff;
mod rewriter;

pub use diff::{
    JOIN_OPTIMIZATION, OR_TO_UNION_ALL, SIMPLIFIED, SUBQUERY_TO_JOIN, TAUTOLOGY_REMOVED,
    estimate_cost_reduction, summarize_improvements,
};
pub use rewriter::{
    Alternative, QueryRewriter, SimplifyingRewriter, generate_alternatives, pretty_print,
};
