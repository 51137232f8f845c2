//! Index Suggestion Engine
//!
//! Proposes single-column, composite and covering indexes from the columns a
//! query filters, joins, groups and sorts on. Candidates are deduplicated on
//! their table and column set, keeping the strongest priority.
//!
//! # Example
//!
//! ```
//! use sqlsight_analyzer::indexes::{IndexSuggester, Priority};
//! use sqlsight_syntax::Dialect;
//!
//! let suggestions = IndexSuggester::new().suggest_indexes(
//!     "SELECT * FROM users WHERE region_id = 5 AND status = 'active'",
//!     Dialect::Postgres,
//! );
//! assert!(suggestions
//!     .iter()
//!     .any(|s| s.priority == Priority::Critical && s.columns == ["region_id", "status"]));
//! ```

mod suggester;
mod suggestion;

pub use suggester::IndexSuggester;
pub use suggestion::{IndexSuggestion, Priority};
