//! sqlsight syntax layer
//!
//! This crate turns query text into the read-only tree the advisory engines
//! work on:
//! - Dialect tags and keyword-based dialect detection
//! - Parsing through `sqlparser` with the matching dialect
//! - Lowering the parser AST into a closed [`NodeKind`] tree with named slots
//! - Query structure metadata (tables, columns, clause text)
//!
//! # Example
//!
//! ```
//! use sqlsight_syntax::{parse, Dialect, NodeKind};
//!
//! let parsed = parse("SELECT id FROM users WHERE id = 1", Dialect::Postgres).unwrap();
//! let tables = parsed.tree.walk().filter(|n| matches!(n.kind(), NodeKind::Table(_))).count();
//! assert_eq!(tables, 1);
//! ```

pub mod dialect;
mod error;
mod lower;
pub mod structure;
pub mod tree;

pub use dialect::{Dialect, DialectChoice, detect_dialect};
pub use error::{ParseError, Result};
pub use lower::{ParsedQuery, parse};
pub use structure::{QueryParts, QueryStructure};
pub use tree::{
    BinaryOp, ColumnRef, FunctionCall, Literal, Node, NodeKind, NodeWalker, SetOperator, Slot,
    TableRef,
};
