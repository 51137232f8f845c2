//! Error types for the syntax layer

use thiserror::Error;

/// Errors raised while turning query text into a tree
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty SQL input")]
    EmptyInput,

    #[error("{0}")]
    Syntax(#[from] sqlparser::parser::ParserError),

    #[error("expected a single statement, found {0}")]
    MultipleStatements(usize),

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for syntax operations
pub type Result<T> = std::result::Result<T, ParseError>;
