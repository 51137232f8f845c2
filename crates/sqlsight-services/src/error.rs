use sqlsight_syntax::ParseError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-facing messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to parse SQL: {0}")]
    ParseFailed(#[from] ParseError),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}
