//! sqlsight Services Layer
//!
//! This crate provides the tool-style boundary over the advisory engines.
//! Every operation takes query text and returns a JSON-compatible report.
//!
//! # Architecture
//!
//! ```text
//! Front ends (sqlsight-cli)
//!     ↓
//! Service Layer (sqlsight-services) ← This crate
//!     ↓
//! Engines (sqlsight-analyzer)
//!     ↓
//! Syntax Layer (sqlsight-syntax)
//! ```
//!
//! # Operations
//!
//! - [`AdvisorService::analyze`] - issues, complexity, structure and an optional EXPLAIN view
//! - [`AdvisorService::optimize`] - rewritten query, improvements and a cost estimate
//! - [`AdvisorService::suggest_indexes`] - deduplicated index suggestions
//!
//! # Example
//!
//! ```
//! use sqlsight_services::AdvisorService;
//!
//! let service = AdvisorService::new();
//! let response = service.analyze("SELECT name FROM users", "auto", None);
//! let report = response.report().unwrap();
//! assert_eq!(report.issues[0].code.as_str(), "MISSING_WHERE");
//! ```

mod advisor_service;
mod error;
mod responses;

pub use advisor_service::AdvisorService;
pub use error::{ServiceError, ServiceResult};
pub use responses::{AnalyzeReport, IndexReport, OptimizeReport, ToolResponse};
