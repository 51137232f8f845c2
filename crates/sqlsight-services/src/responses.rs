//! Wire shapes of the tool responses

use crate::error::ServiceResult;
use serde::Serialize;
use sqlsight_analyzer::{Alternative, ComplexityScore, IndexSuggestion, Issue, PlanAnalysis};
use sqlsight_syntax::{Dialect, QueryStructure};

/// Either a report or an `{error}` object, never both
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolResponse<T> {
    Success(T),
    Failure { error: String },
}

impl<T: Serialize> ToolResponse<T> {
    /// Returns the report, if the operation succeeded
    pub fn report(&self) -> Option<&T> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the error message, if the operation failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Serializes the response as pretty-printed JSON
    pub fn to_json(&self) -> ServiceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T> From<ServiceResult<T>> for ToolResponse<T> {
    fn from(result: ServiceResult<T>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(err) => Self::Failure {
                error: err.to_string(),
            },
        }
    }
}

/// Result of `analyze`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    pub dialect: Dialect,
    pub structure: QueryStructure,
    pub complexity: ComplexityScore,
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_analysis: Option<PlanAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain_visualization: Option<String>,
    pub summary: String,
}

/// Result of `optimize`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeReport {
    pub original_sql: String,
    pub optimized_sql: String,
    pub alternatives: Vec<Alternative>,
    pub improvements: Vec<String>,
    pub cost_reduction: String,
    pub comparison_text: String,
}

/// Result of `suggest_indexes`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    pub dialect: Dialect,
    pub suggestions: Vec<IndexSuggestion>,
    pub count: usize,
}

impl IndexReport {
    pub fn to_json(&self) -> ServiceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
