//! Tunable thresholds shared by the advisory engines

use serde::{Deserialize, Serialize};

/// Configuration for the advisory engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Join count above which JOIN_EXPLOSION is reported
    pub join_explosion_threshold: usize,
    /// Upper bound of the complexity score
    pub max_complexity: u32,
    /// Covering-index extensions are only proposed when fewer columns than this are missing
    pub covering_missing_limit: usize,
    /// Character budget for the column part of generated index names
    pub index_name_budget: usize,
    /// Estimated reduction (percent) per complexity point removed
    pub reduction_per_point: u32,
    /// Upper bound of the estimated reduction (percent)
    pub max_reduction: u32,
    /// Column-name suffixes that suggest a numeric column
    pub numeric_suffixes: Vec<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            join_explosion_threshold: 3,
            max_complexity: 10,
            covering_missing_limit: 3,
            index_name_budget: 40,
            reduction_per_point: 15,
            max_reduction: 90,
            numeric_suffixes: ["_id", "_count", "_num", "_qty"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AdvisorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the join-explosion threshold
    pub fn with_join_explosion_threshold(mut self, threshold: usize) -> Self {
        self.join_explosion_threshold = threshold;
        self
    }

    /// Sets the complexity cap (at least 1)
    pub fn with_max_complexity(mut self, max: u32) -> Self {
        self.max_complexity = max.max(1);
        self
    }

    /// Sets the covering-index missing-column limit
    pub fn with_covering_missing_limit(mut self, limit: usize) -> Self {
        self.covering_missing_limit = limit;
        self
    }

    /// Sets the index-name column budget
    pub fn with_index_name_budget(mut self, budget: usize) -> Self {
        self.index_name_budget = budget;
        self
    }

    /// Sets the per-point reduction and its cap
    pub fn with_reduction(mut self, per_point: u32, max: u32) -> Self {
        self.reduction_per_point = per_point;
        self.max_reduction = max.min(100);
        self
    }

    /// Sets the numeric column suffixes
    pub fn with_numeric_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the column name ends in a numeric suffix
    pub fn looks_numeric(&self, column: &str) -> bool {
        self.numeric_suffixes
            .iter()
            .any(|suffix| column.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.join_explosion_threshold, 3);
        assert_eq!(config.max_complexity, 10);
        assert_eq!(config.covering_missing_limit, 3);
        assert_eq!(config.index_name_budget, 40);
        assert_eq!((config.reduction_per_point, config.max_reduction), (15, 90));
    }

    #[test]
    fn test_builder() {
        let config = AdvisorConfig::new()
            .with_join_explosion_threshold(5)
            .with_max_complexity(0)
            .with_reduction(10, 150)
            .with_numeric_suffixes(["_key"]);

        assert_eq!(config.join_explosion_threshold, 5);
        assert_eq!(config.max_complexity, 1);
        assert_eq!(config.max_reduction, 100);
        assert!(config.looks_numeric("user_key"));
        assert!(!config.looks_numeric("user_id"));
    }

    #[test]
    fn test_looks_numeric() {
        let config = AdvisorConfig::default();
        assert!(config.looks_numeric("user_id"));
        assert!(config.looks_numeric("item_qty"));
        assert!(!config.looks_numeric("identity"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AdvisorConfig =
            serde_json::from_str(r#"{"join_explosion_threshold": 6}"#).unwrap();
        assert_eq!(config.join_explosion_threshold, 6);
        assert_eq!(config.index_name_budget, 40);
    }
}
