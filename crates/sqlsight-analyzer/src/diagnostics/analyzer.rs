//! Query Analyzer - runs the rule battery and scores complexity

use super::complexity::ComplexityScore;
use super::issue::Issue;
use super::rules::{Rule, default_rules};
use crate::config::AdvisorConfig;
use sqlsight_syntax::Node;

/// Query analyzer that reports anti-patterns found in a query tree
#[derive(Debug, Clone)]
pub struct QueryAnalyzer {
    config: AdvisorConfig,
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryAnalyzer {
    /// Creates a new analyzer with default config
    pub fn new() -> Self {
        Self {
            config: AdvisorConfig::default(),
        }
    }

    /// Creates a new analyzer with custom config
    pub fn with_config(config: AdvisorConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer config
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Returns the rules evaluated by [`analyze`](Self::analyze), in order
    pub fn rules(&self) -> Vec<Box<dyn Rule>> {
        default_rules(&self.config)
    }

    /// Evaluates every rule against the tree
    pub fn analyze(&self, tree: &Node) -> Vec<Issue> {
        self.analyze_while(tree, || true)
    }

    /// Evaluates rules in order, asking `keep_going` before each one.
    ///
    /// Returns the issues found by the rules that ran.
    pub fn analyze_while(&self, tree: &Node, mut keep_going: impl FnMut() -> bool) -> Vec<Issue> {
        let mut issues = Vec::new();

        for rule in self.rules() {
            if !keep_going() {
                tracing::debug!(next = %rule.code(), "analysis stopped before all rules ran");
                break;
            }

            let found = rule.check(tree);
            tracing::trace!(code = %rule.code(), found = found.len(), "evaluated rule");
            issues.extend(found);
        }

        issues
    }

    /// Scores the structural complexity of the tree
    pub fn complexity(&self, tree: &Node) -> ComplexityScore {
        ComplexityScore::calculate(tree, self.config.max_complexity)
    }
}

#[cfg(test)]
mod tests;
