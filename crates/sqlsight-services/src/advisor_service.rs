//! Query advisory service
//!
//! Runs the advisory engines for one query per call and shapes their output
//! into tool responses. The service holds configuration only, so a single
//! instance can be shared across threads.

use crate::error::{ServiceError, ServiceResult};
use crate::responses::{AnalyzeReport, IndexReport, OptimizeReport, ToolResponse};
use sqlsight_analyzer::explain::{parse_plan, visualize_plan};
use sqlsight_analyzer::rewrite::{
    QueryRewriter, SimplifyingRewriter, estimate_cost_reduction, generate_alternatives,
    summarize_improvements,
};
use sqlsight_analyzer::{AdvisorConfig, IndexSuggester, QueryAnalyzer};
use sqlsight_syntax::{Dialect, DialectChoice, QueryStructure, detect_dialect, parse};

const COST_UNKNOWN: &str = "Could not estimate cost reduction.";

/// Service for query analysis, rewriting and index suggestions
#[derive(Debug)]
pub struct AdvisorService {
    config: AdvisorConfig,
    rewriter: Box<dyn QueryRewriter>,
}

impl Default for AdvisorService {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisorService {
    /// Create a service with default thresholds and the simplifying rewriter
    pub fn new() -> Self {
        Self::with_config(AdvisorConfig::default())
    }

    /// Create a service with custom thresholds
    pub fn with_config(config: AdvisorConfig) -> Self {
        Self {
            config,
            rewriter: Box::new(SimplifyingRewriter),
        }
    }

    /// Replace the rewriter used by [`optimize`](Self::optimize)
    pub fn with_rewriter(mut self, rewriter: impl QueryRewriter + 'static) -> Self {
        self.rewriter = Box::new(rewriter);
        self
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Analyze a query for anti-patterns and complexity
    ///
    /// # Arguments
    ///
    /// * `sql` - The query text
    /// * `dialect` - A dialect name or `auto`
    /// * `explain_plan` - Optional EXPLAIN output for the same query
    ///
    /// # Returns
    ///
    /// The analysis report, or an `{error}` response when the dialect is
    /// unknown or the query does not parse
    #[tracing::instrument(skip(self, sql, explain_plan))]
    pub fn analyze(
        &self,
        sql: &str,
        dialect: &str,
        explain_plan: Option<&str>,
    ) -> ToolResponse<AnalyzeReport> {
        self.try_analyze(sql, dialect, explain_plan).into()
    }

    fn try_analyze(
        &self,
        sql: &str,
        dialect: &str,
        explain_plan: Option<&str>,
    ) -> ServiceResult<AnalyzeReport> {
        let dialect = resolve_dialect(dialect, sql)?;
        let parsed = parse(sql, dialect)?;

        let analyzer = QueryAnalyzer::with_config(self.config.clone());
        let issues = analyzer.analyze(&parsed.tree);
        let complexity = analyzer.complexity(&parsed.tree);

        let explain_analysis = explain_plan
            .filter(|plan| !plan.trim().is_empty())
            .map(|plan| parse_plan(plan, dialect));
        let explain_visualization = explain_analysis.as_ref().map(visualize_plan);

        tracing::debug!(
            %dialect,
            issues = issues.len(),
            score = complexity.score,
            "analyzed query"
        );

        Ok(AnalyzeReport {
            dialect,
            structure: QueryStructure::from_parsed(&parsed),
            summary: format!(
                "Found {} potential performance issues. Complexity Score: {}/{}",
                issues.len(),
                complexity.score,
                self.config.max_complexity
            ),
            complexity,
            issues,
            explain_analysis,
            explain_visualization,
        })
    }

    /// Rewrite a query and describe what changed
    ///
    /// The rewrite fails open: a query that does not parse is returned as the
    /// optimized text unchanged, with no cost estimate.
    #[tracing::instrument(skip(self, sql))]
    pub fn optimize(&self, sql: &str, dialect: &str) -> ToolResponse<OptimizeReport> {
        self.try_optimize(sql, dialect).into()
    }

    fn try_optimize(&self, sql: &str, dialect: &str) -> ServiceResult<OptimizeReport> {
        let dialect = resolve_dialect(dialect, sql)?;

        let optimized_sql = self.rewriter.rewrite(sql, dialect);
        let improvements = summarize_improvements(sql, &optimized_sql);
        let alternatives = generate_alternatives(sql, dialect);
        let cost_reduction = self.cost_reduction(sql, &optimized_sql, dialect);

        Ok(OptimizeReport {
            comparison_text: format!("Original:\n{sql}\n\nOptimized:\n{optimized_sql}"),
            original_sql: sql.to_string(),
            optimized_sql,
            alternatives,
            improvements,
            cost_reduction,
        })
    }

    fn cost_reduction(&self, original: &str, optimized: &str, dialect: Dialect) -> String {
        let analyzer = QueryAnalyzer::with_config(self.config.clone());

        match (parse(original, dialect), parse(optimized, dialect)) {
            (Ok(original), Ok(optimized)) => estimate_cost_reduction(
                analyzer.complexity(&original.tree).score,
                analyzer.complexity(&optimized.tree).score,
                &self.config,
            ),
            (Err(err), _) | (_, Err(err)) => {
                tracing::debug!(error = %err, "cost estimate unavailable");
                COST_UNKNOWN.to_string()
            }
        }
    }

    /// Suggest indexes for a query
    ///
    /// The dialect is detected from the text. `schema` is accepted for
    /// compatibility and does not influence the result yet. A query that does
    /// not parse yields an empty report.
    #[tracing::instrument(skip(self, sql, _schema))]
    pub fn suggest_indexes(&self, sql: &str, _schema: Option<&str>) -> IndexReport {
        let dialect = detect_dialect(sql);
        let suggestions =
            IndexSuggester::with_config(self.config.clone()).suggest_indexes(sql, dialect);

        IndexReport {
            dialect,
            count: suggestions.len(),
            suggestions,
        }
    }
}

fn resolve_dialect(name: &str, sql: &str) -> ServiceResult<Dialect> {
    let choice: DialectChoice = name
        .parse()
        .map_err(|_| ServiceError::UnknownDialect(name.to_string()))?;
    Ok(choice.resolve(sql))
}
