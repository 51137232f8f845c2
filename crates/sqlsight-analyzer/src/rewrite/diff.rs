//! Textual comparison of an original and a rewritten query

use crate::config::AdvisorConfig;
use regex::Regex;
use std::sync::LazyLock;

static JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bJOIN\b").expect("valid join pattern"));

static UNION_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUNION\s+ALL\b").expect("valid union all pattern"));

static OR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bOR\b").expect("valid or pattern"));

static TAUTOLOGY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b1\s*=\s*1\b").expect("valid tautology pattern"));

pub const SIMPLIFIED: &str = "Query simplified (syntax reduction).";
pub const SUBQUERY_TO_JOIN: &str =
    "Converted correlated subqueries to JOINs (improves execution plan).";
pub const OR_TO_UNION_ALL: &str =
    "Replaced OR conditions with UNION ALL (enables index usage per branch).";
pub const TAUTOLOGY_REMOVED: &str = "Removed tautologies (1=1) to simplify predicate evaluation.";
pub const JOIN_OPTIMIZATION: &str = "Applied predicate pushdown and join optimization rules.";

const NO_REDUCTION: &str = "No significant structural complexity reduction detected.";

/// Lists the improvements visible in the text of `optimized`.
///
/// Detection is heuristic: any JOIN in the rewritten text yields the
/// join-optimization note, whether or not a pushdown happened.
pub fn summarize_improvements(original: &str, optimized: &str) -> Vec<String> {
    let mut improvements = Vec::new();

    if normalized_len(optimized) < normalized_len(original) {
        improvements.push(SIMPLIFIED);
    }

    if JOIN.is_match(optimized) && !JOIN.is_match(original) {
        improvements.push(SUBQUERY_TO_JOIN);
    }

    if UNION_ALL.is_match(optimized) && !UNION_ALL.is_match(original) && OR.is_match(original) {
        improvements.push(OR_TO_UNION_ALL);
    }

    if TAUTOLOGY.is_match(original) && !TAUTOLOGY.is_match(optimized) {
        improvements.push(TAUTOLOGY_REMOVED);
    }

    if JOIN.is_match(optimized) {
        improvements.push(JOIN_OPTIMIZATION);
    }

    improvements.into_iter().map(String::from).collect()
}

/// Describes the drop from `original` to `optimized` complexity score
pub fn estimate_cost_reduction(original: u32, optimized: u32, config: &AdvisorConfig) -> String {
    if original <= optimized {
        return NO_REDUCTION.to_string();
    }

    let percent = (original - optimized)
        .saturating_mul(config.reduction_per_point)
        .min(config.max_reduction);

    format!("Estimated structural complexity reduction: ~{percent}%")
}

/// Character count with whitespace runs collapsed to single spaces
fn normalized_len(sql: &str) -> usize {
    sql.split_whitespace()
        .map(|word| word.chars().count() + 1)
        .sum::<usize>()
        .saturating_sub(1)
}
