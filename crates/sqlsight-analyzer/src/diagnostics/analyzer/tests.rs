//! Tests for the query analyzer

use super::*;
use crate::diagnostics::IssueCode;
use pretty_assertions::assert_eq;
use sqlsight_syntax::{Dialect, parse};

fn analyze(sql: &str) -> Vec<IssueCode> {
    let parsed = parse(sql, Dialect::Postgres).unwrap();
    QueryAnalyzer::new()
        .analyze(&parsed.tree)
        .into_iter()
        .map(|issue| issue.code)
        .collect()
}

#[test]
fn test_clean_query_has_no_issues() {
    assert_eq!(
        analyze("SELECT id, name FROM users WHERE id = 1 ORDER BY id LIMIT 10"),
        vec![]
    );
}

#[test]
fn test_issues_accumulate_in_rule_order() {
    let codes = analyze("SELECT * FROM users LIMIT 5");
    assert_eq!(
        codes,
        vec![
            IssueCode::SelectStar,
            IssueCode::MissingWhere,
            IssueCode::NonDeterministicLimit,
        ]
    );
}

#[test]
fn test_wildcard_and_function_on_column() {
    let codes = analyze("SELECT id FROM users WHERE name LIKE '%doe' AND YEAR(created_at) = 2023");
    assert!(codes.contains(&IssueCode::LeadingWildcard));
    assert!(codes.contains(&IssueCode::FunctionOnColumn));
    assert!(!codes.contains(&IssueCode::MissingWhere));
}

#[test]
fn test_duplicate_codes_are_kept() {
    let codes = analyze("SELECT id FROM t WHERE a LIKE '%x' AND b LIKE '%y'");
    let wildcards = codes
        .iter()
        .filter(|c| **c == IssueCode::LeadingWildcard)
        .count();
    assert_eq!(wildcards, 2);
}

#[test]
fn test_analyze_while_stops_between_rules() {
    let parsed = parse("SELECT * FROM users", Dialect::Postgres).unwrap();
    let analyzer = QueryAnalyzer::new();

    let mut budget = 1;
    let issues = analyzer.analyze_while(&parsed.tree, || {
        let go = budget > 0;
        budget -= 1;
        go
    });

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::SelectStar);
}

#[test]
fn test_analyze_while_never_starting() {
    let parsed = parse("SELECT * FROM users", Dialect::Postgres).unwrap();
    assert!(QueryAnalyzer::new()
        .analyze_while(&parsed.tree, || false)
        .is_empty());
}

#[test]
fn test_config_reaches_rules() {
    let parsed = parse(
        "SELECT a.id FROM a JOIN b ON a.id = b.id JOIN c ON a.id = c.id WHERE a.id = 1",
        Dialect::Postgres,
    )
    .unwrap();

    let strict = QueryAnalyzer::with_config(AdvisorConfig::new().with_join_explosion_threshold(1));
    let codes: Vec<IssueCode> = strict
        .analyze(&parsed.tree)
        .into_iter()
        .map(|i| i.code)
        .collect();
    assert_eq!(codes, vec![IssueCode::JoinExplosion]);
}

#[test]
fn test_complexity_uses_configured_cap() {
    let parsed = parse(
        "SELECT a FROM t1 UNION SELECT a FROM t2 UNION SELECT a FROM t3",
        Dialect::Postgres,
    )
    .unwrap();

    assert_eq!(QueryAnalyzer::new().complexity(&parsed.tree).score, 5);
    let capped = QueryAnalyzer::with_config(AdvisorConfig::new().with_max_complexity(3));
    assert_eq!(capped.complexity(&parsed.tree).score, 3);
}

#[test]
fn test_issue_wire_format() {
    let parsed = parse("SELECT name FROM users", Dialect::Postgres).unwrap();
    let issues = QueryAnalyzer::new().analyze(&parsed.tree);
    let json = serde_json::to_value(&issues[0]).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "type": "performance",
            "severity": "high",
            "message": "Query has no WHERE clause, which may cause a full table scan.",
            "code": "MISSING_WHERE",
        })
    );
}
