//! Tests for the PostgreSQL EXPLAIN parser

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_seq_scan() {
    let plan = parse_postgres_explain(
        "Seq Scan on users  (cost=0.00..458.00 rows=10000 width=244)\n  Filter: (age > 21)",
    );

    assert_eq!(plan.scans, vec![PlanScanRecord::new("Seq Scan").with_table("users")]);
    assert_eq!(plan.total_cost, 458.0);
    assert_eq!(plan.estimated_rows, 10000);
    assert_eq!(plan.actual_rows, 0);
}

#[test]
fn test_seq_scans_come_before_index_scans() {
    let text = "\
Nested Loop  (cost=0.29..16.34 rows=1 width=72)
  ->  Index Scan using orders_pkey on orders  (cost=0.29..8.30 rows=1 width=36)
        Index Cond: (id = 42)
  ->  Seq Scan on users  (cost=0.00..8.03 rows=1 width=36)
        Filter: (id = 7)";

    let plan = parse_postgres_explain(text);

    assert_eq!(
        plan.scans,
        vec![
            PlanScanRecord::new("Seq Scan").with_table("users"),
            PlanScanRecord::new("Index Scan")
                .with_index("orders_pkey")
                .with_table("orders"),
        ]
    );
    assert_eq!(plan.total_cost, 16.34);
    assert_eq!(plan.estimated_rows, 1);
}

#[test]
fn test_parse_analyze_output() {
    let text = "Seq Scan on users  (cost=0.00..35.50 rows=2550 width=4) \
                (actual time=0.012..0.350 rows=1000 loops=1)";

    let plan = parse_postgres_explain(text);

    assert_eq!(plan.estimated_rows, 2550);
    assert_eq!(plan.actual_rows, 1000);
}

#[test]
fn test_unrecognized_text_is_empty() {
    let plan = parse_postgres_explain("Result");

    assert!(plan.is_empty());
    assert_eq!(plan.total_cost, 0.0);
    assert_eq!(plan.estimated_rows, 0);
    assert_eq!(plan.actual_rows, 0);
}

#[test]
fn test_multiple_seq_scans() {
    let text = "\
Hash Join  (cost=13.15..27.21 rows=140 width=72)
  ->  Seq Scan on orders  (cost=0.00..12.10 rows=210 width=36)
  ->  Hash  (cost=11.40..11.40 rows=140 width=36)
        ->  Seq Scan on users  (cost=0.00..11.40 rows=140 width=36)";

    let tables: Vec<_> = parse_postgres_explain(text)
        .scans
        .into_iter()
        .filter_map(|s| s.table)
        .collect();
    assert_eq!(tables, vec!["orders", "users"]);
}
