use super::*;
use crate::{Dialect, parse};
use pretty_assertions::assert_eq;

fn structure(sql: &str) -> QueryStructure {
    QueryStructure::from_parsed(&parse(sql, Dialect::Postgres).unwrap())
}

#[test]
fn test_tables_and_columns_in_text_order() {
    let s = structure("SELECT id, name FROM users WHERE age > 21");

    assert_eq!(s.tables, vec!["users"]);
    assert_eq!(s.columns, vec!["id", "name", "age"]);
    assert_eq!(s.query_type, "SELECT");
}

#[test]
fn test_select_parts() {
    let s = structure(
        "SELECT dept, COUNT(*) FROM emp WHERE active = true \
         GROUP BY dept HAVING COUNT(*) > 1 ORDER BY dept LIMIT 5",
    );

    assert_eq!(
        s.parts,
        QueryParts {
            select: vec!["dept".to_string(), "COUNT(*)".to_string()],
            from: Some("FROM emp".to_string()),
            where_clause: Some("WHERE active = true".to_string()),
            group_by: Some("GROUP BY dept".to_string()),
            having: Some("HAVING COUNT(*) > 1".to_string()),
            order_by: Some("ORDER BY dept".to_string()),
            limit: Some("LIMIT 5".to_string()),
        }
    );
}

#[test]
fn test_parts_serialize_with_clause_keywords() {
    let s = structure("SELECT id FROM users WHERE id = 1");
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["queryType"], "SELECT");
    assert_eq!(json["parts"]["SELECT"][0], "id");
    assert_eq!(json["parts"]["WHERE"], "WHERE id = 1");
    assert!(json["parts"].get("GROUP BY").is_none());
}

#[test]
fn test_non_select_has_empty_parts() {
    let s = structure("DELETE FROM sessions WHERE expired = true");

    assert_eq!(s.query_type, "DELETE");
    assert_eq!(s.tables, vec!["sessions"]);
    assert_eq!(s.parts, QueryParts::default());
}

#[test]
fn test_union_reports_set_operation() {
    let s = structure("SELECT a FROM t1 UNION SELECT a FROM t2");

    assert_eq!(s.query_type, "UNION");
    assert_eq!(s.tables, vec!["t1", "t2"]);
}
