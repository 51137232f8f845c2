//! Tests for parsing and lowering

use super::*;

fn tree(sql: &str) -> Node {
    parse(sql, Dialect::Postgres).unwrap().tree
}

fn where_predicate(root: &Node) -> &Node {
    root.slot(Slot::Where).and_then(Node::predicate).unwrap()
}

fn count(root: &Node, predicate: impl Fn(&NodeKind) -> bool) -> usize {
    root.count_where(predicate)
}

mod parse_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            parse("   ", Dialect::Postgres),
            Err(ParseError::EmptyInput)
        ));
    }

    #[test]
    fn test_multiple_statements_are_rejected() {
        assert!(matches!(
            parse("SELECT 1; SELECT 2", Dialect::Postgres),
            Err(ParseError::MultipleStatements(2))
        ));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse("SELEC id FROM users", Dialect::Postgres).unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn test_trailing_semicolon_is_accepted() {
        let parsed = parse("SELECT id FROM users;", Dialect::Postgres).unwrap();
        assert_eq!(parsed.tree.kind(), &NodeKind::Select);
        assert_eq!(parsed.dialect, Dialect::Postgres);
    }

    #[test]
    fn test_sql_renders_statement() {
        let parsed = parse("select id from users", Dialect::Postgres).unwrap();
        assert_eq!(parsed.sql(), "SELECT id FROM users");
    }
}

mod select_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_alias_and_qualified_column() {
        let root = tree("SELECT u.id FROM users u WHERE u.id = 1");

        let table = root.walk().find_map(Node::table).unwrap();
        assert_eq!(table.name, "users");
        assert_eq!(table.alias.as_deref(), Some("u"));

        let predicate = where_predicate(&root);
        assert_eq!(predicate.kind(), &NodeKind::Binary(BinaryOp::Eq));
        let column = predicate.left().and_then(Node::column).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.qualifier.as_deref(), Some("u"));
    }

    #[test]
    fn test_schema_qualified_table_keeps_bare_name() {
        let root = tree("SELECT id FROM public.users");
        let table = root.walk().find_map(Node::table).unwrap();
        assert_eq!(table.name, "users");
    }

    #[test]
    fn test_projection_items() {
        let root = tree("SELECT *, u.*, name AS n FROM users u");
        let projection = root.slot(Slot::Projection).unwrap();
        let kinds: Vec<&NodeKind> = projection.children().iter().map(Node::kind).collect();

        assert_eq!(
            kinds,
            vec![
                &NodeKind::Star(None),
                &NodeKind::Star(Some("u".to_string())),
                &NodeKind::Alias("n".to_string()),
            ]
        );
    }

    #[test]
    fn test_clause_slots() {
        let root = tree(
            "SELECT dept, COUNT(*) FROM emp WHERE active = true \
             GROUP BY dept HAVING COUNT(*) > 1 ORDER BY dept LIMIT 5",
        );

        for slot in [
            Slot::Projection,
            Slot::From,
            Slot::Where,
            Slot::GroupBy,
            Slot::Having,
            Slot::OrderBy,
            Slot::Limit,
        ] {
            assert!(root.has_slot(slot), "missing {slot:?}");
        }
    }

    #[test]
    fn test_missing_clauses_leave_slots_empty() {
        let root = tree("SELECT name FROM users");
        assert!(!root.has_slot(Slot::Where));
        assert!(!root.has_slot(Slot::OrderBy));
        assert!(!root.has_slot(Slot::Limit));
    }

    #[test]
    fn test_top_lowers_to_limit() {
        let parsed = parse("SELECT TOP 10 id FROM users", Dialect::TSql).unwrap();
        assert!(parsed.tree.has_slot(Slot::Limit));
        assert!(!parsed.tree.has_slot(Slot::OrderBy));
    }

    #[test]
    fn test_joins_carry_on_conditions() {
        let root = tree(
            "SELECT a.id FROM a JOIN b ON a.id = b.a_id LEFT JOIN c ON c.id = b.c_id CROSS JOIN d",
        );

        let joins: Vec<&Node> = root
            .walk()
            .filter(|n| n.kind() == &NodeKind::Join)
            .collect();
        assert_eq!(joins.len(), 3);
        assert!(joins[0].has_slot(Slot::On));
        assert!(joins[1].has_slot(Slot::On));
        assert!(!joins[2].has_slot(Slot::On));

        let joined = joins[1].slot(Slot::Source).and_then(Node::table).unwrap();
        assert_eq!(joined.name, "c");
    }

    #[test]
    fn test_derived_table_is_aliased_subquery() {
        let root = tree("SELECT x FROM (SELECT 1 AS x) AS t");
        let from = root.slot(Slot::From).unwrap();
        let derived = &from.children()[0];

        assert_eq!(derived.kind(), &NodeKind::Alias("t".to_string()));
        assert_eq!(derived.children()[0].kind(), &NodeKind::Subquery);
        assert_eq!(count(&root, |k| k == &NodeKind::Subquery), 1);
    }

    #[test]
    fn test_cte_is_kept_under_with() {
        let root = tree("WITH recent AS (SELECT id FROM orders) SELECT id FROM recent");
        let with = root.slot(Slot::With).unwrap();

        assert_eq!(with.kind(), &NodeKind::With);
        assert_eq!(with.children()[0].kind(), &NodeKind::Cte("recent".to_string()));
        assert_eq!(count(&root, |k| matches!(k, NodeKind::Table(_))), 2);
    }
}

mod expression_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_not_in_subquery() {
        let root = tree("SELECT id FROM a WHERE id NOT IN (SELECT a_id FROM b)");
        let predicate = where_predicate(&root);

        assert_eq!(predicate.kind(), &NodeKind::Not);
        let in_node = predicate.slot(Slot::Operand).unwrap();
        assert_eq!(in_node.kind(), &NodeKind::In);
        assert_eq!(
            in_node.slot(Slot::Query).map(Node::kind),
            Some(&NodeKind::Subquery)
        );
    }

    #[test]
    fn test_in_list_children() {
        let root = tree("SELECT id FROM a WHERE status IN ('a', 'b')");
        let predicate = where_predicate(&root);

        assert_eq!(predicate.kind(), &NodeKind::In);
        assert_eq!(predicate.children().len(), 2);
        assert_eq!(predicate.children()[0].string_literal(), Some("a"));
    }

    #[test]
    fn test_like_pattern_slot() {
        let root = tree("SELECT id FROM users WHERE name LIKE '%doe'");
        let predicate = where_predicate(&root);

        assert_eq!(predicate.kind(), &NodeKind::Like);
        assert_eq!(
            predicate.slot(Slot::Pattern).and_then(Node::string_literal),
            Some("%doe")
        );
        assert_eq!(
            predicate.slot(Slot::Operand).and_then(Node::column).map(|c| c.name.as_str()),
            Some("name")
        );
    }

    #[test]
    fn test_not_like_and_ilike() {
        let root = tree("SELECT id FROM users WHERE name NOT LIKE 'a%' AND email ILIKE '%x'");
        let predicate = where_predicate(&root);

        assert_eq!(predicate.kind(), &NodeKind::And);
        let left = predicate.left().unwrap();
        assert_eq!(left.kind(), &NodeKind::Not);
        assert_eq!(left.slot(Slot::Operand).map(Node::kind), Some(&NodeKind::Like));
        assert_eq!(predicate.right().map(Node::kind), Some(&NodeKind::Like));
    }

    #[test]
    fn test_function_keeps_arguments() {
        let root = tree("SELECT id FROM users WHERE YEAR(created_at) = 2023");
        let predicate = where_predicate(&root);
        let function = predicate.left().unwrap();

        match function.kind() {
            NodeKind::Function(call) => {
                assert_eq!(call.name, "YEAR");
                assert_eq!(call.sql, "YEAR(created_at)");
            }
            other => panic!("expected function, got {other:?}"),
        }
        assert_eq!(function.columns().count(), 1);
    }

    #[test]
    fn test_cast_lowers_to_function() {
        let root = tree("SELECT id FROM t WHERE CAST(created AS DATE) = '2024-01-01'");
        let left = where_predicate(&root).left().unwrap();

        assert!(matches!(left.kind(), NodeKind::Function(call) if call.name == "CAST"));
        assert_eq!(left.columns().next().map(|c| c.name.as_str()), Some("created"));
    }

    #[test]
    fn test_exists_wraps_subquery() {
        let root = tree("SELECT id FROM a WHERE EXISTS (SELECT 1 FROM b WHERE b.a_id = a.id)");
        let predicate = where_predicate(&root);

        assert!(matches!(predicate.kind(), NodeKind::Function(call) if call.name == "EXISTS"));
        assert_eq!(predicate.children()[0].kind(), &NodeKind::Subquery);
    }

    #[test]
    fn test_nested_parentheses_are_transparent() {
        let root = tree("SELECT id FROM t WHERE (a = 1 OR b = 2)");
        assert_eq!(where_predicate(&root).kind(), &NodeKind::Or);
    }

    #[test]
    fn test_between_keeps_columns_under_other() {
        let root = tree("SELECT id FROM t WHERE age BETWEEN 18 AND 30");
        let predicate = where_predicate(&root);

        assert!(matches!(predicate.kind(), NodeKind::Other(_)));
        assert_eq!(predicate.columns().next().map(|c| c.name.as_str()), Some("age"));
    }

    #[test]
    fn test_literals() {
        let root = tree("SELECT 'x', 42, NULL, true");
        let projection = root.slot(Slot::Projection).unwrap();
        let literals: Vec<&Literal> = projection.children().iter().filter_map(Node::literal).collect();

        assert_eq!(
            literals,
            vec![
                &Literal::String("x".to_string()),
                &Literal::Number("42".to_string()),
                &Literal::Null,
                &Literal::Boolean(true),
            ]
        );
    }
}

mod statement_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_operation_owns_query_order_by() {
        let root = tree("SELECT a FROM t1 UNION SELECT a FROM t2 ORDER BY a");

        assert_eq!(root.kind(), &NodeKind::SetOperation(SetOperator::Union));
        assert!(root.has_slot(Slot::OrderBy));
        assert_eq!(root.left().map(Node::kind), Some(&NodeKind::Select));
        assert_eq!(root.right().map(Node::kind), Some(&NodeKind::Select));
    }

    #[test]
    fn test_intersect_and_except() {
        let root = tree("SELECT a FROM t1 INTERSECT SELECT a FROM t2 EXCEPT SELECT a FROM t3");
        assert_eq!(
            count(&root, |k| matches!(k, NodeKind::SetOperation(_))),
            2
        );
        assert_eq!(count(&root, |k| k == &NodeKind::SetOperation(SetOperator::Intersect)), 1);
        assert_eq!(count(&root, |k| k == &NodeKind::SetOperation(SetOperator::Except)), 1);
    }

    #[test]
    fn test_insert_select() {
        let root = tree("INSERT INTO logs (msg) SELECT msg FROM staging");

        assert_eq!(root.kind(), &NodeKind::Insert);
        assert_eq!(
            root.slot(Slot::Target).and_then(Node::table).map(|t| t.name.as_str()),
            Some("logs")
        );
        assert_eq!(root.slot(Slot::Source).map(Node::kind), Some(&NodeKind::Select));
    }

    #[test]
    fn test_update_with_where() {
        let root = tree("UPDATE users SET name = 'x' WHERE id = 1");

        assert_eq!(root.kind(), &NodeKind::Update);
        assert!(root.has_slot(Slot::Where));
        let table = root.slot(Slot::From).and_then(|f| f.children()[0].table()).unwrap();
        assert_eq!(table.name, "users");
    }

    #[test]
    fn test_delete_without_where() {
        let root = tree("DELETE FROM sessions");

        assert_eq!(root.kind(), &NodeKind::Delete);
        assert!(!root.has_slot(Slot::Where));
        assert_eq!(count(&root, |k| matches!(k, NodeKind::Table(_))), 1);
    }

    #[test]
    fn test_unmodelled_statement_is_other() {
        let root = tree("CREATE TABLE t (id INT)");
        assert!(matches!(root.kind(), NodeKind::Other(_)));
    }
}
