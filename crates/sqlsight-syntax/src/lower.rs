//! Parsing and lowering of sqlparser statements into the query tree
//!
//! The lowering keeps only the shapes the advisory engines look at. Anything
//! else becomes an [`NodeKind::Other`] node carrying its SQL text, with the
//! sub-expressions it wraps kept as children so column walks still see them.

use crate::dialect::Dialect;
use crate::error::{ParseError, Result};
use crate::tree::{
    BinaryOp, ColumnRef, FunctionCall, Literal, Node, NodeKind, SetOperator, Slot, TableRef,
};
use sqlparser::ast::{
    BinaryOperator, Cte, Expr, FromTable, Function, FunctionArg, FunctionArgExpr,
    FunctionArguments, GroupByExpr, Join, JoinConstraint, JoinOperator, ObjectName, Query, Select,
    SelectItem, SetExpr, SetOperator as SqlSetOperator, Statement, TableFactor, TableWithJoins,
    UnaryOperator, Value,
};
use sqlparser::parser::Parser;

/// A successfully parsed statement together with its lowered tree
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    /// Dialect the text was parsed with
    pub dialect: Dialect,
    /// Lowered query tree
    pub tree: Node,
    /// The sqlparser statement, kept for rendering
    pub statement: Statement,
}

impl ParsedQuery {
    /// Renders the statement back to single-line SQL
    pub fn sql(&self) -> String {
        self.statement.to_string()
    }
}

/// Parses exactly one SQL statement and lowers it into a query tree
pub fn parse(sql: &str, dialect: Dialect) -> Result<ParsedQuery> {
    if sql.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let parser_dialect = dialect.sqlparser_dialect();
    let mut statements = Parser::parse_sql(parser_dialect.as_ref(), sql)?;

    let statement = match statements.len() {
        0 => return Err(ParseError::EmptyInput),
        1 => statements.remove(0),
        n => return Err(ParseError::MultipleStatements(n)),
    };

    let tree = lower_statement(&statement);
    tracing::trace!(%dialect, nodes = tree.node_count(), "lowered statement");

    Ok(ParsedQuery {
        dialect,
        tree,
        statement,
    })
}

fn lower_statement(statement: &Statement) -> Node {
    match statement {
        Statement::Query(query) => lower_query(query),
        Statement::Insert(insert) => Node::new(NodeKind::Insert)
            .with_slot(Slot::Target, table_node(&insert.table_name, None))
            .with_optional_slot(Slot::Source, insert.source.as_deref().map(lower_query)),
        Statement::Update {
            table,
            assignments,
            selection,
            ..
        } => Node::new(NodeKind::Update)
            .with_slot(
                Slot::From,
                Node::new(NodeKind::From).with_children(lower_table_with_joins(table)),
            )
            .with_optional_slot(Slot::Where, selection.as_ref().map(where_clause))
            .with_children(assignments.iter().map(|a| lower_expr(&a.value))),
        Statement::Delete(delete) => {
            let tables = match &delete.from {
                FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
            };
            let mut from = Node::new(NodeKind::From)
                .with_children(tables.iter().flat_map(lower_table_with_joins));
            if let Some(using) = &delete.using {
                from = from.with_children(using.iter().flat_map(lower_table_with_joins));
            }

            Node::new(NodeKind::Delete)
                .with_slot(Slot::From, from)
                .with_optional_slot(Slot::Where, delete.selection.as_ref().map(where_clause))
        }
        other => Node::new(NodeKind::Other(other.to_string())),
    }
}

fn lower_query(query: &Query) -> Node {
    let mut node = lower_set_expr(&query.body);

    // ORDER BY and LIMIT belong to the whole query, so they hang off its root
    if let Some(order_by) = &query.order_by {
        if !order_by.exprs.is_empty() {
            node = node.with_slot(
                Slot::OrderBy,
                Node::new(NodeKind::OrderBy)
                    .with_children(order_by.exprs.iter().map(|o| lower_expr(&o.expr))),
            );
        }
    }

    if let Some(limit) = &query.limit {
        node = node.with_slot(Slot::Limit, clause(NodeKind::Limit, limit));
    }

    if let Some(with) = &query.with {
        node = node.with_slot(
            Slot::With,
            Node::new(NodeKind::With).with_children(with.cte_tables.iter().map(lower_cte)),
        );
    }

    node
}

fn lower_cte(cte: &Cte) -> Node {
    Node::new(NodeKind::Cte(cte.alias.name.value.clone()))
        .with_slot(Slot::Query, lower_query(&cte.query))
}

fn lower_set_expr(body: &SetExpr) -> Node {
    match body {
        SetExpr::Select(select) => lower_select(select),
        SetExpr::Query(query) => lower_query(query),
        SetExpr::SetOperation {
            op, left, right, ..
        } => {
            let op = match op {
                SqlSetOperator::Intersect => SetOperator::Intersect,
                SqlSetOperator::Except => SetOperator::Except,
                _ => SetOperator::Union,
            };
            Node::new(NodeKind::SetOperation(op))
                .with_slot(Slot::Left, lower_set_expr(left))
                .with_slot(Slot::Right, lower_set_expr(right))
        }
        other => Node::new(NodeKind::Other(other.to_string())),
    }
}

fn lower_select(select: &Select) -> Node {
    let projection =
        Node::new(NodeKind::Projection).with_children(select.projection.iter().map(lower_select_item));

    let from = (!select.from.is_empty()).then(|| {
        Node::new(NodeKind::From).with_children(select.from.iter().flat_map(lower_table_with_joins))
    });

    let group_by = match &select.group_by {
        GroupByExpr::Expressions(exprs, _) if !exprs.is_empty() => {
            Some(Node::new(NodeKind::GroupBy).with_children(exprs.iter().map(lower_expr)))
        }
        GroupByExpr::All(_) => Some(Node::new(NodeKind::GroupBy)),
        _ => None,
    };

    // MSSQL TOP limits the result the same way LIMIT does
    let top = select.top.as_ref().map(|top| {
        Node::new(NodeKind::Limit).with_child(Node::new(NodeKind::Other(top.to_string())))
    });

    Node::new(NodeKind::Select)
        .with_slot(Slot::Projection, projection)
        .with_optional_slot(Slot::From, from)
        .with_optional_slot(Slot::Where, select.selection.as_ref().map(where_clause))
        .with_optional_slot(Slot::GroupBy, group_by)
        .with_optional_slot(
            Slot::Having,
            select.having.as_ref().map(|e| clause(NodeKind::Having, e)),
        )
        .with_optional_slot(Slot::Limit, top)
}

fn lower_select_item(item: &SelectItem) -> Node {
    match item {
        SelectItem::UnnamedExpr(expr) => lower_expr(expr),
        SelectItem::ExprWithAlias { expr, alias } => {
            Node::new(NodeKind::Alias(alias.value.clone())).with_child(lower_expr(expr))
        }
        SelectItem::QualifiedWildcard(name, _) => Node::new(NodeKind::Star(Some(name.to_string()))),
        SelectItem::Wildcard(_) => Node::new(NodeKind::Star(None)),
    }
}

fn lower_table_with_joins(table: &TableWithJoins) -> Vec<Node> {
    let mut nodes = vec![lower_table_factor(&table.relation)];
    nodes.extend(table.joins.iter().map(lower_join));
    nodes
}

fn lower_join(join: &Join) -> Node {
    let constraint = match &join.join_operator {
        JoinOperator::Inner(constraint)
        | JoinOperator::LeftOuter(constraint)
        | JoinOperator::RightOuter(constraint)
        | JoinOperator::FullOuter(constraint) => Some(constraint),
        _ => None,
    };
    let on = match constraint {
        Some(JoinConstraint::On(expr)) => Some(lower_expr(expr)),
        _ => None,
    };

    Node::new(NodeKind::Join)
        .with_slot(Slot::Source, lower_table_factor(&join.relation))
        .with_optional_slot(Slot::On, on)
}

fn lower_table_factor(factor: &TableFactor) -> Node {
    match factor {
        TableFactor::Table { name, alias, .. } => {
            table_node(name, alias.as_ref().map(|a| a.name.value.clone()))
        }
        TableFactor::Derived {
            subquery, alias, ..
        } => {
            let node = subquery_node(subquery);
            match alias {
                Some(alias) => Node::new(NodeKind::Alias(alias.name.value.clone())).with_child(node),
                None => node,
            }
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => Node::new(NodeKind::From).with_children(lower_table_with_joins(table_with_joins)),
        other => Node::new(NodeKind::Other(other.to_string())),
    }
}

fn table_node(name: &ObjectName, alias: Option<String>) -> Node {
    let bare = name
        .0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_else(|| name.to_string());

    Node::new(NodeKind::Table(TableRef { name: bare, alias }))
}

fn where_clause(expr: &Expr) -> Node {
    clause(NodeKind::Where, expr)
}

fn clause(kind: NodeKind, expr: &Expr) -> Node {
    Node::new(kind).with_child(lower_expr(expr))
}

fn subquery_node(query: &Query) -> Node {
    Node::new(NodeKind::Subquery).with_slot(Slot::Query, lower_query(query))
}

fn negate(negated: bool, node: Node) -> Node {
    if negated {
        Node::new(NodeKind::Not).with_slot(Slot::Operand, node)
    } else {
        node
    }
}

fn function_node(name: &str, sql: String, args: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Function(FunctionCall {
        name: name.to_string(),
        sql,
    }))
    .with_children(args)
}

fn other_node(expr: &Expr, children: impl IntoIterator<Item = Node>) -> Node {
    Node::new(NodeKind::Other(expr.to_string())).with_children(children)
}

fn lower_expr(expr: &Expr) -> Node {
    match expr {
        Expr::Identifier(ident) => Node::new(NodeKind::Column(ColumnRef {
            name: ident.value.clone(),
            qualifier: None,
        })),
        Expr::CompoundIdentifier(parts) => match parts.split_last() {
            Some((name, qualifiers)) => Node::new(NodeKind::Column(ColumnRef {
                name: name.value.clone(),
                qualifier: qualifiers.last().map(|q| q.value.clone()),
            })),
            None => other_node(expr, []),
        },
        Expr::Value(value) => Node::new(NodeKind::Literal(lower_value(value))),
        Expr::Nested(inner) => lower_expr(inner),
        Expr::BinaryOp { left, op, right } => {
            let kind = match op {
                BinaryOperator::And => NodeKind::And,
                BinaryOperator::Or => NodeKind::Or,
                op => NodeKind::Binary(lower_binary_op(op)),
            };
            Node::new(kind)
                .with_slot(Slot::Left, lower_expr(left))
                .with_slot(Slot::Right, lower_expr(right))
        }
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: inner,
        } => Node::new(NodeKind::Not).with_slot(Slot::Operand, lower_expr(inner)),
        Expr::UnaryOp { expr: inner, .. } => other_node(expr, [lower_expr(inner)]),
        Expr::Like {
            negated,
            expr: inner,
            pattern,
            ..
        }
        | Expr::ILike {
            negated,
            expr: inner,
            pattern,
            ..
        } => negate(
            *negated,
            Node::new(NodeKind::Like)
                .with_slot(Slot::Operand, lower_expr(inner))
                .with_slot(Slot::Pattern, lower_expr(pattern)),
        ),
        Expr::InList {
            expr: inner,
            list,
            negated,
            ..
        } => negate(
            *negated,
            Node::new(NodeKind::In)
                .with_slot(Slot::Operand, lower_expr(inner))
                .with_children(list.iter().map(lower_expr)),
        ),
        Expr::InSubquery {
            expr: inner,
            subquery,
            negated,
            ..
        } => negate(
            *negated,
            Node::new(NodeKind::In)
                .with_slot(Slot::Operand, lower_expr(inner))
                .with_slot(Slot::Query, subquery_node(subquery)),
        ),
        Expr::Exists {
            subquery, negated, ..
        } => negate(
            *negated,
            function_node("EXISTS", format!("EXISTS ({subquery})"), [subquery_node(subquery)]),
        ),
        Expr::Subquery(query) => subquery_node(query),
        Expr::Function(function) => lower_function(function, expr),
        Expr::Cast { expr: inner, .. } => function_node("CAST", expr.to_string(), [lower_expr(inner)]),
        Expr::Extract { expr: inner, .. } => {
            function_node("EXTRACT", expr.to_string(), [lower_expr(inner)])
        }
        Expr::Substring { expr: inner, .. } => {
            function_node("SUBSTRING", expr.to_string(), [lower_expr(inner)])
        }
        Expr::Trim { expr: inner, .. } => function_node("TRIM", expr.to_string(), [lower_expr(inner)]),
        Expr::Ceil { expr: inner, .. } => function_node("CEIL", expr.to_string(), [lower_expr(inner)]),
        Expr::Floor { expr: inner, .. } => {
            function_node("FLOOR", expr.to_string(), [lower_expr(inner)])
        }
        Expr::Between {
            expr: inner,
            low,
            high,
            ..
        } => other_node(expr, [lower_expr(inner), lower_expr(low), lower_expr(high)]),
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => other_node(expr, [lower_expr(inner)]),
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
            ..
        } => {
            let children: Vec<Node> = operand
                .iter()
                .map(|e| lower_expr(e))
                .chain(conditions.iter().map(lower_expr))
                .chain(results.iter().map(lower_expr))
                .chain(else_result.iter().map(|e| lower_expr(e)))
                .collect();
            other_node(expr, children)
        }
        Expr::Tuple(items) => other_node(expr, items.iter().map(lower_expr)),
        _ => other_node(expr, []),
    }
}

fn lower_function(function: &Function, expr: &Expr) -> Node {
    let args: Vec<Node> = match &function.args {
        FunctionArguments::List(list) => list.args.iter().map(lower_function_arg).collect(),
        FunctionArguments::Subquery(query) => vec![subquery_node(query)],
        FunctionArguments::None => Vec::new(),
    };

    function_node(&function.name.to_string(), expr.to_string(), args)
}

fn lower_function_arg(arg: &FunctionArg) -> Node {
    let arg_expr = match arg {
        FunctionArg::Unnamed(arg_expr) => arg_expr,
        FunctionArg::Named { arg: arg_expr, .. } => arg_expr,
        #[allow(unreachable_patterns)]
        _ => return Node::new(NodeKind::Other(arg.to_string())),
    };

    match arg_expr {
        FunctionArgExpr::Expr(expr) => lower_expr(expr),
        FunctionArgExpr::QualifiedWildcard(name) => Node::new(NodeKind::Star(Some(name.to_string()))),
        FunctionArgExpr::Wildcard => Node::new(NodeKind::Star(None)),
    }
}

fn lower_value(value: &Value) -> Literal {
    match value {
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::NationalStringLiteral(s)
        | Value::EscapedStringLiteral(s) => Literal::String(s.clone()),
        Value::Number(n, _) => Literal::Number(n.to_string()),
        Value::Boolean(b) => Literal::Boolean(*b),
        Value::Null => Literal::Null,
        other => Literal::Other(other.to_string()),
    }
}

fn lower_binary_op(op: &BinaryOperator) -> BinaryOp {
    match op {
        BinaryOperator::Eq => BinaryOp::Eq,
        BinaryOperator::NotEq => BinaryOp::NotEq,
        BinaryOperator::Lt => BinaryOp::Lt,
        BinaryOperator::LtEq => BinaryOp::LtEq,
        BinaryOperator::Gt => BinaryOp::Gt,
        BinaryOperator::GtEq => BinaryOp::GtEq,
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo => BinaryOp::Arithmetic,
        _ => BinaryOp::Other,
    }
}

#[cfg(test)]
mod tests;
