//! Query rewriting and alternative generation

use serde::{Deserialize, Serialize};
use sqlformat::{FormatOptions, Indent, QueryParams};
use sqlparser::ast::{BinaryOperator, Expr, Query, SetExpr, Statement, Value};
use sqlsight_syntax::{Dialect, parse};
use std::fmt;

/// Rewrites a query into an equivalent, cheaper form.
///
/// Implementations fail open: input they cannot handle is returned as is.
pub trait QueryRewriter: fmt::Debug + Send + Sync {
    fn rewrite(&self, sql: &str, dialect: Dialect) -> String;
}

/// Removes always-true conjuncts (`1 = 1`, `TRUE`) from WHERE and HAVING,
/// then pretty-prints the statement
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyingRewriter;

impl QueryRewriter for SimplifyingRewriter {
    fn rewrite(&self, sql: &str, dialect: Dialect) -> String {
        let mut parsed = match parse(sql, dialect) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(%dialect, error = %err, "rewriter returning input unchanged");
                return sql.to_string();
            }
        };

        simplify_statement(&mut parsed.statement);
        pretty_print(&parsed.statement.to_string())
    }
}

/// An alternative form of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub sql: String,
    pub description: String,
}

/// Produces alternative forms of `sql`, or none when it does not parse
pub fn generate_alternatives(sql: &str, dialect: Dialect) -> Vec<Alternative> {
    match parse(sql, dialect) {
        Ok(parsed) => vec![Alternative {
            name: "Formatted Only".to_string(),
            sql: pretty_print(&parsed.sql()),
            description: "Cleanly formatted original query without structural changes."
                .to_string(),
        }],
        Err(err) => {
            tracing::debug!(%dialect, error = %err, "no alternatives for unparseable query");
            Vec::new()
        }
    }
}

/// Formats SQL with two-space indentation and uppercase keywords
pub fn pretty_print(sql: &str) -> String {
    let options = FormatOptions {
        indent: Indent::Spaces(2),
        uppercase: Some(true),
        ..Default::default()
    };

    sqlformat::format(sql, &QueryParams::None, &options)
}

fn simplify_statement(statement: &mut Statement) {
    match statement {
        Statement::Query(query) => simplify_query(query),
        Statement::Insert(insert) => {
            if let Some(source) = insert.source.as_deref_mut() {
                simplify_query(source);
            }
        }
        Statement::Update { selection, .. } => simplify_predicate(selection),
        Statement::Delete(delete) => simplify_predicate(&mut delete.selection),
        _ => {}
    }
}

fn simplify_query(query: &mut Query) {
    if let Some(with) = &mut query.with {
        for cte in &mut with.cte_tables {
            simplify_query(&mut cte.query);
        }
    }
    simplify_set_expr(&mut query.body);
}

fn simplify_set_expr(body: &mut SetExpr) {
    match body {
        SetExpr::Select(select) => {
            simplify_predicate(&mut select.selection);
            simplify_predicate(&mut select.having);
        }
        SetExpr::Query(query) => simplify_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            simplify_set_expr(left);
            simplify_set_expr(right);
        }
        _ => {}
    }
}

fn simplify_predicate(predicate: &mut Option<Expr>) {
    if let Some(expr) = predicate.take() {
        *predicate = strip_tautologies(expr);
        if predicate.is_none() {
            tracing::trace!("dropped predicate that is always true");
        }
    }
}

/// Returns the expression without always-true conjuncts, or `None` when
/// nothing remains
fn strip_tautologies(expr: Expr) -> Option<Expr> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => match (strip_tautologies(*left), strip_tautologies(*right)) {
            (Some(left), Some(right)) => Some(Expr::BinaryOp {
                left: Box::new(left),
                op: BinaryOperator::And,
                right: Box::new(right),
            }),
            (Some(remaining), None) | (None, Some(remaining)) => Some(remaining),
            (None, None) => None,
        },
        Expr::Nested(inner) => strip_tautologies(*inner).map(|e| Expr::Nested(Box::new(e))),
        expr if is_tautology(&expr) => None,
        expr => Some(expr),
    }
}

fn is_tautology(expr: &Expr) -> bool {
    match expr {
        Expr::Value(Value::Boolean(true)) => true,
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        } => matches!(**left, Expr::Value(_)) && left == right,
        _ => false,
    }
}
