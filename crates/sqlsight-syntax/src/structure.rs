//! Query structure metadata reported alongside every analysis

use crate::lower::ParsedQuery;
use crate::tree::Node;
use serde::Serialize;
use sqlparser::ast::{GroupByExpr, Query, Select, SetExpr, Statement};
use std::fmt::Display;

/// Tables, columns and clause text of a parsed query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStructure {
    /// Referenced table names, in traversal order
    pub tables: Vec<String>,
    /// Referenced column names, in traversal order
    pub columns: Vec<String>,
    /// Statement kind (`SELECT`, `UNION`, `INSERT`, ...)
    pub query_type: String,
    /// Clause text, filled for plain SELECT queries
    pub parts: QueryParts,
}

impl QueryStructure {
    pub fn from_parsed(parsed: &ParsedQuery) -> Self {
        let tree = &parsed.tree;

        let parts = match &parsed.statement {
            Statement::Query(query) => match query.body.as_ref() {
                SetExpr::Select(select) => QueryParts::from_select(select, query),
                _ => QueryParts::default(),
            },
            _ => QueryParts::default(),
        };

        Self {
            tables: tree
                .walk()
                .filter_map(Node::table)
                .map(|t| t.name.clone())
                .collect(),
            columns: tree.columns().map(|c| c.name.clone()).collect(),
            query_type: tree.kind().label().to_string(),
            parts,
        }
    }
}

/// Rendered clauses of a SELECT query, keyed by clause keyword on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryParts {
    #[serde(rename = "SELECT", skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<String>,
    #[serde(rename = "FROM", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "WHERE", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(rename = "GROUP BY", skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(rename = "HAVING", skip_serializing_if = "Option::is_none")]
    pub having: Option<String>,
    #[serde(rename = "ORDER BY", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(rename = "LIMIT", skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl QueryParts {
    fn from_select(select: &Select, query: &Query) -> Self {
        let group_by = match &select.group_by {
            GroupByExpr::Expressions(exprs, _) if !exprs.is_empty() => {
                Some(format!("GROUP BY {}", comma_separated(exprs)))
            }
            GroupByExpr::All(_) => Some("GROUP BY ALL".to_string()),
            _ => None,
        };

        let order_by = query
            .order_by
            .as_ref()
            .filter(|order_by| !order_by.exprs.is_empty())
            .map(|order_by| format!("ORDER BY {}", comma_separated(&order_by.exprs)));

        let limit = query
            .limit
            .as_ref()
            .map(|limit| format!("LIMIT {limit}"))
            .or_else(|| select.top.as_ref().map(ToString::to_string));

        Self {
            select: select.projection.iter().map(ToString::to_string).collect(),
            from: (!select.from.is_empty())
                .then(|| format!("FROM {}", comma_separated(&select.from))),
            where_clause: select.selection.as_ref().map(|e| format!("WHERE {e}")),
            group_by,
            having: select.having.as_ref().map(|e| format!("HAVING {e}")),
            order_by,
            limit,
        }
    }
}

fn comma_separated<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
