//! The fixed battery of diagnostic rules
//!
//! Each rule looks at the lowered tree on its own and never depends on the
//! outcome of another rule.

use super::issue::{Issue, IssueCode};
use crate::config::AdvisorConfig;
use sqlsight_syntax::{Node, NodeKind, Slot};
use std::fmt;

/// A single independent check over a query tree
pub trait Rule: fmt::Debug + Send + Sync {
    /// Code reported by this rule
    fn code(&self) -> IssueCode;

    /// Checks the statement rooted at `root`
    fn check(&self, root: &Node) -> Vec<Issue>;
}

/// Builds the rule battery in evaluation order
pub fn default_rules(config: &AdvisorConfig) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SelectStar),
        Box::new(MissingWhere),
        Box::new(LeadingWildcard),
        Box::new(FunctionOnColumn),
        Box::new(OrCondition),
        Box::new(JoinExplosion {
            threshold: config.join_explosion_threshold,
        }),
        Box::new(NullPitfall),
        Box::new(ImplicitCast {
            config: config.clone(),
        }),
        Box::new(NonDeterministicLimit),
    ]
}

/// Nodes under the root's WHERE clause, including the wrapper itself
fn where_nodes(root: &Node) -> impl Iterator<Item = &Node> {
    root.slot(Slot::Where).into_iter().flat_map(Node::walk)
}

/// Comparison nodes under the root's WHERE clause, as (left, right) pairs
fn where_comparisons(root: &Node) -> impl Iterator<Item = (&Node, &Node)> {
    where_nodes(root).filter_map(|node| match node.kind() {
        NodeKind::Binary(op) if op.is_comparison() => node.left().zip(node.right()),
        _ => None,
    })
}

#[derive(Debug)]
pub struct SelectStar;

impl Rule for SelectStar {
    fn code(&self) -> IssueCode {
        IssueCode::SelectStar
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        if root.kind() != &NodeKind::Select {
            return Vec::new();
        }

        let has_star = root.slot(Slot::Projection).is_some_and(|projection| {
            projection
                .children()
                .iter()
                .any(|item| matches!(item.kind(), NodeKind::Star(_)))
        });

        if has_star {
            vec![Issue::new(
                self.code(),
                "Avoid using SELECT *, specify columns explicitly to reduce I/O.",
            )]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct MissingWhere;

impl Rule for MissingWhere {
    fn code(&self) -> IssueCode {
        IssueCode::MissingWhere
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        let applies = matches!(
            root.kind(),
            NodeKind::Select | NodeKind::Update | NodeKind::Delete
        );

        if applies && !root.has_slot(Slot::Where) {
            vec![Issue::new(
                self.code(),
                "Query has no WHERE clause, which may cause a full table scan.",
            )]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct LeadingWildcard;

impl Rule for LeadingWildcard {
    fn code(&self) -> IssueCode {
        IssueCode::LeadingWildcard
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        root.walk()
            .filter(|node| node.kind() == &NodeKind::Like)
            .filter_map(|like| like.slot(Slot::Pattern).and_then(Node::string_literal))
            .filter(|pattern| pattern.starts_with('%'))
            .map(|_| {
                Issue::new(
                    self.code(),
                    "Leading wildcard in LIKE pattern ('%...') prevents index usage.",
                )
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct FunctionOnColumn;

impl Rule for FunctionOnColumn {
    fn code(&self) -> IssueCode {
        IssueCode::FunctionOnColumn
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        where_comparisons(root)
            .filter_map(|(left, _)| match left.kind() {
                NodeKind::Function(call) if left.columns().next().is_some() => Some(call),
                _ => None,
            })
            .map(|call| {
                Issue::new(
                    self.code(),
                    format!(
                        "Function call {} on column in WHERE clause may prevent index usage.",
                        call.sql
                    ),
                )
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct OrCondition;

impl Rule for OrCondition {
    fn code(&self) -> IssueCode {
        IssueCode::OrCondition
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        if where_nodes(root).any(|node| node.kind() == &NodeKind::Or) {
            vec![Issue::new(
                self.code(),
                "OR conditions can sometimes prevent effective index usage. Consider UNION ALL if appropriate.",
            )]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct JoinExplosion {
    pub threshold: usize,
}

impl Rule for JoinExplosion {
    fn code(&self) -> IssueCode {
        IssueCode::JoinExplosion
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        let joins = root.count_where(|kind| kind == &NodeKind::Join);

        if joins > self.threshold {
            vec![Issue::new(
                self.code(),
                format!("Query has {joins} joins. Complex joins can be slow and hard to optimize."),
            )]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct NullPitfall;

impl Rule for NullPitfall {
    fn code(&self) -> IssueCode {
        IssueCode::NullPitfall
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        if root.kind() != &NodeKind::Select {
            return Vec::new();
        }

        root.walk()
            .filter(|node| node.kind() == &NodeKind::Not)
            .filter_map(|not| not.slot(Slot::Operand))
            .filter(|operand| operand.kind() == &NodeKind::In && operand.has_slot(Slot::Query))
            .map(|_| {
                Issue::new(
                    self.code(),
                    "NOT IN with subquery is dangerous if subquery returns NULLs. Use NOT EXISTS or LEFT JOIN.",
                )
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct ImplicitCast {
    pub config: AdvisorConfig,
}

impl Rule for ImplicitCast {
    fn code(&self) -> IssueCode {
        IssueCode::ImplicitCast
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        where_comparisons(root)
            .filter_map(|(left, right)| {
                let (column, literal) = match (left.column(), right.string_literal()) {
                    (Some(column), Some(literal)) => (column, literal),
                    _ => (right.column()?, left.string_literal()?),
                };
                self.config
                    .looks_numeric(&column.name)
                    .then(|| (column.name.as_str(), literal))
            })
            .map(|(column, literal)| {
                Issue::new(
                    self.code(),
                    format!(
                        "Potential implicit cast: Comparing string '{literal}' to likely numeric column '{column}'."
                    ),
                )
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct NonDeterministicLimit;

impl Rule for NonDeterministicLimit {
    fn code(&self) -> IssueCode {
        IssueCode::NonDeterministicLimit
    }

    fn check(&self, root: &Node) -> Vec<Issue> {
        if root.kind() == &NodeKind::Select
            && root.has_slot(Slot::Limit)
            && !root.has_slot(Slot::OrderBy)
        {
            vec![Issue::new(
                self.code(),
                "LIMIT used without ORDER BY causes non-deterministic results.",
            )]
        } else {
            Vec::new()
        }
    }
}
