//! Structural complexity scoring

use serde::{Deserialize, Serialize};
use sqlsight_syntax::{Node, NodeKind, Slot};

/// Contribution of each structural factor to the complexity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    /// Always 1
    pub base: u32,
    pub joins: u32,
    pub subqueries: u32,
    pub group_by: u32,
    pub order_by: u32,
    pub having: u32,
    /// Two points per UNION/INTERSECT/EXCEPT
    pub set_ops: u32,
}

impl ComplexityBreakdown {
    /// Sum of all contributions
    pub fn total(&self) -> u32 {
        self.base
            + self.joins
            + self.subqueries
            + self.group_by
            + self.order_by
            + self.having
            + self.set_ops
    }
}

/// Clamped complexity score with its breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub score: u32,
    pub breakdown: ComplexityBreakdown,
}

impl ComplexityScore {
    /// Scores the statement rooted at `root`, clamping to `1..=max`
    pub fn calculate(root: &Node, max: u32) -> Self {
        let count = |kind: fn(&NodeKind) -> bool| root.count_where(kind) as u32;
        let present = |slot: Slot| u32::from(root.has_slot(slot));

        let breakdown = ComplexityBreakdown {
            base: 1,
            joins: count(|k| k == &NodeKind::Join),
            subqueries: count(|k| k == &NodeKind::Subquery),
            group_by: present(Slot::GroupBy),
            order_by: present(Slot::OrderBy),
            having: present(Slot::Having),
            set_ops: count(|k| matches!(k, NodeKind::SetOperation(_))) * 2,
        };

        Self {
            score: breakdown.total().clamp(1, max.max(1)),
            breakdown,
        }
    }
}
