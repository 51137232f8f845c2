//! Candidate collection and deduplication

use super::suggestion::{IndexSuggestion, Priority};
use crate::config::AdvisorConfig;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use sqlsight_syntax::{BinaryOp, ColumnRef, Dialect, Node, NodeKind, Slot, parse};
use std::collections::HashMap;

const WHERE_REASON: &str = "Column used in WHERE clause filter.";
const JOIN_REASON: &str = "Column used in JOIN condition.";
const GROUP_BY_REASON: &str = "Column used in GROUP BY.";
const ORDER_BY_REASON: &str = "Column used in ORDER BY.";
const COMPOSITE_REASON: &str =
    "Columns used together in AND equality predicates. Composite index recommended.";

/// Suggests indexes for a single statement
#[derive(Debug, Clone)]
pub struct IndexSuggester {
    config: AdvisorConfig,
}

impl Default for IndexSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSuggester {
    /// Creates a new suggester with default config
    pub fn new() -> Self {
        Self {
            config: AdvisorConfig::default(),
        }
    }

    /// Creates a new suggester with custom config
    pub fn with_config(config: AdvisorConfig) -> Self {
        Self { config }
    }

    /// Returns the suggester config
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Parses `sql` and suggests indexes for it.
    ///
    /// Input that does not parse yields no suggestions.
    pub fn suggest_indexes(&self, sql: &str, dialect: Dialect) -> Vec<IndexSuggestion> {
        match parse(sql, dialect) {
            Ok(parsed) => self.suggest_for_tree(&parsed.tree),
            Err(err) => {
                tracing::debug!(%dialect, error = %err, "skipping index suggestions");
                Vec::new()
            }
        }
    }

    /// Suggests indexes for an already lowered statement
    pub fn suggest_for_tree(&self, root: &Node) -> Vec<IndexSuggestion> {
        let tables = TableResolver::new(root);
        let mut candidates = Candidates::new(self.config.index_name_budget);

        let where_clause = root.slot(Slot::Where);

        if let Some(where_clause) = where_clause {
            candidates.push_columns(&tables, where_clause, WHERE_REASON, Priority::High);
        }

        for join in root.walk().filter(|n| n.kind() == &NodeKind::Join) {
            if let Some(on) = join.slot(Slot::On) {
                candidates.push_columns(&tables, on, JOIN_REASON, Priority::High);
            }
        }

        if let Some(group_by) = root.slot(Slot::GroupBy) {
            candidates.push_columns(&tables, group_by, GROUP_BY_REASON, Priority::Medium);
        }

        if let Some(order_by) = root.slot(Slot::OrderBy) {
            candidates.push_columns(&tables, order_by, ORDER_BY_REASON, Priority::Low);
        }

        if let Some(where_clause) = where_clause {
            for (table, columns) in equality_groups(&tables, where_clause) {
                if columns.len() > 1 {
                    candidates.push(
                        table,
                        columns.into_iter().collect(),
                        COMPOSITE_REASON.to_string(),
                        Priority::Critical,
                    );
                }
            }

            if root.kind() == &NodeKind::Select {
                self.push_covering(&mut candidates, &tables, root, where_clause);
            }
        }

        let suggestions = candidates.dedup();
        tracing::debug!(count = suggestions.len(), "collected index suggestions");
        suggestions
    }

    /// Proposes extending each strong candidate with the projected columns it lacks
    fn push_covering(
        &self,
        candidates: &mut Candidates,
        tables: &TableResolver,
        root: &Node,
        where_clause: &Node,
    ) {
        let Some(projected) = projected_columns(root) else {
            return;
        };

        let mut filtered_tables = IndexSet::new();
        for column in where_clause.columns() {
            if let Some(table) = tables.resolve(column) {
                filtered_tables.insert(table);
            }
        }

        for table in filtered_tables {
            let existing: Vec<Vec<String>> = candidates
                .items
                .iter()
                .filter(|s| s.table == table && s.priority.is_high_or_above())
                .map(|s| s.columns.clone())
                .collect();

            for columns in existing {
                let missing: Vec<&String> = projected
                    .iter()
                    .filter(|c| !columns.contains(c))
                    .collect();
                if missing.is_empty() || missing.len() >= self.config.covering_missing_limit {
                    continue;
                }

                let listed = missing
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut extended = columns;
                extended.extend(missing.into_iter().cloned());

                candidates.push(
                    table.clone(),
                    extended,
                    format!(
                        "Extend index to include [{listed}] for a Covering Index (avoids table lookup)."
                    ),
                    Priority::Medium,
                );
            }
        }
    }
}

/// Maps column references to the table they belong to
struct TableResolver {
    aliases: HashMap<String, String>,
    default_table: Option<String>,
}

impl TableResolver {
    fn new(root: &Node) -> Self {
        let mut aliases = HashMap::new();
        let mut count = 0;
        let mut first = None;

        for table in root.walk().filter_map(Node::table) {
            count += 1;
            first.get_or_insert_with(|| table.name.clone());
            if let Some(alias) = &table.alias {
                aliases.insert(alias.clone(), table.name.clone());
            }
        }

        Self {
            aliases,
            default_table: if count == 1 { first } else { None },
        }
    }

    /// Qualified columns resolve through table aliases; bare columns only
    /// resolve when the statement references exactly one table.
    fn resolve(&self, column: &ColumnRef) -> Option<String> {
        match &column.qualifier {
            Some(qualifier) => Some(
                self.aliases
                    .get(qualifier)
                    .cloned()
                    .unwrap_or_else(|| qualifier.clone()),
            ),
            None => self.default_table.clone(),
        }
    }
}

/// Suggestions in discovery order, before deduplication
struct Candidates {
    items: Vec<IndexSuggestion>,
    name_budget: usize,
}

impl Candidates {
    fn new(name_budget: usize) -> Self {
        Self {
            items: Vec::new(),
            name_budget,
        }
    }

    fn push(&mut self, table: String, columns: Vec<String>, reason: String, priority: Priority) {
        self.items.push(IndexSuggestion::new(
            table,
            columns,
            reason,
            priority,
            self.name_budget,
        ));
    }

    /// One single-column candidate per resolvable column under `clause`
    fn push_columns(
        &mut self,
        tables: &TableResolver,
        clause: &Node,
        reason: &str,
        priority: Priority,
    ) {
        for column in clause.columns() {
            if let Some(table) = tables.resolve(column) {
                self.push(
                    table,
                    vec![column.name.clone()],
                    reason.to_string(),
                    priority,
                );
            }
        }
    }

    /// Keeps the first candidate per key, upgraded in place by stronger ones
    fn dedup(self) -> Vec<IndexSuggestion> {
        let mut unique: IndexMap<(String, Vec<String>), IndexSuggestion> = IndexMap::new();

        for suggestion in self.items {
            match unique.entry(suggestion.key()) {
                Entry::Vacant(entry) => {
                    entry.insert(suggestion);
                }
                Entry::Occupied(mut entry) => {
                    if suggestion.priority > entry.get().priority {
                        tracing::trace!(
                            table = %suggestion.table,
                            priority = ?suggestion.priority,
                            "upgraded index suggestion"
                        );
                        entry.insert(suggestion);
                    }
                }
            }
        }

        unique.into_values().collect()
    }
}

/// Columns compared by equality in AND chains, grouped by table in first-seen order
fn equality_groups(
    tables: &TableResolver,
    where_clause: &Node,
) -> IndexMap<String, IndexSet<String>> {
    let mut predicates = Vec::new();
    if let Some(expr) = where_clause.predicate() {
        collect_and_equalities(expr, false, &mut predicates);
    }

    let mut groups: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for predicate in predicates {
        let mut columns = predicate.columns();
        let (Some(column), None) = (columns.next(), columns.next()) else {
            continue;
        };
        if let Some(table) = tables.resolve(column) {
            groups
                .entry(table)
                .or_default()
                .insert(column.name.clone());
        }
    }

    groups
}

/// Gathers equality leaves of AND chains left to right, descending through
/// other nodes to reach nested chains
fn collect_and_equalities<'a>(node: &'a Node, under_and: bool, out: &mut Vec<&'a Node>) {
    match node.kind() {
        NodeKind::And => {
            for operand in [node.left(), node.right()].into_iter().flatten() {
                collect_and_equalities(operand, true, out);
            }
        }
        NodeKind::Binary(BinaryOp::Eq) if under_and => out.push(node),
        _ => {
            for child in node.sub_nodes() {
                collect_and_equalities(child, false, out);
            }
        }
    }
}

/// Distinct plain column names in the projection, or `None` when it has a star
fn projected_columns(root: &Node) -> Option<IndexSet<String>> {
    let projection = root.slot(Slot::Projection)?;
    let mut columns = IndexSet::new();

    for item in projection.children() {
        match item.kind() {
            NodeKind::Star(_) => return None,
            NodeKind::Column(column) => {
                columns.insert(column.name.clone());
            }
            _ => {}
        }
    }

    (!columns.is_empty()).then_some(columns)
}
