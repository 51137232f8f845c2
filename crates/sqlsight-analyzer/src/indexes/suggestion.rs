//! Index suggestion types

use serde::{Deserialize, Serialize};

/// Priority of an index suggestion, ordered `Low < Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Returns true for priorities that drive covering-index extensions
    pub fn is_high_or_above(&self) -> bool {
        *self >= Self::High
    }
}

/// A proposed index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSuggestion {
    pub table: String,
    /// Index columns, in index order
    pub columns: Vec<String>,
    pub reason: String,
    pub priority: Priority,
    /// Generated `CREATE INDEX` statement
    pub ddl: String,
}

impl IndexSuggestion {
    /// Creates a suggestion and generates its DDL.
    ///
    /// The column part of the index name is cut to `name_budget` characters.
    pub fn new(
        table: impl Into<String>,
        columns: Vec<String>,
        reason: impl Into<String>,
        priority: Priority,
        name_budget: usize,
    ) -> Self {
        let table = table.into();
        let ddl = create_index_ddl(&table, &columns, name_budget);
        Self {
            table,
            columns,
            reason: reason.into(),
            priority,
            ddl,
        }
    }

    /// Deduplication key: table plus the sorted column set
    pub fn key(&self) -> (String, Vec<String>) {
        let mut columns = self.columns.clone();
        columns.sort();
        (self.table.clone(), columns)
    }
}

fn create_index_ddl(table: &str, columns: &[String], name_budget: usize) -> String {
    let name_columns: String = columns.join("_").chars().take(name_budget).collect();
    format!(
        "CREATE INDEX idx_{table}_{name_columns} ON {table} ({});",
        columns.join(", ")
    )
}
