//! SQL dialect tags and keyword-based detection
//!
//! Each dialect maps to a `sqlparser` dialect used for parsing. Detection is a
//! cheap keyword heuristic run before parsing when the caller asks for `auto`.

use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    Dialect as SqlParserDialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
    SQLiteDialect,
};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// SQL dialects understood by the advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL
    Postgres,
    /// MySQL/MariaDB
    MySql,
    /// SQLite
    Sqlite,
    /// Microsoft SQL Server (T-SQL)
    TSql,
    /// Oracle
    Oracle,
    /// Generic ANSI SQL
    Generic,
}

impl Dialect {
    /// Canonical lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
            Self::TSql => "tsql",
            Self::Oracle => "oracle",
            Self::Generic => "generic",
        }
    }

    /// Returns the sqlparser dialect used to parse queries written in this dialect
    pub fn sqlparser_dialect(&self) -> Box<dyn SqlParserDialect> {
        match self {
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::MySql => Box::new(MySqlDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
            Self::TSql => Box::new(MsSqlDialect {}),
            // sqlparser has no Oracle grammar; the generic one accepts the common subset
            Self::Oracle | Self::Generic => Box::new(GenericDialect {}),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            "tsql" | "sqlserver" | "mssql" => Ok(Self::TSql),
            "oracle" => Ok(Self::Oracle),
            "generic" | "ansi" => Ok(Self::Generic),
            other => Err(ParseError::UnknownDialect(other.to_string())),
        }
    }
}

/// A dialect as requested by a caller: either fixed or detected from the text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialectChoice {
    #[default]
    Auto,
    Fixed(Dialect),
}

impl DialectChoice {
    /// Resolves the choice against the query text
    pub fn resolve(self, sql: &str) -> Dialect {
        match self {
            Self::Auto => detect_dialect(sql),
            Self::Fixed(dialect) => dialect,
        }
    }
}

impl FromStr for DialectChoice {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

static ORACLE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(NVL|ROWNUM|SYSDATE)\b").expect("valid oracle marker pattern")
});
static TOP_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bTOP\s").expect("valid TOP pattern"));
static LIMIT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid LIMIT pattern"));
static GETDATE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGETDATE\s*\(\s*\)").expect("valid GETDATE pattern"));

/// Guesses the dialect of a query from dialect-specific keywords.
///
/// Falls back to PostgreSQL, which accepts most standard SQL.
pub fn detect_dialect(sql: &str) -> Dialect {
    if ORACLE_MARKERS.is_match(sql) {
        return Dialect::Oracle;
    }

    if (TOP_CLAUSE.is_match(sql) && !LIMIT_CLAUSE.is_match(sql)) || GETDATE_CALL.is_match(sql) {
        return Dialect::TSql;
    }

    // Backtick-quoted identifiers are a strong MySQL signal
    if sql.contains('`') {
        return Dialect::MySql;
    }

    Dialect::Postgres
}
