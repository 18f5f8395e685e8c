// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Identifiers
//!
//! This module defines the query languages the engine understands.
//!
//! ## Design
//!
//! Dialects are organized into two levels:
//!
//! 1. **Language Family**: how a buffer is shaped (relational SQL, a key-value
//!    command language, a JSON-query document language, a wide-column language)
//! 2. **Specific Dialect**: one concrete query language inside that family
//!
//! ## Language Families
//!
//! - **Relational**: Generic ANSI SQL, PostgreSQL, MySQL, MariaDB, SQLite, SQL Server
//!   - Statements separated by `;`, clause keywords drive completion context
//! - **KeyValue**: Redis
//!   - One command per line, first word is the command verb
//! - **Document**: MongoDB shell
//!   - `db.<collection>.<method>(...)` call chains with JSON arguments
//! - **WideColumn**: Cassandra CQL
//!   - SQL-like surface, keyspaces act as schemas
//!
//! Identifiers coming from the host are free text. Parsing is lenient:
//! anything unrecognised maps to [`DialectId::Generic`] instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported query languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectId {
    /// ANSI SQL fallback profile
    #[default]
    Generic,
    /// PostgreSQL (and wire-compatible engines)
    PostgreSQL,
    /// MySQL
    MySQL,
    /// MariaDB
    MariaDB,
    /// SQLite
    SQLite,
    /// Microsoft SQL Server (T-SQL)
    SqlServer,
    /// Redis command language
    Redis,
    /// MongoDB shell query language
    MongoDB,
    /// Cassandra Query Language
    Cassandra,
}

impl DialectId {
    /// All dialects, in registry order
    pub const ALL: [DialectId; 9] = [
        DialectId::Generic,
        DialectId::PostgreSQL,
        DialectId::MySQL,
        DialectId::MariaDB,
        DialectId::SQLite,
        DialectId::SqlServer,
        DialectId::Redis,
        DialectId::MongoDB,
        DialectId::Cassandra,
    ];

    /// Returns the family this dialect belongs to
    pub fn family(&self) -> LanguageFamily {
        match self {
            DialectId::Generic
            | DialectId::PostgreSQL
            | DialectId::MySQL
            | DialectId::MariaDB
            | DialectId::SQLite
            | DialectId::SqlServer => LanguageFamily::Relational,
            DialectId::Redis => LanguageFamily::KeyValue,
            DialectId::MongoDB => LanguageFamily::Document,
            DialectId::Cassandra => LanguageFamily::WideColumn,
        }
    }

    /// Canonical lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectId::Generic => "generic",
            DialectId::PostgreSQL => "postgresql",
            DialectId::MySQL => "mysql",
            DialectId::MariaDB => "mariadb",
            DialectId::SQLite => "sqlite",
            DialectId::SqlServer => "sqlserver",
            DialectId::Redis => "redis",
            DialectId::MongoDB => "mongodb",
            DialectId::Cassandra => "cassandra",
        }
    }

    /// Parse a host-supplied dialect identifier.
    ///
    /// Accepts the canonical names plus the common aliases hosts use for
    /// connection types (`postgres`, `pg`, `mssql`, `mongo`, `cql`, ...).
    /// Unknown identifiers resolve to [`DialectId::Generic`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlsense_ir::DialectId;
    ///
    /// assert_eq!(DialectId::parse("Postgres"), DialectId::PostgreSQL);
    /// assert_eq!(DialectId::parse("mssql"), DialectId::SqlServer);
    /// assert_eq!(DialectId::parse("oracle"), DialectId::Generic);
    /// ```
    pub fn parse(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" | "pgsql" | "cockroachdb" | "redshift" => {
                DialectId::PostgreSQL
            }
            "mysql" | "tidb" => DialectId::MySQL,
            "mariadb" => DialectId::MariaDB,
            "sqlite" | "sqlite3" => DialectId::SQLite,
            "sqlserver" | "mssql" | "tsql" | "t-sql" => DialectId::SqlServer,
            "redis" => DialectId::Redis,
            "mongodb" | "mongo" => DialectId::MongoDB,
            "cassandra" | "cql" | "scylla" | "scylladb" => DialectId::Cassandra,
            _ => DialectId::Generic,
        }
    }

    /// Whether statements in this dialect are command lines rather than SQL
    pub fn is_command_language(&self) -> bool {
        matches!(
            self.family(),
            LanguageFamily::KeyValue | LanguageFamily::Document
        )
    }
}

impl From<&str> for DialectId {
    fn from(id: &str) -> Self {
        DialectId::parse(id)
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect family groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageFamily {
    /// Relational SQL dialects
    Relational,
    /// Key-value command language
    KeyValue,
    /// JSON-query document language
    Document,
    /// Wide-column SQL-like language
    WideColumn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(DialectId::parse("postgres"), DialectId::PostgreSQL);
        assert_eq!(DialectId::parse("  MySQL "), DialectId::MySQL);
        assert_eq!(DialectId::parse("mongo"), DialectId::MongoDB);
        assert_eq!(DialectId::parse("cql"), DialectId::Cassandra);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_generic() {
        assert_eq!(DialectId::parse(""), DialectId::Generic);
        assert_eq!(DialectId::parse("snowflake"), DialectId::Generic);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for id in DialectId::ALL {
            assert_eq!(DialectId::parse(id.as_str()), id);
        }
    }

    #[test]
    fn test_family() {
        assert_eq!(DialectId::SQLite.family(), LanguageFamily::Relational);
        assert_eq!(DialectId::Redis.family(), LanguageFamily::KeyValue);
        assert_eq!(DialectId::MongoDB.family(), LanguageFamily::Document);
        assert_eq!(DialectId::Cassandra.family(), LanguageFamily::WideColumn);
        assert!(DialectId::Redis.is_command_language());
        assert!(!DialectId::Cassandra.is_command_language());
    }
}
