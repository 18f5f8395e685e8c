// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for database schema information
//!
//! This module defines the schema snapshot handed to the engine by the host,
//! and the foreign-key relations derived from it.
//!
//! The field names serialize in camelCase so host payloads such as
//! `{"isForeignKey": true, "foreignKeyRef": "public.customers.id"}` can be
//! deserialized directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table type classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    #[default]
    Table,
    View,
    MaterializedView,
    /// Document collection (MongoDB) or column family (CQL)
    Collection,
    Other(String),
}

impl TableKind {
    /// Short label used in completion detail text
    pub fn label(&self) -> &str {
        match self {
            TableKind::Table => "table",
            TableKind::View => "view",
            TableKind::MaterializedView => "materialized view",
            TableKind::Collection => "collection",
            TableKind::Other(name) => name,
        }
    }
}

/// A table, view or collection known to the connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Schema, database or keyspace name (may be empty)
    #[serde(default)]
    pub schema: String,
    /// Table name
    pub name: String,
    /// Table kind
    #[serde(default)]
    pub kind: TableKind,
}

impl TableDescriptor {
    /// Create a new table descriptor
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            kind: TableKind::Table,
        }
    }

    /// Builder method: set table kind
    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Key used in [`SchemaSnapshot::columns`]
    pub fn key(&self) -> String {
        table_key(&self.schema, &self.name)
    }

    /// `schema.name`, or just `name` when the schema is empty
    pub fn qualified_name(&self) -> String {
        self.key()
    }
}

/// Metadata for a database column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Data type as reported by the database
    #[serde(default)]
    pub data_type: String,
    /// Whether this column references another table
    #[serde(default)]
    pub is_foreign_key: bool,
    /// Raw reference string, e.g. `customers.id` or `public.customers.id`
    #[serde(default)]
    pub foreign_key_ref: Option<String>,
}

impl ColumnDescriptor {
    /// Create a new column descriptor with builder pattern
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_foreign_key: false,
            foreign_key_ref: None,
        }
    }

    /// Builder method: set foreign key reference
    pub fn with_foreign_key(mut self, reference: impl Into<String>) -> Self {
        self.is_foreign_key = true;
        self.foreign_key_ref = Some(reference.into());
        self
    }
}

/// Build the `schema.table` key used for column lookup
pub fn table_key(schema: &str, table: &str) -> String {
    if schema.is_empty() {
        table.to_string()
    } else {
        format!("{}.{}", schema, table)
    }
}

/// Point-in-time view of a connection's schema metadata
///
/// Snapshots are replaced wholesale when a new fetch completes; nothing
/// mutates a snapshot after it has been handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSnapshot {
    /// Schema names in display order
    #[serde(default)]
    pub schemas: Vec<String>,
    /// Tables across all schemas
    #[serde(default)]
    pub tables: Vec<TableDescriptor>,
    /// Columns keyed by `schema.table`
    #[serde(default)]
    pub columns: HashMap<String, Vec<ColumnDescriptor>>,
    /// Key patterns for key-value stores (e.g. `user:*`)
    #[serde(default)]
    pub key_patterns: Vec<String>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a schema name (kept unique, in insertion order)
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.add_schema(schema.into());
        self
    }

    /// Builder method: add a table with its columns
    pub fn with_table(mut self, table: TableDescriptor, columns: Vec<ColumnDescriptor>) -> Self {
        self.add_schema(table.schema.clone());
        self.columns.insert(table.key(), columns);
        self.tables.push(table);
        self
    }

    /// Builder method: add key patterns
    pub fn with_key_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    fn add_schema(&mut self, schema: String) {
        if !schema.is_empty() && !self.schemas.contains(&schema) {
            self.schemas.push(schema);
        }
    }

    /// Whether the snapshot holds no metadata at all
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.tables.is_empty() && self.key_patterns.is_empty()
    }

    /// Columns of a table, empty when unknown
    pub fn columns_for(&self, table: &TableDescriptor) -> &[ColumnDescriptor] {
        self.columns
            .get(&table.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Check whether a schema with this name exists (case-insensitive)
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.iter().any(|s| s.eq_ignore_ascii_case(name))
            || self
                .tables
                .iter()
                .any(|t| t.schema.eq_ignore_ascii_case(name))
    }

    /// Tables belonging to a schema (case-insensitive)
    pub fn tables_in_schema<'a>(
        &'a self,
        schema: &'a str,
    ) -> impl Iterator<Item = &'a TableDescriptor> + 'a {
        self.tables
            .iter()
            .filter(move |t| t.schema.eq_ignore_ascii_case(schema))
    }

    /// Resolve a possibly schema-qualified table name.
    ///
    /// Matching is case-insensitive. Without a schema the first table with
    /// that name wins, in snapshot order.
    pub fn resolve_table(&self, schema: Option<&str>, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| {
            t.name.eq_ignore_ascii_case(name)
                && schema.is_none_or(|s| t.schema.eq_ignore_ascii_case(s))
        })
    }
}

/// A derived `source.column -> target.column` link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyRelation {
    pub source_schema: String,
    pub source_table: String,
    pub source_column: String,
    pub target_schema: String,
    pub target_table: String,
    pub target_column: String,
}

impl ForeignKeyRelation {
    /// Whether either side of the relation is the given table
    pub fn touches(&self, schema: &str, table: &str) -> bool {
        self.source_matches(schema, table) || self.target_matches(schema, table)
    }

    /// Source side matches (schema compared only when both are non-empty)
    pub fn source_matches(&self, schema: &str, table: &str) -> bool {
        side_matches(&self.source_schema, &self.source_table, schema, table)
    }

    /// Target side matches (schema compared only when both are non-empty)
    pub fn target_matches(&self, schema: &str, table: &str) -> bool {
        side_matches(&self.target_schema, &self.target_table, schema, table)
    }
}

fn side_matches(side_schema: &str, side_table: &str, schema: &str, table: &str) -> bool {
    side_table.eq_ignore_ascii_case(table)
        && (side_schema.is_empty() || schema.is_empty() || side_schema.eq_ignore_ascii_case(schema))
}
