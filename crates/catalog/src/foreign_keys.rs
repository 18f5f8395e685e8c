// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Foreign-key graph builder
//!
//! Derives `source.column -> target.column` relations from the raw
//! `foreignKeyRef` strings in a [`SchemaSnapshot`].
//!
//! Reference formats:
//!
//! - `table.column`: the target lives in the source table's schema
//! - `schema.table.column`: fully qualified
//! - `schema.table.col.umn`: segments past the third are rejoined with `.`
//!
//! Dots inside identifier quotes (`"my.schema".t.c`) do not split.
//!
//! Metadata from a live connection cannot be assumed well-formed. A bad
//! reference is dropped with a warning and reported as an [`FkDiagnostic`];
//! it never aborts the build.

use serde::Serialize;
use sqlsense_ir::{ColumnDescriptor, ForeignKeyRelation, SchemaSnapshot};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a reference was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FkIssue {
    #[error("reference needs at least two dot-separated segments")]
    TooFewSegments,
    #[error("reference contains an empty segment")]
    EmptySegment,
}

/// A dropped foreign-key reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FkDiagnostic {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub reference: String,
    pub issue: FkIssue,
}

/// Parsed target of a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FkTarget {
    pub schema: String,
    pub table: String,
    pub column: String,
}

/// Parse a reference string relative to the source table's schema
///
/// # Examples
///
/// ```
/// use sqlsense_catalog::foreign_keys::parse_reference;
///
/// let target = parse_reference("customers.id", "public").unwrap();
/// assert_eq!((target.schema.as_str(), target.table.as_str()), ("public", "customers"));
///
/// let dotted = parse_reference("s.t.a.b", "public").unwrap();
/// assert_eq!(dotted.column, "a.b");
/// ```
pub fn parse_reference(reference: &str, source_schema: &str) -> Result<FkTarget, FkIssue> {
    let segments: Vec<&str> = split_segments(reference).into_iter().map(unquote).collect();
    if segments.len() < 2 {
        return Err(FkIssue::TooFewSegments);
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FkIssue::EmptySegment);
    }

    let target = match segments.as_slice() {
        [table, column] => FkTarget {
            schema: source_schema.to_string(),
            table: table.to_string(),
            column: column.to_string(),
        },
        [schema, table, rest @ ..] => FkTarget {
            schema: schema.to_string(),
            table: table.to_string(),
            column: rest.join("."),
        },
        _ => return Err(FkIssue::TooFewSegments),
    };
    Ok(target)
}

/// Split on `.` outside `"..."`, `` `...` `` and `[...]`
fn split_segments(reference: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut closing = None;
    for (i, c) in reference.char_indices() {
        match closing {
            Some(close) if c == close => closing = None,
            Some(_) => {}
            None => match c {
                '"' | '`' => closing = Some(c),
                '[' => closing = Some(']'),
                '.' => {
                    segments.push(&reference[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    segments.push(&reference[start..]);
    segments
}

/// Strip whitespace and identifier quotes around one segment
fn unquote(segment: &str) -> &str {
    let segment = segment.trim();
    for (open, close) in [('"', '"'), ('`', '`'), ('[', ']')] {
        if let Some(inner) = segment
            .strip_prefix(open)
            .and_then(|s| s.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    segment
}

/// Build the foreign-key relation set of a snapshot
///
/// Malformed references are skipped with a warning.
pub fn build_foreign_keys(snapshot: &SchemaSnapshot) -> Vec<ForeignKeyRelation> {
    build_foreign_keys_with_diagnostics(snapshot).0
}

/// Build the relation set and report every dropped reference
pub fn build_foreign_keys_with_diagnostics(
    snapshot: &SchemaSnapshot,
) -> (Vec<ForeignKeyRelation>, Vec<FkDiagnostic>) {
    let mut relations = Vec::new();
    let mut diagnostics = Vec::new();

    let mut visited = HashSet::new();
    for table in &snapshot.tables {
        let key = table.key();
        if !visited.insert(key) {
            continue;
        }
        collect(
            &table.schema,
            &table.name,
            snapshot.columns_for(table),
            &mut relations,
            &mut diagnostics,
        );
    }

    // Column lists whose table is missing from the table list
    let mut orphans: Vec<&String> = snapshot
        .columns
        .keys()
        .filter(|k| !visited.contains(k.as_str()))
        .collect();
    orphans.sort();
    for key in orphans {
        let (schema, name) = key.split_once('.').unwrap_or(("", key.as_str()));
        collect(
            schema,
            name,
            &snapshot.columns[key],
            &mut relations,
            &mut diagnostics,
        );
    }

    debug!(
        relations = relations.len(),
        dropped = diagnostics.len(),
        "built foreign-key graph"
    );
    (relations, diagnostics)
}

fn collect(
    schema: &str,
    table: &str,
    columns: &[ColumnDescriptor],
    relations: &mut Vec<ForeignKeyRelation>,
    diagnostics: &mut Vec<FkDiagnostic>,
) {
    for column in columns.iter().filter(|c| c.is_foreign_key) {
        let Some(reference) = column.foreign_key_ref.as_deref().filter(|r| !r.trim().is_empty())
        else {
            continue;
        };

        match parse_reference(reference, schema) {
            Ok(target) if !table.is_empty() && !column.name.is_empty() => {
                relations.push(ForeignKeyRelation {
                    source_schema: schema.to_string(),
                    source_table: table.to_string(),
                    source_column: column.name.clone(),
                    target_schema: target.schema,
                    target_table: target.table,
                    target_column: target.column,
                });
            }
            Ok(_) => {
                warn!(schema, table, column = %column.name, "foreign key on unnamed source skipped");
                diagnostics.push(FkDiagnostic {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    column: column.name.clone(),
                    reference: reference.to_string(),
                    issue: FkIssue::EmptySegment,
                });
            }
            Err(issue) => {
                warn!(
                    schema,
                    table,
                    column = %column.name,
                    reference,
                    %issue,
                    "malformed foreign key reference skipped"
                );
                diagnostics.push(FkDiagnostic {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    column: column.name.clone(),
                    reference: reference.to_string(),
                    issue,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlsense_ir::TableDescriptor;

    fn snapshot_with(reference: &str) -> SchemaSnapshot {
        SchemaSnapshot::new().with_table(
            TableDescriptor::new("sales", "orders"),
            vec![
                ColumnDescriptor::new("id", "int"),
                ColumnDescriptor::new("customer_id", "int").with_foreign_key(reference),
            ],
        )
    }

    #[test]
    fn test_fully_qualified_reference() {
        let fks = build_foreign_keys(&snapshot_with("public.customers.id"));
        assert_eq!(
            fks,
            vec![ForeignKeyRelation {
                source_schema: "sales".into(),
                source_table: "orders".into(),
                source_column: "customer_id".into(),
                target_schema: "public".into(),
                target_table: "customers".into(),
                target_column: "id".into(),
            }]
        );
    }

    #[test]
    fn test_two_segments_default_to_source_schema() {
        let fks = build_foreign_keys(&snapshot_with("customers.id"));
        assert_eq!(fks[0].target_schema, "sales");
        assert_eq!(fks[0].target_table, "customers");
    }

    #[test]
    fn test_trailing_segments_are_rejoined() {
        let fks = build_foreign_keys(&snapshot_with("public.events.payload.id"));
        assert_eq!(fks[0].target_table, "events");
        assert_eq!(fks[0].target_column, "payload.id");
    }

    #[test]
    fn test_quoted_segments_are_stripped() {
        let fks = build_foreign_keys(&snapshot_with("\"public\".`customers`.[id]"));
        assert_eq!(fks[0].target_schema, "public");
        assert_eq!(fks[0].target_table, "customers");
        assert_eq!(fks[0].target_column, "id");
    }

    #[test]
    fn test_dots_inside_quotes_do_not_split() {
        let fks = build_foreign_keys(&snapshot_with("\"my.schema\".[cust.omers].id"));
        assert_eq!(fks[0].target_schema, "my.schema");
        assert_eq!(fks[0].target_table, "cust.omers");
        assert_eq!(fks[0].target_column, "id");
    }

    #[test]
    fn test_empty_reference_yields_nothing() {
        let (fks, diagnostics) = build_foreign_keys_with_diagnostics(&snapshot_with(""));
        assert!(fks.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_references_are_reported() {
        let (fks, diagnostics) = build_foreign_keys_with_diagnostics(&snapshot_with("customers"));
        assert!(fks.is_empty());
        assert_eq!(diagnostics[0].issue, FkIssue::TooFewSegments);
        assert_eq!(diagnostics[0].column, "customer_id");

        let (_, diagnostics) = build_foreign_keys_with_diagnostics(&snapshot_with("public..id"));
        assert_eq!(diagnostics[0].issue, FkIssue::EmptySegment);
    }

    #[test]
    fn test_reference_without_flag_is_ignored() {
        let mut column = ColumnDescriptor::new("customer_id", "int");
        column.foreign_key_ref = Some("customers.id".into());
        let snapshot =
            SchemaSnapshot::new().with_table(TableDescriptor::new("public", "orders"), vec![column]);
        assert!(build_foreign_keys(&snapshot).is_empty());
    }

    #[test]
    fn test_orphan_column_lists_are_included() {
        let mut snapshot = SchemaSnapshot::new();
        snapshot.columns.insert(
            "public.invoices".into(),
            vec![ColumnDescriptor::new("order_id", "int").with_foreign_key("orders.id")],
        );
        let fks = build_foreign_keys(&snapshot);
        assert_eq!(fks.len(), 1);
        assert_eq!(fks[0].source_table, "invoices");
        assert_eq!(fks[0].target_schema, "public");
    }
}
