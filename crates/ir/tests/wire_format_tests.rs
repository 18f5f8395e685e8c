// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! JSON shapes exchanged with the host

use serde_json::json;
use sqlsense_ir::{
    Candidate, CandidateKind, CursorTarget, DialectId, SchemaSnapshot, TableDescriptor, TableKind,
};

#[test]
fn test_snapshot_payload_with_every_field() {
    let payload = json!({
        "schemas": ["main"],
        "tables": [
            {"schema": "main", "name": "users", "kind": "table"},
            {"schema": "main", "name": "active_users", "kind": "materialized_view"}
        ],
        "columns": {
            "main.users": [
                {"name": "id", "dataType": "integer"},
                {"name": "team_id", "dataType": "integer", "isForeignKey": true, "foreignKeyRef": "teams.id"}
            ]
        },
        "keyPatterns": []
    });
    let snapshot: SchemaSnapshot = serde_json::from_value(payload).unwrap();

    assert_eq!(snapshot.tables[1].kind, TableKind::MaterializedView);
    let users = snapshot.resolve_table(Some("MAIN"), "Users").unwrap();
    let columns = snapshot.columns_for(users);
    assert_eq!(columns.len(), 2);
    assert!(columns[1].is_foreign_key);
    assert_eq!(columns[1].foreign_key_ref.as_deref(), Some("teams.id"));
}

#[test]
fn test_sparse_payload_uses_defaults() {
    let snapshot: SchemaSnapshot =
        serde_json::from_value(json!({"tables": [{"schema": "", "name": "t"}]})).unwrap();
    assert_eq!(snapshot.tables[0], TableDescriptor::new("", "t"));
    assert!(snapshot.columns_for(&snapshot.tables[0]).is_empty());
    assert!(snapshot.schemas.is_empty());
}

#[test]
fn test_candidate_serializes_for_the_editor() {
    let candidate = Candidate::new("orders", CandidateKind::Table)
        .with_detail("table in public")
        .with_boost(520);
    let value = serde_json::to_value(&candidate).unwrap();
    assert_eq!(value["kind"], "table");
    assert_eq!(value["insertText"], "orders");
    assert_eq!(value["boost"], 520);
}

#[test]
fn test_cursor_target_and_dialect_names() {
    let target: CursorTarget =
        serde_json::from_value(json!({"selection": {"start": 4, "end": 1}})).unwrap();
    assert_eq!(target.selection(), Some((1, 4)));

    let dialect: DialectId = serde_json::from_value(json!("sqlserver")).unwrap();
    assert_eq!(dialect, DialectId::SqlServer);
}
