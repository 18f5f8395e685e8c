// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample buffers
//!
//! Buffers carry a `|` cursor marker; see [`crate::cursor::split_cursor`].

use serde_json::{Value, json};
use sqlsense_ir::SchemaSnapshot;

/// Sample editor buffers for testing
pub struct BufferFixtures;

impl BufferFixtures {
    // ===== Relational =====

    /// Empty statement start
    pub const fn top_level() -> &'static str {
        "|"
    }

    /// Table position after FROM
    pub const fn after_from() -> &'static str {
        "SELECT * FROM |"
    }

    /// Alias dot access
    pub const fn alias_dot() -> &'static str {
        "SELECT o.| FROM orders o"
    }

    /// JOIN target with an existing FROM table
    pub const fn join_target() -> &'static str {
        "SELECT * FROM orders o JOIN |"
    }

    /// ON condition between two aliased tables
    pub const fn join_condition() -> &'static str {
        "SELECT * FROM orders o JOIN customers c ON |"
    }

    /// Second statement in a multi-statement buffer
    pub const fn second_statement() -> &'static str {
        "SELECT 1 FROM customers;\nSELECT * FROM orders WHERE |"
    }

    /// Cursor inside a string literal
    pub const fn inside_string() -> &'static str {
        "SELECT * FROM orders WHERE status = 'pen|"
    }

    /// Separator inside a string must not split
    pub const fn separator_in_string() -> &'static str {
        "SELECT ';' AS sep FROM orders WHERE |"
    }

    // ===== Key-value =====

    /// Redis command start
    pub const fn redis_command() -> &'static str {
        "SE|"
    }

    /// Redis key argument
    pub const fn redis_key() -> &'static str {
        "GET user:|"
    }

    // ===== Document =====

    /// Mongo collection access
    pub const fn mongo_collection() -> &'static str {
        "db.|"
    }

    /// Mongo method access
    pub const fn mongo_method() -> &'static str {
        "db.users.f|"
    }

    /// Mongo query document field
    pub const fn mongo_field() -> &'static str {
        "db.users.find({ |"
    }
}

/// Sample schema payloads in the host JSON format
pub struct SchemaFixtures;

impl SchemaFixtures {
    /// Relational payload with a foreign key in each format
    pub fn shop_json() -> Value {
        json!({
            "schemas": ["public", "sales"],
            "tables": [
                {"schema": "public", "name": "customers"},
                {"schema": "sales", "name": "orders"},
                {"schema": "sales", "name": "order_summary", "kind": "view"}
            ],
            "columns": {
                "public.customers": [
                    {"name": "id", "dataType": "int"},
                    {"name": "email", "dataType": "text"}
                ],
                "sales.orders": [
                    {"name": "id", "dataType": "int"},
                    {"name": "customer_id", "dataType": "int", "isForeignKey": true, "foreignKeyRef": "public.customers.id"},
                    {"name": "parent_id", "dataType": "int", "isForeignKey": true, "foreignKeyRef": "orders.id"},
                    {"name": "broken_id", "dataType": "int", "isForeignKey": true, "foreignKeyRef": "nowhere"}
                ]
            }
        })
    }

    /// Key-value payload with key patterns only
    pub fn redis_json() -> Value {
        json!({
            "keyPatterns": ["user:*", "session:*", "cache:page:*"]
        })
    }

    /// Parse a fixture payload into a snapshot
    ///
    /// # Panics
    ///
    /// Panics if the payload does not match the snapshot format.
    pub fn snapshot(payload: Value) -> SchemaSnapshot {
        serde_json::from_value(payload).expect("fixture payload is a valid snapshot")
    }
}
