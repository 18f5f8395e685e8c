// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock metadata source implementation for testing
//!
//! Provides an in-memory source with builder pattern for easy test setup

use sqlsense_catalog::{CatalogError, CatalogResult, MetadataSource};
use sqlsense_ir::{ColumnDescriptor, SchemaSnapshot, TableDescriptor, TableKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory metadata source for testing
#[derive(Debug, Default)]
pub struct MockMetadataSource {
    snapshots: HashMap<String, SchemaSnapshot>,
    failure: Option<CatalogError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockMetadataSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot for a connection
    pub fn with_snapshot(mut self, connection_key: &str, snapshot: SchemaSnapshot) -> Self {
        self.snapshots.insert(connection_key.to_string(), snapshot);
        self
    }

    /// Make every fetch fail with `error`
    pub fn failing(mut self, error: CatalogError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sleep before answering, to simulate a slow database
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MetadataSource for MockMetadataSource {
    async fn fetch_autocomplete_data(&self, connection_key: &str) -> CatalogResult<SchemaSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.snapshots
            .get(connection_key)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownConnection(connection_key.to_string()))
    }
}

/// Builder for creating snapshots with a fluent API
#[derive(Debug, Default)]
pub struct MockSnapshotBuilder {
    snapshot: SchemaSnapshot,
}

impl MockSnapshotBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the standard test schema
    ///
    /// `public` holds customers, orders, order_items and products, joined
    /// by foreign keys. `analytics` holds a single events table.
    pub fn with_standard_schema(mut self) -> Self {
        self.snapshot = self
            .snapshot
            .with_schema("public")
            .with_schema("analytics")
            .with_table(
                TableDescriptor::new("public", "customers"),
                vec![
                    ColumnDescriptor::new("id", "bigint"),
                    ColumnDescriptor::new("name", "varchar(100)"),
                    ColumnDescriptor::new("email", "varchar(255)"),
                ],
            )
            .with_table(
                TableDescriptor::new("public", "orders"),
                vec![
                    ColumnDescriptor::new("id", "bigint"),
                    ColumnDescriptor::new("customer_id", "bigint")
                        .with_foreign_key("public.customers.id"),
                    ColumnDescriptor::new("total", "numeric(10,2)"),
                    ColumnDescriptor::new("created_at", "timestamp"),
                ],
            )
            .with_table(
                TableDescriptor::new("public", "order_items"),
                vec![
                    ColumnDescriptor::new("id", "bigint"),
                    ColumnDescriptor::new("order_id", "bigint").with_foreign_key("orders.id"),
                    ColumnDescriptor::new("product_id", "bigint")
                        .with_foreign_key("public.products.id"),
                    ColumnDescriptor::new("quantity", "integer"),
                ],
            )
            .with_table(
                TableDescriptor::new("public", "products"),
                vec![
                    ColumnDescriptor::new("id", "bigint"),
                    ColumnDescriptor::new("name", "varchar(255)"),
                    ColumnDescriptor::new("price", "numeric(10,2)"),
                ],
            )
            .with_table(
                TableDescriptor::new("analytics", "events"),
                vec![
                    ColumnDescriptor::new("id", "bigint"),
                    ColumnDescriptor::new("customer_id", "bigint")
                        .with_foreign_key("public.customers.id"),
                    ColumnDescriptor::new("payload", "jsonb"),
                ],
            );
        self
    }

    /// Add a document collection with sample fields
    pub fn with_collection(mut self, database: &str, name: &str, fields: &[&str]) -> Self {
        let columns = fields
            .iter()
            .map(|f| ColumnDescriptor::new(*f, "field"))
            .collect();
        self.snapshot = self.snapshot.with_table(
            TableDescriptor::new(database, name).with_kind(TableKind::Collection),
            columns,
        );
        self
    }

    /// Add a custom table
    pub fn with_table(mut self, table: TableDescriptor, columns: Vec<ColumnDescriptor>) -> Self {
        self.snapshot = self.snapshot.with_table(table, columns);
        self
    }

    /// Add key-value key patterns
    pub fn with_key_patterns(mut self, patterns: &[&str]) -> Self {
        self.snapshot = self.snapshot.with_key_patterns(patterns.iter().copied());
        self
    }

    /// Build the snapshot
    pub fn build(self) -> SchemaSnapshot {
        self.snapshot
    }
}
