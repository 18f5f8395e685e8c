// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static metadata source
//!
//! Serves snapshots from memory, keyed by connection. Used by the CLI to
//! load a snapshot from a JSON file, and by hosts that already hold the
//! metadata and only need the cache's refresh semantics.
//!
//! ## Usage
//!
//! ```rust
//! use sqlsense_catalog::{MetadataSource, StaticSource};
//!
//! # async fn demo() -> Result<(), sqlsense_catalog::CatalogError> {
//! let source = StaticSource::from_json(
//!     "local",
//!     r#"{"tables": [{"schema": "public", "name": "users"}]}"#,
//! )?;
//! let snapshot = source.fetch_autocomplete_data("local").await?;
//! assert_eq!(snapshot.tables[0].name, "users");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlsense_ir::SchemaSnapshot;
use std::collections::HashMap;

use crate::{CatalogError, CatalogResult, MetadataSource};

/// In-memory snapshots keyed by connection
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshots: HashMap<String, SchemaSnapshot>,
}

impl StaticSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: register a snapshot under `connection_key`
    pub fn with_connection(
        mut self,
        connection_key: impl Into<String>,
        snapshot: SchemaSnapshot,
    ) -> Self {
        self.snapshots.insert(connection_key.into(), snapshot);
        self
    }

    /// Parse a JSON snapshot and register it under `connection_key`
    pub fn from_json(connection_key: impl Into<String>, json: &str) -> CatalogResult<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(json)?;
        Ok(Self::new().with_connection(connection_key, snapshot))
    }

    /// Registered connection keys, sorted
    pub fn connections(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.snapshots.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[async_trait]
impl MetadataSource for StaticSource {
    async fn fetch_autocomplete_data(&self, connection_key: &str) -> CatalogResult<SchemaSnapshot> {
        self.snapshots
            .get(connection_key)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownConnection(connection_key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsense_ir::TableDescriptor;

    #[tokio::test]
    async fn test_unknown_connection() {
        let source = StaticSource::new();
        let err = source.fetch_autocomplete_data("missing").await.unwrap_err();
        assert_eq!(err, CatalogError::UnknownConnection("missing".into()));
    }

    #[tokio::test]
    async fn test_registered_snapshot_is_returned() {
        let snapshot =
            SchemaSnapshot::new().with_table(TableDescriptor::new("public", "users"), vec![]);
        let source = StaticSource::new()
            .with_connection("b", SchemaSnapshot::new())
            .with_connection("a", snapshot.clone());
        assert_eq!(source.fetch_autocomplete_data("a").await.unwrap(), snapshot);
        assert_eq!(source.connections(), vec!["a", "b"]);
    }

    #[test]
    fn test_from_json_reports_bad_payload() {
        let err = StaticSource::from_json("local", "{not json").unwrap_err();
        assert!(matches!(err, CatalogError::SerializationError(_)));
    }
}
