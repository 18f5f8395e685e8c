// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion provider
//!
//! A provider is a plain closure the host registers with its editor widget.
//! The data source closure is called on every request so the provider always
//! sees the snapshot that is current at that moment.
//!
//! ```rust
//! use sqlsense_engine::{CompletionData, CompletionRequest, create_completion_provider};
//! use sqlsense_ir::{ColumnDescriptor, DialectId, SchemaSnapshot, TableDescriptor};
//!
//! let snapshot = SchemaSnapshot::new().with_table(
//!     TableDescriptor::new("public", "orders"),
//!     vec![ColumnDescriptor::new("id", "int")],
//! );
//! let data = CompletionData::from_snapshot(snapshot, DialectId::PostgreSQL);
//! let provider = create_completion_provider(move || data.clone());
//!
//! let items = provider(&CompletionRequest::new("SELECT * FROM or", 16));
//! assert_eq!(items[0].label, "orders");
//! ```

use crate::completion::{CompletionEngine, CompletionRequest};
use crate::config::EngineConfig;
use sqlsense_catalog::{CatalogState, SchemaCache};
use sqlsense_ir::{Candidate, DialectId, ForeignKeyRelation, SchemaSnapshot};
use std::sync::Arc;

/// Snapshot, foreign keys and dialect for one request
#[derive(Debug, Clone)]
pub struct CompletionData {
    pub catalog: Arc<CatalogState>,
    pub dialect: DialectId,
}

impl CompletionData {
    pub fn new(catalog: Arc<CatalogState>, dialect: DialectId) -> Self {
        Self { catalog, dialect }
    }

    /// Wrap a host-supplied snapshot, deriving its foreign keys
    pub fn from_snapshot(snapshot: SchemaSnapshot, dialect: DialectId) -> Self {
        let foreign_keys = sqlsense_catalog::build_foreign_keys(&snapshot);
        let catalog = CatalogState {
            snapshot,
            foreign_keys,
            ..CatalogState::default()
        };
        Self::new(Arc::new(catalog), dialect)
    }

    /// Whatever the cache holds right now
    pub fn from_cache(cache: &SchemaCache, dialect: DialectId) -> Self {
        Self::new(cache.current(), dialect)
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.catalog.snapshot
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyRelation] {
        &self.catalog.foreign_keys
    }
}

/// Build a provider with default settings for whatever dialect the data names
pub fn create_completion_provider<F>(data_source: F) -> impl Fn(&CompletionRequest) -> Vec<Candidate>
where
    F: Fn() -> CompletionData,
{
    create_completion_provider_with_config(data_source, EngineConfig::default())
}

/// Build a provider with explicit settings
///
/// The dialect in `config` is ignored; each request uses the dialect
/// returned by `data_source`.
pub fn create_completion_provider_with_config<F>(
    data_source: F,
    config: EngineConfig,
) -> impl Fn(&CompletionRequest) -> Vec<Candidate>
where
    F: Fn() -> CompletionData,
{
    move |request: &CompletionRequest| {
        let data = data_source();
        let engine = CompletionEngine::new(EngineConfig {
            dialect: data.dialect,
            ..config.clone()
        });
        engine.complete(request, data.snapshot(), data.foreign_keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsense_ir::{ColumnDescriptor, TableDescriptor};
    use std::cell::Cell;

    #[test]
    fn test_from_snapshot_derives_foreign_keys() {
        let snapshot = SchemaSnapshot::new().with_table(
            TableDescriptor::new("public", "orders"),
            vec![ColumnDescriptor::new("customer_id", "int").with_foreign_key("customers.id")],
        );
        let data = CompletionData::from_snapshot(snapshot, DialectId::Generic);
        assert_eq!(data.foreign_keys().len(), 1);
        assert_eq!(data.catalog.generation, 0);
    }

    #[test]
    fn test_data_source_called_per_request() {
        let calls = Cell::new(0);
        let provider = create_completion_provider(|| {
            calls.set(calls.get() + 1);
            CompletionData::from_snapshot(SchemaSnapshot::new(), DialectId::Redis)
        });
        provider(&CompletionRequest::new("GE", 2));
        provider(&CompletionRequest::new("SE", 2));
        assert_eq!(calls.get(), 2);
    }
}
