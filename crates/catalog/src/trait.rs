// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata source trait
//!
//! This module defines the async boundary through which the host hands
//! schema metadata to the engine.

use crate::error::CatalogResult;
use sqlsense_ir::SchemaSnapshot;

/// Host-side provider of schema metadata
///
/// Implementations may talk to a live database, read a file or return
/// canned data. Fetching is the only asynchronous operation in the engine
/// and never runs inside a keystroke handler.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use sqlsense_catalog::{CatalogResult, MetadataSource};
/// use sqlsense_ir::{SchemaSnapshot, TableDescriptor};
///
/// struct OneTable;
///
/// #[async_trait]
/// impl MetadataSource for OneTable {
///     async fn fetch_autocomplete_data(&self, _key: &str) -> CatalogResult<SchemaSnapshot> {
///         Ok(SchemaSnapshot::new().with_table(TableDescriptor::new("public", "users"), vec![]))
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch schemas, tables, columns and key patterns for a connection
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownConnection` if the key is not known.
    /// Returns `CatalogError::ConnectionFailed` or `CatalogError::QueryTimeout`
    /// when the backing database cannot be reached in time.
    async fn fetch_autocomplete_data(&self, connection_key: &str) -> CatalogResult<SchemaSnapshot>;
}
