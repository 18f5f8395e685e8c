// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLSense - Catalog Layer
//!
//! This crate owns the schema metadata the completion engine reads:
//!
//! - **Metadata sources**: the [`MetadataSource`] trait hosts implement to
//!   fetch a [`SchemaSnapshot`](sqlsense_ir::SchemaSnapshot) for a connection
//! - **Static sources**: [`StaticSource`] serves snapshots from memory or JSON
//! - **Schema cache**: [`SchemaCache`] keeps the last good snapshot and
//!   swaps in newer ones atomically
//! - **Foreign keys**: [`build_foreign_keys`] derives the join graph
//!
//! ## Usage
//!
//! ```rust
//! use sqlsense_catalog::{RefreshOutcome, SchemaCache, StaticSource};
//! use sqlsense_ir::{ColumnDescriptor, SchemaSnapshot, TableDescriptor};
//!
//! # async fn demo() {
//! let snapshot = SchemaSnapshot::new().with_table(
//!     TableDescriptor::new("public", "orders"),
//!     vec![ColumnDescriptor::new("customer_id", "int").with_foreign_key("customers.id")],
//! );
//! let source = StaticSource::new().with_connection("local", snapshot);
//!
//! let cache = SchemaCache::new();
//! let outcome = cache.refresh(&source, "local").await;
//! assert!(matches!(outcome, RefreshOutcome::Installed { .. }));
//! assert_eq!(cache.current().foreign_keys.len(), 1);
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod foreign_keys;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use cache::{CatalogState, RefreshOutcome, RefreshTicket, SchemaCache};
pub use error::{CatalogError, CatalogResult};
pub use foreign_keys::{
    FkDiagnostic, FkIssue, build_foreign_keys, build_foreign_keys_with_diagnostics,
};
pub use r#static::StaticSource;
pub use r#trait::MetadataSource;
