// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! These errors only cross the metadata-source boundary. The schema cache
//! logs them and keeps serving its last good snapshot; completion never
//! sees them.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while fetching schema metadata
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Metadata query failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Metadata query timed out
    #[error("Query timed out after {0}s")]
    QueryTimeout(u64),

    /// No connection is registered under this key
    #[error("Unknown connection '{0}'")]
    UnknownConnection(String),

    /// Failed to serialize or deserialize schema data
    #[error("Failed to serialize schema data: {0}")]
    SerializationError(String),

    /// Permission denied for requested operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
