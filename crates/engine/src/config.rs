// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine Configuration
//!
//! This module provides configuration management for the completion engine.
//!
//! ## Configuration Structure
//!
//! The engine configuration includes:
//! - Query dialect
//! - Candidate list cap
//! - Snippet and function toggles
//! - Schema filters
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use sqlsense_engine::EngineConfig;
//! use sqlsense_ir::DialectId;
//!
//! let settings = json!({
//!     "sqlsense": {
//!         "dialect": "postgres",
//!         "maxCandidates": 50,
//!         "schemaFilter": { "allowedSchemas": ["public"] }
//!     }
//! });
//! let config = EngineConfig::from_settings(&settings).unwrap();
//! assert_eq!(config.dialect, DialectId::PostgreSQL);
//! assert!(!config.schema_filter.is_schema_allowed("audit"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlsense_ir::{DialectId, TableDescriptor};
use std::collections::BTreeSet;

use crate::completion::CompletionOptions;

/// Settings key the engine reads from the host payload
pub const SETTINGS_KEY: &str = "sqlsense";

/// Upper bound for `max_candidates`
pub const MAX_CANDIDATE_LIMIT: usize = 10_000;

/// Schema filter configuration
///
/// Controls which tables and schemas are visible in completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaFilter {
    /// Allowed schemas (e.g., "public", "my_schema")
    /// If empty, all schemas are allowed
    pub allowed_schemas: BTreeSet<String>,

    /// Allowed table name substrings
    /// If empty, all tables are allowed
    pub allowed_tables: Vec<String>,

    /// Excluded table name substrings
    /// Tables matching these patterns will be hidden
    pub excluded_tables: Vec<String>,
}

impl SchemaFilter {
    /// Create a new empty schema filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed schema
    pub fn allow_schema(mut self, schema: impl Into<String>) -> Self {
        self.allowed_schemas.insert(schema.into());
        self
    }

    /// Add an allowed table pattern
    pub fn allow_table(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_tables.push(pattern.into());
        self
    }

    /// Add an excluded table pattern
    pub fn exclude_table(mut self, pattern: impl Into<String>) -> Self {
        self.excluded_tables.push(pattern.into());
        self
    }

    /// Check if a schema is allowed (case-insensitive)
    pub fn is_schema_allowed(&self, schema: &str) -> bool {
        self.allowed_schemas.is_empty()
            || self
                .allowed_schemas
                .iter()
                .any(|s| s.eq_ignore_ascii_case(schema))
    }

    /// Check if a table is allowed based on patterns
    pub fn is_table_allowed(&self, table: &str) -> bool {
        // Check excluded patterns first
        if self.excluded_tables.iter().any(|p| table.contains(p.as_str())) {
            return false;
        }

        // If no allowed patterns, all tables are allowed
        self.allowed_tables.is_empty() || self.allowed_tables.iter().any(|p| table.contains(p.as_str()))
    }

    /// Check both the schema and the table name
    pub fn allows(&self, table: &TableDescriptor) -> bool {
        self.is_schema_allowed(&table.schema) && self.is_table_allowed(&table.name)
    }
}

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Query dialect; unknown names fall back to generic SQL
    #[serde(deserialize_with = "lenient_dialect")]
    pub dialect: DialectId,

    /// Maximum number of candidates returned per request
    pub max_candidates: usize,

    /// Offer dialect snippets
    pub include_snippets: bool,

    /// Offer builtin functions
    pub include_functions: bool,

    /// Schema filter configuration
    pub schema_filter: SchemaFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect: DialectId::Generic,
            max_candidates: 200,
            include_snippets: true,
            include_functions: true,
            schema_filter: SchemaFilter::default(),
        }
    }
}

impl EngineConfig {
    /// Create a default configuration for a dialect
    pub fn new(dialect: DialectId) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// Checks that:
    /// - The candidate cap is within `1..=MAX_CANDIDATE_LIMIT`
    /// - Schema filter entries are not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 || self.max_candidates > MAX_CANDIDATE_LIMIT {
            return Err(ConfigError::InvalidCandidateLimit {
                value: self.max_candidates,
            });
        }

        if self.schema_filter.allowed_schemas.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidSchemaFilter {
                reason: "allowed schema names must not be blank".to_string(),
            });
        }

        if self
            .schema_filter
            .allowed_tables
            .iter()
            .chain(&self.schema_filter.excluded_tables)
            .any(|p| p.is_empty())
        {
            return Err(ConfigError::InvalidSchemaFilter {
                reason: "table patterns must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Parse engine config from a host settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "sqlsense": {
    ///     "dialect": "postgresql",
    ///     "maxCandidates": 200,
    ///     "includeSnippets": true,
    ///     "includeFunctions": true,
    ///     "schemaFilter": { "allowedSchemas": [], "excludedTables": [] }
    ///   }
    /// }
    ///
    /// A payload without the `sqlsense` key yields the defaults.
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let Some(section) = settings.get(SETTINGS_KEY) else {
            return Ok(Self::default());
        };
        let config = Self::deserialize(section)?;
        config.validate()?;
        Ok(config)
    }

    /// Options for one completion request
    pub fn completion_options(&self, explicit: bool) -> CompletionOptions {
        CompletionOptions {
            explicit,
            max_candidates: self.max_candidates,
            include_snippets: self.include_snippets,
            include_functions: self.include_functions,
            schema_filter: self.schema_filter.clone(),
        }
    }
}

fn lenient_dialect<'de, D>(deserializer: D) -> Result<DialectId, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(DialectId::parse(&name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Settings payload has the wrong shape
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// Candidate cap out of range
    #[error("max_candidates must be between 1 and 10000, got {value}")]
    InvalidCandidateLimit { value: usize },

    /// Invalid schema filter
    #[error("Invalid schema filter: {reason}")]
    InvalidSchemaFilter { reason: String },
}
