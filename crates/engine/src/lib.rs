// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLSense - Engine
//!
//! This crate is the entry point hosts use: statement resolution for "run"
//! actions and ranked completion for the editor widget.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │        Host (editor widget, CLI)           │
//! └──────────────┬─────────────────────────────┘
//!                │ buffer + cursor
//!                ↓
//! ┌────────────────────────────────────────────┐
//! │  Statement resolver (sqlsense-context)     │
//! ├────────────────────────────────────────────┤
//! │  Context classifier (sqlsense-context)     │
//! ├────────────────────────────────────────────┤
//! │  Candidate generator & ranker (this crate) │
//! └──────────────┬─────────────────────────────┘
//!                │ reads
//!                ↓
//! ┌────────────────────┐  ┌───────────────────┐
//! │ Schema cache + FKs │  │  Dialect profile  │
//! │ (sqlsense-catalog) │  │ (sqlsense-dialect)│
//! └────────────────────┘  └───────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sqlsense_engine::{CompletionEngine, CompletionRequest, resolve_statement};
//! use sqlsense_ir::{ColumnDescriptor, DialectId, SchemaSnapshot, TableDescriptor};
//!
//! let buffer = "SELECT 1; SELECT 2;";
//! assert_eq!(resolve_statement(buffer, 15, DialectId::Generic), "SELECT 2");
//!
//! let snapshot = SchemaSnapshot::new().with_table(
//!     TableDescriptor::new("public", "orders"),
//!     vec![ColumnDescriptor::new("id", "int"), ColumnDescriptor::new("total", "numeric")],
//! );
//! let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);
//! let request = CompletionRequest::new("SELECT o. FROM orders o", 9);
//! let items = engine.complete(&request, &snapshot, &[]);
//! let labels: Vec<_> = items.iter().map(|c| c.label.as_str()).collect();
//! assert_eq!(labels, vec!["id", "total"]);
//! ```

pub mod completion;
pub mod config;
pub mod provider;
pub mod sequencer;

pub use completion::{CompletionEngine, CompletionOptions, CompletionRequest};
pub use config::{ConfigError, EngineConfig, SchemaFilter};
pub use provider::{
    CompletionData, create_completion_provider, create_completion_provider_with_config,
};
pub use sequencer::{RequestSequencer, RequestTicket};

use sqlsense_dialect::profile_for;
use sqlsense_ir::{CursorTarget, DialectId, StatementSpan};

/// Text of the statement a cursor or selection refers to
///
/// A non-empty selection is returned verbatim. Otherwise the statement
/// containing the cursor is returned without its separator and trimmed.
pub fn resolve_statement(buffer: &str, target: impl Into<CursorTarget>, dialect: DialectId) -> String {
    sqlsense_context::resolve_statement(buffer, target.into(), profile_for(dialect)).text
}

/// Every non-blank statement in the buffer
pub fn split_statements(buffer: &str, dialect: DialectId) -> Vec<StatementSpan> {
    sqlsense_context::split_statements(buffer, profile_for(dialect))
}
