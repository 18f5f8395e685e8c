// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLSense - Shared Data Model
//!
//! This crate provides the value types exchanged between the engine layers:
//! - Dialect identifiers and language families
//! - Schema snapshots and derived foreign-key relations
//! - Statement spans and cursor targets
//! - Completion candidates
//!
//! Everything here is plain data with serde derives so hosts can hand
//! snapshots over as JSON and receive candidates back the same way.

pub mod candidate;
pub mod dialect;
pub mod metadata;
pub mod span;

// Re-export commonly used types
pub use candidate::{Candidate, CandidateKind};
pub use dialect::{DialectId, LanguageFamily};
pub use metadata::{
    ColumnDescriptor, ForeignKeyRelation, SchemaSnapshot, TableDescriptor, TableKind, table_key,
};
pub use span::{CursorTarget, StatementSpan};
