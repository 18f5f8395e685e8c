// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLSense Dialect Profiles
//!
//! This crate provides the static per-dialect knowledge the engine runs on:
//! keyword and function vocabularies, command verbs, snippets, statement
//! separators, quoting rules and the clause markers the context classifier
//! keys on.
//!
//! ## Features
//!
//! - Builtin profiles for generic SQL, PostgreSQL, MySQL, MariaDB, SQLite,
//!   SQL Server, Redis, MongoDB and Cassandra CQL
//! - Total lookup by [`DialectId`]: unknown dialects get the generic profile
//! - [`DialectProfileBuilder`] for defining profiles as plain data
//!
//! ## Usage
//!
//! ```rust
//! use sqlsense_dialect::profile_for;
//! use sqlsense_ir::DialectId;
//!
//! let pg = profile_for(DialectId::PostgreSQL);
//! assert!(pg.is_table_marker("FROM"));
//! ```

pub mod builtin;
pub mod profile;
pub mod registry;

pub use profile::{
    BlockComment, ClauseMarkers, CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle,
    ExtendedQuote, FunctionSpec, QuoteKind, QuoteRule, Snippet,
};
pub use registry::{DialectRegistry, profile_for, registry};

// Re-exports from ir for convenience
pub use sqlsense_ir::{DialectId, LanguageFamily};
