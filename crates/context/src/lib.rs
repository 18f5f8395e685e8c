// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQLSense - Context Detection Layer
//!
//! This crate provides text-level context detection for completion and
//! statement execution. Nothing here builds a parse tree: every operation is
//! a linear scan driven by the active [`DialectProfile`](sqlsense_dialect::DialectProfile).
//!
//! ## Core Concepts
//!
//! ### Lexer
//!
//! The [`lexer`] module tokenizes text with the profile's quoting, comment and
//! separator rules. It never fails on malformed input.
//!
//! ### Statement Resolution
//!
//! [`resolve_statement`] returns the statement a cursor or selection refers
//! to; [`split_statements`] returns all of them.
//!
//! ### Completion Context
//!
//! [`classify`] turns a statement and cursor offset into a
//! [`CompletionContext`]: the grammatical position, the partial word and the
//! table references visible in the statement.
//!
//! ## Examples
//!
//! ```rust
//! use sqlsense_context::{ContextKind, classify, resolve_statement};
//! use sqlsense_dialect::profile_for;
//! use sqlsense_ir::{CursorTarget, DialectId};
//!
//! let profile = profile_for(DialectId::PostgreSQL);
//! let buffer = "SELECT 1;\nSELECT o. FROM orders o;";
//! let span = resolve_statement(buffer, CursorTarget::Offset(18), profile);
//! assert_eq!(span.text, "SELECT o. FROM orders o");
//!
//! let ctx = classify(&span.text, 9, profile);
//! assert!(matches!(ctx.kind, ContextKind::AfterDotAlias { .. }));
//! ```

pub mod aliases;
pub mod completion;
pub mod lexer;
pub mod statement;

// Re-export commonly used types
pub use aliases::{AliasTable, TableRef};
pub use completion::{CompletionContext, ContextKind, classify};
pub use lexer::{Lexed, ScanEnd, Token, TokenKind, tokenize};
pub use statement::{clamp_to_boundary, resolve_statement, split_statements, statement_at};
