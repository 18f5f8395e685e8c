// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion
//!
//! Request types and the [`CompletionEngine`] that runs the pipeline:
//!
//! 1. Pick the statement under the cursor ([`statement_at`])
//! 2. Classify the cursor position inside it ([`classify`])
//! 3. Generate and rank candidates ([`generate::generate`])
//!
//! The engine holds no schema state of its own. Metadata is passed in per
//! request, either directly or through a [`SchemaCache`].

pub mod generate;
pub mod ranking;
pub mod render;

use crate::config::{EngineConfig, SchemaFilter};
use serde::{Deserialize, Serialize};
use sqlsense_catalog::SchemaCache;
use sqlsense_context::{CompletionContext, classify, clamp_to_boundary, statement_at};
use sqlsense_dialect::{DialectProfile, profile_for};
use sqlsense_ir::{Candidate, CursorTarget, DialectId, ForeignKeyRelation, SchemaSnapshot};
use tracing::{debug, instrument};

/// One completion request from the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full editor buffer
    pub buffer: String,
    /// Cursor byte offset into `buffer`
    pub cursor: usize,
    /// Completion was invoked by the user rather than by typing
    #[serde(default)]
    pub explicit: bool,
}

impl CompletionRequest {
    pub fn new(buffer: impl Into<String>, cursor: usize) -> Self {
        Self {
            buffer: buffer.into(),
            cursor,
            explicit: false,
        }
    }

    /// Mark the request as explicitly invoked (e.g. Ctrl+Space)
    pub fn explicit(mut self) -> Self {
        self.explicit = true;
        self
    }
}

/// Per-request generation options, derived from [`EngineConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOptions {
    pub explicit: bool,
    pub max_candidates: usize,
    pub include_snippets: bool,
    pub include_functions: bool,
    pub schema_filter: SchemaFilter,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        EngineConfig::default().completion_options(false)
    }
}

/// Completion engine for one dialect
#[derive(Debug, Clone)]
pub struct CompletionEngine {
    config: EngineConfig,
    profile: &'static DialectProfile,
}

impl CompletionEngine {
    /// Create an engine from a configuration
    pub fn new(config: EngineConfig) -> Self {
        let profile = profile_for(config.dialect);
        Self { config, profile }
    }

    /// Create an engine with default settings for a dialect
    pub fn for_dialect(dialect: DialectId) -> Self {
        Self::new(EngineConfig::new(dialect))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profile(&self) -> &'static DialectProfile {
        self.profile
    }

    /// Statement under the cursor and the classified position inside it
    pub fn context(&self, request: &CompletionRequest) -> (sqlsense_ir::StatementSpan, CompletionContext) {
        let cursor = clamp_to_boundary(&request.buffer, request.cursor);
        let span = statement_at(&request.buffer, cursor, self.profile);
        let local = cursor.saturating_sub(span.start).min(span.text.len());
        let context = classify(&span.text, local, self.profile);
        (span, context)
    }

    /// Complete against an explicit snapshot and foreign-key graph
    #[instrument(skip_all, fields(dialect = %self.config.dialect.as_str(), cursor = request.cursor))]
    pub fn complete(
        &self,
        request: &CompletionRequest,
        snapshot: &SchemaSnapshot,
        foreign_keys: &[ForeignKeyRelation],
    ) -> Vec<Candidate> {
        let (span, context) = self.context(request);
        debug!(
            statement_start = span.start,
            statement_end = span.end,
            kind = ?context.kind,
            "classified cursor"
        );
        let options = self.config.completion_options(request.explicit);
        generate::generate(&context, snapshot, foreign_keys, self.profile, &options)
    }

    /// Complete against whatever the cache currently holds
    ///
    /// Never waits for an in-flight refresh.
    pub fn complete_cached(&self, request: &CompletionRequest, cache: &SchemaCache) -> Vec<Candidate> {
        let state = cache.current();
        self.complete(request, &state.snapshot, &state.foreign_keys)
    }

    /// Text of the statement a cursor or selection refers to
    pub fn resolve_statement(&self, buffer: &str, target: impl Into<CursorTarget>) -> String {
        sqlsense_context::resolve_statement(buffer, target.into(), self.profile).text
    }
}
