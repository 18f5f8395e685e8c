// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Candidate generation
//!
//! Maps a [`CompletionContext`] to candidate sources:
//!
//! | Context | Structural source |
//! |---|---|
//! | `TopLevelCommand` | statement starters or command verbs |
//! | `AfterFromLikeClause` | tables (collections in the document language) |
//! | `AfterDotAlias` | columns of the bound table, or tables of a schema |
//! | `AfterJoinOn` | foreign-key join conditions, then qualified columns |
//! | `AfterOperator` / `FreeText` | columns of referenced tables |
//! | `CommandArgument` | key patterns, then command options |
//! | `CollectionMethod` | collection methods |
//! | `DocumentField` | collection fields and query operators |
//!
//! Keywords and functions are mixed in at their own tier. Snippets match on
//! the partial word alone, whatever the position, except after a `.` where
//! only members make sense. [`finalize`] dedups, orders and caps the result.

use super::CompletionOptions;
use super::ranking::{
    BOTH_SIDES_BONUS, FOREIGN_KEY_TIER, KEYWORD_TIER, MatchQuality, SAME_SCHEMA_BONUS,
    SNIPPET_TIER, STRUCTURAL_TIER, TOP_LEVEL_TIER, finalize,
};
use super::render::{CandidateRenderer, Qualifier};
use crate::config::SchemaFilter;
use sqlsense_context::{CompletionContext, ContextKind, TableRef};
use sqlsense_dialect::{DialectProfile, LanguageFamily};
use sqlsense_ir::{Candidate, ForeignKeyRelation, SchemaSnapshot, TableDescriptor};
use std::collections::HashMap;
use tracing::debug;

/// Operators rank just below collection fields
const OPERATOR_PENALTY: i32 = 50;

/// Generate ranked candidates for a classified cursor position
///
/// Returns an empty list inside literals, and for an empty partial word
/// unless the request was explicit or the position was reached by typing `.`.
pub fn generate(
    context: &CompletionContext,
    snapshot: &SchemaSnapshot,
    foreign_keys: &[ForeignKeyRelation],
    profile: &DialectProfile,
    options: &CompletionOptions,
) -> Vec<Candidate> {
    if context.is_literal() {
        return Vec::new();
    }
    if context.partial.is_empty() && !options.explicit && !context.is_dot_triggered() {
        return Vec::new();
    }

    let mut generator = Generator {
        context,
        snapshot,
        profile,
        options,
        renderer: CandidateRenderer::new(profile),
        items: Vec::new(),
    };

    match &context.kind {
        ContextKind::TopLevelCommand => generator.verbs(),
        ContextKind::AfterFromLikeClause => generator.tables(),
        ContextKind::AfterDotAlias { qualifier, binding } => {
            generator.dot_members(qualifier, binding.as_ref());
        }
        ContextKind::AfterJoinOn => {
            generator.join_conditions(foreign_keys);
            generator.referenced_columns(true);
            generator.keywords();
        }
        ContextKind::AfterOperator => {
            generator.referenced_columns(false);
            generator.keywords();
            generator.functions();
        }
        ContextKind::FreeText => {
            generator.referenced_columns(false);
            generator.keywords();
            generator.functions();
        }
        ContextKind::CommandArgument { command, index } => {
            generator.command_argument(command, *index);
        }
        ContextKind::CollectionMethod { .. } => generator.methods(),
        ContextKind::DocumentField { collection } => {
            generator.document_fields(collection);
            generator.functions();
        }
        ContextKind::InLiteral => {}
    }
    generator.snippets();

    let generated = generator.items.len();
    let ranked = finalize(generator.items, options.max_candidates);
    debug!(
        kind = ?context.kind,
        partial = %context.partial,
        generated,
        returned = ranked.len(),
        "generated completion candidates"
    );
    ranked
}

struct Generator<'a> {
    context: &'a CompletionContext,
    snapshot: &'a SchemaSnapshot,
    profile: &'a DialectProfile,
    options: &'a CompletionOptions,
    renderer: CandidateRenderer<'a>,
    items: Vec<Candidate>,
}

impl<'a> Generator<'a> {
    /// Keep `candidate` if its label matches the partial word
    fn push(&mut self, candidate: Candidate, tier: i32, extra: i32) {
        self.push_matching(candidate, None, tier, extra);
    }

    /// Like [`Self::push`], matching against `match_text` instead of the label
    fn push_matching(&mut self, candidate: Candidate, match_text: Option<&str>, tier: i32, extra: i32) {
        let text = match_text.unwrap_or(&candidate.label);
        if let Some(quality) = MatchQuality::of(text, &self.context.partial) {
            let boost = tier + quality.bonus() + extra;
            self.items.push(candidate.with_boost(boost));
        }
    }

    fn filter(&self) -> &SchemaFilter {
        &self.options.schema_filter
    }

    fn verbs(&mut self) {
        let profile = self.profile;
        for command in &profile.top_level {
            let item = self.renderer.verb(command, &self.context.partial);
            self.push(item, TOP_LEVEL_TIER, 0);
        }
    }

    /// Snippets for any position not reached through a `.`
    ///
    /// An empty partial lists them only at the start of a command.
    fn snippets(&mut self) {
        let context = self.context;
        if !self.options.include_snippets || context.is_dot_triggered() {
            return;
        }
        if context.partial.is_empty() && !context.is_top_level() {
            return;
        }
        let profile = self.profile;
        for snippet in &profile.snippets {
            let item = self.renderer.snippet(snippet);
            self.push(item, SNIPPET_TIER, 0);
        }
    }

    fn keywords(&mut self) {
        let profile = self.profile;
        for keyword in &profile.keywords {
            let item = self.renderer.keyword(keyword, &self.context.partial);
            self.push(item, KEYWORD_TIER, 0);
        }
    }

    fn functions(&mut self) {
        if !self.options.include_functions {
            return;
        }
        let profile = self.profile;
        for function in &profile.functions {
            let item = self.renderer.function(function);
            self.push(item, KEYWORD_TIER, 0);
        }
    }

    /// Table references of the statement that exist in the snapshot
    fn referenced(&self) -> Vec<(&'a TableRef, &'a TableDescriptor)> {
        let snapshot = self.snapshot;
        let context = self.context;
        context
            .tables
            .iter()
            .filter_map(|table_ref| {
                snapshot
                    .resolve_table(table_ref.schema.as_deref(), &table_ref.name)
                    .map(|descriptor| (table_ref, descriptor))
            })
            .filter(|(_, descriptor)| self.filter().allows(descriptor))
            .collect()
    }

    /// Every visible table; names present in several schemas are qualified
    fn tables(&mut self) {
        let snapshot = self.snapshot;
        let visible: Vec<&TableDescriptor> = snapshot
            .tables
            .iter()
            .filter(|t| self.filter().allows(t))
            .collect();

        let mut name_counts: HashMap<String, usize> = HashMap::new();
        for table in &visible {
            *name_counts.entry(table.name.to_lowercase()).or_default() += 1;
        }

        let referenced_schemas: Vec<String> = self
            .referenced()
            .into_iter()
            .map(|(_, d)| d.schema.to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let qualify_ambiguous = self.profile.family() != LanguageFamily::Document;
        for table in visible {
            let ambiguous = qualify_ambiguous && name_counts[&table.name.to_lowercase()] > 1;
            let same_schema = referenced_schemas.contains(&table.schema.to_lowercase());
            let item = self.renderer.table(table, ambiguous);
            let extra = if same_schema { SAME_SCHEMA_BONUS } else { 0 };
            // Qualified labels still match on the bare table name
            self.push_matching(item, Some(&table.name), STRUCTURAL_TIER, extra);
        }
    }

    fn dot_members(&mut self, qualifier: &str, binding: Option<&TableRef>) {
        let snapshot = self.snapshot;
        let bound = match binding {
            Some(b) => snapshot.resolve_table(b.schema.as_deref(), &b.name),
            None => snapshot.resolve_table(None, qualifier),
        };

        if let Some(table) = bound {
            if self.filter().allows(table) {
                for column in snapshot.columns_for(table) {
                    let item = self.renderer.column(column, table, None);
                    self.push(item, STRUCTURAL_TIER, 0);
                }
            }
            return;
        }

        if binding.is_none() && snapshot.has_schema(qualifier) {
            let tables: Vec<&TableDescriptor> = snapshot
                .tables_in_schema(qualifier)
                .filter(|t| self.filter().allows(t))
                .collect();
            for table in tables {
                let item = self.renderer.table(table, false);
                self.push(item, STRUCTURAL_TIER, 0);
            }
        }
    }

    /// Equality conditions for foreign keys touching referenced tables
    fn join_conditions(&mut self, foreign_keys: &[ForeignKeyRelation]) {
        let referenced = self.referenced();
        if referenced.is_empty() {
            return;
        }

        for fk in foreign_keys {
            let sources: Vec<&TableRef> = referenced
                .iter()
                .filter(|(_, d)| fk.source_matches(&d.schema, &d.name))
                .map(|(r, _)| *r)
                .collect();
            let targets: Vec<&TableRef> = referenced
                .iter()
                .filter(|(_, d)| fk.target_matches(&d.schema, &d.name))
                .map(|(r, _)| *r)
                .collect();
            let detail = format!(
                "{}.{} references {}.{}",
                fk.source_table, fk.source_column, fk.target_table, fk.target_column
            );

            match (sources.is_empty(), targets.is_empty()) {
                (false, false) => {
                    for source in &sources {
                        for target in targets.iter().filter(|t| !std::ptr::eq(**t, *source)) {
                            let item = self.renderer.join_condition(
                                (written(source), fk.source_column.as_str()),
                                (written(target), fk.target_column.as_str()),
                                detail.clone(),
                            );
                            self.push(item, FOREIGN_KEY_TIER, BOTH_SIDES_BONUS);
                        }
                    }
                }
                (false, true) => {
                    if !self.is_visible(&fk.target_schema, &fk.target_table) {
                        continue;
                    }
                    for source in &sources {
                        let item = self.renderer.join_condition(
                            (written(source), fk.source_column.as_str()),
                            (Qualifier::Schema(fk.target_table.as_str()), fk.target_column.as_str()),
                            detail.clone(),
                        );
                        self.push(item, FOREIGN_KEY_TIER, 0);
                    }
                }
                (true, false) => {
                    if !self.is_visible(&fk.source_schema, &fk.source_table) {
                        continue;
                    }
                    for target in &targets {
                        let item = self.renderer.join_condition(
                            (Qualifier::Schema(fk.source_table.as_str()), fk.source_column.as_str()),
                            (written(target), fk.target_column.as_str()),
                            detail.clone(),
                        );
                        self.push(item, FOREIGN_KEY_TIER, 0);
                    }
                }
                (true, true) => {}
            }
        }
    }

    /// Whether a table outside the statement exists and passes the filter
    fn is_visible(&self, schema: &str, table: &str) -> bool {
        let schema = (!schema.is_empty()).then_some(schema);
        self.snapshot
            .resolve_table(schema, table)
            .is_some_and(|t| self.filter().allows(t))
    }

    fn referenced_columns(&mut self, qualified: bool) {
        let snapshot = self.snapshot;
        for (table_ref, table) in self.referenced() {
            let prefix = qualified.then(|| written(table_ref));
            for column in snapshot.columns_for(table) {
                let item = self.renderer.column(column, table, prefix);
                self.push(item, STRUCTURAL_TIER, 0);
            }
        }
    }

    fn command_argument(&mut self, command: &str, index: usize) {
        let takes_key = self
            .profile
            .command(command)
            .is_none_or(|spec| spec.key_arg);
        if takes_key && index == 0 {
            let snapshot = self.snapshot;
            for pattern in &snapshot.key_patterns {
                let item = self.renderer.key_pattern(pattern);
                self.push(item, STRUCTURAL_TIER, 0);
            }
            return;
        }
        self.keywords();
    }

    fn methods(&mut self) {
        let profile = self.profile;
        for method in &profile.methods {
            let item = self.renderer.method(method);
            self.push(item, STRUCTURAL_TIER, 0);
        }
    }

    fn document_fields(&mut self, collection: &str) {
        let snapshot = self.snapshot;
        if let Some(table) = snapshot
            .resolve_table(None, collection)
            .filter(|t| self.filter().allows(t))
        {
            for column in snapshot.columns_for(table) {
                let item = self.renderer.field(column, table);
                self.push(item, STRUCTURAL_TIER, 0);
            }
        }
        let profile = self.profile;
        for operator in &profile.operators {
            let item = self.renderer.operator(operator);
            self.push(item, STRUCTURAL_TIER, -OPERATOR_PENALTY);
        }
    }
}

/// Name a table reference is addressed by in the statement, as written
fn written(table_ref: &TableRef) -> Qualifier<'_> {
    Qualifier::Written {
        name: table_ref.alias.as_deref().unwrap_or(&table_ref.name),
        quoted: table_ref.quoted,
    }
}
