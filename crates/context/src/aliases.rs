// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table reference and alias extraction
//!
//! Builds a flat alias table for one statement by scanning for the table
//! reference patterns that follow table-position markers:
//!
//! - `FROM orders`, `FROM sales.orders`
//! - `FROM orders AS o`, `FROM orders o`
//! - `FROM orders o, customers c`
//! - `JOIN customers c ON ...`, `UPDATE orders o SET ...`, `INSERT INTO orders`
//! - `CREATE INDEX idx ON orders (...)`
//!
//! This is a linear token scan, not a parse; subqueries and CTEs are not
//! resolved.

use crate::lexer::{Token, TokenKind};
use serde::Serialize;
use sqlsense_dialect::DialectProfile;

/// A table referenced in a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
    /// The name this reference answers to was written as a quoted identifier
    pub quoted: bool,
    /// Byte offset of the reference within the statement
    pub offset: usize,
}

impl TableRef {
    /// Whether `qualifier` names this reference (alias first, then table name)
    pub fn answers_to(&self, qualifier: &str) -> bool {
        match &self.alias {
            Some(alias) => alias.eq_ignore_ascii_case(qualifier),
            None => self.name.eq_ignore_ascii_case(qualifier),
        }
    }
}

/// Table references found in one statement, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasTable {
    refs: Vec<TableRef>,
}

impl AliasTable {
    /// Scan a whole statement's tokens for table references
    pub fn scan(tokens: &[Token], profile: &DialectProfile) -> Self {
        let mut refs = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            let is_marker = token.kind == TokenKind::Word
                && ((profile.is_table_marker(&token.text) && !follows_definition(tokens, i, profile))
                    || (token.is_word("ON") && names_index_target(&tokens[..i], profile)));
            if !is_marker {
                i += 1;
                continue;
            }

            let allows_list = token.is_word("FROM");
            i += 1;
            loop {
                let Some((table, next)) = read_reference(tokens, i, profile) else {
                    break;
                };
                refs.push(table);
                i = next;
                if allows_list && tokens.get(i).is_some_and(|t| t.kind == TokenKind::Comma) {
                    i += 1;
                } else {
                    break;
                }
            }
        }
        Self { refs }
    }

    pub fn refs(&self) -> &[TableRef] {
        &self.refs
    }

    pub fn into_refs(self) -> Vec<TableRef> {
        self.refs
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Resolve a qualifier typed before a `.` at `cursor`
    ///
    /// A binding introduced before the cursor wins over one introduced
    /// after it; among earlier bindings the nearest one wins.
    pub fn resolve(&self, qualifier: &str, cursor: usize) -> Option<&TableRef> {
        let mut before = None;
        let mut after = None;
        for table in self.refs.iter().filter(|r| r.answers_to(qualifier)) {
            if table.offset < cursor {
                before = Some(table);
            } else if after.is_none() {
                after = Some(table);
            }
        }
        before.or(after)
    }
}

/// `CREATE TABLE x` names a new table rather than referencing one
pub(crate) fn follows_definition(tokens: &[Token], index: usize, profile: &DialectProfile) -> bool {
    tokens[..index]
        .iter()
        .rev()
        .take(2)
        .any(|t| t.kind == TokenKind::Word && profile.is_definition_keyword(&t.text))
}

/// `CREATE [UNIQUE] INDEX name ON table`: the word after `ON` is a table
pub(crate) fn names_index_target(before: &[Token], profile: &DialectProfile) -> bool {
    before
        .first()
        .is_some_and(|t| t.kind == TokenKind::Word && profile.is_definition_keyword(&t.text))
        && before.iter().any(|t| t.is_word("INDEX"))
}

/// Read `[schema.]name [[AS] alias]` starting at `start`
fn read_reference(
    tokens: &[Token],
    start: usize,
    profile: &DialectProfile,
) -> Option<(TableRef, usize)> {
    let first = tokens.get(start)?;
    if !is_name(first, profile) {
        return None;
    }

    let mut parts = vec![first.text.clone()];
    let mut quoted = first.kind == TokenKind::QuotedIdent;
    let mut i = start + 1;
    while tokens.get(i).is_some_and(|t| t.kind == TokenKind::Dot)
        && let Some(part) = tokens.get(i + 1).filter(|t| t.is_identifier())
    {
        parts.push(part.text.clone());
        quoted = part.kind == TokenKind::QuotedIdent;
        i += 2;
    }

    // `FROM sales.` is still being typed
    if tokens.get(i).is_some_and(|t| t.kind == TokenKind::Dot) {
        return None;
    }

    let name = parts.pop()?;
    let schema = parts.pop();

    let mut alias = None;
    if tokens.get(i).is_some_and(|t| t.is_word("AS")) {
        if let Some(t) = tokens.get(i + 1).filter(|t| t.is_identifier()) {
            alias = Some(t.text.clone());
            quoted = t.kind == TokenKind::QuotedIdent;
            i += 2;
        } else {
            i += 1;
        }
    } else if let Some(t) = tokens.get(i).filter(|t| is_name(t, profile)) {
        alias = Some(t.text.clone());
        quoted = t.kind == TokenKind::QuotedIdent;
        i += 1;
    }

    Some((
        TableRef {
            schema,
            name,
            alias,
            quoted,
            offset: first.start,
        },
        i,
    ))
}

/// Identifier that is not a keyword
fn is_name(token: &Token, profile: &DialectProfile) -> bool {
    match token.kind {
        TokenKind::QuotedIdent => true,
        TokenKind::Word => !profile.is_keyword(&token.text) && !profile.is_clause_marker(&token.text),
        _ => false,
    }
}
