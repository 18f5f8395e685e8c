// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion context detection
//!
//! This module classifies the grammatical position of the cursor inside one
//! statement without building a parse tree. Only the prefix up to the cursor
//! is tokenized for classification; the alias table is built from the whole
//! statement so a qualifier typed before its `FROM` still resolves.
//!
//! The classifier tolerates any input. Users are mid-typing, so invalid SQL
//! is the normal case rather than an error.

use crate::aliases::{AliasTable, TableRef, follows_definition, names_index_target};
use crate::lexer::{ScanEnd, Token, TokenKind, tokenize};
use crate::statement::clamp_to_boundary;
use serde::Serialize;
use sqlsense_dialect::{DialectProfile, LanguageFamily};
use tracing::debug;

/// Grammatical position of the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextKind {
    /// Start of a statement or command, e.g. `|` or `SEL|`
    TopLevelCommand,

    /// A table name is expected, e.g. `SELECT * FROM |`
    ///
    /// Also used for the collection position after `db.` in the document
    /// language.
    AfterFromLikeClause,

    /// Join condition, e.g. `... JOIN customers c ON |`
    AfterJoinOn,

    /// Member access on a qualifier, e.g. `SELECT o.| FROM orders o`
    AfterDotAlias {
        /// Text typed before the dot
        qualifier: String,
        /// Table the qualifier is bound to, when it is a known alias or table
        binding: Option<TableRef>,
    },

    /// Right-hand side of an operator or an opening parenthesis, e.g. `WHERE id = |`
    AfterOperator,

    /// No specific position; the partial word is a plain prefix filter
    FreeText,

    /// Argument of a key-value command, e.g. `GET |`
    CommandArgument {
        /// Upper-cased command verb
        command: String,
        /// Zero-based argument index
        index: usize,
    },

    /// Method on a collection, e.g. `db.users.|`
    CollectionMethod { collection: String },

    /// Inside a method call's arguments, e.g. `db.users.find({ |`
    DocumentField { collection: String },

    /// Inside a string literal or comment; nothing is offered
    InLiteral,
}

/// Classified cursor position plus the word being typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionContext {
    pub kind: ContextKind,
    /// Partial word before the cursor (unquoted), possibly empty
    pub partial: String,
    /// Byte offset within the statement where the partial word starts
    pub partial_start: usize,
    /// Table references found in the statement
    pub tables: Vec<TableRef>,
    /// The cursor follows a `.` (ignoring the partial word)
    pub dot_triggered: bool,
}

impl CompletionContext {
    fn new(kind: ContextKind, partial: Partial, tables: Vec<TableRef>) -> Self {
        Self {
            kind,
            partial: partial.text,
            partial_start: partial.start,
            tables,
            dot_triggered: false,
        }
    }

    /// Positions reached by typing `.`, which complete even without a partial word
    pub fn is_dot_triggered(&self) -> bool {
        self.dot_triggered
    }

    pub fn is_top_level(&self) -> bool {
        self.kind == ContextKind::TopLevelCommand
    }

    /// Check if the cursor is inside a literal or comment
    pub fn is_literal(&self) -> bool {
        self.kind == ContextKind::InLiteral
    }
}

#[derive(Debug, Default)]
struct Partial {
    text: String,
    start: usize,
}

/// Classify the cursor position within a statement
///
/// # Arguments
///
/// * `statement` - Text of one statement
/// * `offset` - Cursor byte offset within `statement` (clamped)
/// * `profile` - Active dialect profile
///
/// # Examples
///
/// ```
/// use sqlsense_context::{ContextKind, classify};
/// use sqlsense_dialect::profile_for;
/// use sqlsense_ir::DialectId;
///
/// let sql = "SELECT * FROM ord";
/// let ctx = classify(sql, sql.len(), profile_for(DialectId::Generic));
/// assert_eq!(ctx.kind, ContextKind::AfterFromLikeClause);
/// assert_eq!(ctx.partial, "ord");
/// ```
pub fn classify(statement: &str, offset: usize, profile: &DialectProfile) -> CompletionContext {
    let offset = clamp_to_boundary(statement, offset);
    let lexed = tokenize(&statement[..offset], profile);
    let mut tokens = lexed.tokens;

    // Anything before a separator belongs to an earlier statement.
    if let Some(pos) = tokens.iter().rposition(|t| t.kind == TokenKind::Separator) {
        tokens.drain(..=pos);
    }

    let family = profile.family();
    let partial = match lexed.end {
        ScanEnd::InComment => {
            return CompletionContext::new(ContextKind::InLiteral, Partial::default(), Vec::new());
        }
        ScanEnd::InString if family != LanguageFamily::Document => {
            return CompletionContext::new(ContextKind::InLiteral, Partial::default(), Vec::new());
        }
        ScanEnd::InString | ScanEnd::InIdentifier => take_open_quote(&mut tokens),
        ScanEnd::Normal => take_partial_word(&mut tokens, offset),
    };

    // Shell commands usually end at a line break rather than a separator.
    if family == LanguageFamily::Document {
        drop_earlier_lines(&mut tokens, &statement[..offset], partial.start);
    }

    let aliases = match family {
        LanguageFamily::Relational | LanguageFamily::WideColumn => {
            AliasTable::scan(&tokenize(statement, profile).tokens, profile)
        }
        LanguageFamily::KeyValue | LanguageFamily::Document => AliasTable::default(),
    };

    let kind = match family {
        LanguageFamily::KeyValue => command_kind(&tokens),
        LanguageFamily::Document => document_kind(&tokens),
        LanguageFamily::Relational | LanguageFamily::WideColumn => {
            relational_kind(&tokens, profile, &aliases, offset)
        }
    };

    debug!(?kind, partial = %partial.text, "classified completion context");
    let mut context = CompletionContext::new(kind, partial, aliases.into_refs());
    context.dot_triggered = tokens.last().is_some_and(|t| t.kind == TokenKind::Dot);
    context
}

/// Pop the unterminated quote the cursor sits in; its content is the partial word
fn take_open_quote(tokens: &mut Vec<Token>) -> Partial {
    match tokens.last() {
        Some(t) if !t.terminated => {
            let start = t.start + 1;
            tokens.pop().map_or_else(Partial::default, |t| Partial {
                text: t.text,
                start,
            })
        }
        _ => Partial::default(),
    }
}

/// Pop the word touching the cursor, if any
fn take_partial_word(tokens: &mut Vec<Token>, offset: usize) -> Partial {
    let touching = tokens.last().is_some_and(|t| {
        t.end == offset
            && matches!(
                t.kind,
                TokenKind::Word | TokenKind::QuotedIdent | TokenKind::Number
            )
    });
    if !touching {
        return Partial {
            text: String::new(),
            start: offset,
        };
    }
    tokens.pop().map_or_else(Partial::default, |t| {
        let start = if t.kind == TokenKind::QuotedIdent {
            t.start + 1
        } else {
            t.start
        };
        Partial {
            text: t.text,
            start,
        }
    })
}

fn relational_kind(
    tokens: &[Token],
    profile: &DialectProfile,
    aliases: &AliasTable,
    offset: usize,
) -> ContextKind {
    let Some(last) = tokens.last() else {
        return ContextKind::TopLevelCommand;
    };

    match last.kind {
        TokenKind::Dot => match tokens.len().checked_sub(2).map(|i| &tokens[i]) {
            Some(qualifier) if qualifier.is_identifier() => ContextKind::AfterDotAlias {
                qualifier: qualifier.text.clone(),
                binding: aliases.resolve(&qualifier.text, offset).cloned(),
            },
            _ => ContextKind::FreeText,
        },
        TokenKind::Word => {
            let index = tokens.len() - 1;
            if profile.is_table_marker(&last.text) && !follows_definition(tokens, index, profile) {
                ContextKind::AfterFromLikeClause
            } else if last.is_word("ON") && names_index_target(&tokens[..index], profile) {
                ContextKind::AfterFromLikeClause
            } else if profile.is_join_condition_marker(&last.text) {
                ContextKind::AfterJoinOn
            } else if (last.is_word("AND") || last.is_word("OR"))
                && governing_clause(&tokens[..index], profile)
                    .is_some_and(|t| profile.is_join_condition_marker(&t.text))
            {
                ContextKind::AfterJoinOn
            } else {
                ContextKind::FreeText
            }
        }
        TokenKind::Comma => {
            if governing_clause(tokens, profile).is_some_and(|t| t.is_word("FROM")) {
                ContextKind::AfterFromLikeClause
            } else {
                ContextKind::FreeText
            }
        }
        TokenKind::Operator if is_wildcard(tokens) => ContextKind::FreeText,
        TokenKind::Operator | TokenKind::OpenParen => ContextKind::AfterOperator,
        _ => ContextKind::FreeText,
    }
}

/// `SELECT *`, `o.*` and `a, *` select everything; the `*` is not a multiplication
fn is_wildcard(tokens: &[Token]) -> bool {
    let Some((last, before)) = tokens.split_last() else {
        return false;
    };
    last.text == "*"
        && before.last().is_none_or(|prev| {
            matches!(prev.kind, TokenKind::Dot | TokenKind::Comma)
                || prev.is_word("SELECT")
                || prev.is_word("DISTINCT")
        })
}

/// Nearest clause marker before the end of `tokens` at the same paren depth
fn governing_clause<'t>(tokens: &'t [Token], profile: &DialectProfile) -> Option<&'t Token> {
    let mut depth = 0usize;
    for token in tokens.iter().rev() {
        match token.kind {
            TokenKind::CloseParen => depth += 1,
            TokenKind::OpenParen => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            TokenKind::Word if depth == 0 && profile.is_clause_marker(&token.text) => {
                return Some(token);
            }
            _ => {}
        }
    }
    None
}

fn command_kind(tokens: &[Token]) -> ContextKind {
    match tokens.split_first() {
        None => ContextKind::TopLevelCommand,
        Some((verb, args)) => ContextKind::CommandArgument {
            command: verb.text.to_ascii_uppercase(),
            index: args.len(),
        },
    }
}

/// Keep only the tokens of the shell command the cursor is in
///
/// A line break at bracket depth zero starts a new command unless a `.`
/// on either side continues a call chain (`find()\n  .sort()`). `cursor`
/// is where the partial word starts.
fn drop_earlier_lines(tokens: &mut Vec<Token>, text: &str, cursor: usize) {
    let breaks_line = |from: usize, to: usize| text.get(from..to).is_some_and(|gap| gap.contains('\n'));

    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if i > 0
            && depth == 0
            && token.kind != TokenKind::Dot
            && tokens[i - 1].kind != TokenKind::Dot
            && breaks_line(tokens[i - 1].end, token.start)
        {
            start = i;
        }
        match (token.kind, token.text.as_str()) {
            (TokenKind::OpenParen, _) | (TokenKind::Punct, "{" | "[") => depth += 1,
            (TokenKind::CloseParen, _) | (TokenKind::Punct, "}" | "]") => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    if let Some(last) = tokens.last()
        && depth == 0
        && last.kind != TokenKind::Dot
        && breaks_line(last.end, cursor)
    {
        start = tokens.len();
    }
    tokens.drain(..start);
}

/// `db.<collection>.<method>(...)` call chains
fn document_kind(tokens: &[Token]) -> ContextKind {
    let Some((first, rest)) = tokens.split_first() else {
        return ContextKind::TopLevelCommand;
    };
    if !first.is_word("db") {
        return ContextKind::FreeText;
    }

    match rest {
        [dot] if dot.kind == TokenKind::Dot => ContextKind::AfterFromLikeClause,
        [dot, collection, dot2]
            if dot.kind == TokenKind::Dot
                && collection.kind == TokenKind::Word
                && dot2.kind == TokenKind::Dot =>
        {
            ContextKind::CollectionMethod {
                collection: collection.text.clone(),
            }
        }
        [dot, collection, dot2, method, open, args @ ..]
            if dot.kind == TokenKind::Dot
                && collection.kind == TokenKind::Word
                && dot2.kind == TokenKind::Dot
                && method.kind == TokenKind::Word
                && open.kind == TokenKind::OpenParen =>
        {
            if call_is_open(args) {
                ContextKind::DocumentField {
                    collection: collection.text.clone(),
                }
            } else {
                ContextKind::FreeText
            }
        }
        _ => ContextKind::FreeText,
    }
}

/// Whether the call opened just before `args` is still unclosed
fn call_is_open(args: &[Token]) -> bool {
    let mut depth = 1usize;
    for token in args {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlsense_dialect::profile_for;
    use sqlsense_ir::DialectId;

    /// Classify with the cursor at `|`
    fn at(marked: &str, dialect: DialectId) -> CompletionContext {
        let offset = marked.find('|').expect("cursor marker");
        let text = marked.replacen('|', "", 1);
        classify(&text, offset, profile_for(dialect))
    }

    fn kind(marked: &str) -> ContextKind {
        at(marked, DialectId::PostgreSQL).kind
    }

    #[test]
    fn test_empty_statement_is_top_level() {
        assert_eq!(kind("|"), ContextKind::TopLevelCommand);
        let ctx = at("SEL|", DialectId::Generic);
        assert_eq!(ctx.kind, ContextKind::TopLevelCommand);
        assert_eq!(ctx.partial, "SEL");
        assert_eq!(ctx.partial_start, 0);
    }

    #[test]
    fn test_table_position_markers() {
        assert_eq!(kind("SELECT * FROM |"), ContextKind::AfterFromLikeClause);
        assert_eq!(kind("SELECT * FROM ord|"), ContextKind::AfterFromLikeClause);
        assert_eq!(
            kind("SELECT * FROM a JOIN |"),
            ContextKind::AfterFromLikeClause
        );
        assert_eq!(kind("INSERT INTO |"), ContextKind::AfterFromLikeClause);
        assert_eq!(kind("UPDATE |"), ContextKind::AfterFromLikeClause);
        assert_eq!(kind("select * from |"), ContextKind::AfterFromLikeClause);
    }

    #[test]
    fn test_create_table_is_free_text() {
        assert_eq!(kind("CREATE TABLE |"), ContextKind::FreeText);
    }

    #[test]
    fn test_comma_in_from_list() {
        assert_eq!(
            kind("SELECT * FROM orders o, |"),
            ContextKind::AfterFromLikeClause
        );
        assert_eq!(kind("SELECT a, |"), ContextKind::FreeText);
    }

    #[test]
    fn test_dot_alias_binding() {
        let ctx = at(
            "SELECT o.| FROM orders o JOIN customers c ON o.customer_id = c.id",
            DialectId::PostgreSQL,
        );
        match &ctx.kind {
            ContextKind::AfterDotAlias { qualifier, binding } => {
                assert_eq!(qualifier, "o");
                assert_eq!(binding.as_ref().unwrap().name, "orders");
            }
            other => panic!("unexpected context {other:?}"),
        }
        assert!(ctx.is_dot_triggered());
        assert_eq!(ctx.tables.len(), 2);
    }

    #[test]
    fn test_dot_with_partial_and_unknown_qualifier() {
        let ctx = at("SELECT x.na| FROM orders o", DialectId::PostgreSQL);
        assert_eq!(ctx.partial, "na");
        assert_eq!(
            ctx.kind,
            ContextKind::AfterDotAlias {
                qualifier: "x".into(),
                binding: None,
            }
        );
    }

    #[test]
    fn test_join_condition() {
        assert_eq!(
            kind("SELECT * FROM orders o JOIN customers c ON |"),
            ContextKind::AfterJoinOn
        );
        assert_eq!(
            kind("SELECT * FROM orders o JOIN customers c ON o.id = c.id AND |"),
            ContextKind::AfterJoinOn
        );
        assert_eq!(
            kind("SELECT * FROM orders WHERE a = 1 AND |"),
            ContextKind::FreeText
        );
    }

    #[test]
    fn test_operator_and_paren() {
        assert_eq!(kind("SELECT * FROM t WHERE id = |"), ContextKind::AfterOperator);
        assert_eq!(kind("SELECT count(|"), ContextKind::AfterOperator);
        assert_eq!(kind("SELECT * FROM orders |"), ContextKind::FreeText);
    }

    #[test]
    fn test_inside_literal_or_comment() {
        assert_eq!(kind("SELECT 'abc|"), ContextKind::InLiteral);
        assert_eq!(kind("SELECT 1 -- note |"), ContextKind::InLiteral);
        assert_eq!(kind("SELECT /* |"), ContextKind::InLiteral);
    }

    #[test]
    fn test_unterminated_quoted_identifier_is_partial() {
        let ctx = at("SELECT * FROM \"Ord|", DialectId::PostgreSQL);
        assert_eq!(ctx.kind, ContextKind::AfterFromLikeClause);
        assert_eq!(ctx.partial, "Ord");
        assert_eq!(ctx.partial_start, 15);
    }

    #[test]
    fn test_earlier_statements_are_ignored() {
        assert_eq!(kind("SELECT * FROM a; |"), ContextKind::TopLevelCommand);
    }

    #[test]
    fn test_redis_positions() {
        assert_eq!(at("|", DialectId::Redis).kind, ContextKind::TopLevelCommand);
        assert_eq!(at("HG|", DialectId::Redis).kind, ContextKind::TopLevelCommand);
        let ctx = at("hget user:|", DialectId::Redis);
        assert_eq!(
            ctx.kind,
            ContextKind::CommandArgument {
                command: "HGET".into(),
                index: 0,
            }
        );
        assert_eq!(ctx.partial, "user:");
        assert_eq!(
            at("SET k v |", DialectId::Redis).kind,
            ContextKind::CommandArgument {
                command: "SET".into(),
                index: 2,
            }
        );
    }

    #[test]
    fn test_mongo_positions() {
        let ctx = at("db.|", DialectId::MongoDB);
        assert_eq!(ctx.kind, ContextKind::AfterFromLikeClause);
        assert!(ctx.is_dot_triggered());

        assert_eq!(
            at("db.users.fi|", DialectId::MongoDB).kind,
            ContextKind::CollectionMethod {
                collection: "users".into()
            }
        );
        let field = at("db.users.find({ na|", DialectId::MongoDB);
        assert_eq!(
            field.kind,
            ContextKind::DocumentField {
                collection: "users".into()
            }
        );
        assert_eq!(field.partial, "na");
        assert_eq!(
            at("db.users.find({ \"em|", DialectId::MongoDB).partial,
            "em"
        );
        assert_eq!(
            at("db.users.find({}).|", DialectId::MongoDB).kind,
            ContextKind::FreeText
        );
        assert_eq!(at("|", DialectId::MongoDB).kind, ContextKind::TopLevelCommand);
    }

    #[test]
    fn test_mongo_each_line_is_a_command() {
        let mongo = |marked| at(marked, DialectId::MongoDB).kind;
        assert_eq!(mongo("db.a.find({})\n|"), ContextKind::TopLevelCommand);
        assert_eq!(mongo("db.a.find({})\nsh|"), ContextKind::TopLevelCommand);
        assert_eq!(mongo("db.a.find({})\ndb.|"), ContextKind::AfterFromLikeClause);
        assert_eq!(
            mongo("use shop\n// orders\ndb.orders.co|"),
            ContextKind::CollectionMethod {
                collection: "orders".into()
            }
        );
    }

    #[test]
    fn test_mongo_multiline_call_stays_one_command() {
        assert_eq!(
            at("db.users.find({\n  na|", DialectId::MongoDB).kind,
            ContextKind::DocumentField {
                collection: "users".into()
            }
        );
        assert_eq!(
            at("db.users.find({})\n  .|", DialectId::MongoDB).kind,
            ContextKind::FreeText
        );
    }

    #[test]
    fn test_create_index_on_expects_a_table() {
        assert_eq!(kind("CREATE INDEX idx ON |"), ContextKind::AfterFromLikeClause);
        assert_eq!(
            kind("CREATE UNIQUE INDEX idx ON ord|"),
            ContextKind::AfterFromLikeClause
        );
    }

    #[test]
    fn test_select_star_is_not_an_operator() {
        assert_eq!(kind("SELECT * |"), ContextKind::FreeText);
        assert_eq!(kind("SELECT o.* |"), ContextKind::FreeText);
        assert_eq!(kind("SELECT id, * |"), ContextKind::FreeText);
        assert_eq!(kind("SELECT total * |"), ContextKind::AfterOperator);
    }

    #[test]
    fn test_cql_uses_relational_rules() {
        assert_eq!(
            at("SELECT * FROM ks.|", DialectId::Cassandra).kind,
            ContextKind::AfterDotAlias {
                qualifier: "ks".into(),
                binding: None,
            }
        );
    }

    #[test]
    fn test_offset_is_clamped() {
        let ctx = classify("SELECT * FROM ", 100, profile_for(DialectId::Generic));
        assert_eq!(ctx.kind, ContextKind::AfterFromLikeClause);
    }
}
