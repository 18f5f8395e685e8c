// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Profiles
//!
//! A [`DialectProfile`] is the static description of one query language:
//! its vocabulary, how statements are separated, how strings, identifiers and
//! comments are quoted, and which keywords mark clause positions.
//!
//! Profiles carry no behavior of their own beyond lookups over their data.
//! Adding a dialect means adding one more profile built with
//! [`DialectProfileBuilder`]; the lexer, resolver, classifier and ranker
//! stay untouched.

use serde::Serialize;
use sqlsense_ir::{DialectId, LanguageFamily};

/// Whether a quote delimits a string literal or an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuoteKind {
    String,
    Identifier,
}

/// How a closing quote character can be embedded inside a quoted run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EscapeStyle {
    /// `'it''s'`
    Doubled,
    /// `'it\'s'`
    Backslash,
    /// Either form is accepted
    DoubledOrBackslash,
}

impl EscapeStyle {
    pub fn allows_doubling(self) -> bool {
        matches!(self, EscapeStyle::Doubled | EscapeStyle::DoubledOrBackslash)
    }

    pub fn allows_backslash(self) -> bool {
        matches!(self, EscapeStyle::Backslash | EscapeStyle::DoubledOrBackslash)
    }
}

/// One quoting rule, e.g. `'...'` strings or `[...]` identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteRule {
    pub open: char,
    pub close: char,
    pub kind: QuoteKind,
    pub escape: EscapeStyle,
}

impl QuoteRule {
    /// Symmetric string quote such as `'...'`
    pub const fn string(quote: char, escape: EscapeStyle) -> Self {
        Self {
            open: quote,
            close: quote,
            kind: QuoteKind::String,
            escape,
        }
    }

    /// Identifier quote such as `"..."`, `` `...` `` or `[...]`
    pub const fn identifier(open: char, close: char) -> Self {
        Self {
            open,
            close,
            kind: QuoteKind::Identifier,
            escape: EscapeStyle::Doubled,
        }
    }
}

/// Dialect-specific extended quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtendedQuote {
    /// `$tag$ ... $tag$` block strings. With `tagged == false` only the
    /// empty tag (`$$ ... $$`) is recognized.
    DollarTagged { tagged: bool },
}

/// Block comment delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockComment {
    pub open: &'static str,
    pub close: &'static str,
    /// PostgreSQL and SQL Server allow `/* /* */ */`
    pub nested: bool,
}

/// Keywords the classifier uses to locate the cursor's grammatical position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClauseMarkers {
    /// Keywords followed by a table name (FROM, JOIN, INTO, UPDATE, ...)
    pub table_position: Vec<&'static str>,
    /// Keywords opening a join condition (ON)
    pub join_condition: Vec<&'static str>,
    /// Keywords that start any other clause (WHERE, SET, GROUP, ...)
    pub clause: Vec<&'static str>,
    /// Keywords after which a table-position marker introduces a new name
    /// rather than an existing table (CREATE TABLE x)
    pub definition: Vec<&'static str>,
}

/// A statement-starting keyword or a command verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub verb: &'static str,
    pub summary: &'static str,
    /// The first argument names a key (key-value languages)
    pub key_arg: bool,
}

impl CommandSpec {
    pub const fn new(verb: &'static str, summary: &'static str) -> Self {
        Self {
            verb,
            summary,
            key_arg: false,
        }
    }

    pub const fn keyed(verb: &'static str, summary: &'static str) -> Self {
        Self {
            verb,
            summary,
            key_arg: true,
        }
    }
}

/// Builtin function available in a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

impl FunctionSpec {
    pub const fn new(
        name: &'static str,
        signature: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            signature,
            description,
        }
    }
}

/// Static template expanded on accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Word the partial input is matched against
    pub trigger: &'static str,
    pub body: &'static str,
    pub description: &'static str,
}

impl Snippet {
    pub const fn new(
        trigger: &'static str,
        body: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            trigger,
            body,
            description,
        }
    }
}

/// Immutable description of one query language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectProfile {
    pub id: DialectId,
    /// Display name
    pub name: &'static str,
    /// Ordered keyword vocabulary
    pub keywords: Vec<&'static str>,
    pub functions: Vec<FunctionSpec>,
    /// Statement-starting keywords (relational) or command verbs (command languages)
    pub top_level: Vec<CommandSpec>,
    /// Methods callable on a collection (`db.users.find`)
    pub methods: Vec<CommandSpec>,
    /// Query operators such as `$gt`
    pub operators: Vec<&'static str>,
    pub snippets: Vec<Snippet>,
    pub separators: Vec<char>,
    pub quotes: Vec<QuoteRule>,
    pub extended_quote: Option<ExtendedQuote>,
    pub line_comments: Vec<&'static str>,
    pub block_comment: Option<BlockComment>,
    pub clause_markers: ClauseMarkers,
    /// Delimiters used when an inserted identifier needs quoting
    pub identifier_quote: Option<(char, char)>,
}

impl DialectProfile {
    pub fn family(&self) -> LanguageFamily {
        self.id.family()
    }

    /// Statement separator check
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    /// Quote rule opened by `c`, if any
    pub fn quote_opened_by(&self, c: char) -> Option<&QuoteRule> {
        self.quotes.iter().find(|q| q.open == c)
    }

    /// Case-insensitive keyword lookup (vocabulary plus statement starters)
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
            || self
                .top_level
                .iter()
                .any(|c| c.verb.eq_ignore_ascii_case(word))
    }

    pub fn is_table_marker(&self, word: &str) -> bool {
        contains_ignore_case(&self.clause_markers.table_position, word)
    }

    pub fn is_join_condition_marker(&self, word: &str) -> bool {
        contains_ignore_case(&self.clause_markers.join_condition, word)
    }

    /// Any clause marker, table-position markers included
    pub fn is_clause_marker(&self, word: &str) -> bool {
        self.is_table_marker(word)
            || self.is_join_condition_marker(word)
            || contains_ignore_case(&self.clause_markers.clause, word)
    }

    pub fn is_definition_keyword(&self, word: &str) -> bool {
        contains_ignore_case(&self.clause_markers.definition, word)
    }

    /// Command verb lookup for command languages
    pub fn command(&self, verb: &str) -> Option<&CommandSpec> {
        self.top_level
            .iter()
            .find(|c| c.verb.eq_ignore_ascii_case(verb))
    }

    /// Quote an identifier for insertion when it would not lex as a bare word
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlsense_dialect::profile_for;
    /// use sqlsense_ir::DialectId;
    ///
    /// let pg = profile_for(DialectId::PostgreSQL);
    /// assert_eq!(pg.quote_identifier("orders"), "orders");
    /// assert_eq!(pg.quote_identifier("Order Items"), "\"Order Items\"");
    /// ```
    pub fn quote_identifier(&self, name: &str) -> String {
        if is_bare_identifier(name) && !self.is_keyword(name) {
            return name.to_string();
        }
        self.delimit_identifier(name)
    }

    /// Wrap `name` in the identifier quotes unconditionally
    ///
    /// Used for names the user already wrote quoted. Dialects without an
    /// identifier quote return the name unchanged.
    pub fn delimit_identifier(&self, name: &str) -> String {
        let Some((open, close)) = self.identifier_quote else {
            return name.to_string();
        };
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }
}

fn contains_ignore_case(list: &[&'static str], word: &str) -> bool {
    list.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// `[a-z_][a-z0-9_$]*`, lowercase only so mixed-case names keep their case
fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
}

/// Builder for [`DialectProfile`]
///
/// # Examples
///
/// ```
/// use sqlsense_dialect::{DialectProfileBuilder, EscapeStyle, QuoteRule};
/// use sqlsense_ir::DialectId;
///
/// let profile = DialectProfileBuilder::new(DialectId::Generic, "Tiny SQL")
///     .keywords(&["SELECT", "FROM"])
///     .separators(&[';'])
///     .quote(QuoteRule::string('\'', EscapeStyle::Doubled))
///     .line_comment("--")
///     .build();
/// assert!(profile.is_keyword("select"));
/// ```
#[derive(Debug, Clone)]
pub struct DialectProfileBuilder {
    profile: DialectProfile,
}

impl DialectProfileBuilder {
    /// Start an empty profile
    pub fn new(id: DialectId, name: &'static str) -> Self {
        Self {
            profile: DialectProfile {
                id,
                name,
                keywords: Vec::new(),
                functions: Vec::new(),
                top_level: Vec::new(),
                methods: Vec::new(),
                operators: Vec::new(),
                snippets: Vec::new(),
                separators: Vec::new(),
                quotes: Vec::new(),
                extended_quote: None,
                line_comments: Vec::new(),
                block_comment: None,
                clause_markers: ClauseMarkers::default(),
                identifier_quote: None,
            },
        }
    }

    /// Start from an existing profile under a new identity
    pub fn extend(base: DialectProfile, id: DialectId, name: &'static str) -> Self {
        Self {
            profile: DialectProfile { id, name, ..base },
        }
    }

    /// Append keywords, skipping ones already present
    pub fn keywords(mut self, keywords: &[&'static str]) -> Self {
        for kw in keywords {
            if !contains_ignore_case(&self.profile.keywords, kw) {
                self.profile.keywords.push(kw);
            }
        }
        self
    }

    /// Append functions, replacing same-named entries
    pub fn functions(mut self, functions: &[FunctionSpec]) -> Self {
        for f in functions {
            self.profile
                .functions
                .retain(|existing| !existing.name.eq_ignore_ascii_case(f.name));
            self.profile.functions.push(*f);
        }
        self
    }

    pub fn top_level(mut self, commands: &[CommandSpec]) -> Self {
        for c in commands {
            if self.profile.command(c.verb).is_none() {
                self.profile.top_level.push(*c);
            }
        }
        self
    }

    pub fn methods(mut self, methods: &[CommandSpec]) -> Self {
        self.profile.methods.extend_from_slice(methods);
        self
    }

    pub fn operators(mut self, operators: &[&'static str]) -> Self {
        self.profile.operators.extend_from_slice(operators);
        self
    }

    pub fn snippets(mut self, snippets: &[Snippet]) -> Self {
        self.profile.snippets.extend_from_slice(snippets);
        self
    }

    /// Replace the separator set
    pub fn separators(mut self, separators: &[char]) -> Self {
        self.profile.separators = separators.to_vec();
        self
    }

    /// Add a quote rule, replacing any rule with the same opening character
    pub fn quote(mut self, rule: QuoteRule) -> Self {
        self.profile.quotes.retain(|q| q.open != rule.open);
        self.profile.quotes.push(rule);
        self
    }

    /// Drop every quote rule (used before redefining a dialect's quoting)
    pub fn clear_quotes(mut self) -> Self {
        self.profile.quotes.clear();
        self
    }

    pub fn extended_quote(mut self, quote: Option<ExtendedQuote>) -> Self {
        self.profile.extended_quote = quote;
        self
    }

    pub fn line_comment(mut self, prefix: &'static str) -> Self {
        if !self.profile.line_comments.contains(&prefix) {
            self.profile.line_comments.push(prefix);
        }
        self
    }

    pub fn clear_line_comments(mut self) -> Self {
        self.profile.line_comments.clear();
        self
    }

    pub fn block_comment(mut self, comment: Option<BlockComment>) -> Self {
        self.profile.block_comment = comment;
        self
    }

    pub fn table_markers(mut self, markers: &[&'static str]) -> Self {
        self.profile
            .clause_markers
            .table_position
            .extend_from_slice(markers);
        self
    }

    pub fn join_markers(mut self, markers: &[&'static str]) -> Self {
        self.profile
            .clause_markers
            .join_condition
            .extend_from_slice(markers);
        self
    }

    pub fn clause_markers(mut self, markers: &[&'static str]) -> Self {
        self.profile.clause_markers.clause.extend_from_slice(markers);
        self
    }

    pub fn definition_keywords(mut self, keywords: &[&'static str]) -> Self {
        self.profile
            .clause_markers
            .definition
            .extend_from_slice(keywords);
        self
    }

    pub fn identifier_quote(mut self, quote: Option<(char, char)>) -> Self {
        self.profile.identifier_quote = quote;
        self
    }

    pub fn build(self) -> DialectProfile {
        self.profile
    }
}
