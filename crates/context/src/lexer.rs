// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Profile-driven lexer
//!
//! A single left-to-right scan shared by the statement resolver and the
//! context classifier. The scanner is a small state machine over
//!
//! - `Normal`
//! - inside a quote rule (strings, quoted identifiers)
//! - inside an extended quote (`$tag$ ... $tag$`)
//! - inside a line comment
//! - inside a (possibly nested) block comment
//!
//! All of the delimiters come from the active [`DialectProfile`]. The lexer
//! never fails: an unterminated quote or comment simply runs to the end of
//! the input, and the scan reports where it stopped through [`ScanEnd`].
//!
//! Comments produce no tokens. Statement separators produce
//! [`TokenKind::Separator`] tokens only when seen in the normal state.

use sqlsense_dialect::{DialectProfile, ExtendedQuote, LanguageFamily, QuoteKind, QuoteRule};

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word: keyword, identifier, command verb, key
    Word,
    /// Quoted identifier; `text` holds the unquoted name
    QuotedIdent,
    /// String literal or extended-quote block; `text` holds the raw content
    /// after the opening delimiter
    StringLit,
    Number,
    Dot,
    Comma,
    OpenParen,
    CloseParen,
    /// Run of operator characters such as `=`, `<>`, `::`
    Operator,
    Separator,
    /// Anything else (`{`, `}`, `[`, ...)
    Punct,
}

/// A lexed token with its byte range in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// False for a quote that ran to end of input
    pub terminated: bool,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            text: text.into(),
            terminated: true,
        }
    }

    /// Words and quoted identifiers
    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::QuotedIdent)
    }

    /// Case-insensitive comparison against a bare word
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }
}

/// Where the scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    Normal,
    InString,
    InIdentifier,
    InComment,
}

/// Result of lexing one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub end: ScanEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LexState {
    Normal,
    InQuote(QuoteRule),
    InExtendedQuote { delimiter: String },
    InLineComment,
    InBlockComment { depth: usize },
}

/// Tokenize `text` with the quoting and comment rules of `profile`
///
/// # Examples
///
/// ```
/// use sqlsense_context::lexer::{TokenKind, tokenize};
/// use sqlsense_dialect::profile_for;
/// use sqlsense_ir::DialectId;
///
/// let lexed = tokenize("SELECT ';' FROM t;", profile_for(DialectId::Generic));
/// let separators = lexed
///     .tokens
///     .iter()
///     .filter(|t| t.kind == TokenKind::Separator)
///     .count();
/// assert_eq!(separators, 1);
/// ```
pub fn tokenize(text: &str, profile: &DialectProfile) -> Lexed {
    Lexer::new(text, profile).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    profile: &'a DialectProfile,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str, profile: &'a DialectProfile) -> Self {
        Self {
            src,
            pos: 0,
            profile,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn run(mut self) -> Lexed {
        let mut state = LexState::Normal;
        while self.pos < self.src.len() {
            state = match state {
                LexState::Normal => self.normal(),
                LexState::InQuote(rule) => self.quoted(rule),
                LexState::InExtendedQuote { delimiter } => self.extended(&delimiter),
                LexState::InLineComment => self.line_comment(),
                LexState::InBlockComment { depth } => self.block_comment(depth),
            };
        }
        let end = match state {
            LexState::Normal => ScanEnd::Normal,
            LexState::InQuote(rule) if rule.kind == QuoteKind::Identifier => {
                ScanEnd::InIdentifier
            }
            LexState::InQuote(_) | LexState::InExtendedQuote { .. } => ScanEnd::InString,
            LexState::InLineComment | LexState::InBlockComment { .. } => ScanEnd::InComment,
        };
        Lexed {
            tokens: self.tokens,
            end,
        }
    }

    fn normal(&mut self) -> LexState {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return LexState::Normal;
        };

        if self.profile.is_separator(c) {
            self.bump();
            self.tokens
                .push(Token::new(TokenKind::Separator, start, self.pos, c.to_string()));
            return LexState::Normal;
        }
        if c.is_whitespace() {
            self.bump();
            return LexState::Normal;
        }
        if self
            .profile
            .line_comments
            .iter()
            .any(|prefix| self.rest().starts_with(prefix))
        {
            return LexState::InLineComment;
        }
        if let Some(block) = self.profile.block_comment
            && self.rest().starts_with(block.open)
        {
            self.pos += block.open.len();
            return LexState::InBlockComment { depth: 1 };
        }
        if let Some(delimiter) = self.dollar_delimiter() {
            self.pos += delimiter.len();
            self.tokens.push(Token {
                terminated: false,
                ..Token::new(TokenKind::StringLit, start, self.pos, "")
            });
            return LexState::InExtendedQuote { delimiter };
        }
        if let Some(rule) = self.profile.quote_opened_by(c).copied() {
            self.bump();
            let kind = match rule.kind {
                QuoteKind::String => TokenKind::StringLit,
                QuoteKind::Identifier => TokenKind::QuotedIdent,
            };
            self.tokens.push(Token {
                terminated: false,
                ..Token::new(kind, start, self.pos, "")
            });
            return LexState::InQuote(rule);
        }

        let family = self.profile.family();
        if is_word_start(c, family) {
            while self.peek().is_some_and(|c| is_word_char(c, family)) {
                self.bump();
            }
            self.push(TokenKind::Word, start);
        } else if c.is_ascii_digit() {
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
            {
                self.bump();
            }
            self.push(TokenKind::Number, start);
        } else if is_operator_char(c) {
            while self.peek().is_some_and(is_operator_char) && !self.at_comment_start() {
                self.bump();
            }
            self.push(TokenKind::Operator, start);
        } else {
            self.bump();
            let kind = match c {
                '.' => TokenKind::Dot,
                ',' => TokenKind::Comma,
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                _ => TokenKind::Punct,
            };
            self.push(kind, start);
        }
        LexState::Normal
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = &self.src[start..self.pos];
        self.tokens.push(Token::new(kind, start, self.pos, text));
    }

    fn at_comment_start(&self) -> bool {
        let rest = self.rest();
        self.profile
            .line_comments
            .iter()
            .any(|prefix| rest.starts_with(prefix))
            || self
                .profile
                .block_comment
                .is_some_and(|b| rest.starts_with(b.open))
    }

    /// `$tag$` opening at the current position, if the profile allows it
    fn dollar_delimiter(&self) -> Option<String> {
        let Some(ExtendedQuote::DollarTagged { tagged }) = self.profile.extended_quote else {
            return None;
        };
        let rest = self.rest();
        let after = rest.strip_prefix('$')?;
        let tag_len = after
            .char_indices()
            .take_while(|&(i, c)| {
                if i == 0 {
                    c.is_alphabetic() || c == '_'
                } else {
                    c.is_alphanumeric() || c == '_'
                }
            })
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .unwrap_or(0);
        if tag_len > 0 && !tagged {
            return None;
        }
        after[tag_len..]
            .starts_with('$')
            .then(|| rest[..tag_len + 2].to_string())
    }

    fn quoted(&mut self, rule: QuoteRule) -> LexState {
        let mut content = String::new();
        while let Some(c) = self.bump() {
            if c == '\\' && rule.escape.allows_backslash() {
                if let Some(escaped) = self.bump() {
                    content.push(escaped);
                }
                continue;
            }
            if c == rule.close {
                if rule.escape.allows_doubling() && self.peek() == Some(rule.close) {
                    self.bump();
                    content.push(c);
                    continue;
                }
                self.finish_open_token(content, true);
                return LexState::Normal;
            }
            content.push(c);
        }
        self.finish_open_token(content, false);
        LexState::InQuote(rule)
    }

    fn extended(&mut self, delimiter: &str) -> LexState {
        match self.rest().find(delimiter) {
            Some(idx) => {
                let content = self.rest()[..idx].to_string();
                self.pos += idx + delimiter.len();
                self.finish_open_token(content, true);
                LexState::Normal
            }
            None => {
                let content = self.rest().to_string();
                self.pos = self.src.len();
                self.finish_open_token(content, false);
                LexState::InExtendedQuote {
                    delimiter: delimiter.to_string(),
                }
            }
        }
    }

    /// Close the quote token pushed when the quote was opened
    fn finish_open_token(&mut self, content: String, terminated: bool) {
        if let Some(token) = self.tokens.last_mut() {
            token.end = self.pos;
            token.text = content;
            token.terminated = terminated;
        }
    }

    fn line_comment(&mut self) -> LexState {
        match self.rest().find('\n') {
            Some(idx) => {
                // The newline itself is scanned in the normal state so that
                // newline-separated languages still see the separator.
                self.pos += idx;
                LexState::Normal
            }
            None => {
                self.pos = self.src.len();
                LexState::InLineComment
            }
        }
    }

    fn block_comment(&mut self, mut depth: usize) -> LexState {
        let Some(block) = self.profile.block_comment else {
            return LexState::Normal;
        };
        while self.pos < self.src.len() {
            let rest = self.rest();
            if rest.starts_with(block.close) {
                self.pos += block.close.len();
                depth -= 1;
                if depth == 0 {
                    return LexState::Normal;
                }
            } else if block.nested && rest.starts_with(block.open) {
                self.pos += block.open.len();
                depth += 1;
            } else {
                self.bump();
            }
        }
        LexState::InBlockComment { depth }
    }
}

fn is_word_start(c: char, family: LanguageFamily) -> bool {
    match family {
        LanguageFamily::KeyValue => is_key_char(c),
        _ => c.is_alphabetic() || c == '_' || c == '$' || c == '@' || c == '#',
    }
}

fn is_word_char(c: char, family: LanguageFamily) -> bool {
    match family {
        LanguageFamily::KeyValue => is_key_char(c),
        _ => c.is_alphanumeric() || c == '_' || c == '$' || c == '@' || c == '#',
    }
}

/// Redis keys are anything up to whitespace or a quote
fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && c != '"' && c != '\''
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '=' | '<' | '>' | '!' | '+' | '-' | '*' | '/' | '%' | '|' | '&' | '^' | '~' | ':'
    )
}
