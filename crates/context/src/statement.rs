// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement boundary resolution
//!
//! Splits a buffer into statements at the profile's separators and picks the
//! statement a cursor or selection refers to.
//!
//! Each raw segment runs up to and including its separator, so a cursor
//! sitting on a `;` belongs to the statement that `;` closes. Returned spans
//! are trimmed of surrounding whitespace and never include the separator.

use crate::lexer::{Token, TokenKind, tokenize};
use sqlsense_dialect::DialectProfile;
use sqlsense_ir::{CursorTarget, StatementSpan};
use tracing::debug;

/// Raw `[start, end)` segment of the buffer, separator included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    start: usize,
    end: usize,
    /// Whether any non-separator token falls inside the segment
    has_content: bool,
}

/// Resolve the statement targeted by a cursor or selection
///
/// A non-empty selection is returned verbatim. For a caret, the containing
/// statement is returned trimmed; if that statement is blank (whitespace or
/// comments only) the nearest preceding statement is used instead.
///
/// # Examples
///
/// ```
/// use sqlsense_context::resolve_statement;
/// use sqlsense_dialect::profile_for;
/// use sqlsense_ir::{CursorTarget, DialectId};
///
/// let profile = profile_for(DialectId::Generic);
/// let span = resolve_statement("SELECT 1; SELECT 2;", CursorTarget::Offset(15), profile);
/// assert_eq!(span.text, "SELECT 2");
/// ```
pub fn resolve_statement(
    buffer: &str,
    target: CursorTarget,
    profile: &DialectProfile,
) -> StatementSpan {
    if let Some((start, end)) = target.selection() {
        let start = clamp_to_boundary(buffer, start);
        let end = clamp_to_boundary(buffer, end);
        return StatementSpan::from_buffer(buffer, start, end);
    }

    let offset = clamp_to_boundary(buffer, target.offset());
    if buffer.is_empty() {
        return StatementSpan::empty_at(0);
    }

    let segments = segments(buffer, profile);
    let Some(index) = segments
        .iter()
        .position(|s| s.start <= offset && offset < s.end)
        .or_else(|| segments.len().checked_sub(1))
    else {
        return StatementSpan::empty_at(offset);
    };

    let chosen = segments[..=index]
        .iter()
        .rev()
        .find(|s| s.has_content)
        .copied();

    match chosen {
        Some(segment) => {
            let span = trimmed_span(buffer, segment, profile);
            debug!(
                offset,
                start = span.start,
                end = span.end,
                "resolved statement"
            );
            span
        }
        None => StatementSpan::empty_at(offset),
    }
}

/// Every non-blank statement in the buffer, in order
///
/// # Examples
///
/// ```
/// use sqlsense_context::split_statements;
/// use sqlsense_dialect::profile_for;
/// use sqlsense_ir::DialectId;
///
/// let spans = split_statements("SELECT 1;\n\nSELECT ';';", profile_for(DialectId::Generic));
/// let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(texts, vec!["SELECT 1", "SELECT ';'"]);
/// ```
pub fn split_statements(buffer: &str, profile: &DialectProfile) -> Vec<StatementSpan> {
    segments(buffer, profile)
        .into_iter()
        .filter(|s| s.has_content)
        .map(|s| trimmed_span(buffer, s, profile))
        .collect()
}

/// The raw statement containing `offset`, for completion
///
/// Unlike [`resolve_statement`] the span is not trimmed and there is no
/// fallback: a cursor after the last separator lands in an empty statement,
/// which is where a new statement is being started. The separator itself is
/// excluded, so `offset - span.start <= span.text.len()` always holds.
pub fn statement_at(buffer: &str, offset: usize, profile: &DialectProfile) -> StatementSpan {
    let offset = clamp_to_boundary(buffer, offset);
    let segments = segments(buffer, profile);
    let Some(segment) = segments
        .iter()
        .find(|s| s.start <= offset && offset < s.end)
        .or(segments.last())
        .copied()
    else {
        return StatementSpan::empty_at(offset);
    };

    let mut end = segment.end;
    if end > offset
        && let Some(last) = buffer[segment.start..end].chars().next_back()
        && profile.is_separator(last)
    {
        end -= last.len_utf8();
    }
    StatementSpan::from_buffer(buffer, segment.start, end.max(offset))
}

fn segments(buffer: &str, profile: &DialectProfile) -> Vec<Segment> {
    let lexed = tokenize(buffer, profile);
    let mut segments = Vec::new();
    let mut start = 0;
    let mut has_content = false;

    for Token { kind, end, .. } in &lexed.tokens {
        if *kind == TokenKind::Separator {
            segments.push(Segment {
                start,
                end: *end,
                has_content,
            });
            start = *end;
            has_content = false;
        } else {
            has_content = true;
        }
    }

    // Trailing segment; empty when the buffer ends with a separator so a
    // cursor at end of buffer still has a segment to land in.
    segments.push(Segment {
        start,
        end: buffer.len(),
        has_content,
    });
    segments
}

fn trimmed_span(buffer: &str, segment: Segment, profile: &DialectProfile) -> StatementSpan {
    let mut end = segment.end;
    if let Some(last) = buffer[segment.start..end].chars().next_back()
        && profile.is_separator(last)
    {
        end -= last.len_utf8();
    }
    let raw = &buffer[segment.start..end];
    let leading = raw.len() - raw.trim_start().len();
    let trailing = raw.len() - raw.trim_end().len();
    StatementSpan::from_buffer(buffer, segment.start + leading, end - trailing)
}

/// Clamp an offset into the buffer and move it back onto a char boundary
pub fn clamp_to_boundary(buffer: &str, offset: usize) -> usize {
    let mut offset = offset.min(buffer.len());
    while !buffer.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlsense_dialect::profile_for;
    use sqlsense_ir::DialectId;

    fn resolve(buffer: &str, offset: usize) -> String {
        resolve_statement(
            buffer,
            CursorTarget::Offset(offset),
            profile_for(DialectId::Generic),
        )
        .text
    }

    #[test]
    fn test_single_statement_any_cursor() {
        let buffer = "  SELECT *\n  FROM users  ";
        for offset in 0..=buffer.len() {
            assert_eq!(resolve(buffer, offset), "SELECT *\n  FROM users");
        }
    }

    #[test]
    fn test_picks_statement_by_cursor() {
        let buffer = "SELECT 1; SELECT 2;";
        assert_eq!(resolve(buffer, 5), "SELECT 1");
        assert_eq!(resolve(buffer, 15), "SELECT 2");
    }

    #[test]
    fn test_separator_belongs_to_preceding_statement() {
        let buffer = "SELECT 1; SELECT 2";
        assert_eq!(resolve(buffer, 8), "SELECT 1");
        assert_eq!(resolve(buffer, 9), "SELECT 2");
    }

    #[test]
    fn test_separator_inside_string_does_not_split() {
        let buffer = "SELECT ';' FROM t; SELECT 2";
        assert_eq!(resolve(buffer, 5), "SELECT ';' FROM t");
        assert_eq!(resolve(buffer, 8), "SELECT ';' FROM t");
        assert_eq!(resolve(buffer, 22), "SELECT 2");
    }

    #[test]
    fn test_cursor_after_final_separator_uses_last_statement() {
        let buffer = "SELECT 1;\nSELECT 2;\n";
        assert_eq!(resolve(buffer, buffer.len()), "SELECT 2");
    }

    #[test]
    fn test_comment_only_tail_is_blank() {
        let buffer = "SELECT 1; -- done";
        assert_eq!(resolve(buffer, buffer.len()), "SELECT 1");
    }

    #[test]
    fn test_empty_and_blank_buffers() {
        assert_eq!(resolve("", 0), "");
        assert_eq!(resolve("   ", 2), "");
        assert_eq!(resolve(";;", 1), "");
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        assert_eq!(resolve("SELECT 1", 500), "SELECT 1");
    }

    #[test]
    fn test_offset_inside_multibyte_char() {
        let buffer = "SELECT 'é'; SELECT 2";
        // Byte 9 is in the middle of 'é'.
        assert_eq!(resolve(buffer, 9), "SELECT 'é'");
    }

    #[test]
    fn test_unterminated_quote_extends_to_end() {
        let buffer = "SELECT 'abc; SELECT 2";
        assert_eq!(resolve(buffer, 20), "SELECT 'abc; SELECT 2");
    }

    #[test]
    fn test_selection_wins_verbatim() {
        let buffer = "SELECT 1; SELECT 2";
        let span = resolve_statement(
            buffer,
            CursorTarget::Selection { start: 7, end: 17 },
            profile_for(DialectId::Generic),
        );
        assert_eq!(span.text, "1; SELECT ");
        assert_eq!((span.start, span.end), (7, 17));
    }

    #[test]
    fn test_span_offsets_point_into_buffer() {
        let buffer = "SELECT 1;\n  SELECT 2  ;";
        let span = resolve_statement(buffer, 14.into(), profile_for(DialectId::Generic));
        assert_eq!(&buffer[span.start..span.end], span.text);
        assert_eq!(span.text, "SELECT 2");
    }

    #[test]
    fn test_redis_lines_are_statements() {
        let buffer = "SET a 1\nGET a\n";
        let span = resolve_statement(buffer, 10.into(), profile_for(DialectId::Redis));
        assert_eq!(span.text, "GET a");
    }

    #[test]
    fn test_statement_at_keeps_cursor_inside_span() {
        let profile = profile_for(DialectId::Generic);
        let buffer = "SELECT 1;  SELECT * FROM ";
        let span = statement_at(buffer, buffer.len(), profile);
        assert_eq!(span.text, "  SELECT * FROM ");
        assert_eq!(span.start, 9);

        let on_separator = statement_at(buffer, 8, profile);
        assert_eq!(on_separator.text, "SELECT 1");
        assert_eq!(8 - on_separator.start, on_separator.text.len());
    }

    #[test]
    fn test_statement_at_after_final_separator_is_empty() {
        let span = statement_at("SELECT 1;", 9, profile_for(DialectId::Generic));
        assert_eq!(span.text, "");
        assert_eq!(span.start, 9);
    }

    #[test]
    fn test_split_statements_skips_blank_segments() {
        let spans = split_statements(
            "SELECT 1;;\n-- note\n;SELECT 2",
            profile_for(DialectId::Generic),
        );
        let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["SELECT 1", "SELECT 2"]);
    }
}
