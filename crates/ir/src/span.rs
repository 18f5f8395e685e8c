// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement spans and cursor targets

use serde::{Deserialize, Serialize};

/// What the editor is pointing at when a statement is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorTarget {
    /// A caret at a byte offset
    Offset(usize),
    /// A selection as a byte range; `start == end` behaves like a caret
    Selection { start: usize, end: usize },
}

impl CursorTarget {
    /// The non-empty selection range, normalized so `start < end`
    pub fn selection(&self) -> Option<(usize, usize)> {
        match *self {
            CursorTarget::Selection { start, end } if start != end => {
                Some((start.min(end), start.max(end)))
            }
            _ => None,
        }
    }

    /// The caret offset used for scanning
    pub fn offset(&self) -> usize {
        match *self {
            CursorTarget::Offset(offset) => offset,
            CursorTarget::Selection { start, end } => start.max(end),
        }
    }
}

impl From<usize> for CursorTarget {
    fn from(offset: usize) -> Self {
        CursorTarget::Offset(offset)
    }
}

/// A half-open byte range `[start, end)` of the buffer holding one statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatementSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl StatementSpan {
    /// Create a span from a buffer and a byte range
    ///
    /// The range must lie on char boundaries of `buffer`.
    pub fn from_buffer(buffer: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: buffer[start..end].to_string(),
        }
    }

    /// Empty span positioned at `offset`
    pub fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `offset` falls inside the half-open range
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}
