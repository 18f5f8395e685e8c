// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion candidates
//!
//! A [`Candidate`] is a pure value: it has no identity beyond its
//! `(label, kind)` pair, which is what deduplication keys on.

use serde::{Deserialize, Serialize};

/// Candidate classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Keyword,
    Table,
    Column,
    Function,
    Snippet,
}

impl CandidateKind {
    /// Editor icon / type tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Keyword => "keyword",
            CandidateKind::Table => "table",
            CandidateKind::Column => "column",
            CandidateKind::Function => "function",
            CandidateKind::Snippet => "snippet",
        }
    }
}

/// One suggested completion item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Text shown in the list and matched against the partial word
    pub label: String,
    pub kind: CandidateKind,
    /// Secondary text (type, schema, description)
    pub detail: Option<String>,
    /// Text inserted on accept
    pub insert_text: String,
    /// Ranking score, higher sorts first
    pub boost: i32,
}

impl Candidate {
    /// Create a candidate whose insertion text equals its label
    pub fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            boost: 0,
        }
    }

    /// Builder method: set detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builder method: set insertion text
    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    /// Builder method: set boost
    pub fn with_boost(mut self, boost: i32) -> Self {
        self.boost = boost;
        self
    }

    /// Deduplication key
    pub fn identity(&self) -> (&str, CandidateKind) {
        (&self.label, self.kind)
    }
}
