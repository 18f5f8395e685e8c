// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Candidate ranking
//!
//! Candidates carry a `boost` made of a tier base plus a match bonus. The
//! tiers, highest first:
//!
//! | Tier | Base |
//! |---|---|
//! | Snippet | 1000 |
//! | Foreign-key join condition | 600 |
//! | Structural (tables, columns, key patterns, methods, fields) | 500 |
//! | Top-level verb | 300 |
//! | Keyword or function | 100 |
//!
//! The match bonus is capped below the gap between two tiers, so a better
//! match only reorders candidates within their tier.

use sqlsense_ir::{Candidate, CandidateKind};
use std::cmp::Reverse;
use std::collections::HashMap;

pub const SNIPPET_TIER: i32 = 1000;
pub const FOREIGN_KEY_TIER: i32 = 600;
pub const STRUCTURAL_TIER: i32 = 500;
pub const TOP_LEVEL_TIER: i32 = 300;
pub const KEYWORD_TIER: i32 = 100;

/// Extra boost for a join condition whose both sides are in the statement
pub const BOTH_SIDES_BONUS: i32 = 50;
/// Extra boost for a table in the same schema as a referenced table
pub const SAME_SCHEMA_BONUS: i32 = 5;

/// How a label relates to the partial word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchQuality {
    /// Contains the partial word, but not at the start
    Substring,
    /// Starts with the partial word
    Prefix { len: usize },
    /// No partial word typed
    Any,
}

impl MatchQuality {
    /// Case-insensitive match of `label` against `partial`
    pub fn of(label: &str, partial: &str) -> Option<Self> {
        if partial.is_empty() {
            return Some(MatchQuality::Any);
        }
        let label = label.to_lowercase();
        let partial = partial.to_lowercase();
        if label.starts_with(&partial) {
            Some(MatchQuality::Prefix {
                len: partial.chars().count(),
            })
        } else if label.contains(&partial) {
            Some(MatchQuality::Substring)
        } else {
            None
        }
    }

    pub fn bonus(self) -> i32 {
        match self {
            MatchQuality::Any => 0,
            MatchQuality::Substring => 5,
            MatchQuality::Prefix { len } => 20 + 10 * len.min(7) as i32,
        }
    }
}

/// Deduplicate by `(label, kind)`, order and cap
///
/// On duplicates the higher boost survives. Ordering is by boost descending,
/// then case-insensitive label, then label.
pub fn finalize(candidates: Vec<Candidate>, max_candidates: usize) -> Vec<Candidate> {
    let mut best: HashMap<(String, CandidateKind), Candidate> = HashMap::new();
    for candidate in candidates {
        let key = (candidate.label.clone(), candidate.kind);
        match best.get(&key) {
            Some(existing) if existing.boost >= candidate.boost => {}
            _ => {
                best.insert(key, candidate);
            }
        }
    }

    let mut ranked: Vec<Candidate> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        Reverse(a.boost)
            .cmp(&Reverse(b.boost))
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.kind.cmp(&b.kind))
    });
    ranked.truncate(max_candidates);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_match_quality() {
        assert_eq!(MatchQuality::of("orders", ""), Some(MatchQuality::Any));
        assert_eq!(
            MatchQuality::of("Orders", "ORD"),
            Some(MatchQuality::Prefix { len: 3 })
        );
        assert_eq!(
            MatchQuality::of("customer_orders", "ord"),
            Some(MatchQuality::Substring)
        );
        assert_eq!(MatchQuality::of("customers", "ord"), None);
        assert!(
            MatchQuality::Prefix { len: 1 }.bonus() > MatchQuality::Substring.bonus()
        );
    }

    #[test]
    fn test_bonus_stays_inside_tier() {
        let longest = MatchQuality::Prefix { len: 500 }.bonus() + SAME_SCHEMA_BONUS;
        assert!(longest < FOREIGN_KEY_TIER - STRUCTURAL_TIER);
        assert!(longest < STRUCTURAL_TIER - TOP_LEVEL_TIER);
    }

    #[test]
    fn test_dedup_keeps_highest_boost() {
        let ranked = finalize(
            vec![
                Candidate::new("id", CandidateKind::Column).with_boost(10),
                Candidate::new("id", CandidateKind::Column).with_boost(30),
                Candidate::new("id", CandidateKind::Keyword).with_boost(5),
            ],
            10,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].boost, 30);
    }

    #[test]
    fn test_ties_break_by_case_insensitive_label() {
        let ranked = finalize(
            vec![
                Candidate::new("beta", CandidateKind::Table),
                Candidate::new("Alpha", CandidateKind::Table),
                Candidate::new("gamma", CandidateKind::Table).with_boost(1),
            ],
            10,
        );
        assert_eq!(labels(&ranked), vec!["gamma", "Alpha", "beta"]);
    }

    #[test]
    fn test_cap() {
        let candidates = (0..20)
            .map(|i| Candidate::new(format!("t{i:02}"), CandidateKind::Table))
            .collect();
        assert_eq!(finalize(candidates, 5).len(), 5);
    }
}
