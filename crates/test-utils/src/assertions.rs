// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion-specific test helpers and custom assertions

use sqlsense_ir::{Candidate, CandidateKind};

/// Custom assertion helpers for candidate lists
pub struct CandidateAssertions;

impl CandidateAssertions {
    /// Labels in ranked order
    pub fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    /// Find the candidate with this label and kind
    pub fn find<'a>(
        candidates: &'a [Candidate],
        label: &str,
        kind: CandidateKind,
    ) -> Option<&'a Candidate> {
        candidates.iter().find(|c| c.label == label && c.kind == kind)
    }

    /// Assert that a candidate with this label is present
    pub fn assert_contains(candidates: &[Candidate], label: &str) {
        assert!(
            candidates.iter().any(|c| c.label == label),
            "Expected candidate '{}', found {:?}",
            label,
            Self::labels(candidates)
        );
    }

    /// Assert that no candidate has this label
    pub fn assert_lacks(candidates: &[Candidate], label: &str) {
        assert!(
            !candidates.iter().any(|c| c.label == label),
            "Did not expect candidate '{}' in {:?}",
            label,
            Self::labels(candidates)
        );
    }

    /// Assert that every candidate has the given kind
    pub fn assert_all_kind(candidates: &[Candidate], kind: CandidateKind) {
        for candidate in candidates {
            assert_eq!(
                candidate.kind, kind,
                "Candidate '{}' has kind {:?}, expected {:?}",
                candidate.label, candidate.kind, kind
            );
        }
    }

    /// Assert that `first` is ranked above `second`
    pub fn assert_ranked_before(candidates: &[Candidate], first: &str, second: &str) {
        let position = |label: &str| {
            candidates
                .iter()
                .position(|c| c.label == label)
                .unwrap_or_else(|| {
                    panic!(
                        "Candidate '{}' not found in {:?}",
                        label,
                        Self::labels(candidates)
                    )
                })
        };
        let (a, b) = (position(first), position(second));
        assert!(
            a < b,
            "Expected '{}' (#{}) before '{}' (#{})",
            first,
            a,
            second,
            b
        );
    }

    /// Assert that no two candidates share label and kind
    pub fn assert_unique(candidates: &[Candidate]) {
        let mut seen = std::collections::HashSet::new();
        for candidate in candidates {
            assert!(
                seen.insert(candidate.identity()),
                "Duplicate candidate '{}' ({:?})",
                candidate.label,
                candidate.kind
            );
        }
    }
}
