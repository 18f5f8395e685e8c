// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for SQLSense
//!
//! This crate provides common testing components including:
//! - Mock metadata sources and snapshot builders
//! - Cursor marker helpers for completion tests
//! - Candidate assertions
//! - Test fixtures and sample buffers

pub mod assertions;
pub mod cursor;
pub mod fixtures;
pub mod mock_source;

// Re-exports for convenience
pub use assertions::CandidateAssertions;
pub use cursor::{get_cursor_position, remove_cursor_marker, split_cursor};
pub use fixtures::{BufferFixtures, SchemaFixtures};
pub use mock_source::{MockMetadataSource, MockSnapshotBuilder};
