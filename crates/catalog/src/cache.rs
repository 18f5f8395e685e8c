// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema metadata cache
//!
//! Holds the most recently completed [`SchemaSnapshot`] for the active
//! connection together with its derived foreign-key graph.
//!
//! ## Concurrency
//!
//! The current state is an `Arc<CatalogState>` behind a `parking_lot`
//! read-write lock. The lock is held only long enough to clone or swap the
//! pointer, so:
//!
//! - readers get an immutable state and never see a half-updated snapshot
//! - readers never wait on a fetch (fetching happens outside the lock)
//! - a refresh replaces the whole state, never individual fields
//!
//! Every refresh reserves a generation number before fetching. When the
//! fetch completes, its result is installed only if no newer generation has
//! been installed meanwhile, so a slow fetch cannot overwrite a fresher one.

use crate::error::CatalogResult;
use crate::foreign_keys::build_foreign_keys;
use crate::r#trait::MetadataSource;
use parking_lot::RwLock;
use sqlsense_ir::{ForeignKeyRelation, SchemaSnapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// Immutable snapshot plus derived data, swapped as a whole
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Connection the snapshot was fetched for, `None` before the first install
    pub connection_key: Option<String>,
    /// Generation that produced this state (0 for the initial empty state)
    pub generation: u64,
    pub snapshot: SchemaSnapshot,
    pub foreign_keys: Vec<ForeignKeyRelation>,
}

impl CatalogState {
    /// Build a state, deriving the foreign-key graph from the snapshot
    pub fn new(connection_key: impl Into<String>, generation: u64, snapshot: SchemaSnapshot) -> Self {
        let foreign_keys = build_foreign_keys(&snapshot);
        Self {
            connection_key: Some(connection_key.into()),
            generation,
            snapshot,
            foreign_keys,
        }
    }
}

/// Generation reserved by a refresh before it starts fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What happened to a completed refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched snapshot is now current
    Installed { generation: u64 },
    /// A newer snapshot was installed while this one was in flight
    Superseded,
    /// The fetch failed; the previous state is still current
    Failed,
}

/// Last-known-good schema metadata for one editor
#[derive(Debug)]
pub struct SchemaCache {
    current: RwLock<Arc<CatalogState>>,
    next_generation: AtomicU64,
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCache {
    /// Create a cache holding an empty snapshot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogState::default())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// The current state; cheap, never blocks on a fetch
    pub fn current(&self) -> Arc<CatalogState> {
        self.current.read().clone()
    }

    /// Reserve the next generation for a refresh about to start
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.next_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install a fetch result obtained under `ticket`
    ///
    /// Errors leave the previous state in place.
    pub fn complete_refresh(
        &self,
        ticket: RefreshTicket,
        connection_key: &str,
        result: CatalogResult<SchemaSnapshot>,
    ) -> RefreshOutcome {
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    connection = connection_key,
                    generation = ticket.0,
                    error = %err,
                    "metadata fetch failed, keeping previous snapshot"
                );
                return RefreshOutcome::Failed;
            }
        };

        // Derive outside the lock; only the pointer swap happens under it.
        let state = Arc::new(CatalogState::new(connection_key, ticket.0, snapshot));

        let mut current = self.current.write();
        if current.generation > ticket.0 {
            debug!(
                generation = ticket.0,
                current = current.generation,
                "discarding superseded snapshot"
            );
            return RefreshOutcome::Superseded;
        }
        info!(
            connection = connection_key,
            generation = ticket.0,
            tables = state.snapshot.tables.len(),
            foreign_keys = state.foreign_keys.len(),
            "installed schema snapshot"
        );
        *current = state;
        RefreshOutcome::Installed {
            generation: ticket.0,
        }
    }

    /// Install a snapshot supplied directly by the host
    pub fn install(&self, connection_key: &str, snapshot: SchemaSnapshot) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        self.complete_refresh(ticket, connection_key, Ok(snapshot))
    }

    /// Fetch from `source` and install the result unless superseded
    #[instrument(skip(self, source))]
    pub async fn refresh(
        &self,
        source: &dyn MetadataSource,
        connection_key: &str,
    ) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = source.fetch_autocomplete_data(connection_key).await;
        self.complete_refresh(ticket, connection_key, result)
    }

    /// Drop the current snapshot, e.g. when the connection closes
    pub fn clear(&self) {
        let ticket = self.begin_refresh();
        *self.current.write() = Arc::new(CatalogState {
            generation: ticket.0,
            ..CatalogState::default()
        });
    }
}
