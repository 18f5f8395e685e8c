// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Request sequencing
//!
//! Keystrokes arrive faster than slow completions finish. Every request takes
//! a ticket before it starts; when it finishes, its result is only delivered
//! if no newer request has taken a ticket in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Ticket handed out by [`RequestSequencer::next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Last-wins sequencing of completion requests
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; supersedes every earlier ticket
    pub fn next(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Deliver `result` if `ticket` is still the latest request
    pub fn complete<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(result)
        } else {
            debug!(ticket = ticket.0, "dropping stale completion result");
            None
        }
    }
}
