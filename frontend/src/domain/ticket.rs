//! Navigation tickets used to discard stale asynchronous results.
//!
//! Every navigation issues a new ticket. Work started under an older ticket
//! may still finish, but its result must not be applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of navigation generations, shared by the shell and its pages.
#[derive(Debug, Clone, Default)]
pub struct NavigationGeneration {
    counter: Arc<AtomicU64>,
}

impl NavigationGeneration {
    /// Start at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the generation and return a ticket for it. Every ticket
    /// issued earlier becomes stale.
    pub fn issue(&self) -> NavigationTicket {
        let generation = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        NavigationTicket {
            generation,
            counter: Arc::clone(&self.counter),
        }
    }

    /// Ticket for the current generation without advancing it.
    pub fn current(&self) -> NavigationTicket {
        NavigationTicket {
            generation: self.counter.load(Ordering::Acquire),
            counter: Arc::clone(&self.counter),
        }
    }
}

/// Capture of the navigation generation at the time work was issued.
#[derive(Debug, Clone)]
pub struct NavigationTicket {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl NavigationTicket {
    /// Generation this ticket was issued for.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no navigation has happened since the ticket was issued.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }
}
