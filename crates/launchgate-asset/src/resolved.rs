//! Bounded history of resolved cross-domain nonces.
//!
//! Once a pending transfer is finalized or compensated its entry leaves the
//! pending table. A repeated acknowledgment for that nonce is then a no-op;
//! this history only lets the asset tell a duplicate apart from a nonce it
//! never issued, and report the outcome that was applied.
//!
//! Entries are evicted oldest-first once `max_size` is reached.

use std::collections::{HashMap, VecDeque};

use launchgate_types::{Nonce, OutboundState};

pub struct ResolvedNonces {
    outcomes: HashMap<Nonce, OutboundState>,
    /// Insertion order (front = oldest).
    order: VecDeque<Nonce>,
    max_size: usize,
}

impl ResolvedNonces {
    /// # Panics
    /// Panics if `max_size` is zero.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "ResolvedNonces max_size must be > 0");
        Self {
            outcomes: HashMap::with_capacity(max_size),
            order: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Remember the terminal outcome of `nonce`. Re-recording a nonce keeps
    /// its first outcome.
    pub fn record(&mut self, nonce: Nonce, outcome: OutboundState) {
        if self.outcomes.contains_key(&nonce) {
            return;
        }
        if self.outcomes.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.outcomes.remove(&oldest);
            }
        }
        self.outcomes.insert(nonce, outcome);
        self.order.push_back(nonce);
    }

    #[must_use]
    pub fn outcome(&self, nonce: Nonce) -> Option<OutboundState> {
        self.outcomes.get(&nonce).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl std::fmt::Debug for ResolvedNonces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedNonces")
            .field("len", &self.outcomes.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}
