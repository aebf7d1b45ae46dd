//! Append-only index of every address that has ever been credited.
//!
//! An address is recorded the first time it receives a transfer or a mint,
//! or when it creates the asset. Entries are never removed, so an address
//! with a zero balance remains a holder.

use std::collections::HashSet;

use launchgate_types::Address;

#[derive(Debug, Default)]
pub struct HolderIndex {
    /// Append order.
    order: Vec<Address>,
    /// Membership for O(1) duplicate checks.
    members: HashSet<Address>,
}

impl HolderIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `holder` unless already present. Returns `true` if it was new.
    pub fn record(&mut self, holder: Address) -> bool {
        if !self.members.insert(holder) {
            return false;
        }
        self.order.push(holder);
        true
    }

    #[must_use]
    pub fn contains(&self, holder: &Address) -> bool {
        self.members.contains(holder)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Up to `limit` holders starting at `offset`, in append order. Empty if
    /// `offset` is past the end.
    #[must_use]
    pub fn page(&self, offset: usize, limit: usize) -> &[Address] {
        if offset >= self.order.len() {
            return &[];
        }
        let end = offset.saturating_add(limit).min(self.order.len());
        &self.order[offset..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: u8) -> HolderIndex {
        let mut index = HolderIndex::new();
        for byte in 1..=n {
            index.record(Address([byte; 20]));
        }
        index
    }

    #[test]
    fn record_is_idempotent() {
        let mut index = HolderIndex::new();
        assert!(index.record(Address([1; 20])));
        assert!(!index.record(Address([1; 20])));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn page_returns_prefix_in_order() {
        let index = filled(5);
        assert_eq!(index.page(0, 2), &[Address([1; 20]), Address([2; 20])]);
    }

    #[test]
    fn page_clamps_to_length() {
        let index = filled(5);
        assert_eq!(index.page(3, 10).len(), 2);
        assert_eq!(index.page(0, usize::MAX).len(), 5);
    }

    #[test]
    fn page_past_end_is_empty() {
        let index = filled(5);
        assert!(index.page(5, 2).is_empty());
        assert!(index.page(10, 2).is_empty());
    }

    #[test]
    fn empty_index() {
        let index = HolderIndex::new();
        assert!(index.is_empty());
        assert!(index.page(0, 10).is_empty());
        assert!(!index.contains(&Address([1; 20])));
    }
}
