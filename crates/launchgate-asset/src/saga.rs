//! Cross-domain transfer saga bookkeeping.
//!
//! Holds the per-destination routing table, the pending outbound table keyed
//! by relay nonce, and the resolved-nonce history. The asset drives the
//! balance side (burn on send, re-mint on compensation); this type only
//! enforces the per-nonce lifecycle:
//!
//! ```text
//! (send) ──► Pending ──ack ok──► Finalized
//!               │
//!               └──ack fail──► Compensated
//! ```
//!
//! At most one pending entry exists per nonce. A resolved nonce leaves the
//! table, so a repeated acknowledgment finds nothing to do.

use std::collections::HashMap;

use launchgate_types::{
    Amount, DomainContractId, DomainId, LaunchgateError, Nonce, OutboundState,
    PendingOutboundTransfer, Result,
};

use crate::resolved::ResolvedNonces;

#[derive(Debug)]
pub struct CrossDomainTransferSaga {
    routes: HashMap<DomainId, DomainContractId>,
    pending: HashMap<Nonce, PendingOutboundTransfer>,
    resolved: ResolvedNonces,
}

impl CrossDomainTransferSaga {
    #[must_use]
    pub fn new(history_size: usize) -> Self {
        Self {
            routes: HashMap::new(),
            pending: HashMap::new(),
            resolved: ResolvedNonces::new(history_size),
        }
    }

    // ---------------------------------------------------------------
    // Routing
    // ---------------------------------------------------------------

    pub fn set_route(&mut self, domain: DomainId, contract: DomainContractId) {
        self.routes.insert(domain, contract);
    }

    #[must_use]
    pub fn route(&self, domain: DomainId) -> Option<DomainContractId> {
        self.routes.get(&domain).copied()
    }

    /// All routes, sorted by domain.
    #[must_use]
    pub fn routes(&self) -> Vec<(DomainId, DomainContractId)> {
        let mut out: Vec<_> = self.routes.iter().map(|(&d, &c)| (d, c)).collect();
        out.sort_unstable_by_key(|(d, _)| *d);
        out
    }

    // ---------------------------------------------------------------
    // Pending lifecycle
    // ---------------------------------------------------------------

    /// Track a freshly dispatched transfer.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Internal`] if the transfer is not in the
    /// `Pending` state, or [`LaunchgateError::DuplicateNonce`] if the nonce
    /// is already pending.
    pub fn open(&mut self, transfer: PendingOutboundTransfer) -> Result<()> {
        if !transfer.is_pending() {
            return Err(LaunchgateError::Internal(format!(
                "cannot open {} in state {}",
                transfer.nonce, transfer.state
            )));
        }
        if self.pending.contains_key(&transfer.nonce) {
            return Err(LaunchgateError::DuplicateNonce(transfer.nonce));
        }
        self.pending.insert(transfer.nonce, transfer);
        Ok(())
    }

    #[must_use]
    pub fn pending(&self, nonce: Nonce) -> Option<&PendingOutboundTransfer> {
        self.pending.get(&nonce)
    }

    /// Remove a pending transfer, move it to `outcome` and remember the
    /// outcome. Returns `None` if the nonce is not pending.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Internal`] if `outcome` is not a legal
    /// terminal state; the entry stays pending in that case.
    pub fn close(
        &mut self,
        nonce: Nonce,
        outcome: OutboundState,
    ) -> Result<Option<PendingOutboundTransfer>> {
        if !outcome.is_terminal() {
            return Err(LaunchgateError::Internal(format!(
                "cannot close {nonce} into {outcome}"
            )));
        }
        let Some(mut transfer) = self.pending.get(&nonce).cloned() else {
            return Ok(None);
        };
        if outcome == OutboundState::Finalized {
            transfer.mark_finalized()?;
        } else {
            transfer.mark_compensated()?;
        }
        self.pending.remove(&nonce);
        self.resolved.record(nonce, transfer.state);
        Ok(Some(transfer))
    }

    /// Current state of `nonce`: `Pending` while in the table, otherwise the
    /// remembered terminal outcome (if still within the history window).
    #[must_use]
    pub fn outcome(&self, nonce: Nonce) -> Option<OutboundState> {
        self.pending
            .get(&nonce)
            .map(|t| t.state)
            .or_else(|| self.resolved.outcome(nonce))
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Sum of all pending amounts.
    #[must_use]
    pub fn pending_total(&self) -> Amount {
        self.pending
            .values()
            .fold(0u128, |acc, t| acc.saturating_add(t.amount))
    }
}

#[cfg(test)]
mod tests {
    use launchgate_types::Address;

    use super::*;

    fn transfer(nonce: u64, amount: Amount) -> PendingOutboundTransfer {
        PendingOutboundTransfer::new(
            Nonce(nonce),
            Address([1; 20]),
            Address([2; 20]),
            DomainId(2),
            amount,
        )
    }

    #[test]
    fn open_and_close_finalized() {
        let mut saga = CrossDomainTransferSaga::new(16);
        saga.open(transfer(7, 300)).unwrap();
        assert_eq!(saga.pending_total(), 300);
        assert_eq!(saga.outcome(Nonce(7)), Some(OutboundState::Pending));

        let closed = saga.close(Nonce(7), OutboundState::Finalized).unwrap().unwrap();
        assert_eq!(closed.state, OutboundState::Finalized);
        assert_eq!(saga.pending_count(), 0);
        assert_eq!(saga.outcome(Nonce(7)), Some(OutboundState::Finalized));
    }

    #[test]
    fn duplicate_nonce_is_rejected() {
        let mut saga = CrossDomainTransferSaga::new(16);
        saga.open(transfer(1, 10)).unwrap();
        let err = saga.open(transfer(1, 20)).unwrap_err();
        assert!(matches!(err, LaunchgateError::DuplicateNonce(Nonce(1))));
        assert_eq!(saga.pending_total(), 10);
    }

    #[test]
    fn closing_twice_is_noop() {
        let mut saga = CrossDomainTransferSaga::new(16);
        saga.open(transfer(3, 10)).unwrap();
        assert!(saga.close(Nonce(3), OutboundState::Compensated).unwrap().is_some());
        assert!(saga.close(Nonce(3), OutboundState::Finalized).unwrap().is_none());
        assert_eq!(saga.outcome(Nonce(3)), Some(OutboundState::Compensated));
    }

    #[test]
    fn closing_into_pending_fails_and_keeps_entry() {
        let mut saga = CrossDomainTransferSaga::new(16);
        saga.open(transfer(4, 10)).unwrap();
        assert!(saga.close(Nonce(4), OutboundState::Pending).is_err());
        assert!(saga.pending(Nonce(4)).is_some());
    }

    #[test]
    fn resolved_transfer_cannot_be_opened() {
        let mut saga = CrossDomainTransferSaga::new(16);
        let mut done = transfer(5, 10);
        done.mark_finalized().unwrap();
        let err = saga.open(done).unwrap_err();
        assert!(matches!(err, LaunchgateError::Internal(_)));
        assert_eq!(saga.pending_count(), 0);
    }

    #[test]
    fn unknown_nonce_has_no_outcome() {
        let saga = CrossDomainTransferSaga::new(16);
        assert_eq!(saga.outcome(Nonce(99)), None);
    }

    #[test]
    fn nonces_resolve_in_any_order() {
        let mut saga = CrossDomainTransferSaga::new(16);
        for n in 0..4 {
            saga.open(transfer(n, 10)).unwrap();
        }
        saga.close(Nonce(2), OutboundState::Finalized).unwrap();
        saga.close(Nonce(0), OutboundState::Compensated).unwrap();
        assert_eq!(saga.pending_count(), 2);
        assert_eq!(saga.pending_total(), 20);
    }

    #[test]
    fn routes_are_sorted() {
        let mut saga = CrossDomainTransferSaga::new(16);
        saga.set_route(DomainId(9), DomainContractId([9; 32]));
        saga.set_route(DomainId(2), DomainContractId([2; 32]));
        let routes = saga.routes();
        assert_eq!(routes[0].0, DomainId(2));
        assert_eq!(saga.route(DomainId(9)), Some(DomainContractId([9; 32])));
        assert_eq!(saga.route(DomainId(5)), None);
    }
}
