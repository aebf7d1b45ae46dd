//! Single-domain supply conservation checker.
//!
//! Invariant, checked after every entry point:
//! ```text
//! Σ(balances) + Σ(pending outbound) == minted - finalized burns
//! ```
//!
//! An outbound burn is not final until the relay acknowledges it: until
//! then the amount is "in flight" and still counts toward this domain's
//! supply. A negative acknowledgment moves it back into circulation, a
//! positive one retires it for good.

use launchgate_types::{Amount, LaunchgateError, Result};

#[derive(Debug, Default)]
pub struct SupplyConservation {
    /// Everything ever minted here (initial supply and inbound transfers).
    minted: Amount,
    /// Outbound burns confirmed by the destination domain.
    burned: Amount,
    /// Outbound burns awaiting acknowledgment.
    in_flight: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mint(&mut self, amount: Amount) {
        self.minted = self.minted.saturating_add(amount);
    }

    /// An outbound transfer burned `amount` and is now pending.
    pub fn record_escrow(&mut self, amount: Amount) {
        self.in_flight = self.in_flight.saturating_add(amount);
    }

    /// The pending amount was delivered; it leaves this domain for good.
    pub fn record_finalized(&mut self, amount: Amount) {
        self.in_flight = self.in_flight.saturating_sub(amount);
        self.burned = self.burned.saturating_add(amount);
    }

    /// The pending amount was re-minted to its originator.
    pub fn record_compensated(&mut self, amount: Amount) {
        self.in_flight = self.in_flight.saturating_sub(amount);
    }

    /// `minted - burned`.
    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        self.minted.saturating_sub(self.burned)
    }

    #[must_use]
    pub fn total_minted(&self) -> Amount {
        self.minted
    }

    #[must_use]
    pub fn total_burned(&self) -> Amount {
        self.burned
    }

    #[must_use]
    pub fn in_flight(&self) -> Amount {
        self.in_flight
    }

    /// Check the observed circulating balances and pending total against
    /// the recorded history.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::SupplyInvariantViolation`] on any mismatch.
    pub fn verify(&self, circulating: Amount, pending: Amount) -> Result<()> {
        if pending != self.in_flight {
            return Err(LaunchgateError::SupplyInvariantViolation {
                reason: format!(
                    "pending total {pending} != in-flight {}",
                    self.in_flight
                ),
            });
        }
        let actual = circulating.checked_add(pending).ok_or_else(|| {
            LaunchgateError::SupplyInvariantViolation {
                reason: "circulating + pending overflows".into(),
            }
        })?;
        let expected = self.expected_supply();
        if actual != expected {
            return Err(LaunchgateError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual} != expected {expected} \
                     (minted={}, burned={}, circulating={circulating}, pending={pending})",
                    self.minted, self.burned,
                ),
            });
        }
        Ok(())
    }
}
