//! # PendingOutboundTransfer: one in-flight cross-domain send
//!
//! Created atomically with the local burn and the relay dispatch, keyed by
//! the relay-assigned [`Nonce`].
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐  positive ack  ┌───────────┐
//!   │ PENDING ├───────────────▶│ FINALIZED │
//!   └────┬────┘                └───────────┘
//!        │ negative ack (re-mint to sender)
//!        ▼
//!   ┌─────────────┐
//!   │ COMPENSATED │
//!   └─────────────┘
//! ```
//!
//! There is no timeout: without an acknowledgment the entry stays pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Amount, DomainId, Nonce};

/// Lifecycle state of an outbound transfer.
///
/// Transitions are **monotonic**:
/// - `Pending → Finalized` (delivery confirmed)
/// - `Pending → Compensated` (delivery failed, amount re-minted to sender)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutboundState {
    /// Burned locally, awaiting the relay's acknowledgment.
    Pending,
    /// Positive acknowledgment received. No further effect.
    Finalized,
    /// Negative acknowledgment received. Amount returned to the sender.
    Compensated,
}

impl OutboundState {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Finalized | Self::Compensated)
        )
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OutboundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Finalized => write!(f, "FINALIZED"),
            Self::Compensated => write!(f, "COMPENSATED"),
        }
    }
}

/// A cross-domain send whose outcome is not yet known on the source domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOutboundTransfer {
    /// Relay-assigned key.
    pub nonce: Nonce,
    /// Holder whose balance was burned; receives the compensation.
    pub from: Address,
    /// Recipient on the destination domain.
    pub recipient: Address,
    /// Domain the message was dispatched to.
    pub destination: DomainId,
    /// Amount burned.
    pub amount: Amount,
    /// Current lifecycle state.
    pub state: OutboundState,
    /// When the send was recorded.
    pub created_at: DateTime<Utc>,
}

impl PendingOutboundTransfer {
    #[must_use]
    pub fn new(
        nonce: Nonce,
        from: Address,
        recipient: Address,
        destination: DomainId,
        amount: Amount,
    ) -> Self {
        Self {
            nonce,
            from,
            recipient,
            destination,
            amount,
            state: OutboundState::Pending,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == OutboundState::Pending
    }

    /// Attempt to transition to FINALIZED.
    ///
    /// # Errors
    /// Returns error if the transfer already reached a terminal state.
    pub fn mark_finalized(&mut self) -> crate::Result<()> {
        self.transition(OutboundState::Finalized)
    }

    /// Attempt to transition to COMPENSATED.
    ///
    /// # Errors
    /// Returns error if the transfer already reached a terminal state.
    pub fn mark_compensated(&mut self) -> crate::Result<()> {
        self.transition(OutboundState::Compensated)
    }

    fn transition(&mut self, target: OutboundState) -> crate::Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(crate::LaunchgateError::Internal(format!(
                "Cannot transition transfer {} from {} to {target}",
                self.nonce, self.state
            )));
        }
        self.state = target;
        Ok(())
    }
}
