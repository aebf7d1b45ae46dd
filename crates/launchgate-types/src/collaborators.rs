//! Contracts of the collaborators an asset depends on.
//!
//! None of these are implemented by Launchgate itself except
//! [`RestrictionSource`] (see `launchgate-registry`). Pool mechanics and
//! graduation decisions live behind [`Foundry`], message transport and fees
//! behind [`Relay`], and aggregate statistics behind [`Ledger`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Address, Amount, CreationRecord, DomainContractId, DomainId, GraduationRecord, Nonce, Result,
    TradeRecord,
};

/// Answers whether `to` is a restricted counterparty for `token`.
pub trait RestrictionSource: Send + Sync {
    fn is_restricted(&self, token: Address, to: Address) -> bool;
}

// ---------------------------------------------------------------------------
// Foundry
// ---------------------------------------------------------------------------

/// The foundry's view of an asset's bonding pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// Operator of the graduated pool; `None` until graduation.
    pub pool_operator: Option<Address>,
    /// Last observed market cap in base-asset units.
    pub last_market_cap: Decimal,
}

impl PoolInfo {
    /// A pool that has not graduated.
    #[must_use]
    pub fn ungraduated(last_market_cap: Decimal) -> Self {
        Self {
            pool_operator: None,
            last_market_cap,
        }
    }

    #[must_use]
    pub fn is_graduated(&self) -> bool {
        self.pool_operator.is_some()
    }
}

/// The trusted launch collaborator that owns pool mechanics and decides
/// graduation.
pub trait Foundry: Send + Sync {
    /// The foundry's own address; the only caller allowed to open the gate.
    fn address(&self) -> Address;

    fn get_pool(&self, asset: Address) -> PoolInfo;
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// A message handed to the relay for delivery to another domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Native value forwarded to the relay (fees).
    pub value: Amount,
    pub destination: DomainId,
    /// The asset's contract on the destination domain.
    pub recipient: DomainContractId,
    /// Relay-specific hook metadata, passed through untouched.
    pub metadata: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Cross-domain message transport.
///
/// Contract relied upon by the saga: a dispatch that returns a nonce yields
/// exactly one terminal outcome, acknowledged back to the source after the
/// dispatch itself. Nonces are never reused.
pub trait Relay: Send + Sync {
    /// The relay's address; the only caller allowed to deliver callbacks.
    fn address(&self) -> Address;

    fn dispatch(&self, request: DispatchRequest) -> Result<Nonce>;
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Fire-and-forget statistics sink.
pub trait Ledger: Send + Sync {
    fn record_creation(&self, record: CreationRecord);
    fn record_trade(&self, record: TradeRecord);
    fn record_graduation(&self, record: GraduationRecord);
}

/// A ledger that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLedger;

impl Ledger for NoopLedger {
    fn record_creation(&self, _record: CreationRecord) {}
    fn record_trade(&self, _record: TradeRecord) {}
    fn record_graduation(&self, _record: GraduationRecord) {}
}
