//! In-memory collaborators for tests. **Never use in production.**
//!
//! Enabled for this crate's own tests and for dependents through the
//! `test-helpers` feature.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::{
    Address, CreationRecord, DispatchRequest, Foundry, GraduationRecord, LaunchgateError, Ledger,
    Nonce, PoolInfo, Relay, RestrictionSource, Result, TradeRecord,
};

/// Deterministic address whose every byte is `byte`.
#[must_use]
pub fn test_address(byte: u8) -> Address {
    Address([byte; 20])
}

/// Uniformly random address.
#[must_use]
pub fn random_address() -> Address {
    Address(rand::random::<[u8; 20]>())
}

// ---------------------------------------------------------------------------
// StaticRestrictions
// ---------------------------------------------------------------------------

/// Restriction source backed by a fixed set, regardless of token.
#[derive(Debug, Default)]
pub struct StaticRestrictions {
    restricted: Mutex<HashSet<Address>>,
}

impl StaticRestrictions {
    #[must_use]
    pub fn new(restricted: impl IntoIterator<Item = Address>) -> Self {
        Self {
            restricted: Mutex::new(restricted.into_iter().collect()),
        }
    }

    pub fn restrict(&self, addr: Address) {
        self.restricted.lock().insert(addr);
    }
}

impl RestrictionSource for StaticRestrictions {
    fn is_restricted(&self, _token: Address, to: Address) -> bool {
        self.restricted.lock().contains(&to)
    }
}

// ---------------------------------------------------------------------------
// StaticFoundry
// ---------------------------------------------------------------------------

/// Foundry whose pool state is set by the test.
#[derive(Debug)]
pub struct StaticFoundry {
    address: Address,
    pool: Mutex<PoolInfo>,
}

impl StaticFoundry {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            pool: Mutex::new(PoolInfo::ungraduated(Decimal::ZERO)),
        }
    }

    /// Mark the pool as graduated with the given operator and market cap.
    pub fn graduate(&self, operator: Address, market_cap: Decimal) {
        *self.pool.lock() = PoolInfo {
            pool_operator: Some(operator),
            last_market_cap: market_cap,
        };
    }
}

impl Foundry for StaticFoundry {
    fn address(&self) -> Address {
        self.address
    }

    fn get_pool(&self, _asset: Address) -> PoolInfo {
        self.pool.lock().clone()
    }
}

// ---------------------------------------------------------------------------
// InMemoryRelay
// ---------------------------------------------------------------------------

/// Relay that queues dispatched messages for the test to deliver by hand.
#[derive(Debug)]
pub struct InMemoryRelay {
    address: Address,
    next_nonce: AtomicU64,
    fail_next: AtomicBool,
    outbox: Mutex<Vec<(Nonce, DispatchRequest)>>,
}

impl InMemoryRelay {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            next_nonce: AtomicU64::new(0),
            fail_next: AtomicBool::new(false),
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Make the next assigned nonce equal `nonce`.
    pub fn set_next_nonce(&self, nonce: u64) {
        self.next_nonce.store(nonce, Ordering::SeqCst);
    }

    /// Make the next `dispatch` call fail without assigning a nonce.
    pub fn fail_next_dispatch(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Drain every message dispatched so far.
    pub fn take_outbox(&self) -> Vec<(Nonce, DispatchRequest)> {
        std::mem::take(&mut *self.outbox.lock())
    }

    #[must_use]
    pub fn outbox_len(&self) -> usize {
        self.outbox.lock().len()
    }
}

impl Relay for InMemoryRelay {
    fn address(&self) -> Address {
        self.address
    }

    fn dispatch(&self, request: DispatchRequest) -> Result<Nonce> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(LaunchgateError::DispatchFailed {
                reason: "relay unavailable".into(),
            });
        }
        let nonce = Nonce(self.next_nonce.fetch_add(1, Ordering::SeqCst));
        self.outbox.lock().push((nonce, request));
        Ok(nonce)
    }
}

// ---------------------------------------------------------------------------
// RecordingLedger
// ---------------------------------------------------------------------------

/// Ledger that keeps every notification for inspection.
#[derive(Debug, Default)]
pub struct RecordingLedger {
    pub creations: Mutex<Vec<CreationRecord>>,
    pub trades: Mutex<Vec<TradeRecord>>,
    pub graduations: Mutex<Vec<GraduationRecord>>,
}

impl Ledger for RecordingLedger {
    fn record_creation(&self, record: CreationRecord) {
        self.creations.lock().push(record);
    }

    fn record_trade(&self, record: TradeRecord) {
        self.trades.lock().push(record);
    }

    fn record_graduation(&self, record: GraduationRecord) {
        self.graduations.lock().push(record);
    }
}
