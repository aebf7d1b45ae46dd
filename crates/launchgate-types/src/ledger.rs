//! Notification records sent to the external ledger.
//!
//! The ledger keeps aggregate statistics (trade history, creator and trader
//! indexes). Launchgate only emits these records; it never reads them back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, Amount, RecordId};

/// Direction of a trade against the foundry, from the trader's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    /// The trader received the asset from the foundry.
    Buy,
    /// The trader sent the asset to the foundry.
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Emitted once when an asset is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreationRecord {
    pub id: RecordId,
    pub asset: Address,
    pub creator: Address,
    pub name: String,
    pub symbol: String,
    pub initial_supply: Amount,
    pub recorded_at: DateTime<Utc>,
}

impl CreationRecord {
    #[must_use]
    pub fn new(
        asset: Address,
        creator: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: Amount,
    ) -> Self {
        Self {
            id: RecordId::new(),
            asset,
            creator,
            name: name.into(),
            symbol: symbol.into(),
            initial_supply,
            recorded_at: Utc::now(),
        }
    }
}

/// Emitted for every balance movement to or from the foundry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: RecordId,
    pub asset: Address,
    pub trader: Address,
    pub side: TradeSide,
    pub amount: Amount,
    pub recorded_at: DateTime<Utc>,
}

impl TradeRecord {
    #[must_use]
    pub fn new(asset: Address, trader: Address, side: TradeSide, amount: Amount) -> Self {
        Self {
            id: RecordId::new(),
            asset,
            trader,
            side,
            amount,
            recorded_at: Utc::now(),
        }
    }
}

/// Emitted once when the asset's gate opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationRecord {
    pub id: RecordId,
    pub asset: Address,
    pub pool_operator: Option<Address>,
    /// Market cap reported by the foundry, in base-asset units.
    pub market_cap: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl GraduationRecord {
    #[must_use]
    pub fn new(asset: Address, pool_operator: Option<Address>, market_cap: Decimal) -> Self {
        Self {
            id: RecordId::new(),
            asset,
            pool_operator,
            market_cap,
            recorded_at: Utc::now(),
        }
    }
}
