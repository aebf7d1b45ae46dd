//! Configuration types for assets and restriction registries.
//!
//! Both configs load from JSON; addresses are `0x`-prefixed hex strings.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, DomainContractId, DomainId, LaunchgateError, Result, constants};

/// Deployment parameters for a single restricted asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places of one whole unit.
    #[serde(default = "default_precision")]
    pub precision: u8,
    /// Creator; receives the initial supply and manages remote contracts.
    pub creator: Address,
    /// This asset's own address on the local domain.
    pub address: Address,
    /// Base units minted to the creator at construction.
    #[serde(default)]
    pub initial_supply: Amount,
    /// Address of the foundry collaborator.
    pub foundry: Address,
    /// Address of the relay collaborator.
    pub relay: Address,
    /// Initial per-domain contract mapping.
    #[serde(default)]
    pub remote_contracts: Vec<RemoteContractConfig>,
}

fn default_precision() -> u8 {
    constants::DEFAULT_PRECISION
}

/// The asset's counterpart contract on one remote domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteContractConfig {
    pub domain: DomainId,
    pub contract: DomainContractId,
}

impl AssetConfig {
    /// Minimal config with the default precision and no remote contracts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        creator: Address,
        address: Address,
        foundry: Address,
        relay: Address,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            precision: constants::DEFAULT_PRECISION,
            creator,
            address,
            initial_supply: 0,
            foundry,
            relay,
            remote_contracts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_initial_supply(mut self, initial_supply: Amount) -> Self {
        self.initial_supply = initial_supply;
        self
    }

    #[must_use]
    pub fn with_remote_contract(mut self, domain: DomainId, contract: DomainContractId) -> Self {
        self.remote_contracts
            .push(RemoteContractConfig { domain, contract });
        self
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] on malformed JSON or
    /// failed validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| LaunchgateError::Configuration(format!("asset config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check structural constraints.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LaunchgateError::Configuration("name is empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(LaunchgateError::Configuration("symbol is empty".into()));
        }
        if self.precision > constants::MAX_PRECISION {
            return Err(LaunchgateError::Configuration(format!(
                "precision {} exceeds maximum {}",
                self.precision,
                constants::MAX_PRECISION
            )));
        }
        for (label, addr) in [
            ("creator", self.creator),
            ("address", self.address),
            ("foundry", self.foundry),
            ("relay", self.relay),
        ] {
            if addr.is_zero() {
                return Err(LaunchgateError::Configuration(format!(
                    "{label} address is zero"
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for a shared restriction registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Curator allowed to edit factories and the explicit list.
    pub owner: Address,
    /// Asset every restricted token is paired against when deriving pools.
    pub base_asset: Address,
    /// Known pool factories, in insertion order.
    #[serde(default)]
    pub factories: Vec<Address>,
    /// Addresses flagged as restricted from the start.
    #[serde(default)]
    pub restricted: Vec<Address>,
}

impl RegistryConfig {
    #[must_use]
    pub fn new(owner: Address, base_asset: Address) -> Self {
        Self {
            owner,
            base_asset,
            factories: Vec::new(),
            restricted: Vec::new(),
        }
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] on malformed JSON or
    /// failed validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| LaunchgateError::Configuration(format!("registry config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] if the owner or base asset is zero.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_zero() {
            return Err(LaunchgateError::Configuration("owner address is zero".into()));
        }
        if self.base_asset.is_zero() {
            return Err(LaunchgateError::Configuration(
                "base asset address is zero".into(),
            ));
        }
        Ok(())
    }
}
