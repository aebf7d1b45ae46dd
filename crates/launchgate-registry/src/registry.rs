//! Shared restriction registry.
//!
//! An address is a restricted counterparty for a token if it is explicitly
//! flagged, or if it is the pool any known factory would create for the
//! token against the base asset. The derived-pool path is stateless and is
//! re-evaluated on every query, so curating the explicit list can never
//! weaken it.
//!
//! One registry is shared by many assets behind an `Arc`; the internal lock
//! only provides interior mutability and is held for one call at a time.

use std::collections::HashMap;

use launchgate_types::{
    Address, LaunchgateError, RegistryConfig, RestrictionSource, Result,
};
use parking_lot::RwLock;

use crate::pair_oracle::{DerivedPair, PairAddressDeriver, PairAddressOracle};

/// Mutable registry state, guarded as a unit.
#[derive(Debug)]
struct RegistryState {
    owner: Address,
    base_asset: Address,
    /// Insertion-ordered; removal swaps with the last entry.
    factories: Vec<Address>,
    explicit: HashMap<Address, bool>,
}

/// Owner-curated set of known factories plus an explicit restricted list.
pub struct RestrictionRegistry<D: PairAddressDeriver = PairAddressOracle> {
    deriver: D,
    state: RwLock<RegistryState>,
}

impl RestrictionRegistry<PairAddressOracle> {
    /// Registry that derives pools offline.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] if the config is invalid.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::with_deriver(config, PairAddressOracle::offline())
    }
}

impl<D: PairAddressDeriver> RestrictionRegistry<D> {
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] if the config is invalid.
    pub fn with_deriver(config: &RegistryConfig, deriver: D) -> Result<Self> {
        config.validate()?;
        let explicit = config.restricted.iter().map(|&addr| (addr, true)).collect();
        Ok(Self {
            deriver,
            state: RwLock::new(RegistryState {
                owner: config.owner,
                base_asset: config.base_asset,
                factories: config.factories.clone(),
                explicit,
            }),
        })
    }

    fn ensure_owner(state: &RegistryState, caller: Address, action: &str) -> Result<()> {
        if caller != state.owner {
            return Err(LaunchgateError::forbidden(format!(
                "{caller} is not the registry owner and cannot {action}"
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Owner-gated mutations
    // ---------------------------------------------------------------

    /// Append a factory. Duplicates are accepted; they only cost an extra
    /// derivation per query.
    pub fn add_factory(&self, caller: Address, factory: Address) -> Result<()> {
        let mut state = self.state.write();
        Self::ensure_owner(&state, caller, "add a factory")?;
        state.factories.push(factory);
        tracing::info!(
            factory = %factory,
            known = state.factories.len(),
            "Factory added to restriction registry"
        );
        Ok(())
    }

    /// Remove the first occurrence of a factory by swapping in the last
    /// entry. Removing an unknown factory is a no-op.
    pub fn remove_factory(&self, caller: Address, factory: Address) -> Result<()> {
        let mut state = self.state.write();
        Self::ensure_owner(&state, caller, "remove a factory")?;
        if let Some(idx) = state.factories.iter().position(|&f| f == factory) {
            state.factories.swap_remove(idx);
            tracing::info!(
                factory = %factory,
                known = state.factories.len(),
                "Factory removed from restriction registry"
            );
        }
        Ok(())
    }

    pub fn set_restricted(&self, caller: Address, addr: Address, restricted: bool) -> Result<()> {
        let mut state = self.state.write();
        Self::ensure_owner(&state, caller, "edit the restricted list")?;
        state.explicit.insert(addr, restricted);
        tracing::info!(address = %addr, restricted, "Explicit restriction updated");
        Ok(())
    }

    /// Apply many explicit flags at once. Either all apply or none do.
    pub fn set_restricted_batch(
        &self,
        caller: Address,
        addrs: &[Address],
        flags: &[bool],
    ) -> Result<()> {
        let mut state = self.state.write();
        Self::ensure_owner(&state, caller, "edit the restricted list")?;
        if addrs.len() != flags.len() {
            return Err(LaunchgateError::LengthMismatch {
                left: addrs.len(),
                right: flags.len(),
            });
        }
        for (&addr, &flag) in addrs.iter().zip(flags) {
            state.explicit.insert(addr, flag);
        }
        tracing::info!(count = addrs.len(), "Explicit restrictions updated in batch");
        Ok(())
    }

    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<()> {
        let mut state = self.state.write();
        Self::ensure_owner(&state, caller, "transfer ownership")?;
        if new_owner.is_zero() {
            return Err(LaunchgateError::forbidden("new owner is the zero address"));
        }
        tracing::info!(from = %state.owner, to = %new_owner, "Registry ownership transferred");
        state.owner = new_owner;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queries (open to everyone)
    // ---------------------------------------------------------------

    #[must_use]
    pub fn owner(&self) -> Address {
        self.state.read().owner
    }

    #[must_use]
    pub fn base_asset(&self) -> Address {
        self.state.read().base_asset
    }

    /// Known factories in their current order.
    #[must_use]
    pub fn factories(&self) -> Vec<Address> {
        self.state.read().factories.clone()
    }

    #[must_use]
    pub fn is_explicitly_restricted(&self, addr: Address) -> bool {
        self.state.read().explicit.get(&addr).copied().unwrap_or(false)
    }

    /// Addresses currently flagged on the explicit list, sorted.
    #[must_use]
    pub fn explicitly_restricted(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self
            .state
            .read()
            .explicit
            .iter()
            .filter_map(|(&addr, &flag)| flag.then_some(addr))
            .collect();
        out.sort_unstable();
        out
    }

    /// The pool each known factory would use for `token` against the base asset.
    #[must_use]
    pub fn derived_pools(&self, token: Address) -> Vec<DerivedPair> {
        let state = self.state.read();
        state
            .factories
            .iter()
            .map(|&factory| self.deriver.derive(factory, token, state.base_asset))
            .collect()
    }

    /// `true` iff `to` is explicitly flagged, or equals the derived pool of
    /// `token` and the base asset for any known factory.
    #[must_use]
    pub fn is_restricted(&self, token: Address, to: Address) -> bool {
        let state = self.state.read();
        if state.explicit.get(&to).copied().unwrap_or(false) {
            return true;
        }
        state
            .factories
            .iter()
            .any(|&factory| self.deriver.derive(factory, token, state.base_asset).address == to)
    }
}

impl<D: PairAddressDeriver> RestrictionSource for RestrictionRegistry<D> {
    fn is_restricted(&self, token: Address, to: Address) -> bool {
        RestrictionRegistry::<D>::is_restricted(self, token, to)
    }
}
