//! The graduation-gated asset.
//!
//! Until the foundry flips the gate, transfers to restricted counterparties
//! (explicitly flagged addresses and every pool a known factory would create
//! for this asset) are refused, and approvals are disabled outright. After
//! graduation the asset behaves as a plain fungible token.
//!
//! The asset is also one endpoint of the cross-domain transfer saga:
//! 1. `send_cross_domain` burns locally, dispatches through the relay and
//!    records a pending transfer keyed by the relay nonce
//! 2. `on_receive` mints inbound transfers from registered remote contracts
//! 3. `on_acknowledge` finalizes or compensates a pending transfer
//!
//! Every entry point either fully succeeds or leaves state unchanged.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use launchgate_types::{
    Address, Amount, AssetConfig, CreationRecord, DispatchRequest, DomainContractId, DomainId,
    Foundry, GraduationRecord, LaunchgateError, Ledger, Nonce, OutboundState,
    PendingOutboundTransfer, Relay, RestrictionSource, Result, TradeRecord, TradeSide,
    TransferGate, constants, format_units,
};
use rust_decimal::Decimal;

use crate::allowances::AllowanceBook;
use crate::balances::BalanceBook;
use crate::codec::TransferPayload;
use crate::holders::HolderIndex;
use crate::permit::SignedPermit;
use crate::saga::CrossDomainTransferSaga;
use crate::supply_conservation::SupplyConservation;

/// External parties the asset talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub restrictions: Arc<dyn RestrictionSource>,
    pub foundry: Arc<dyn Foundry>,
    pub relay: Arc<dyn Relay>,
    pub ledger: Arc<dyn Ledger>,
}

/// Caller-supplied relay parameters for a cross-domain send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Native value forwarded to the relay.
    pub value: Amount,
    /// Relay hook metadata.
    pub metadata: Vec<u8>,
}

pub struct RestrictedAsset {
    name: String,
    symbol: String,
    precision: u8,
    creator: Address,
    address: Address,
    foundry_address: Address,
    relay_address: Address,

    gate: TransferGate,
    balances: BalanceBook,
    allowances: AllowanceBook,
    /// Owners that have already granted the foundry unlimited allowance.
    foundry_granted: HashSet<Address>,
    permit_nonces: HashMap<Address, u64>,
    holders: HolderIndex,
    saga: CrossDomainTransferSaga,
    supply: SupplyConservation,

    restrictions: Arc<dyn RestrictionSource>,
    foundry: Arc<dyn Foundry>,
    relay: Arc<dyn Relay>,
    ledger: Arc<dyn Ledger>,
}

impl RestrictedAsset {
    /// Deploy the asset: mint the initial supply to the creator and notify
    /// the ledger.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Configuration`] if the config is invalid or
    /// names a foundry/relay other than the supplied collaborators.
    pub fn new(config: AssetConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        if collaborators.foundry.address() != config.foundry {
            return Err(LaunchgateError::Configuration(format!(
                "foundry collaborator is {}, config names {}",
                collaborators.foundry.address(),
                config.foundry
            )));
        }
        if collaborators.relay.address() != config.relay {
            return Err(LaunchgateError::Configuration(format!(
                "relay collaborator is {}, config names {}",
                collaborators.relay.address(),
                config.relay
            )));
        }

        let mut saga = CrossDomainTransferSaga::new(constants::RESOLVED_NONCE_HISTORY_SIZE);
        for remote in &config.remote_contracts {
            saga.set_route(remote.domain, remote.contract);
        }

        let mut asset = Self {
            name: config.name,
            symbol: config.symbol,
            precision: config.precision,
            creator: config.creator,
            address: config.address,
            foundry_address: config.foundry,
            relay_address: config.relay,
            gate: TransferGate::Restricted,
            balances: BalanceBook::new(),
            allowances: AllowanceBook::new(),
            foundry_granted: HashSet::new(),
            permit_nonces: HashMap::new(),
            holders: HolderIndex::new(),
            saga,
            supply: SupplyConservation::new(),
            restrictions: collaborators.restrictions,
            foundry: collaborators.foundry,
            relay: collaborators.relay,
            ledger: collaborators.ledger,
        };

        asset.balances.mint(asset.creator, config.initial_supply)?;
        asset.supply.record_mint(config.initial_supply);
        asset.holders.record(asset.creator);

        asset.ledger.record_creation(CreationRecord::new(
            asset.address,
            asset.creator,
            asset.name.clone(),
            asset.symbol.clone(),
            config.initial_supply,
        ));
        tracing::info!(
            asset = %asset.address,
            symbol = %asset.symbol,
            creator = %asset.creator,
            initial_supply = config.initial_supply,
            routes = config.remote_contracts.len(),
            "Asset created"
        );
        Ok(asset)
    }

    // ---------------------------------------------------------------
    // Gate
    // ---------------------------------------------------------------

    /// Lift the transfer restrictions. Foundry only; one-way; repeating it
    /// is a no-op.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::NotFoundry`] for any other caller.
    pub fn set_unrestricted(&mut self, caller: Address) -> Result<()> {
        if caller != self.foundry_address {
            return Err(LaunchgateError::NotFoundry { caller });
        }
        if !self.gate.can_transition_to(TransferGate::Unrestricted) {
            tracing::debug!(asset = %self.address, "Asset already unrestricted");
            return Ok(());
        }
        self.gate = TransferGate::Unrestricted;

        let pool = self.foundry.get_pool(self.address);
        tracing::info!(
            asset = %self.address,
            pool_operator = ?pool.pool_operator,
            market_cap = %pool.last_market_cap,
            "Asset graduated, transfers unrestricted"
        );
        self.ledger.record_graduation(GraduationRecord::new(
            self.address,
            pool.pool_operator,
            pool.last_market_cap,
        ));
        Ok(())
    }

    fn check_counterparty(&self, to: Address) -> Result<()> {
        if self.gate.is_restricted() && self.restrictions.is_restricted(self.address, to) {
            return Err(LaunchgateError::forbidden(format!(
                "{to} is a restricted counterparty until {} graduates",
                self.symbol
            )));
        }
        Ok(())
    }

    fn check_approvals_enabled(&self, action: &str) -> Result<()> {
        if self.gate.is_restricted() {
            return Err(LaunchgateError::forbidden(format!(
                "{action} is disabled until {} graduates",
                self.symbol
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Transfers & approvals
    // ---------------------------------------------------------------

    /// # Errors
    /// `Forbidden` for a restricted recipient while gated,
    /// `InsufficientBalance` if `caller` holds less than `amount`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.check_counterparty(to)?;
        self.balances.transfer(caller, to, amount)?;
        self.after_transfer(caller, to, amount);
        Ok(())
    }

    /// Spend `caller`'s allowance over `from`'s balance.
    ///
    /// The first call for a given `from` grants the foundry an unlimited
    /// allowance over `from`'s balance, in either gate state.
    ///
    /// # Errors
    /// `Forbidden` for a restricted recipient while gated,
    /// `InsufficientAllowance`, or `InsufficientBalance`.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.check_counterparty(to)?;

        let grant_pending = !self.foundry_granted.contains(&from);
        let available = if grant_pending && caller == self.foundry_address {
            constants::UNLIMITED_ALLOWANCE
        } else {
            self.allowances.allowance(from, caller)
        };
        if available < amount {
            return Err(LaunchgateError::InsufficientAllowance {
                needed: amount,
                available,
            });
        }
        self.balances.ensure_available(from, amount)?;

        if grant_pending {
            self.allowances
                .set(from, self.foundry_address, constants::UNLIMITED_ALLOWANCE);
            self.foundry_granted.insert(from);
            tracing::debug!(
                asset = %self.address,
                owner = %from,
                foundry = %self.foundry_address,
                "Foundry granted unlimited allowance"
            );
        }
        self.allowances.spend(from, caller, amount)?;
        self.balances.transfer(from, to, amount)?;
        self.after_transfer(from, to, amount);
        Ok(())
    }

    fn after_transfer(&mut self, from: Address, to: Address, amount: Amount) {
        self.holders.record(to);

        let trade = if from == self.foundry_address && to != self.foundry_address {
            Some((to, TradeSide::Buy))
        } else if to == self.foundry_address && from != self.foundry_address {
            Some((from, TradeSide::Sell))
        } else {
            None
        };
        if let Some((trader, side)) = trade {
            self.ledger
                .record_trade(TradeRecord::new(self.address, trader, side, amount));
        }

        tracing::debug!(
            asset = %self.address,
            from = %from,
            to = %to,
            amount,
            "Transfer"
        );
    }

    /// # Errors
    /// `Forbidden` while gated.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<()> {
        self.check_approvals_enabled("approve")?;
        self.allowances.set(caller, spender, amount);
        tracing::debug!(
            asset = %self.address,
            owner = %caller,
            spender = %spender,
            amount,
            "Approval"
        );
        Ok(())
    }

    /// Apply a signed approval.
    ///
    /// # Errors
    /// In order: `Forbidden` while gated, `PermitExpired`, `InvalidSignature`,
    /// `PermitNonceMismatch`.
    pub fn permit(&mut self, signed: &SignedPermit) -> Result<()> {
        self.check_approvals_enabled("permit")?;
        signed.verify(self.address, Utc::now())?;

        let permit = &signed.permit;
        let expected = self.permit_nonce(permit.owner);
        if permit.nonce != expected {
            return Err(LaunchgateError::PermitNonceMismatch {
                expected,
                actual: permit.nonce,
            });
        }

        self.allowances.set(permit.owner, permit.spender, permit.value);
        self.permit_nonces.insert(permit.owner, expected + 1);
        tracing::debug!(
            asset = %self.address,
            owner = %permit.owner,
            spender = %permit.spender,
            value = permit.value,
            nonce = permit.nonce,
            "Permit applied"
        );
        Ok(())
    }

    // ---------------------------------------------------------------
    // Cross-domain routing (creator only)
    // ---------------------------------------------------------------

    /// # Errors
    /// `Forbidden` unless `caller` is the creator.
    pub fn set_remote_contract(
        &mut self,
        caller: Address,
        domain: DomainId,
        contract: DomainContractId,
    ) -> Result<()> {
        self.ensure_creator(caller)?;
        self.saga.set_route(domain, contract);
        tracing::info!(asset = %self.address, domain = %domain, contract = %contract, "Remote contract set");
        Ok(())
    }

    /// # Errors
    /// `Forbidden` unless `caller` is the creator; `LengthMismatch` if the
    /// slices differ in length. Either all routes apply or none do.
    pub fn set_remote_contracts(
        &mut self,
        caller: Address,
        domains: &[DomainId],
        contracts: &[DomainContractId],
    ) -> Result<()> {
        self.ensure_creator(caller)?;
        if domains.len() != contracts.len() {
            return Err(LaunchgateError::LengthMismatch {
                left: domains.len(),
                right: contracts.len(),
            });
        }
        for (&domain, &contract) in domains.iter().zip(contracts) {
            self.saga.set_route(domain, contract);
        }
        tracing::info!(asset = %self.address, count = domains.len(), "Remote contracts set");
        Ok(())
    }

    fn ensure_creator(&self, caller: Address) -> Result<()> {
        if caller != self.creator {
            return Err(LaunchgateError::forbidden(format!(
                "{caller} is not the creator of {}",
                self.symbol
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Cross-domain saga
    // ---------------------------------------------------------------

    /// Burn `amount` from `caller` and dispatch it to `to` on `destination`.
    /// Returns the relay nonce under which the transfer is pending.
    ///
    /// # Errors
    /// - `Forbidden` for a restricted recipient while gated, or an unmapped
    ///   destination
    /// - `InsufficientBalance`
    /// - whatever the relay returns from `dispatch`
    /// - `DuplicateNonce` if the relay reuses a pending nonce
    ///
    /// The burn is undone on every error.
    pub fn send_cross_domain(
        &mut self,
        caller: Address,
        to: Address,
        destination: DomainId,
        amount: Amount,
        options: DispatchOptions,
    ) -> Result<Nonce> {
        self.check_counterparty(to)?;
        let remote = self.saga.route(destination).ok_or_else(|| {
            LaunchgateError::forbidden(format!("no remote contract for {destination}"))
        })?;

        self.balances.burn(caller, amount)?;

        let request = DispatchRequest {
            value: options.value,
            destination,
            recipient: remote,
            metadata: options.metadata,
            payload: TransferPayload::new(to, amount).encode(),
        };
        let nonce = match self.relay.dispatch(request) {
            Ok(nonce) => nonce,
            Err(err) => {
                self.balances.restore(caller, amount);
                tracing::warn!(
                    asset = %self.address,
                    destination = %destination,
                    error = %err,
                    "Dispatch failed, burn rolled back"
                );
                return Err(err);
            }
        };

        let transfer = PendingOutboundTransfer::new(nonce, caller, to, destination, amount);
        if let Err(err) = self.saga.open(transfer) {
            self.balances.restore(caller, amount);
            tracing::warn!(
                asset = %self.address,
                nonce = %nonce,
                error = %err,
                "Relay reused a pending nonce, burn rolled back"
            );
            return Err(err);
        }
        self.supply.record_escrow(amount);

        tracing::info!(
            asset = %self.address,
            from = %caller,
            to = %to,
            destination = %destination,
            amount,
            nonce = %nonce,
            in_flight = self.supply.in_flight(),
            "Cross-domain transfer dispatched"
        );
        Ok(nonce)
    }

    /// Relay callback: credit an inbound transfer.
    ///
    /// # Errors
    /// `NotRelay`, `Forbidden` for an unregistered sender or a restricted
    /// recipient while gated, `MalformedPayload`, `SupplyOverflow`.
    pub fn on_receive(
        &mut self,
        caller: Address,
        sender_contract: DomainContractId,
        payload: &[u8],
        source: DomainId,
    ) -> Result<()> {
        if caller != self.relay_address {
            return Err(LaunchgateError::NotRelay { caller });
        }
        if self.saga.route(source) != Some(sender_contract) {
            tracing::warn!(
                asset = %self.address,
                source = %source,
                sender = %sender_contract,
                "Rejected inbound transfer from unregistered contract"
            );
            return Err(LaunchgateError::forbidden(format!(
                "{sender_contract} is not the registered contract for {source}"
            )));
        }

        let message = TransferPayload::decode(payload)?;
        self.check_counterparty(message.recipient)?;
        self.balances.mint(message.recipient, message.amount)?;
        self.supply.record_mint(message.amount);
        self.holders.record(message.recipient);

        tracing::info!(
            asset = %self.address,
            source = %source,
            to = %message.recipient,
            amount = message.amount,
            minted = self.supply.total_minted(),
            "Cross-domain transfer received"
        );
        Ok(())
    }

    /// Relay callback: resolve a pending transfer.
    ///
    /// Returns the outcome applied, or `None` if `nonce` was not pending
    /// (unknown or already resolved), in which case nothing changes.
    ///
    /// # Errors
    /// `NotRelay`; `SupplyOverflow` if the compensation cannot be minted.
    pub fn on_acknowledge(
        &mut self,
        caller: Address,
        nonce: Nonce,
        success: bool,
        data: &[u8],
    ) -> Result<Option<OutboundState>> {
        if caller != self.relay_address {
            return Err(LaunchgateError::NotRelay { caller });
        }
        let Some(transfer) = self.saga.pending(nonce).cloned() else {
            tracing::warn!(
                asset = %self.address,
                nonce = %nonce,
                previous = ?self.saga.outcome(nonce),
                "Acknowledgment for non-pending nonce ignored"
            );
            return Ok(None);
        };

        if success {
            self.saga.close(nonce, OutboundState::Finalized)?;
            self.supply.record_finalized(transfer.amount);
            tracing::info!(
                asset = %self.address,
                nonce = %nonce,
                amount = transfer.amount,
                "Cross-domain transfer finalized"
            );
            return Ok(Some(OutboundState::Finalized));
        }

        self.balances.mint(transfer.from, transfer.amount)?;
        if let Err(err) = self.saga.close(nonce, OutboundState::Compensated) {
            self.balances.burn(transfer.from, transfer.amount)?;
            return Err(err);
        }
        self.supply.record_compensated(transfer.amount);
        self.holders.record(transfer.from);
        tracing::info!(
            asset = %self.address,
            nonce = %nonce,
            to = %transfer.from,
            amount = transfer.amount,
            reason = %hex::encode(data),
            "Cross-domain transfer failed, compensated"
        );
        Ok(Some(OutboundState::Compensated))
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    #[must_use]
    pub fn creator(&self) -> Address {
        self.creator
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn gate(&self) -> TransferGate {
        self.gate
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        !self.gate.is_restricted()
    }

    /// Whether the foundry has assigned a pool operator for this asset.
    #[must_use]
    pub fn is_graduated(&self) -> bool {
        self.foundry.get_pool(self.address).is_graduated()
    }

    #[must_use]
    pub fn balance_of(&self, holder: Address) -> Amount {
        self.balances.balance_of(holder)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.balances.total_supply()
    }

    /// Balance in whole units at the asset's precision.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::Internal`] if the balance does not fit a
    /// `Decimal`.
    pub fn balance_in_units(&self, holder: Address) -> Result<Decimal> {
        format_units(self.balance_of(holder), self.precision)
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.allowance(owner, spender)
    }

    #[must_use]
    pub fn permit_nonce(&self, owner: Address) -> u64 {
        self.permit_nonces.get(&owner).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn holders(&self, offset: usize, limit: usize) -> &[Address] {
        self.holders.page(offset, limit)
    }

    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    #[must_use]
    pub fn is_holder(&self, addr: &Address) -> bool {
        self.holders.contains(addr)
    }

    #[must_use]
    pub fn remote_contract(&self, domain: DomainId) -> Option<DomainContractId> {
        self.saga.route(domain)
    }

    #[must_use]
    pub fn remote_contracts(&self) -> Vec<(DomainId, DomainContractId)> {
        self.saga.routes()
    }

    #[must_use]
    pub fn pending(&self, nonce: Nonce) -> Option<&PendingOutboundTransfer> {
        self.saga.pending(nonce)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.saga.pending_count()
    }

    #[must_use]
    pub fn pending_total(&self) -> Amount {
        self.saga.pending_total()
    }

    /// Lifecycle state of a nonce issued by this asset, if known.
    #[must_use]
    pub fn outcome(&self, nonce: Nonce) -> Option<OutboundState> {
        self.saga.outcome(nonce)
    }

    #[must_use]
    pub fn supply_tracker(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Check `Σ(balances) + Σ(pending) == minted - finalized burns`, and that
    /// the running total supply agrees with the balances.
    ///
    /// # Errors
    /// Returns [`LaunchgateError::SupplyInvariantViolation`] on any mismatch.
    pub fn verify_supply_conservation(&self) -> Result<()> {
        let circulating = self.balances.sum_of_balances();
        if circulating != self.balances.total_supply() {
            return Err(LaunchgateError::SupplyInvariantViolation {
                reason: format!(
                    "sum of balances {circulating} != total supply {}",
                    self.balances.total_supply()
                ),
            });
        }
        self.supply.verify(circulating, self.saga.pending_total())
    }
}

impl std::fmt::Debug for RestrictedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestrictedAsset")
            .field("symbol", &self.symbol)
            .field("address", &self.address)
            .field("gate", &self.gate)
            .field("total_supply", &self.balances.total_supply())
            .field("holders", &self.holders.len())
            .field("pending", &self.saga.pending_count())
            .finish_non_exhaustive()
    }
}
