//! # launchgate-types
//!
//! Shared types, errors, and configuration for **Launchgate**, a
//! graduation-gated fungible asset that can move across execution domains.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`DomainId`], [`DomainContractId`], [`Nonce`], [`RecordId`]
//! - **Amounts**: [`Amount`] base units and [`format_units`]
//! - **Gate model**: [`TransferGate`]
//! - **Saga model**: [`PendingOutboundTransfer`], [`OutboundState`]
//! - **Collaborators**: [`RestrictionSource`], [`Foundry`], [`Relay`], [`Ledger`]
//! - **Ledger records**: [`CreationRecord`], [`TradeRecord`], [`GraduationRecord`]
//! - **Configuration**: [`AssetConfig`], [`RegistryConfig`]
//! - **Errors**: [`LaunchgateError`] with `LG_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod ids;
pub mod ledger;
pub mod pending;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-export all primary types at crate root for ergonomic imports:
//   use launchgate_types::{Address, Nonce, TransferGate, ...};

pub use amount::*;
pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use gate::*;
pub use ids::*;
pub use ledger::*;
pub use pending::*;

// Constants are accessed via `launchgate_types::constants::FOO`
// (not re-exported to avoid name collisions).
