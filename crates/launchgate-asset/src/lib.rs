//! # launchgate-asset
//!
//! The graduation-gated asset and its side of the cross-domain transfer
//! protocol.
//!
//! ## Architecture
//!
//! [`RestrictedAsset`] owns all per-deployment state:
//! - balances and allowances, with the transfer gate in front of them
//! - the append-only [`HolderIndex`]
//! - the [`CrossDomainTransferSaga`] (routes, pending table, resolved nonces)
//! - the [`SupplyConservation`] tracker, checkable after any entry point
//!
//! Restriction decisions, pool data, message transport and statistics are
//! delegated to the collaborator traits from `launchgate-types`.

pub mod allowances;
pub mod asset;
pub mod balances;
pub mod codec;
pub mod holders;
pub mod permit;
pub mod resolved;
pub mod saga;
pub mod supply_conservation;

pub use asset::{Collaborators, DispatchOptions, RestrictedAsset};
pub use codec::TransferPayload;
pub use holders::HolderIndex;
pub use permit::{Permit, SignedPermit};
pub use saga::CrossDomainTransferSaga;
pub use supply_conservation::SupplyConservation;
