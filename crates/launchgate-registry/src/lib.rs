//! # launchgate-registry
//!
//! Decides, without trusting any live query, whether an address is (or will
//! become) an AMM pool for a given asset.
//!
//! ## Architecture
//!
//! - **PairAddressOracle**: live factory lookup first, then deterministic
//!   two-stage hash derivation of the pool address
//! - **RestrictionRegistry**: owner-curated known factories plus an explicit
//!   restricted list; implements [`launchgate_types::RestrictionSource`]
//!
//! ```text
//! RestrictedAsset → RestrictionSource::is_restricted(token, to)
//!     → explicit list ∪ { derive(factory, token, base) | factory ∈ known }
//! ```

pub mod pair_oracle;
pub mod registry;

pub use pair_oracle::{
    DerivedPair, NoLivePairs, PairAddressDeriver, PairAddressOracle, PairLookup,
    compute_pair_address, sort_tokens,
};
pub use registry::RestrictionRegistry;
