//! Deterministic pool-address derivation.
//!
//! A standard two-asset pool is deployed by its factory at a
//! salt-determined address, so its location is known before it exists:
//!
//! ```text
//! (token0, token1) = sort(tokenA, tokenB)
//! salt             = keccak256(token0 ++ token1)
//! pair             = keccak256(0xff ++ factory ++ salt ++ PAIR_INIT_CODE_HASH)[12..]
//! ```
//!
//! Deriving the address lets the registry restrict a pool that is reserved
//! but not yet deployed, closing the window where it could be created after
//! graduation to dodge the restriction.

use launchgate_types::{Address, Result, constants};
use sha3::{Digest, Keccak256};

/// Outcome of a pool-address derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedPair {
    pub address: Address,
    /// `true` if the address came from the factory's live registry rather
    /// than from hashing.
    pub existed_on_chain: bool,
}

/// Live view of a factory's pool registry.
pub trait PairLookup: Send + Sync {
    /// The deployed pool for the pair, if any. Errors mean the query itself
    /// failed (e.g. the factory call reverted).
    fn get_pair(&self, factory: Address, token_a: Address, token_b: Address)
    -> Result<Option<Address>>;
}

/// Lookup that never finds a live pool; derivation is always used.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLivePairs;

impl PairLookup for NoLivePairs {
    fn get_pair(&self, _factory: Address, _a: Address, _b: Address) -> Result<Option<Address>> {
        Ok(None)
    }
}

/// Capability to compute where a pair of assets is (or will be) pooled.
pub trait PairAddressDeriver: Send + Sync {
    fn derive(&self, factory: Address, token_a: Address, token_b: Address) -> DerivedPair;
}

/// Canonical ordering: lexicographically smaller address first.
#[must_use]
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a <= token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// First hashing stage: `keccak256(token0 ++ token1)` over the sorted pair.
#[must_use]
pub fn pair_salt(token_a: Address, token_b: Address) -> [u8; 32] {
    let (token0, token1) = sort_tokens(token_a, token_b);
    let mut hasher = Keccak256::new();
    hasher.update(token0.as_bytes());
    hasher.update(token1.as_bytes());
    hasher.finalize().into()
}

/// Pure derivation of the pool address, without consulting any live state.
#[must_use]
pub fn compute_pair_address(factory: Address, token_a: Address, token_b: Address) -> Address {
    let salt = pair_salt(token_a, token_b);

    let mut data = Vec::with_capacity(85);
    data.push(constants::CREATE2_PREFIX);
    data.extend_from_slice(factory.as_bytes());
    data.extend_from_slice(&salt);
    data.extend_from_slice(&constants::PAIR_INIT_CODE_HASH);

    let hash = Keccak256::digest(&data);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::new(addr)
}

/// Pool-address oracle: live lookup first, deterministic derivation second.
#[derive(Debug, Clone, Default)]
pub struct PairAddressOracle<L: PairLookup = NoLivePairs> {
    lookup: L,
}

impl PairAddressOracle<NoLivePairs> {
    /// Oracle that only derives, never queries.
    #[must_use]
    pub fn offline() -> Self {
        Self { lookup: NoLivePairs }
    }
}

impl<L: PairLookup> PairAddressOracle<L> {
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }
}

impl<L: PairLookup> PairAddressDeriver for PairAddressOracle<L> {
    fn derive(&self, factory: Address, token_a: Address, token_b: Address) -> DerivedPair {
        match self.lookup.get_pair(factory, token_a, token_b) {
            Ok(Some(address)) if !address.is_zero() => {
                return DerivedPair {
                    address,
                    existed_on_chain: true,
                };
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(
                    factory = %factory,
                    error = %err,
                    "Live pair lookup failed, falling back to derivation"
                );
            }
        }
        DerivedPair {
            address: compute_pair_address(factory, token_a, token_b),
            existed_on_chain: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use launchgate_types::LaunchgateError;
    use launchgate_types::testing::random_address;

    use super::*;

    fn parse(s: &str) -> Address {
        s.parse().unwrap()
    }

    struct FixedLookup(Result<Option<Address>>);

    impl PairLookup for FixedLookup {
        fn get_pair(&self, _f: Address, _a: Address, _b: Address) -> Result<Option<Address>> {
            match &self.0 {
                Ok(found) => Ok(*found),
                Err(_) => Err(LaunchgateError::Internal("factory reverted".into())),
            }
        }
    }

    #[test]
    fn matches_known_mainnet_pair() {
        let factory = parse("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
        let usdc = parse("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        let weth = parse("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
        let expected = parse("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
        assert_eq!(compute_pair_address(factory, usdc, weth), expected);
    }

    #[test]
    fn derivation_is_symmetric_and_deterministic() {
        for _ in 0..64 {
            let factory = random_address();
            let a = random_address();
            let b = random_address();
            let ab = compute_pair_address(factory, a, b);
            assert_eq!(ab, compute_pair_address(factory, b, a));
            assert_eq!(ab, compute_pair_address(factory, a, b));
        }
    }

    #[test]
    fn different_factories_give_different_pairs() {
        let a = Address([1; 20]);
        let b = Address([2; 20]);
        assert_ne!(
            compute_pair_address(Address([10; 20]), a, b),
            compute_pair_address(Address([11; 20]), a, b)
        );
    }

    #[test]
    fn sort_tokens_orders_bytes() {
        let low = Address([0x01; 20]);
        let high = Address([0xf0; 20]);
        assert_eq!(sort_tokens(high, low), (low, high));
        assert_eq!(sort_tokens(low, high), (low, high));
    }

    #[test]
    fn offline_oracle_derives() {
        let oracle = PairAddressOracle::offline();
        let (f, a, b) = (Address([3; 20]), Address([4; 20]), Address([5; 20]));
        let derived = oracle.derive(f, a, b);
        assert!(!derived.existed_on_chain);
        assert_eq!(derived.address, compute_pair_address(f, a, b));
    }

    #[test]
    fn live_pool_takes_precedence() {
        let live = Address([0xee; 20]);
        let oracle = PairAddressOracle::new(FixedLookup(Ok(Some(live))));
        let derived = oracle.derive(Address([3; 20]), Address([4; 20]), Address([5; 20]));
        assert_eq!(derived.address, live);
        assert!(derived.existed_on_chain);
    }

    #[test]
    fn zero_live_pool_means_none() {
        let oracle = PairAddressOracle::new(FixedLookup(Ok(Some(Address::ZERO))));
        let derived = oracle.derive(Address([3; 20]), Address([4; 20]), Address([5; 20]));
        assert!(!derived.existed_on_chain);
        assert!(!derived.address.is_zero());
    }

    #[test]
    fn failed_lookup_falls_through() {
        let oracle = PairAddressOracle::new(FixedLookup(Err(LaunchgateError::Internal(
            "unused".into(),
        ))));
        let (f, a, b) = (Address([3; 20]), Address([4; 20]), Address([5; 20]));
        let derived = oracle.derive(f, a, b);
        assert!(!derived.existed_on_chain);
        assert_eq!(derived.address, compute_pair_address(f, a, b));
    }
}
