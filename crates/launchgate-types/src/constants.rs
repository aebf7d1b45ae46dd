//! System-wide constants for Launchgate.

/// Default number of decimal places for a newly created asset.
pub const DEFAULT_PRECISION: u8 = 18;

/// Largest precision an asset may declare (the scale limit of `Decimal`).
pub const MAX_PRECISION: u8 = 28;

/// Creation-code hash of the standard two-asset pool contract.
///
/// Both supported pool families deploy byte-identical pair bytecode, so a
/// single hash covers every known factory.
pub const PAIR_INIT_CODE_HASH: [u8; 32] = [
    0x96, 0xe8, 0xac, 0x42, 0x77, 0x19, 0x8f, 0xf8, 0xb6, 0xf7, 0x85, 0x47, 0x8a, 0xa9, 0xa3, 0x9f,
    0x40, 0x3c, 0xb7, 0x68, 0xdd, 0x02, 0xcb, 0xee, 0x32, 0x6c, 0x3e, 0x7d, 0xa3, 0x48, 0x84, 0x5f,
];

/// Leading byte of the deterministic deployment preimage.
pub const CREATE2_PREFIX: u8 = 0xff;

/// Allowance value treated as unlimited (never decremented on spend).
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

/// Number of resolved nonces remembered per asset before the oldest is evicted.
pub const RESOLVED_NONCE_HISTORY_SIZE: usize = 10_000;

/// Domain tag prefixed to every permit signing payload.
pub const PERMIT_DOMAIN_TAG: &[u8] = b"launchgate:permit:v1:";

/// Encoded size of a cross-domain transfer payload: two 32-byte words.
pub const TRANSFER_PAYLOAD_LEN: usize = 64;
