//! Error types for Launchgate.
//!
//! All errors use the `LG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by category:
//! - 1xx: Authorization errors
//! - 2xx: Validation errors
//! - 3xx: Resource (balance / allowance) errors
//! - 4xx: Relay protocol errors
//! - 8xx: Safety invariant errors
//! - 9xx: General / internal errors
//!
//! Every failing entry point leaves state untouched. Acknowledgments for
//! unknown nonces are not errors at all; they are absorbed as no-ops.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Address, Amount, Nonce};

/// Central error enum for all Launchgate operations.
#[derive(Debug, Error)]
pub enum LaunchgateError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller may not perform this operation, or the operation is
    /// disabled in the current gate state.
    #[error("LG_ERR_100: Forbidden: {reason}")]
    Forbidden { reason: String },

    /// A foundry-only operation was called by someone else.
    #[error("LG_ERR_101: Caller {caller} is not the foundry")]
    NotFoundry { caller: Address },

    /// A relay callback was invoked by someone other than the relay.
    #[error("LG_ERR_102: Caller {caller} is not the relay")]
    NotRelay { caller: Address },

    // =================================================================
    // Validation Errors (2xx)
    // =================================================================
    /// Paired input slices have different lengths.
    #[error("LG_ERR_200: Length mismatch: {left} entries vs {right} entries")]
    LengthMismatch { left: usize, right: usize },

    /// A cross-domain payload could not be decoded.
    #[error("LG_ERR_201: Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// The permit deadline has passed.
    #[error("LG_ERR_202: Permit expired at {deadline}")]
    PermitExpired { deadline: DateTime<Utc> },

    /// The permit signature or signer key is invalid.
    #[error("LG_ERR_203: Invalid permit signature: {reason}")]
    InvalidSignature { reason: String },

    /// The permit nonce is not the owner's current nonce.
    #[error("LG_ERR_204: Permit nonce mismatch: expected {expected}, got {actual}")]
    PermitNonceMismatch { expected: u64, actual: u64 },

    // =================================================================
    // Resource Errors (3xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("LG_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// Not enough allowance to spend on the owner's behalf.
    #[error("LG_ERR_301: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    /// A mint would overflow the total supply.
    #[error("LG_ERR_302: Supply overflow")]
    SupplyOverflow,

    // =================================================================
    // Relay Protocol Errors (4xx)
    // =================================================================
    /// The relay refused to dispatch a message.
    #[error("LG_ERR_400: Dispatch failed: {reason}")]
    DispatchFailed { reason: String },

    /// The relay returned a nonce that is already pending.
    #[error("LG_ERR_401: Relay reused a pending nonce: {0}")]
    DuplicateNonce(Nonce),

    // =================================================================
    // Safety Errors (8xx)
    // =================================================================
    /// Supply conservation invariant violated. Critical safety alert.
    #[error("LG_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("LG_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("LG_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("LG_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl LaunchgateError {
    /// Shorthand for [`LaunchgateError::Forbidden`].
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LaunchgateError>;

impl From<serde_json::Error> for LaunchgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
