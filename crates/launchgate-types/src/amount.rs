//! Amount types for Launchgate balances.
//!
//! Balances, allowances, and transfer amounts are raw base units. Values
//! meant for people (market caps, display balances) are `Decimal`s scaled by
//! the asset's precision.

use rust_decimal::Decimal;

use crate::{LaunchgateError, Result, constants};

/// Raw base units of an asset.
pub type Amount = u128;

/// Convert base units to a human-facing decimal at the given precision.
///
/// # Errors
/// Returns [`LaunchgateError::Configuration`] if `precision` exceeds
/// [`constants::MAX_PRECISION`] or the amount does not fit in a `Decimal`.
pub fn format_units(amount: Amount, precision: u8) -> Result<Decimal> {
    if precision > constants::MAX_PRECISION {
        return Err(LaunchgateError::Configuration(format!(
            "precision {precision} exceeds maximum {}",
            constants::MAX_PRECISION
        )));
    }
    let mantissa = i128::try_from(amount)
        .map_err(|_| LaunchgateError::Internal(format!("amount {amount} exceeds i128")))?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(precision))
        .map_err(|e| LaunchgateError::Internal(format!("amount {amount} not representable: {e}")))
}
