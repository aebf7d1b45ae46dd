//! Per-holder balance book.
//!
//! Tracks balances and the running total supply. All mutations are atomic:
//! either the full operation succeeds or the book is unchanged.

use std::collections::HashMap;

use launchgate_types::{Address, Amount, LaunchgateError, Result};

/// Source of truth for holder balances on this domain.
#[derive(Debug, Default)]
pub struct BalanceBook {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl BalanceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new units for `holder`.
    ///
    /// # Errors
    /// Returns `SupplyOverflow` if the total supply would overflow.
    pub fn mint(&mut self, holder: Address, amount: Amount) -> Result<()> {
        let total = self
            .total_supply
            .checked_add(amount)
            .ok_or(LaunchgateError::SupplyOverflow)?;
        // A holder balance never exceeds the total supply, so this cannot overflow.
        *self.balances.entry(holder).or_default() += amount;
        self.total_supply = total;
        Ok(())
    }

    /// Destroy `amount` units held by `holder`.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the holder has less than `amount`.
    pub fn burn(&mut self, holder: Address, amount: Amount) -> Result<()> {
        self.ensure_available(holder, amount)?;
        if let Some(balance) = self.balances.get_mut(&holder) {
            *balance -= amount;
        }
        self.total_supply -= amount;
        Ok(())
    }

    /// Give back units removed by a [`burn`](Self::burn) in the same call.
    pub(crate) fn restore(&mut self, holder: Address, amount: Amount) {
        let balance = self.balances.entry(holder).or_default();
        *balance = balance.saturating_add(amount);
        self.total_supply = self.total_supply.saturating_add(amount);
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `from` has less than `amount`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.ensure_available(from, amount)?;
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    /// # Errors
    /// Returns `InsufficientBalance` if `holder` has less than `amount`.
    pub fn ensure_available(&self, holder: Address, amount: Amount) -> Result<()> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(LaunchgateError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn balance_of(&self, holder: Address) -> Amount {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Sum of every balance, recomputed from scratch.
    #[must_use]
    pub fn sum_of_balances(&self) -> Amount {
        self.balances
            .values()
            .fold(0u128, |acc, &b| acc.saturating_add(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address([byte; 20])
    }

    #[test]
    fn mint_increases_balance_and_supply() {
        let mut book = BalanceBook::new();
        book.mint(addr(1), 1000).unwrap();
        assert_eq!(book.balance_of(addr(1)), 1000);
        assert_eq!(book.total_supply(), 1000);
    }

    #[test]
    fn mint_overflow_is_rejected() {
        let mut book = BalanceBook::new();
        book.mint(addr(1), u128::MAX).unwrap();
        let err = book.mint(addr(2), 1).unwrap_err();
        assert!(matches!(err, LaunchgateError::SupplyOverflow));
        assert_eq!(book.balance_of(addr(2)), 0);
    }

    #[test]
    fn burn_insufficient_fails_unchanged() {
        let mut book = BalanceBook::new();
        book.mint(addr(1), 100).unwrap();
        let err = book.burn(addr(1), 200).unwrap_err();
        assert!(matches!(
            err,
            LaunchgateError::InsufficientBalance {
                needed: 200,
                available: 100
            }
        ));
        assert_eq!(book.balance_of(addr(1)), 100);
        assert_eq!(book.total_supply(), 100);
    }

    #[test]
    fn burn_then_restore_is_identity() {
        let mut book = BalanceBook::new();
        book.mint(addr(1), 1000).unwrap();
        book.burn(addr(1), 300).unwrap();
        assert_eq!(book.balance_of(addr(1)), 700);
        book.restore(addr(1), 300);
        assert_eq!(book.balance_of(addr(1)), 1000);
        assert_eq!(book.total_supply(), 1000);
    }

    #[test]
    fn transfer_moves_without_changing_supply() {
        let mut book = BalanceBook::new();
        book.mint(addr(1), 1000).unwrap();
        book.transfer(addr(1), addr(2), 400).unwrap();
        assert_eq!(book.balance_of(addr(1)), 600);
        assert_eq!(book.balance_of(addr(2)), 400);
        assert_eq!(book.total_supply(), 1000);
        assert_eq!(book.sum_of_balances(), 1000);
    }

    #[test]
    fn transfer_from_empty_fails() {
        let mut book = BalanceBook::new();
        let err = book.transfer(addr(9), addr(2), 1).unwrap_err();
        assert!(matches!(err, LaunchgateError::InsufficientBalance { .. }));
        assert_eq!(book.balance_of(addr(2)), 0);
    }

    #[test]
    fn nonexistent_balance_is_zero() {
        let book = BalanceBook::new();
        assert_eq!(book.balance_of(addr(3)), 0);
        assert_eq!(book.sum_of_balances(), 0);
    }
}
