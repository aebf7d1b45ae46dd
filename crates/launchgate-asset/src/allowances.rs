//! Spending authorizations: `(owner, spender) → amount`.
//!
//! [`UNLIMITED_ALLOWANCE`](launchgate_types::constants::UNLIMITED_ALLOWANCE)
//! is never decremented when spent.

use std::collections::HashMap;

use launchgate_types::{Address, Amount, LaunchgateError, Result, constants};

#[derive(Debug, Default)]
pub struct AllowanceBook {
    allowances: HashMap<(Address, Address), Amount>,
}

impl AllowanceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(0)
    }

    /// Consume `amount` of the spender's allowance.
    ///
    /// # Errors
    /// Returns `InsufficientAllowance` if the allowance is below `amount`.
    pub fn spend(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<()> {
        let current = self.allowance(owner, spender);
        if current == constants::UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        if current < amount {
            return Err(LaunchgateError::InsufficientAllowance {
                needed: amount,
                available: current,
            });
        }
        self.set(owner, spender, current - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address([1; 20]);
    const SPENDER: Address = Address([2; 20]);

    #[test]
    fn spend_decrements() {
        let mut book = AllowanceBook::new();
        book.set(OWNER, SPENDER, 500);
        book.spend(OWNER, SPENDER, 200).unwrap();
        assert_eq!(book.allowance(OWNER, SPENDER), 300);
    }

    #[test]
    fn unlimited_is_never_decremented() {
        let mut book = AllowanceBook::new();
        book.set(OWNER, SPENDER, constants::UNLIMITED_ALLOWANCE);
        book.spend(OWNER, SPENDER, 1_000_000).unwrap();
        assert_eq!(
            book.allowance(OWNER, SPENDER),
            constants::UNLIMITED_ALLOWANCE
        );
    }

    #[test]
    fn overspend_fails_unchanged() {
        let mut book = AllowanceBook::new();
        book.set(OWNER, SPENDER, 50);
        let err = book.spend(OWNER, SPENDER, 51).unwrap_err();
        assert!(matches!(
            err,
            LaunchgateError::InsufficientAllowance {
                needed: 51,
                available: 50
            }
        ));
        assert_eq!(book.allowance(OWNER, SPENDER), 50);
    }

    #[test]
    fn allowance_is_directional() {
        let mut book = AllowanceBook::new();
        book.set(OWNER, SPENDER, 10);
        assert_eq!(book.allowance(SPENDER, OWNER), 0);
    }
}
