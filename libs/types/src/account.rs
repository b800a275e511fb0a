//! Account and balance types
//!
//! One account per address. Balance is never negative.

use crate::address::Address;
use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// Account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub balance: Amount,
}

impl Account {
    pub fn new(address: Address, balance: Amount) -> Self {
        Self { address, balance }
    }

    /// Whether the account can cover a debit of `amount`
    pub fn can_cover(&self, amount: Amount) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let account = Account::new(Address::random(), Amount::from(100));
        assert_eq!(account.balance, Amount::from(100));
    }

    #[test]
    fn test_can_cover() {
        let account = Account::new(Address::random(), Amount::from(60));
        assert!(account.can_cover(Amount::from(60)));
        assert!(account.can_cover(Amount::from(40)));
        assert!(!account.can_cover(Amount::from(1000)));
    }
}
