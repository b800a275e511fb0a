//! Wallet address type
//!
//! An address is `0x` followed by 40 hex characters (20 bytes), 42
//! characters in total. Addresses are immutable once an account is created.

use crate::errors::LedgerError;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address prefix
pub const ADDRESS_PREFIX: &str = "0x";

/// Number of random bytes behind an address
pub const ADDRESS_BYTES: usize = 20;

/// Full textual length: prefix + hex digits
pub const ADDRESS_LEN: usize = ADDRESS_PREFIX.len() + ADDRESS_BYTES * 2;

/// Validated wallet address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address string.
    pub fn parse(s: impl Into<String>) -> Result<Self, LedgerError> {
        let s = s.into();
        if s.len() != ADDRESS_LEN {
            return Err(LedgerError::InvalidInput(format!(
                "address must be {} characters, got {}",
                ADDRESS_LEN,
                s.len()
            )));
        }
        let Some(digits) = s.strip_prefix(ADDRESS_PREFIX) else {
            return Err(LedgerError::InvalidInput(format!(
                "address must start with {}",
                ADDRESS_PREFIX
            )));
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LedgerError::InvalidInput(
                "address must be hex-encoded".to_string(),
            ));
        }
        Ok(Self(s))
    }

    /// Draw a fresh address from the OS random number generator.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rngs::OsRng)
    }

    /// Draw a fresh address from the given RNG.
    pub fn random_with<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; ADDRESS_BYTES];
        rng.fill_bytes(&mut bytes);
        Self(format!("{}{}", ADDRESS_PREFIX, hex::encode(bytes)))
    }

    /// Generate `count` random addresses.
    pub fn generate(count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::random()).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_random_address_format() {
        let address = Address::random();
        assert_eq!(address.as_str().len(), ADDRESS_LEN);
        assert!(address.as_str().starts_with("0x"));
        assert!(Address::parse(address.as_str()).is_ok());
    }

    #[test]
    fn test_generate_distinct() {
        let addresses = Address::generate(10);
        assert_eq!(addresses.len(), 10);
        let mut sorted = addresses.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 10, "random addresses should not collide");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = Address::parse("0x1234").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        let s = "1x".to_string() + &"a".repeat(40);
        assert!(Address::parse(s).is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let s = "0x".to_string() + &"g".repeat(40);
        assert!(Address::parse(s).is_err());
    }

    #[test]
    fn test_parse_accepts_mixed_case() {
        let s = "0x".to_string() + &"aB".repeat(20);
        assert!(Address::parse(s).is_ok());
    }

    #[test]
    fn test_address_serialization() {
        let address = Address::random();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));

        let bad: Result<Address, _> = serde_json::from_str("\"0xnope\"");
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn prop_any_twenty_bytes_make_a_valid_address(bytes in proptest::array::uniform20(any::<u8>())) {
            let s = format!("0x{}", hex::encode(bytes));
            prop_assert!(Address::parse(s).is_ok());
        }
    }
}
