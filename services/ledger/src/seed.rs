//! Bootstrap seeding of demo accounts
//!
//! Runs once against an empty store. Failures are logged and skipped; they
//! never stop the process.

use crate::store::AccountStore;
use tracing::{error, info};
use types::address::Address;
use types::amount::Amount;

/// How many accounts to create and with what balance
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub accounts: usize,
    pub initial_balance: Amount,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            accounts: 10,
            initial_balance: Amount::from(100),
        }
    }
}

/// Create `config.accounts` random addresses if the store has none.
///
/// Returns the addresses actually created.
pub async fn seed_if_empty<S: AccountStore>(store: &S, config: &SeedConfig) -> Vec<Address> {
    match store.is_empty().await {
        Ok(true) => {}
        Ok(false) => return Vec::new(),
        Err(e) => {
            error!(error = %e, "could not check whether store is empty");
            return Vec::new();
        }
    }

    info!(count = config.accounts, "table is empty, generating addresses");

    let mut created = Vec::with_capacity(config.accounts);
    for address in Address::generate(config.accounts) {
        match store.add_account(address.as_str(), config.initial_balance).await {
            Ok(()) => {
                info!(%address, balance = %config.initial_balance, "seeded account");
                created.push(address);
            }
            Err(e) => error!(%address, error = %e, "failed to seed account"),
        }
    }
    created
}
