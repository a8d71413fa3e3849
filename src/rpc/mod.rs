// src/rpc/mod.rs

use async_trait::async_trait;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::collections::HashMap;

use crate::error::{ResolverError, Result};

pub mod ledger_client;

pub use ledger_client::LedgerClient;

/// Lecture groupée de comptes. Le résultat a la même longueur et le même ordre
/// que `addresses` ; `None` signifie que le compte n'existe pas (ce n'est pas une erreur).
#[async_trait]
pub trait BatchAccountFetcher: Send + Sync {
    async fn fetch_all(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>>;
}

/// Réassocie chaque compte à sa clé de requête et écarte les absents.
pub fn pair_with_keys(keys: &[Pubkey], accounts: Vec<Option<Account>>) -> Vec<(Pubkey, Account)> {
    keys.iter()
        .copied()
        .zip(accounts)
        .filter_map(|(key, account)| account.map(|a| (key, a)))
        .collect()
}

/// Fetcher servi depuis une table en mémoire (tests, runs à blanc).
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    accounts: HashMap<Pubkey, Account>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: Pubkey, account: Account) -> Self {
        self.accounts.insert(address, account);
        self
    }
}

#[async_trait]
impl BatchAccountFetcher for InMemoryFetcher {
    async fn fetch_all(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        Ok(addresses.iter().map(|a| self.accounts.get(a).cloned()).collect())
    }
}

/// Fetcher dont l'appel groupé échoue toujours.
#[derive(Debug, Clone)]
pub struct FailingFetcher {
    pub reason: String,
}

#[async_trait]
impl BatchAccountFetcher for FailingFetcher {
    async fn fetch_all(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        Err(ResolverError::Fetch {
            requested: addresses.len(),
            reason: self.reason.clone(),
        })
    }
}
