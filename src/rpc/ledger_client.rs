use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

use super::BatchAccountFetcher;
use crate::error::{ResolverError, Result};

/// Un "wrapper" autour du RpcClient de Solana, réduit à la lecture groupée.
/// Pas de ré-essai : un échec de l'appel est fatal pour le run.
#[derive(Clone)]
pub struct LedgerClient {
    client: Arc<RpcClient>,
}

impl LedgerClient {
    pub fn new(rpc_url: String, timeout: Duration, commitment: CommitmentConfig) -> Self {
        Self {
            client: Arc::new(RpcClient::new_with_timeout_and_commitment(rpc_url, timeout, commitment)),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl BatchAccountFetcher for LedgerClient {
    async fn fetch_all(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Account>>> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = addresses.len(), url = %self.client.url(), "get_multiple_accounts");
        let accounts = self
            .client
            .get_multiple_accounts(addresses)
            .await
            .map_err(|e| ResolverError::Fetch {
                requested: addresses.len(),
                reason: e.to_string(),
            })?;

        if accounts.len() != addresses.len() {
            return Err(ResolverError::Fetch {
                requested: addresses.len(),
                reason: format!("le nœud a renvoyé {} entrées", accounts.len()),
            });
        }

        let found = accounts.iter().filter(|a| a.is_some()).count();
        info!(requested = addresses.len(), found, "Comptes Arrow récupérés");
        Ok(accounts)
    }
}
