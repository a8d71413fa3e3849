// src/data_pipeline/token_accounts.rs

use solana_sdk::{account::Account, pubkey::Pubkey};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::registry::MintRegistry;
use crate::artifacts::{ArtifactPaths, ArtifactWriter};
use crate::aggregation::{
    self, FlatTokenAccounts, GroupedTokenAccounts, OutputMode, OwnerRole, ResolvedAccount,
    TokenAccountsDocument,
};
use crate::decoders::{AccountDecoder, ArrowDecoder, DecodeFailurePolicy, DecodedArrow};
use crate::derivation::{
    self, AddressDeriver, ArrowAddressDeriver, AssociatedAddressResolver, SplAssociatedTokenResolver,
};
use crate::error::{ResolverError, Result};
use crate::rpc::{self, BatchAccountFetcher};

const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Tout ce que le run a calculé en mémoire, prêt à être écrit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub arrow_mints: Vec<Pubkey>,
    /// Comptes trésorerie d'abord, puis comptes vault ; mints dans l'ordre de configuration.
    pub accounts: Vec<ResolvedAccount>,
}

impl PipelineOutput {
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn grouped(&self) -> GroupedTokenAccounts {
        GroupedTokenAccounts::from_accounts(&self.accounts)
    }

    pub fn flat(&self) -> FlatTokenAccounts {
        FlatTokenAccounts::from_accounts(&self.accounts)
    }

    pub fn document(&self, mode: OutputMode) -> TokenAccountsDocument {
        TokenAccountsDocument::build(&self.accounts, mode)
    }
}

/// Dérivation -> lecture groupée -> décodage, puis résolution des ATA et agrégation.
pub struct TokenAccountPipeline<F> {
    fetcher: F,
    deriver: Arc<dyn AddressDeriver>,
    decoder: Arc<dyn AccountDecoder>,
    resolver: Arc<dyn AssociatedAddressResolver>,
    decode_failure_policy: DecodeFailurePolicy,
    max_concurrency: usize,
}

impl<F: BatchAccountFetcher> TokenAccountPipeline<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            deriver: Arc::new(ArrowAddressDeriver::default()),
            decoder: Arc::new(ArrowDecoder::default()),
            resolver: Arc::new(SplAssociatedTokenResolver::default()),
            decode_failure_policy: DecodeFailurePolicy::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_deriver(mut self, deriver: impl AddressDeriver + 'static) -> Self {
        self.deriver = Arc::new(deriver);
        self
    }

    pub fn with_decoder(mut self, decoder: impl AccountDecoder + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    pub fn with_resolver(mut self, resolver: impl AssociatedAddressResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_decode_failure_policy(mut self, policy: DecodeFailurePolicy) -> Self {
        self.decode_failure_policy = policy;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    #[instrument(name = "token_accounts", skip_all, fields(arrow_mints = registry.primary_mints.len()))]
    pub async fn run(&self, registry: &MintRegistry) -> Result<PipelineOutput> {
        // --- 1. Toutes les adresses Arrow doivent être connues avant la lecture ---
        let arrow_keys =
            derivation::derive_all(Arc::clone(&self.deriver), &registry.primary_mints, self.max_concurrency).await?;

        // --- 2. Une seule lecture groupée ; son échec arrête le run ---
        let accounts = self.fetcher.fetch_all(&arrow_keys).await?;
        if accounts.len() != arrow_keys.len() {
            return Err(ResolverError::Fetch {
                requested: arrow_keys.len(),
                reason: format!("{} résultats reçus", accounts.len()),
            });
        }
        let arrows = rpc::pair_with_keys(&arrow_keys, accounts);

        // --- 3. Décodage et résolution des ATA en parallèle ---
        let targets = resolution_targets(registry);
        let pairs: Vec<(Pubkey, Pubkey)> = targets.iter().map(|(mint, _, owner)| (*mint, *owner)).collect();

        let decoder = Arc::clone(&self.decoder);
        let policy = self.decode_failure_policy;
        let (records, addresses) = tokio::join!(
            tokio::task::spawn_blocking(move || decode_all(&*decoder, arrows, policy)),
            derivation::resolve_all(Arc::clone(&self.resolver), &pairs, self.max_concurrency),
        );
        let records = records??;
        let addresses = addresses?;

        // --- 4. Jointure par mint et classification ---
        let by_mint = aggregation::index_by_mint(records);
        let triples: Vec<(Pubkey, OwnerRole, Pubkey)> = targets
            .iter()
            .zip(addresses)
            .map(|((mint, role, _), account)| (*mint, *role, account))
            .collect();
        let accounts = aggregation::join(&triples, &by_mint, registry);

        info!(
            decoded = by_mint.len(),
            accounts = accounts.len(),
            classified = accounts.iter().filter(|a| a.classification.is_some()).count(),
            "Agrégation terminée"
        );

        Ok(PipelineOutput {
            arrow_mints: registry.primary_mints.clone(),
            accounts,
        })
    }

    /// `run`, puis écriture des deux fichiers. Rien n'est écrit si le run échoue.
    pub async fn run_and_write(
        &self,
        registry: &MintRegistry,
        writer: &ArtifactWriter,
        mode: OutputMode,
    ) -> Result<(PipelineOutput, ArtifactPaths)> {
        let output = self.run(registry).await?;
        let paths = writer.write(&output, mode)?;
        Ok((output, paths))
    }
}

/// (mint, rôle, owner) pour chaque ATA à résoudre : trésorerie sur primaires + récompenses,
/// puis vault sur primaires seulement.
pub fn resolution_targets(registry: &MintRegistry) -> Vec<(Pubkey, OwnerRole, Pubkey)> {
    let treasury = registry
        .treasury_mints()
        .into_iter()
        .map(|mint| (mint, OwnerRole::Treasury, registry.treasury));
    let vault = registry
        .vault_mints()
        .into_iter()
        .map(|mint| (mint, OwnerRole::Vault, registry.vault));
    treasury.chain(vault).collect()
}

fn decode_all(
    decoder: &dyn AccountDecoder,
    arrows: Vec<(Pubkey, Account)>,
    policy: DecodeFailurePolicy,
) -> Result<Vec<DecodedArrow>> {
    let mut records = Vec::with_capacity(arrows.len());
    for (address, account) in arrows {
        match decoder.decode(&address, &account) {
            Ok(record) => records.push(record),
            Err(source) => match policy {
                DecodeFailurePolicy::Skip => {
                    warn!(%address, error = %source, "Compte Arrow ignoré : décodage impossible");
                }
                DecodeFailurePolicy::Abort => return Err(ResolverError::Decode { address, source }),
            },
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::arrow::ARROW_PROGRAM_ID;
    use std::collections::HashSet;

    fn arrow_account(data: Vec<u8>) -> Account {
        Account {
            lamports: 1,
            data,
            owner: ARROW_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        }
    }

    #[test]
    fn treasury_targets_cover_vault_targets() {
        let registry = MintRegistry::mainnet().unwrap();
        let targets = resolution_targets(&registry);

        let treasury: HashSet<Pubkey> = targets
            .iter()
            .filter(|(_, role, _)| *role == OwnerRole::Treasury)
            .map(|(mint, _, _)| *mint)
            .collect();
        let vault: Vec<_> = targets.iter().filter(|(_, role, _)| *role == OwnerRole::Vault).collect();

        assert_eq!(targets.len(), 4);
        assert!(vault.iter().all(|(mint, _, owner)| treasury.contains(mint) && *owner == registry.vault));
        // Les paires trésorerie passent avant les paires vault.
        assert_eq!(targets[..3].iter().filter(|t| t.1 == OwnerRole::Treasury).count(), 3);
    }

    #[test]
    fn decode_all_skips_or_aborts_on_bad_accounts() {
        let good = DecodedArrow {
            address: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            bump: 255,
            beneficiary: Pubkey::new_unique(),
            pool: Some(Pubkey::new_unique()),
            vault: Pubkey::new_unique(),
        };
        let bad_address = Pubkey::new_unique();
        let arrows = vec![
            (bad_address, arrow_account(vec![0u8; 12])),
            (good.address, arrow_account(good.to_account_data())),
        ];

        let decoder = ArrowDecoder::default();
        let skipped = decode_all(&decoder, arrows.clone(), DecodeFailurePolicy::Skip).unwrap();
        assert_eq!(skipped, vec![good]);

        let err = decode_all(&decoder, arrows, DecodeFailurePolicy::Abort).unwrap_err();
        assert!(matches!(err, ResolverError::Decode { address, .. } if address == bad_address));
    }
}
