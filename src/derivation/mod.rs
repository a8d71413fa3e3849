// src/derivation/mod.rs

use futures_util::{StreamExt, TryStreamExt, stream};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::error::{ResolverError, Result};

pub mod arrow;
pub mod associated_token;

pub use arrow::ArrowAddressDeriver;
pub use associated_token::SplAssociatedTokenResolver;

/// Calcule l'adresse secondaire (PDA) attachée à un mint. Pure et totale.
pub trait AddressDeriver: Send + Sync {
    fn derive(&self, mint: &Pubkey) -> Pubkey;
}

/// Calcule l'adresse de dépôt canonique d'un couple (mint, owner). Pure.
pub trait AssociatedAddressResolver: Send + Sync {
    fn resolve(&self, mint: &Pubkey, owner: &Pubkey) -> Pubkey;
}

/// Dérive toutes les adresses en parallèle (au plus `max_concurrency` tâches à la fois).
/// Le résultat est dans le même ordre que `mints`.
pub async fn derive_all(
    deriver: Arc<dyn AddressDeriver>,
    mints: &[Pubkey],
    max_concurrency: usize,
) -> Result<Vec<Pubkey>> {
    stream::iter(mints.to_vec())
        .map(|mint| {
            let deriver = Arc::clone(&deriver);
            tokio::task::spawn_blocking(move || deriver.derive(&mint))
        })
        .buffered(max_concurrency.max(1))
        .map_err(ResolverError::from)
        .try_collect()
        .await
}

/// Résout chaque couple (mint, owner) en parallèle, ordre conservé.
pub async fn resolve_all(
    resolver: Arc<dyn AssociatedAddressResolver>,
    pairs: &[(Pubkey, Pubkey)],
    max_concurrency: usize,
) -> Result<Vec<Pubkey>> {
    stream::iter(pairs.to_vec())
        .map(|(mint, owner)| {
            let resolver = Arc::clone(&resolver);
            tokio::task::spawn_blocking(move || resolver.resolve(&mint, &owner))
        })
        .buffered(max_concurrency.max(1))
        .map_err(ResolverError::from)
        .try_collect()
        .await
}
