// src/aggregation/mod.rs

use serde::{Serialize, Serializer};
use solana_sdk::pubkey::Pubkey;
use std::{collections::HashMap, fmt};

use crate::data_pipeline::registry::MintRegistry;
use crate::decoders::DecodedArrow;

pub mod output;
pub(crate) mod serde_pubkey;

pub use output::{FlatTokenAccount, FlatTokenAccounts, GroupedTokenAccounts, OutputMode, TokenAccountsDocument};

/// Lequel des deux propriétaires fixes a servi à résoudre le compte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerRole {
    Treasury,
    Vault,
}

/// Clé de regroupement d'un compte de jetons.
/// L'ID de référence externe l'emporte toujours sur le pool décodé.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassificationKey {
    Reference(String),
    Pool(Pubkey),
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationKey::Reference(id) => f.write_str(id),
            ClassificationKey::Pool(pool) => write!(f, "{}", pool),
        }
    }
}

impl Serialize for ClassificationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Un compte (mint, owner) résolu, avec sa classification éventuelle.
/// C'est l'ensemble intermédiaire dont dérivent les deux formes de sortie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub mint: Pubkey,
    pub owner_role: OwnerRole,
    pub account: Pubkey,
    pub classification: Option<ClassificationKey>,
}

/// Table mint -> enregistrement Arrow. À mint égal, le premier enregistrement gagne.
pub fn index_by_mint(records: impl IntoIterator<Item = DecodedArrow>) -> HashMap<Pubkey, DecodedArrow> {
    let mut by_mint = HashMap::new();
    for record in records {
        by_mint.entry(record.mint).or_insert(record);
    }
    by_mint
}

pub fn classify(
    mint: &Pubkey,
    registry: &MintRegistry,
    records: &HashMap<Pubkey, DecodedArrow>,
) -> Option<ClassificationKey> {
    if let Some(reference_id) = registry.reference_id(mint) {
        return Some(ClassificationKey::Reference(reference_id.to_string()));
    }
    records
        .get(mint)
        .and_then(|record| record.pool)
        .map(ClassificationKey::Pool)
}

/// Attache une classification à chaque triplet (mint, owner, compte). L'ordre d'entrée est conservé.
pub fn join(
    resolved: &[(Pubkey, OwnerRole, Pubkey)],
    records: &HashMap<Pubkey, DecodedArrow>,
    registry: &MintRegistry,
) -> Vec<ResolvedAccount> {
    resolved
        .iter()
        .map(|(mint, owner_role, account)| ResolvedAccount {
            mint: *mint,
            owner_role: *owner_role,
            account: *account,
            classification: classify(mint, registry, records),
        })
        .collect()
}
