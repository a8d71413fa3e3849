// src/aggregation/output.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::{ClassificationKey, ResolvedAccount, serde_pubkey};

/// Forme du document `token-accounts.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Deux maps : ID coingecko -> comptes, pool Sunny -> comptes.
    #[default]
    Grouped,
    /// Une liste `{ mint, account, poolOrReferenceId? }` sans regroupement.
    Flat,
}

/// Forme A. Les comptes non classés n'y figurent pas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTokenAccounts {
    #[serde(serialize_with = "serde_pubkey::grouped::serialize")]
    pub coingecko_tokens: IndexMap<String, Vec<Pubkey>>,
    #[serde(serialize_with = "serde_pubkey::grouped::serialize")]
    pub sunny_pools: IndexMap<Pubkey, Vec<Pubkey>>,
}

impl GroupedTokenAccounts {
    /// Regroupe par clé de classification. Les clés apparaissent dans l'ordre
    /// de leur première occurrence, les comptes dans l'ordre de parcours.
    pub fn from_accounts(accounts: &[ResolvedAccount]) -> Self {
        let mut grouped = Self::default();
        for resolved in accounts {
            match &resolved.classification {
                Some(ClassificationKey::Reference(id)) => grouped
                    .coingecko_tokens
                    .entry(id.clone())
                    .or_default()
                    .push(resolved.account),
                Some(ClassificationKey::Pool(pool)) => {
                    grouped.sunny_pools.entry(*pool).or_default().push(resolved.account)
                }
                None => {}
            }
        }
        grouped
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTokenAccount {
    #[serde(serialize_with = "serde_pubkey::serialize")]
    pub mint: Pubkey,
    #[serde(serialize_with = "serde_pubkey::serialize")]
    pub account: Pubkey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_or_reference_id: Option<ClassificationKey>,
}

/// Forme B.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatTokenAccounts(pub Vec<FlatTokenAccount>);

impl FlatTokenAccounts {
    pub fn from_accounts(accounts: &[ResolvedAccount]) -> Self {
        Self(
            accounts
                .iter()
                .map(|resolved| FlatTokenAccount {
                    mint: resolved.mint,
                    account: resolved.account,
                    pool_or_reference_id: resolved.classification.clone(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenAccountsDocument {
    Grouped(GroupedTokenAccounts),
    Flat(FlatTokenAccounts),
}

impl TokenAccountsDocument {
    pub fn build(accounts: &[ResolvedAccount], mode: OutputMode) -> Self {
        match mode {
            OutputMode::Grouped => Self::Grouped(GroupedTokenAccounts::from_accounts(accounts)),
            OutputMode::Flat => Self::Flat(FlatTokenAccounts::from_accounts(accounts)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::OwnerRole;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn resolved(mint: Pubkey, role: OwnerRole, account: Pubkey, key: Option<ClassificationKey>) -> ResolvedAccount {
        ResolvedAccount { mint, owner_role: role, account, classification: key }
    }

    #[test]
    fn grouped_document_uses_base58_and_drops_unclassified() {
        let (m1, m2, pool) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let (t1, t2, t3, v1) = (
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        );
        let accounts = vec![
            resolved(m1, OwnerRole::Treasury, t1, Some(ClassificationKey::Pool(pool))),
            resolved(m2, OwnerRole::Treasury, t2, Some(ClassificationKey::Reference("saber".into()))),
            resolved(Pubkey::new_unique(), OwnerRole::Treasury, t3, None),
            resolved(m1, OwnerRole::Vault, v1, Some(ClassificationKey::Pool(pool))),
        ];

        let document = TokenAccountsDocument::build(&accounts, OutputMode::Grouped);
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({
                "coingeckoTokens": { "saber": [t2.to_string()] },
                "sunnyPools": { pool.to_string(): [t1.to_string(), v1.to_string()] },
            })
        );
    }

    #[test]
    fn flat_document_keeps_every_account() {
        let (mint, account, pool) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let other = Pubkey::new_unique();
        let accounts = vec![
            resolved(mint, OwnerRole::Treasury, account, Some(ClassificationKey::Pool(pool))),
            resolved(mint, OwnerRole::Vault, other, None),
        ];

        let document = TokenAccountsDocument::build(&accounts, OutputMode::Flat);
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!([
                { "mint": mint.to_string(), "account": account.to_string(), "poolOrReferenceId": pool.to_string() },
                { "mint": mint.to_string(), "account": other.to_string() },
            ])
        );
    }

    #[test]
    fn grouped_keys_follow_first_occurrence() {
        let (pa, pb) = (Pubkey::new_unique(), Pubkey::new_unique());
        let accounts: Vec<_> = [pb, pa, pb]
            .into_iter()
            .map(|pool| {
                resolved(Pubkey::new_unique(), OwnerRole::Treasury, Pubkey::new_unique(), Some(ClassificationKey::Pool(pool)))
            })
            .collect();

        let grouped = GroupedTokenAccounts::from_accounts(&accounts);
        let keys: Vec<_> = grouped.sunny_pools.keys().copied().collect();
        assert_eq!(keys, vec![pb, pa]);
        assert_eq!(grouped.sunny_pools[&pb], vec![accounts[0].account, accounts[2].account]);
    }
}
