// src/data_pipeline/registry.rs

use indexmap::IndexMap;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::error::{ResolverError, Result};

/// Les mints des tokens Arrow détenus par la trésorerie.
pub const MAINNET_ARROW_MINTS: &[&str] = &[
    // USDC-USDT
    "USD9oeJpVZ8XXF9L884ZEsw7VXTSguNXboxsEi1fHrE",
];

/// Tokens connus qui arriveront dans la Bank en tant que récompenses.
/// La valeur est l'ID coingecko.
pub const KNOWN_REWARDS_TOKENS: &[(&str, &str)] = &[
    // SUNNY IOU
    ("SRYWvj5Xw1UoivpdfJN4hFZU1qbtceMvfM5nBc3PsRC", "sunny-aggregator"),
    // SBR IOU
    ("iouQcQBAiEXe6cKLS85zmZxUqaCqBdeHFpqKoSz615u", "saber"),
];

/// Bank cashio : PDA bankman [b"Bank", CRATE_TOKEN].
pub const BANK_KEY: &str = "Em1PdaWY1NSpyGgKUstvZu3HzJNe9d15c3dePzBr9QwM";

/// Crate token du CASH : PDA crate-token [b"CrateToken", CASH_MINT].
pub const CRATE_TOKEN: &str = "J77Nq48nbq4Etf1voss38R3dTdR3yD7y5F6W6TaVHvmb";

/// Configuration statique d'un run : les mints à résoudre et les deux propriétaires.
/// On la passe explicitement au pipeline pour pouvoir le tester avec d'autres fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRegistry {
    pub primary_mints: Vec<Pubkey>,
    /// mint de récompense -> ID de référence externe (coingecko).
    pub reward_mints: IndexMap<Pubkey, String>,
    /// Propriétaire "trésorerie" (Bank) : mints primaires + récompenses.
    pub treasury: Pubkey,
    /// Propriétaire "vault" (Crate token) : mints primaires uniquement.
    pub vault: Pubkey,
}

impl MintRegistry {
    pub fn mainnet() -> Result<Self> {
        Self::from_literals(MAINNET_ARROW_MINTS, KNOWN_REWARDS_TOKENS, BANK_KEY, CRATE_TOKEN)
    }

    pub fn from_literals(
        primary_mints: &[&str],
        reward_mints: &[(&str, &str)],
        treasury: &str,
        vault: &str,
    ) -> Result<Self> {
        let primary_mints = primary_mints
            .iter()
            .map(|m| parse_pubkey("mint primaire", m))
            .collect::<Result<Vec<_>>>()?;

        let mut rewards = IndexMap::with_capacity(reward_mints.len());
        for (mint, reference_id) in reward_mints {
            let mint = parse_pubkey("mint de récompense", mint)?;
            if reference_id.trim().is_empty() {
                return Err(ResolverError::configuration(
                    format!("mint de récompense {}", mint),
                    "ID de référence vide",
                ));
            }
            rewards.insert(mint, reference_id.to_string());
        }

        Ok(Self {
            primary_mints,
            reward_mints: rewards,
            treasury: parse_pubkey("propriétaire trésorerie", treasury)?,
            vault: parse_pubkey("propriétaire vault", vault)?,
        })
    }

    /// Mints interrogés pour la trésorerie : primaires puis récompenses, dans l'ordre déclaré.
    pub fn treasury_mints(&self) -> Vec<Pubkey> {
        self.primary_mints
            .iter()
            .chain(self.reward_mints.keys())
            .copied()
            .collect()
    }

    pub fn vault_mints(&self) -> Vec<Pubkey> {
        self.primary_mints.clone()
    }

    pub fn reference_id(&self, mint: &Pubkey) -> Option<&str> {
        self.reward_mints.get(mint).map(String::as_str)
    }
}

fn parse_pubkey(what: &str, literal: &str) -> Result<Pubkey> {
    Pubkey::from_str(literal)
        .map_err(|e| ResolverError::configuration(format!("{} '{}'", what, literal), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mainnet_registry_parses() {
        let registry = MintRegistry::mainnet().unwrap();
        assert_eq!(registry.primary_mints.len(), 1);
        assert_eq!(registry.reward_mints.len(), 2);
        assert_eq!(
            registry.reference_id(&Pubkey::from_str("iouQcQBAiEXe6cKLS85zmZxUqaCqBdeHFpqKoSz615u").unwrap()),
            Some("saber")
        );
    }

    #[test]
    fn treasury_mints_are_a_superset_of_vault_mints() {
        let registry = MintRegistry::mainnet().unwrap();
        let treasury: HashSet<_> = registry.treasury_mints().into_iter().collect();
        let vault: HashSet<_> = registry.vault_mints().into_iter().collect();
        assert!(vault.is_subset(&treasury));
        assert!(treasury.len() > vault.len());
        // Les primaires d'abord, puis les récompenses dans l'ordre déclaré.
        assert_eq!(registry.treasury_mints()[0], registry.primary_mints[0]);
        assert_eq!(
            registry.treasury_mints()[1],
            Pubkey::from_str(KNOWN_REWARDS_TOKENS[0].0).unwrap()
        );
    }

    #[test]
    fn malformed_literal_is_a_configuration_error() {
        let err = MintRegistry::from_literals(&["pas-une-cle"], &[], BANK_KEY, CRATE_TOKEN).unwrap_err();
        assert!(matches!(err, ResolverError::Configuration { .. }));

        let err = MintRegistry::from_literals(MAINNET_ARROW_MINTS, &[], "0OIl", CRATE_TOKEN).unwrap_err();
        assert!(matches!(err, ResolverError::Configuration { .. }));
    }

    #[test]
    fn empty_reference_id_is_rejected() {
        let err = MintRegistry::from_literals(
            MAINNET_ARROW_MINTS,
            &[("SRYWvj5Xw1UoivpdfJN4hFZU1qbtceMvfM5nBc3PsRC", " ")],
            BANK_KEY,
            CRATE_TOKEN,
        )
        .unwrap_err();
        assert!(matches!(err, ResolverError::Configuration { .. }));
    }
}
