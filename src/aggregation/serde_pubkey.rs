//! Sérialisation des `Pubkey` en base58 (le `Serialize` natif produit des octets).

use indexmap::IndexMap;
use serde::{Serializer, ser::SerializeMap};
use solana_sdk::pubkey::Pubkey;
use std::fmt::Display;

pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}

/// `{ clé: [compte, ...] }`, clé et comptes rendus comme chaînes.
pub mod grouped {
    use super::*;

    pub fn serialize<K, S>(groups: &IndexMap<K, Vec<Pubkey>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Display,
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for (key, accounts) in groups {
            let accounts: Vec<String> = accounts.iter().map(Pubkey::to_string).collect();
            map.serialize_entry(&key.to_string(), &accounts)?;
        }
        map.end()
    }
}
