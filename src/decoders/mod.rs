// src/decoders/mod.rs

use serde::Deserialize;
use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::error::DecodeError;

pub mod arrow;

pub use arrow::{ArrowDecoder, DecodedArrow};

/// Décode un compte brut en enregistrement structuré.
pub trait AccountDecoder: Send + Sync {
    fn decode(&self, address: &Pubkey, account: &Account) -> Result<DecodedArrow, DecodeError>;
}

/// Que faire quand un compte ne correspond pas au schéma attendu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeFailurePolicy {
    /// On loggue, et le mint est traité comme n'ayant pas d'enregistrement.
    #[default]
    Skip,
    /// La première erreur de décodage arrête le run.
    Abort,
}
