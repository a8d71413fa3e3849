// src/error.rs

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Les erreurs fatales du pipeline. Toute variante remontée arrête le run
/// avant l'écriture des fichiers.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Configuration invalide ({what}): {reason}")]
    Configuration { what: String, reason: String },

    #[error("Échec de la lecture groupée de {requested} comptes: {reason}")]
    Fetch { requested: usize, reason: String },

    #[error("Décodage impossible du compte {address}: {source}")]
    Decode {
        address: Pubkey,
        #[source]
        source: DecodeError,
    },

    #[error("Erreur d'entrée/sortie sur '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Erreur de sérialisation JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Une tâche de dérivation a échoué: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ResolverError {
    pub fn configuration(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::Configuration {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

/// Erreur de décodage d'un seul compte. Récupérable : voir `DecodeFailurePolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("discriminateur invalide (trouvé: {found})")]
    InvalidDiscriminator { found: String },

    #[error("données trop courtes: {actual} octets, {expected} attendus")]
    DataTooShort { expected: usize, actual: usize },

    #[error("propriétaire inattendu: {actual}, attendu {expected}")]
    WrongOwner { expected: Pubkey, actual: Pubkey },
}

pub type Result<T> = std::result::Result<T, ResolverError>;
