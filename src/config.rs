use anyhow::{anyhow, Result};
use serde::Deserialize;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::aggregation::OutputMode;
use crate::decoders::DecodeFailurePolicy;

/// Paramètres d'exécution lus depuis l'environnement (ou un fichier `.env`).
/// Tous les champs ont une valeur par défaut : un environnement vide suffit.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_rpc_url")]
    pub solana_rpc_url: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub output_mode: OutputMode,

    #[serde(default)]
    pub decode_failure_policy: DecodeFailurePolicy,

    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,

    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Nombre maximum de dérivations lancées en parallèle.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_rpc_url() -> String {
    "https://calvin.rpcpool.com".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_rpc_timeout_secs() -> u64 {
    30
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_max_concurrency() -> usize {
    16
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment)
            .map_err(|_| anyhow!("Niveau de commitment inconnu: '{}'", self.commitment))?;
        Ok(CommitmentConfig { commitment })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solana_rpc_url: default_rpc_url(),
            output_dir: default_output_dir(),
            output_mode: OutputMode::default(),
            decode_failure_policy: DecodeFailurePolicy::default(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
            commitment: default_commitment(),
            max_concurrency: default_max_concurrency(),
        }
    }
}
