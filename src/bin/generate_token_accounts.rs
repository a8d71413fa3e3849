// DANS : src/bin/generate_token_accounts.rs

use anyhow::{Context, Result};
use arrow_token_accounts::{
    artifacts::ArtifactWriter,
    config::Config,
    data_pipeline::{MintRegistry, TokenAccountPipeline},
    monitoring::logging::setup_logging,
    rpc::LedgerClient,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    // 1. Charger la configuration (avant tout appel réseau)
    let config = Config::load().context("Configuration d'environnement invalide")?;
    let registry = MintRegistry::mainnet().context("Liste de mints invalide")?;
    let ledger = LedgerClient::new(
        config.solana_rpc_url.clone(),
        config.rpc_timeout(),
        config.commitment_config()?,
    );
    info!(url = %ledger.url(), commitment = %config.commitment, "Nœud RPC");

    // 2. Tout est calculé en mémoire, puis seulement on écrit
    let writer = ArtifactWriter::new(&config.output_dir);
    let (output, _) = TokenAccountPipeline::new(ledger)
        .with_decode_failure_policy(config.decode_failure_policy)
        .with_max_concurrency(config.max_concurrency)
        .run_and_write(&registry, &writer, config.output_mode)
        .await
        .with_context(|| {
            format!("Génération des comptes de jetons interrompue ({})", writer.output_dir().display())
        })?;

    println!("Discovered and wrote {} accounts.", output.account_count());
    Ok(())
}
