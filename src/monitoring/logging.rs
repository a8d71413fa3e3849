// DANS : src/monitoring/logging.rs
use tracing_subscriber::EnvFilter;

/// Installe le subscriber global. Les logs partent sur stderr :
/// stdout ne reçoit que le résumé final du run.
pub fn setup_logging() {
    // On crée un filtre qui lit la variable RUST_LOG.
    // S'il n'est pas défini, il utilisera "info" par défaut.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
