// src/data_pipeline/mod.rs

// La configuration statique des mints, puis le pipeline qui la consomme.
pub mod registry;
pub mod token_accounts;

pub use registry::MintRegistry;
pub use token_accounts::{PipelineOutput, TokenAccountPipeline};
