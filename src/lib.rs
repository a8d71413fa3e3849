// src/lib.rs

// On déclare tous nos modules principaux pour les rendre publics et
// utilisables par le binaire (generate_token_accounts.rs) et les tests.
pub mod aggregation;
pub mod artifacts;
pub mod config;
pub mod data_pipeline;
pub mod decoders;
pub mod derivation;
pub mod error;
pub mod monitoring;
pub mod rpc;

pub use error::{DecodeError, ResolverError};
