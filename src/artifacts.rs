// DANS : src/artifacts.rs

use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::aggregation::OutputMode;
use crate::data_pipeline::PipelineOutput;
use crate::error::{ResolverError, Result};

pub const ARROW_MINTS_FILE_NAME: &str = "arrow-mints.json";
pub const TOKEN_ACCOUNTS_FILE_NAME: &str = "token-accounts.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub arrow_mints: PathBuf,
    pub token_accounts: PathBuf,
}

/// Écrit les deux documents JSON du run dans `output_dir`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Crée le dossier si besoin, puis écrase `arrow-mints.json` et `token-accounts.json`.
    pub fn write(&self, output: &PipelineOutput, mode: OutputMode) -> Result<ArtifactPaths> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ResolverError::Io {
            path: self.output_dir.display().to_string(),
            source,
        })?;

        let paths = ArtifactPaths {
            arrow_mints: self.output_dir.join(ARROW_MINTS_FILE_NAME),
            token_accounts: self.output_dir.join(TOKEN_ACCOUNTS_FILE_NAME),
        };

        let arrow_mints: Vec<String> = output.arrow_mints.iter().map(|m| m.to_string()).collect();
        write_json(&paths.arrow_mints, &arrow_mints)?;
        write_json(&paths.token_accounts, &output.document(mode))?;

        info!(
            dir = %self.output_dir.display(),
            ?mode,
            accounts = output.account_count(),
            "Fichiers écrits"
        );
        Ok(paths)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_error = |source: std::io::Error| ResolverError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}
