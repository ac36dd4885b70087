//! Writes generated and static TypeScript files into the output directory.

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::generator::GeneratedFiles;

pub const MODELS_FILE: &str = "models.ts";
pub const API_FILE: &str = "api.ts";
pub const REQUEST_FILE: &str = "request.ts";
pub const CONFIG_FILE: &str = "config.ts";

/// Request builder imported by every generated API method.
pub const REQUEST_TEMPLATE: &str = include_str!("templates/request.ts");
/// HTTP client setup, meant to be customized and therefore never overwritten.
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.ts");

#[derive(Debug, Clone)]
pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Emitter {
            out_dir: out_dir.into(),
        }
    }

    /// Writes `models.ts`, `api.ts` and `request.ts`, and `config.ts` when it
    /// does not exist yet. Returns whether `config.ts` was created.
    pub async fn emit(&self, files: &GeneratedFiles) -> anyhow::Result<bool> {
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        let models = self.out_dir.join(MODELS_FILE);
        let api = self.out_dir.join(API_FILE);
        let request = self.out_dir.join(REQUEST_FILE);
        let config = self.out_dir.join(CONFIG_FILE);

        let (_, _, _, config_created) = tokio::try_join!(
            write_file(&models, &files.models),
            write_file(&api, &files.api),
            write_file(&request, REQUEST_TEMPLATE),
            write_if_absent(&config, CONFIG_TEMPLATE),
        )?;

        if !config_created {
            info!(path = %config.display(), "Kept existing file.");
        }
        Ok(config_created)
    }
}

async fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote file.");
    Ok(())
}

async fn write_if_absent(path: &Path, contents: &str) -> anyhow::Result<bool> {
    let open = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;
    let mut file = match open {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to create {}", path.display()))
        }
    };
    write_or_remove(&mut file, path, contents).await?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote file.");
    Ok(true)
}

/// Writes a freshly created file, removing `path` when the write fails.
async fn write_or_remove<W>(file: &mut W, path: &Path, contents: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(contents.as_bytes()).await {
        Ok(()) => file.flush().await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), %remove_err, "Failed to remove partial file.");
        }
        return Err(err).with_context(|| format!("failed to write {}", path.display()));
    }
    Ok(())
}
