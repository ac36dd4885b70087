//! Generates TypeScript models and a request-builder API client from an
//! OpenAPI 3.0 document.

pub mod config;
pub mod document;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod loader;

use tracing::info;

pub use config::GenerateConfig;
pub use error::GenerateError;

use crate::emitter::Emitter;

/// Loads, validates and renders the document, then writes the output files.
/// Nothing is written unless the whole document renders.
pub async fn run(config: &GenerateConfig) -> anyhow::Result<()> {
    let document = config.source.load().await?;
    let files = generator::generate(&document)?;
    Emitter::new(&config.out_dir).emit(&files).await?;
    info!(out_dir = %config.out_dir.display(), "Generation finished.");
    Ok(())
}
