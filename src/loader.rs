use std::{ffi::OsStr, fmt, path::PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Without a known extension, anything that is not a JSON object is
    /// treated as YAML.
    fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Where the OpenAPI document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Path(PathBuf),
}

impl DocumentSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_owned())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    fn extension_format(&self) -> Option<DocumentFormat> {
        let ext = match self {
            Self::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit_once('.').map(|(_, ext)| ext)
            }
            Self::Path(path) => path.extension().and_then(OsStr::to_str),
        };
        ext.and_then(DocumentFormat::from_extension)
    }

    async fn read(&self) -> anyhow::Result<String> {
        match self {
            Self::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .with_context(|| format!("failed to fetch {url}"))?
                    .error_for_status()
                    .with_context(|| format!("failed to fetch {url}"))?;
                Ok(response.text().await?)
            }
            Self::Path(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub async fn load(&self) -> anyhow::Result<Document> {
        let text = self.read().await?;
        let format = self
            .extension_format()
            .unwrap_or_else(|| DocumentFormat::sniff(&text));
        debug!(source = %self, ?format, bytes = text.len(), "Read OpenAPI document.");

        let document = parse_document(&text, format)
            .with_context(|| format!("failed to parse {self}"))?;
        info!(
            source = %self,
            schemas = document.components.schemas.len(),
            paths = document.paths.len(),
            "Loaded OpenAPI document."
        );
        Ok(document)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn parse_document(text: &str, format: DocumentFormat) -> anyhow::Result<Document> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    })
}
