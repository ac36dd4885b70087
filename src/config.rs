use std::path::PathBuf;

use crate::loader::DocumentSource;

/// Everything one generation run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub source: DocumentSource,
    pub out_dir: PathBuf,
}

impl GenerateConfig {
    pub fn new(source: &str, out_dir: impl Into<PathBuf>) -> Self {
        GenerateConfig {
            source: DocumentSource::parse(source),
            out_dir: out_dir.into(),
        }
    }
}
