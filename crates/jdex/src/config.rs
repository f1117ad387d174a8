use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JdexError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Directory holding the area folders.
    pub root_dir: PathBuf,
    /// Where to write the index. Defaults to `00.00 - Index.md` inside the
    /// `0x` area, or inside `root_dir` when there is none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl IndexerConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_path: None,
        }
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }
}

pub fn load_config(path: &Path) -> Result<IndexerConfig> {
    let data = std::fs::read_to_string(path).map_err(|error| {
        JdexError::Config(format!(
            "failed to read indexer config file {}: {error}",
            path.display()
        ))
    })?;
    serde_json::from_str(&data).map_err(|error| {
        JdexError::Config(format!(
            "failed to parse indexer config file {}: {error}",
            path.display()
        ))
    })
}

pub fn write_config(path: &Path, config: &IndexerConfig) -> Result<()> {
    let data = serde_json::to_string_pretty(config).map_err(|error| {
        JdexError::Config(format!("failed to serialize config: {error}"))
    })?;
    std::fs::write(path, data).map_err(|error| {
        JdexError::Config(format!(
            "failed to write indexer config file {}: {error}",
            path.display()
        ))
    })
}
