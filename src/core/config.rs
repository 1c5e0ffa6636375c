use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::theme::Theme;

pub const DEFAULT_CONFIG_PATH: &str = "./assets/config/sandbox.json";

/// Runtime settings. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// JSON catalog file; ignored when `content_db` is set.
    pub catalog_path: Option<PathBuf>,
    pub content_db: Option<PathBuf>,
    pub lessons_path: Option<PathBuf>,
    /// Seed for outcome narratives. Unset means seeded from entropy.
    pub seed: Option<u64>,
    pub theme: Theme,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

impl SandboxConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the default config file, or defaults when it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
