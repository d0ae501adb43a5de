//! Shell configuration.
//!
//! Loaded from an optional JSON file; every key falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};

/// Identity, backing files and `uname` answers for one shell session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub user: String,
    pub host: String,
    /// Backing ZIP archive.
    pub archive: PathBuf,
    /// Append-only command log.
    pub log: PathBuf,
    pub kernel_name: String,
    pub kernel_version: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "user1".to_string(),
            host: "my_pc".to_string(),
            archive: PathBuf::from("virtual_fs.zip"),
            log: PathBuf::from("emulator.log"),
            kernel_name: "Linux".to_string(),
            kernel_version: "1.0.0-custom".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> ShellResult<Self> {
        let config: ShellConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: &Path) -> ShellResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject values that would produce an unusable prompt.
    pub fn validate(&self) -> ShellResult<()> {
        for (field, value) in [("user", &self.user), ("host", &self.host)] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ShellError::Config(format!(
                    "{} must be a non-empty word, got {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}
