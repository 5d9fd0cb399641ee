use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CidkitError, CidkitResult};

/// Top-level configuration (loaded from cidkit.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CidkitConfig {
    pub log: LogConfig,
    pub secrets: SecretsConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

/// Where the secret cipher passphrase comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// Environment variable holding the passphrase
    pub passphrase_env: String,
    /// Prompt on the terminal when the variable is unset
    pub prompt: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Run full normalization checks on every candidate (false = shape only)
    pub verify: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            passphrase_env: "CIDKIT_PASSPHRASE".into(),
            prompt: true,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { verify: true }
    }
}

impl CidkitConfig {
    /// Parse a TOML document into a config, filling unset keys with defaults.
    pub fn from_toml_str(content: &str) -> CidkitResult<Self> {
        toml::from_str(content).map_err(|e| CidkitError::Config(e.to_string()))
    }

    /// Read a config file. Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> CidkitResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map(Some)
            .map_err(|e| CidkitError::Config(format!("{}: {e}", path.display())))
    }

    /// Render the config back to TOML (used by `cidkit config show`).
    pub fn to_toml_string(&self) -> CidkitResult<String> {
        toml::to_string_pretty(self).map_err(|e| CidkitError::Config(e.to_string()))
    }
}
