pub mod schema;

pub use schema::{AdvisorConfig, UnknownToolPolicy};

use crate::error::{AdvisorError, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the Azure OpenAI endpoint URL.
pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";

/// Environment variable holding the Azure OpenAI access key.
pub const API_KEY_VAR: &str = "AZURE_OPENAI_KEY";

/// Default advisor home directory (~/.advisor).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".advisor"))
        .unwrap_or_else(|| PathBuf::from(".advisor"))
}

/// Pick the config file: the explicit path if it exists, else `~/.advisor/advisor.toml`.
pub fn locate_config(explicit: &Path) -> PathBuf {
    if explicit.exists() {
        return explicit.to_path_buf();
    }
    let fallback = default_home_dir().join("advisor.toml");
    if fallback.exists() {
        fallback
    } else {
        explicit.to_path_buf()
    }
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<AdvisorConfig> {
    if !path.exists() {
        return Ok(AdvisorConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| {
        AdvisorError::Data(format!("Failed to parse {} (TOML): {}", path.display(), e))
    })
}

/// Endpoint credentials, read from the process environment.
#[derive(Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the environment. Call `dotenvy::dotenv()` first
    /// to pick up a local `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AdvisorError::MissingConfig(key.to_string()))
        };

        Ok(Self {
            endpoint: require(ENDPOINT_VAR)?,
            api_key: require(API_KEY_VAR)?,
        })
    }
}
