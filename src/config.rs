//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: the `--config` path, or `config.toml` in the platform
//!    config directory when it exists
//! 3. `MP3PRUNE_*` environment variables (e.g. `MP3PRUNE_STRATEGY=track`)
//!
//! Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MP3PRUNE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grouping strategy name. Resolved leniently, so unknown names are
    /// kept here and fall back to passthrough later.
    pub strategy: String,
    /// Number of I/O threads for hashing.
    pub io_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: "content-hash".to_string(),
            io_threads: 4,
        }
    }
}

impl Config {
    /// Load the configuration from all layers.
    ///
    /// An explicit file must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any layer
    /// fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, figment::Error> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(figment::Error::from(format!(
                        "configuration file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.is_file()),
        };

        if let Some(path) = &file {
            log::debug!("Loading configuration from {}", path.display());
        }
        Self::figment(file.as_deref()).extract()
    }

    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "mp3prune", "mp3prune")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
