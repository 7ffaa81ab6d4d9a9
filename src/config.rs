//! Engine configuration
//!
//! One immutable value constructed at startup and handed to the components
//! that need it - there is no process-wide mutable state. Settings come
//! from an optional `obstruction.toml` in the working directory, with
//! `OBSTRUCTION_*` environment variables taking precedence. A missing or
//! unparseable file falls back to the built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// File searched in the working directory
pub const CONFIG_FILE: &str = "obstruction.toml";

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the position cache is persisted
    pub cache_path: PathBuf,
    /// Positions with fewer available moves than this skip the cache:
    /// below the threshold recomputation is cheap and storing every
    /// late-game position would bloat the file for no gain.
    pub cache_min_available: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("files/ai_cache.bin"),
            cache_min_available: 20,
        }
    }
}

/// Load the engine configuration.
///
/// Reads [`CONFIG_FILE`] if present, then applies environment overrides.
/// Never fails: unreadable or invalid input degrades to defaults with a
/// warning.
#[must_use]
pub fn load_config() -> EngineConfig {
    let config = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                debug!("loaded config from {CONFIG_FILE}");
                config
            }
            Err(err) => {
                warn!(%err, "failed to parse {CONFIG_FILE}, using defaults");
                EngineConfig::default()
            }
        },
        Err(_) => {
            debug!("no {CONFIG_FILE} found, using built-in defaults");
            EngineConfig::default()
        }
    };
    apply_env_overrides(config)
}

/// Apply `OBSTRUCTION_CACHE_PATH` and `OBSTRUCTION_CACHE_MIN_AVAILABLE`.
fn apply_env_overrides(mut config: EngineConfig) -> EngineConfig {
    if let Ok(path) = std::env::var("OBSTRUCTION_CACHE_PATH") {
        config.cache_path = PathBuf::from(path);
    }
    if let Ok(raw) = std::env::var("OBSTRUCTION_CACHE_MIN_AVAILABLE") {
        match raw.parse() {
            Ok(threshold) => config.cache_min_available = threshold,
            Err(err) => warn!(%raw, %err, "invalid OBSTRUCTION_CACHE_MIN_AVAILABLE, keeping current value"),
        }
    }
    config
}
