//! Configuration module for the resolution engine.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CF_` and use double underscores
//! to separate nested levels:
//! - `CF_RESOLUTION__DEDUPE_RESOLVED_BASES=true` sets `resolution.dedupe_resolved_bases`
//! - `CF_DEBUG=true` sets `debug`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ResolveError, ResolveResult};

static GLOBAL_DEBUG: AtomicBool = AtomicBool::new(false);

/// Enable or disable the global debug flag consulted by `debug_print!`.
pub fn set_global_debug(enabled: bool) {
    GLOBAL_DEBUG.store(enabled, Ordering::Relaxed);
}

/// Check whether global debug output is enabled.
pub fn is_global_debug_enabled() -> bool {
    GLOBAL_DEBUG.load(Ordering::Relaxed)
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Base-resolution behavior
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolutionConfig {
    /// Drop duplicate class entries left behind by base substitution before
    /// linearization. Off by default: the linearization algorithm itself
    /// rejects duplicate direct bases, which is the contract most embedders
    /// expect.
    #[serde(default = "default_false")]
    pub dedupe_resolved_bases: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            resolution: ResolutionConfig::default(),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            dedupe_resolved_bases: false,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> ResolveResult<Self> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".classforge/settings.toml"));

        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Layer in environment variables with CF_ prefix
            // Use double underscore (__) to separate nested levels
            .merge(Env::prefixed("CF_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".") // Double underscore becomes dot
                    .into()
            }))
            .extract()
            .map_err(|e| ResolveError::Config {
                reason: e.to_string(),
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> ResolveResult<Self> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CF_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(|e| ResolveError::Config {
                reason: e.to_string(),
            })
    }

    /// Persist the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> ResolveResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ResolveError::Config {
                reason: format!("cannot create '{}': {e}", parent.display()),
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| ResolveError::Config {
            reason: e.to_string(),
        })?;
        std::fs::write(path, toml_string).map_err(|e| ResolveError::Config {
            reason: format!("cannot write '{}': {e}", path.display()),
        })?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> ResolveResult<PathBuf> {
        let config_path = PathBuf::from(".classforge/settings.toml");

        if !force && config_path.exists() {
            return Err(ResolveError::Config {
                reason: "configuration file already exists; pass force to overwrite".to_string(),
            });
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ResolveError::Config {
                reason: format!("cannot create '{}': {e}", parent.display()),
            })?;
        }

        let template = r#"# Classforge Configuration File

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

[resolution]
# Drop duplicate class entries produced by base substitution before
# linearization. When false, duplicates are rejected by the linearization
# algorithm at class-definition time.
dedupe_resolved_bases = false
"#;

        std::fs::write(&config_path, template).map_err(|e| ResolveError::Config {
            reason: format!("cannot write '{}': {e}", config_path.display()),
        })?;

        Ok(config_path)
    }

    /// Find the workspace config by looking for a .classforge directory,
    /// searching from the current directory up to the filesystem root.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(".classforge");
            if config_dir.exists() && config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert!(!settings.debug);
        assert!(!settings.resolution.dedupe_resolved_bases);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        // Only specify the resolution section; the rest should use defaults
        let config_content = r#"
[resolution]
dedupe_resolved_bases = true
"#;
        fs::write(&config_path, config_content).unwrap();

        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .extract()
            .unwrap();

        assert!(settings.resolution.dedupe_resolved_bases);
        assert_eq!(settings.version, 1); // default value
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.resolution.dedupe_resolved_bases = true;
        settings.save(&config_path).unwrap();

        let reloaded = Settings::load_from(&config_path).unwrap();
        assert!(reloaded.resolution.dedupe_resolved_bases);
        assert_eq!(reloaded.version, settings.version);
    }

    #[test]
    fn test_global_debug_flag() {
        set_global_debug(true);
        assert!(is_global_debug_enabled());
        set_global_debug(false);
        assert!(!is_global_debug_enabled());
    }
}
