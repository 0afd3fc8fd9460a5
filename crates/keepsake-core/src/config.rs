//! Configuration management for keepsake.
//!
//! Loads configuration from ${KEEPSAKE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::script::Script;
use crate::timing::Timing;

/// Returns the default config template.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for keepsake configuration and logs.
    //!
    //! KEEPSAKE_HOME resolution order:
    //! 1. KEEPSAKE_HOME environment variable (if set)
    //! 2. ~/.config/keepsake (default)

    use std::path::PathBuf;

    /// Returns the keepsake home directory.
    ///
    /// Without a home directory this falls back to `.keepsake` in the
    /// working directory.
    pub fn keepsake_home() -> PathBuf {
        if let Ok(home) = std::env::var("KEEPSAKE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("keepsake"))
            .unwrap_or_else(|| PathBuf::from(".keepsake"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        keepsake_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        keepsake_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ring the bell and flash the frame for haptic pulses.
    pub haptics: bool,

    /// Optional script file replacing the built-in text.
    /// Relative paths are resolved against KEEPSAKE_HOME.
    pub script: Option<PathBuf>,

    /// Page timing overrides.
    pub timing: Timing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            haptics: true,
            script: None,
            timing: Timing::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a new config file with the commented template.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Loads the configured script, or the built-in one.
    ///
    /// `override_path` (from the command line) wins over the config file.
    pub fn load_script(&self, override_path: Option<&Path>) -> Result<Script> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => match &self.script {
                Some(path) if path.is_relative() => paths::keepsake_home().join(path),
                Some(path) => path.clone(),
                None => return Ok(Script::default()),
            },
        };
        Script::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.haptics);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "haptics = false\n\n[timing]\nspeed = 2.0\nheart_threshold = 3\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert!(!config.haptics);
        assert_eq!(config.timing.heart_threshold, 3);
        assert_eq!(config.timing.welcome_step_ms, 1800);
        assert_eq!(config.script, None);
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "haptics = \"loud\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# script ="));
        // The template parses back to the defaults.
        assert_eq!(Config::load_from(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_script_override_wins() {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("script.toml");
        fs::write(&script_path, "[welcome]\nheading = \"Hey.\"\n").unwrap();

        let config = Config {
            script: Some(dir.path().join("missing.toml")),
            ..Config::default()
        };
        let script = config.load_script(Some(&script_path)).unwrap();
        assert_eq!(script.welcome.heading, "Hey.");

        assert!(config.load_script(None).is_err());
        assert_eq!(
            Config::default().load_script(None).unwrap(),
            Script::default()
        );
    }
}
