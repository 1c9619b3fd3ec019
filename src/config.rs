use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Represents the complete configuration for release-it.
///
/// Every setting has a default, so running without any configuration file
/// behaves like the classic tool: read `composer.json`, derive the version
/// from the branch alias, fall back to asking.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_finders")]
    pub finders: Vec<FinderKind>,

    #[serde(default)]
    pub signing: SigningConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Version finding strategies that can be chained
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FinderKind {
    /// Derive the version from the branch alias and the last release of its series
    NextSeries,
    /// Ask the user for the version
    Asking,
}

/// Returns the default package manifest file name.
fn default_manifest() -> String {
    "composer.json".to_string()
}

/// Returns the default finder chain: derive automatically, else ask.
fn default_finders() -> Vec<FinderKind> {
    vec![FinderKind::NextSeries, FinderKind::Asking]
}

/// Whether and how release tags are signed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct SigningConfig {
    #[serde(default)]
    pub sign: bool,

    /// Key id to sign with; implies `sign`
    #[serde(default)]
    pub key: Option<String>,
}

/// Settings for git repositories.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_push")]
    pub push: bool,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_push() -> bool {
    true
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            push: default_push(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            finders: default_finders(),
            signing: SigningConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.finders.is_empty() {
            return Err(ReleaseError::config(
                "at least one version finder must be configured",
            ));
        }

        if self.manifest.trim().is_empty() {
            return Err(ReleaseError::config("manifest file name must not be empty"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaseit.toml` in the package directory
/// 3. `.releaseit.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `package_dir` - Directory of the package to release
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, package_dir: &Path) -> Result<Config> {
    let package_config = package_dir.join("releaseit.toml");
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ReleaseError::config(format!("Cannot read {}: {}", path, e)))?
    } else if package_config.exists() {
        fs::read_to_string(package_config)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releaseit.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
