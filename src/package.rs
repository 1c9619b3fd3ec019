//! Package manifest access.
//!
//! Only the branch alias section of a composer style manifest is of
//! interest here:
//!
//! ```json
//! { "extra": { "branch-alias": { "dev-master": "1.0.x-dev" } } }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::domain::Series;
use crate::error::{ReleaseError, Result};

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    extra: Extra,
}

#[derive(Debug, Default, Deserialize)]
struct Extra {
    #[serde(default, rename = "branch-alias")]
    branch_alias: HashMap<String, String>,
}

/// A package whose releases are created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    branch_aliases: HashMap<String, String>,
}

impl Package {
    /// Create a package from a map of branch name to alias (e.g., "dev-master" -> "1.0.x-dev")
    pub fn new(branch_aliases: HashMap<String, String>) -> Self {
        Package { branch_aliases }
    }

    /// Read a package from its manifest file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            return Err(ReleaseError::invalid_package(format!(
                "No {} found - are you sure this is a composer package?",
                name
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ReleaseError::invalid_package(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let package = Self::from_json(&content)?;
        debug!(
            manifest = %path.display(),
            aliases = package.branch_aliases.len(),
            "loaded package manifest"
        );
        Ok(package)
    }

    /// Parse a package from manifest JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| ReleaseError::invalid_package(e.to_string()))?;
        Ok(Package::new(manifest.extra.branch_alias))
    }

    /// Branch alias configured for the given branch, if any
    pub fn branch_alias(&self, branch: &str) -> Option<&str> {
        self.branch_aliases.get(branch).map(String::as_str)
    }

    /// Release series the given branch is aliased to.
    ///
    /// An alias of `1.0.x-dev` yields the series `1.0`. Without an alias the
    /// result is `None`; an alias that is no series number is an error.
    pub fn series(&self, branch: &str) -> Result<Option<Series>> {
        match self.branch_alias(branch) {
            Some(alias) => Series::parse(&alias.replace(".x-dev", "")).map(Some),
            None => Ok(None),
        }
    }
}
