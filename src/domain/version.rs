use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version of a release.
///
/// Validation follows the full semver grammar (no leading zeros, optional
/// `-pre` and `+build` parts). A single leading `v` is accepted on input and
/// always present on output, so the `Display` form doubles as the tag name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    inner: semver::Version,
}

impl Version {
    /// Create a plain release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parse a version from user input or a tag name (e.g., "v1.2.3" -> Version(1,2,3))
    pub fn parse(text: &str) -> Result<Self> {
        let number = text.strip_prefix('v').unwrap_or(text);
        semver::Version::parse(number)
            .map(|inner| Version { inner })
            .map_err(|_| ReleaseError::invalid_version(text))
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release identifiers, empty for plain releases
    pub fn pre_release(&self) -> &str {
        self.inner.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn build(&self) -> &str {
        self.inner.build.as_str()
    }

    /// Next minor version; pre-release and build metadata are dropped.
    ///
    /// Fails when the minor component is already at its maximum.
    pub fn increase_minor(&self) -> Result<Self> {
        let minor = self.minor().checked_add(1).ok_or_else(|| self.exhausted())?;
        Ok(Version::new(self.major(), minor, 0))
    }

    /// Next patch level; pre-release and build metadata are dropped.
    ///
    /// Fails when the patch component is already at its maximum.
    pub fn increase_patch_level(&self) -> Result<Self> {
        let patch = self.patch().checked_add(1).ok_or_else(|| self.exhausted())?;
        Ok(Version::new(self.major(), self.minor(), patch))
    }

    fn exhausted(&self) -> ReleaseError {
        ReleaseError::invalid_version(self.to_string())
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.inner)
    }
}
