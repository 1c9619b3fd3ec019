use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Whether a series is a whole major line (`1`) or a minor line (`1.1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Major,
    Minor,
}

/// A release line, identified by `N` or `N.M`.
///
/// The kind decides the bump policy: a major series moves on by minor
/// versions, a minor series by patch levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    major: u64,
    minor: Option<u64>,
    number: String,
}

impl Series {
    /// Parse a series number such as "1", "v1" or "1.1"
    pub fn parse(text: &str) -> Result<Self> {
        let number = text.strip_prefix('v').unwrap_or(text);
        let invalid = || ReleaseError::invalid_series(text);
        let component = |part: &str| part.parse::<u64>().map_err(|_| invalid());

        let parts: Vec<&str> = number.split('.').collect();
        let (major, minor) = match parts[..] {
            [major] => (component(major)?, None),
            [major, minor] => (component(major)?, Some(component(minor)?)),
            _ => return Err(invalid()),
        };

        let series = Series {
            major,
            minor,
            number: number.to_string(),
        };

        // "+1" or "01" parse as integers but are no valid version components
        Version::parse(&series.appended_number()).map_err(|_| invalid())?;

        Ok(series)
    }

    pub fn kind(&self) -> SeriesKind {
        match self.minor {
            Some(_) => SeriesKind::Minor,
            None => SeriesKind::Major,
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    fn appended_number(&self) -> String {
        match self.kind() {
            SeriesKind::Major => format!("{}.0.0", self.number),
            SeriesKind::Minor => format!("{}.0", self.number),
        }
    }

    /// First version of the series: 1 -> v1.0.0, 1.1 -> v1.1.0
    pub fn first_version(&self) -> Version {
        Version::new(self.major, self.minor.unwrap_or(0), 0)
    }

    /// Whether `version` belongs to this release line
    pub fn contains(&self, version: &Version) -> bool {
        version.major() == self.major && self.minor.map_or(true, |minor| version.minor() == minor)
    }

    /// Version following `current` within this series
    ///
    /// Fails when the component to bump can't be increased any further.
    pub fn next_version(&self, current: &Version) -> Result<Version> {
        match self.kind() {
            SeriesKind::Major => current.increase_minor(),
            SeriesKind::Minor => current.increase_patch_level(),
        }
    }
}

impl FromStr for Series {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Series::parse(s)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number)
    }
}
