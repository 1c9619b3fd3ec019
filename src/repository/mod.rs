//! Version control abstraction layer
//!
//! Releases are created by tagging the checkout in whatever version control
//! system it belongs to. The [Repository] trait covers the handful of
//! operations needed for that; implementations are:
//!
//! - [GitRepository]: git checkouts, through the `git2` crate
//! - [SvnRepository]: subversion checkouts, through the `svn` command line client
//! - [NoRepository]: anything else, refuses to release
//! - [MockRepository]: in-memory repository for testing
//!
//! [RepositoryDetector] picks the right one for a directory.

pub mod detector;
pub mod executor;
pub mod git;
pub mod mock;
pub mod none;
pub mod svn;

pub use detector::RepositoryDetector;
pub use executor::{Executor, SystemExecutor};
pub use git::GitRepository;
pub use mock::{MockExecutor, MockRepository};
pub use none::NoRepository;
pub use svn::SvnRepository;

use std::cmp::Reverse;

use crate::domain::{Key, Series, Version};
use crate::error::Result;

/// Number of releases listed when no explicit limit is wanted
pub const DEFAULT_RELEASE_LIMIT: usize = 5;

/// Common version control operation trait
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Failures of the underlying
/// tool are reported as [crate::error::ReleaseError::Repository] carrying a
/// message that names the failed operation.
pub trait Repository {
    /// Whether the checkout has local changes and therefore can't be released
    fn is_dirty(&self) -> Result<bool>;

    /// Human readable status of the checkout, one entry per line
    fn read_status(&self) -> Result<Vec<String>>;

    /// Name of the branch the checkout is on
    fn branch(&self) -> Result<String>;

    /// Latest releases, newest first
    ///
    /// # Arguments
    /// * `series` - Only list releases of this series; `None` lists all releases
    /// * `limit` - Maximum amount of releases to return
    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>>;

    /// Tag the checkout as release `version` and publish the tag
    ///
    /// # Arguments
    /// * `version` - Version to release, its `Display` form is the tag name
    /// * `key` - Sign the release with this key; `None` creates an unsigned release
    ///
    /// # Returns
    /// * `Ok(lines)` - Output of the release commands
    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn is_dirty(&self) -> Result<bool> {
        (**self).is_dirty()
    }

    fn read_status(&self) -> Result<Vec<String>> {
        (**self).read_status()
    }

    fn branch(&self) -> Result<String> {
        (**self).branch()
    }

    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>> {
        (**self).last_releases(series, limit)
    }

    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>> {
        (**self).create_release(version, key)
    }
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn is_dirty(&self) -> Result<bool> {
        (**self).is_dirty()
    }

    fn read_status(&self) -> Result<Vec<String>> {
        (**self).read_status()
    }

    fn branch(&self) -> Result<String> {
        (**self).branch()
    }

    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>> {
        (**self).last_releases(series, limit)
    }

    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>> {
        (**self).create_release(version, key)
    }
}

/// Pick releases out of a list of tag names.
///
/// With a series only tags that parse as versions of that series qualify,
/// otherwise every tag starting with `v`. Versions are ordered by semver
/// precedence, newest first; anything else follows in reverse name order.
pub(crate) fn select_releases<I>(tags: I, series: Option<&Series>, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut releases: Vec<(Option<Version>, String)> = tags
        .into_iter()
        .map(|tag| (Version::parse(&tag).ok(), tag))
        .filter(|(version, tag)| match series {
            Some(series) => version.as_ref().is_some_and(|v| series.contains(v)),
            None => tag.starts_with('v'),
        })
        .collect();

    releases.sort_by(|(a_version, a_tag), (b_version, b_tag)| {
        (Reverse(a_version), Reverse(a_tag)).cmp(&(Reverse(b_version), Reverse(b_tag)))
    });

    releases
        .into_iter()
        .take(limit)
        .map(|(_, tag)| tag)
        .collect()
}
