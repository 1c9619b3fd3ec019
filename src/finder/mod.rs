//! Strategies deciding which version a release gets
//!
//! A [VersionFinder] either comes up with a version or passes. Strategies
//! are combined with [VersionFinderChain], which asks them in order and
//! takes the first version offered:
//!
//! - [NextSeriesVersionFinder]: next version of the series the current branch is aliased to
//! - [AskingVersionFinder]: asks the user, never passes

pub mod asking;
pub mod chain;
pub mod next_series;

pub use asking::AskingVersionFinder;
pub use chain::VersionFinderChain;
pub use next_series::NextSeriesVersionFinder;

use crate::domain::Version;
use crate::error::Result;
use crate::package::Package;
use crate::repository::Repository;

/// Finds the version for the release to create
pub trait VersionFinder {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Find a version for the next release of `package` from `repository`
    ///
    /// # Returns
    /// * `Ok(Some(version))` - Version to release
    /// * `Ok(None)` - This finder can't tell, the next one should be asked
    /// * `Err` - Repository or package data can't be trusted, releasing must stop
    fn find(&self, package: &Package, repository: &dyn Repository) -> Result<Option<Version>>;
}
