use tracing::debug;

use crate::domain::Version;
use crate::error::Result;
use crate::finder::VersionFinder;
use crate::package::Package;
use crate::repository::Repository;

/// Finds the version by asking a list of version finders.
///
/// The result of the first finder which responds with a version is used;
/// later finders are not asked at all.
pub struct VersionFinderChain<'a> {
    finders: Vec<Box<dyn VersionFinder + 'a>>,
}

impl<'a> VersionFinderChain<'a> {
    pub fn new(finders: Vec<Box<dyn VersionFinder + 'a>>) -> Self {
        VersionFinderChain { finders }
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }
}

impl VersionFinder for VersionFinderChain<'_> {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn find(&self, package: &Package, repository: &dyn Repository) -> Result<Option<Version>> {
        for finder in &self.finders {
            if let Some(version) = finder.find(package, repository)? {
                debug!(finder = finder.name(), %version, "version found");
                return Ok(Some(version));
            }
            debug!(finder = finder.name(), "no version found, trying next finder");
        }

        Ok(None)
    }
}
