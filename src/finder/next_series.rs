use tracing::debug;

use crate::domain::Version;
use crate::error::Result;
use crate::finder::VersionFinder;
use crate::package::Package;
use crate::repository::Repository;
use crate::ui::Console;

const CONFIRMATION: &str = "Do you want to create a release with this version number? ";

/// Finds the version by comparing the repository branch with the package's
/// branch alias definitions.
///
/// Branch `master` aliased as `1.0.x-dev` belongs to series `1.0`; the next
/// release is the first version of that series or the successor of its last
/// release. The user has to confirm the result.
pub struct NextSeriesVersionFinder<'a> {
    console: &'a dyn Console,
}

impl<'a> NextSeriesVersionFinder<'a> {
    pub fn new(console: &'a dyn Console) -> Self {
        NextSeriesVersionFinder { console }
    }
}

impl VersionFinder for NextSeriesVersionFinder<'_> {
    fn name(&self) -> &'static str {
        "next-series"
    }

    fn find(&self, package: &Package, repository: &dyn Repository) -> Result<Option<Version>> {
        let branch = repository.branch()?;
        let Some(series) = package.series(&format!("dev-{}", branch))? else {
            self.console.write_line(&format!(
                "Can not determine current series for branch {}",
                branch
            ))?;
            return Ok(None);
        };
        debug!(%branch, %series, "branch is aliased to series");

        let last_release = repository.last_releases(Some(&series), 1)?.into_iter().next();
        let version = match last_release {
            None => {
                let version = series.first_version();
                self.console.write_line(&format!(
                    "No release in series {} yet, determined {} as first version number.",
                    series, version
                ))?;
                version
            }
            Some(tag) => {
                let last = Version::parse(&tag)?;
                let version = series.next_version(&last)?;
                self.console.write_line(&format!(
                    "Last release in series {} was {}, determined {} as next version number.",
                    series, last, version
                ))?;
                version
            }
        };

        if self.console.confirm(CONFIRMATION)? {
            Ok(Some(version))
        } else {
            debug!(%version, "user declined version");
            Ok(None)
        }
    }
}
