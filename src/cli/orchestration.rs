//! Main workflow orchestration logic
//!
//! Everything between argument parsing and process exit lives here, so the
//! release workflow can be driven by tests without depending on clap or a
//! terminal.

use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, FinderKind, SigningConfig};
use crate::domain::{Key, Version};
use crate::error::{ReleaseError, Result};
use crate::finder::{AskingVersionFinder, NextSeriesVersionFinder, VersionFinder, VersionFinderChain};
use crate::package::Package;
use crate::repository::Repository;
use crate::ui::Console;

/// Exit status when the package manifest is missing or unreadable
pub const EXIT_INVALID_PACKAGE: i32 = 21;
/// Exit status when the checkout has local changes
pub const EXIT_DIRTY_REPOSITORY: i32 = 22;
/// Exit status when no finder came up with a version
pub const EXIT_NO_VERSION: i32 = 23;

/// How a release attempt ended, unless it failed with an error
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// The release was created
    Released(Version),
    /// The release would have been created, nothing was touched
    DryRun(Version),
    InvalidPackage,
    DirtyRepository,
    NoVersion,
}

impl ReleaseOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseOutcome::Released(_) | ReleaseOutcome::DryRun(_) => 0,
            ReleaseOutcome::InvalidPackage => EXIT_INVALID_PACKAGE,
            ReleaseOutcome::DirtyRepository => EXIT_DIRTY_REPOSITORY,
            ReleaseOutcome::NoVersion => EXIT_NO_VERSION,
        }
    }
}

/// Options for a single release run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseOptions {
    /// Sign the release with this key; `None` releases unsigned
    pub key: Option<Key>,

    /// Preview mode, the repository is not modified
    pub dry_run: bool,
}

/// Determine the signing key from command line flags and configuration.
///
/// An explicit key id wins over the default key; the command line wins over
/// the configuration.
pub fn resolve_key(sign: bool, key_id: Option<&str>, signing: &SigningConfig) -> Option<Key> {
    if let Some(id) = key_id.or(signing.key.as_deref()) {
        return Some(Key::new(id));
    }

    if sign || signing.sign {
        Some(Key::default())
    } else {
        None
    }
}

/// Build the version finder chain configured in `config`.
///
/// With the default configuration the version is derived from the branch
/// alias and the user is asked when that is not possible or declined.
pub fn default_version_finder<'a>(config: &Config, console: &'a dyn Console) -> VersionFinderChain<'a> {
    let finders = config
        .finders
        .iter()
        .map(|kind| -> Box<dyn VersionFinder + 'a> {
            match kind {
                FinderKind::NextSeries => Box::new(NextSeriesVersionFinder::new(console)),
                FinderKind::Asking => Box::new(AskingVersionFinder::new(console)),
            }
        })
        .collect();

    VersionFinderChain::new(finders)
}

/// Release workflow
///
/// Orchestrates the entire release process:
/// 1. Load the package manifest
/// 2. Open the repository and make sure it is clean
/// 3. Find the version to release
/// 4. Create the release
pub struct ReleaseWorkflow<'a> {
    console: &'a dyn Console,
    finder: &'a dyn VersionFinder,
    options: ReleaseOptions,
}

impl<'a> ReleaseWorkflow<'a> {
    pub fn new(console: &'a dyn Console, finder: &'a dyn VersionFinder, options: ReleaseOptions) -> Self {
        ReleaseWorkflow {
            console,
            finder,
            options,
        }
    }

    /// Run the workflow for the package described by `manifest`.
    ///
    /// The repository is only opened once the manifest was read.
    ///
    /// # Returns
    /// * `Ok(outcome)` - Release created, or the reason it was refused
    /// * `Err` - Repository or version data failure, nothing more can be done
    pub fn run<R, F>(&self, manifest: &Path, open_repository: F) -> Result<ReleaseOutcome>
    where
        R: Repository,
        F: FnOnce() -> Result<R>,
    {
        let package = match Package::from_file(manifest) {
            Ok(package) => package,
            Err(ReleaseError::InvalidPackage(message)) => {
                self.console.write_error_line(&message)?;
                return Ok(ReleaseOutcome::InvalidPackage);
            }
            Err(e) => return Err(e),
        };

        let repository = open_repository()?;
        if repository.is_dirty()? {
            self.console
                .write_error_line("Can't create release, working directory not clean.")?;
            for line in repository.read_status()? {
                self.console.write_error_line(&line)?;
            }
            return Ok(ReleaseOutcome::DirtyRepository);
        }

        let Some(version) = self.finder.find(&package, &repository)? else {
            self.console.write_error_line(
                "Can not create release, unable to find a version for this release.",
            )?;
            return Ok(ReleaseOutcome::NoVersion);
        };
        debug!(%version, finder = self.finder.name(), "version resolved");

        if self.options.dry_run {
            self.console
                .write_line(&format!("Would create release {}", version))?;
            return Ok(ReleaseOutcome::DryRun(version));
        }

        info!(%version, signed = self.options.key.is_some(), "creating release");
        for line in repository.create_release(&version, self.options.key.as_ref())? {
            self.console.write_line(&line)?;
        }
        self.console
            .write_success(&format!("Successfully created release {}", version))?;

        Ok(ReleaseOutcome::Released(version))
    }
}
