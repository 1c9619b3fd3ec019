use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::finder::VersionFinder;
use crate::package::Package;
use crate::repository::{Repository, DEFAULT_RELEASE_LIMIT};
use crate::ui::Console;

const VERSION_PROMPT: &str = "Please name the version to release (press Ctrl+C to abort): ";

/// State of the question for the version number
enum Prompt {
    AwaitingInput,
    Resolved(Version),
}

/// Finds the version by asking the user what the next version should be.
///
/// Shows the latest releases for orientation and asks until a valid version
/// number is entered, so it never passes.
pub struct AskingVersionFinder<'a> {
    console: &'a dyn Console,
}

impl<'a> AskingVersionFinder<'a> {
    pub fn new(console: &'a dyn Console) -> Self {
        AskingVersionFinder { console }
    }

    fn echo_last_releases(&self, repository: &dyn Repository) -> Result<()> {
        self.console
            .write_line(&format!("Last {} releases:", DEFAULT_RELEASE_LIMIT))?;
        for release in repository.last_releases(None, DEFAULT_RELEASE_LIMIT)? {
            self.console.write_line(&release)?;
        }
        self.console.write_empty_line()?;
        Ok(())
    }

    fn ask_for_version(&self) -> Result<Prompt> {
        let input = self.console.prompt(VERSION_PROMPT)?;
        match Version::parse(&input) {
            Ok(version) => Ok(Prompt::Resolved(version)),
            Err(invalid @ ReleaseError::InvalidVersion { .. }) => {
                self.console.write_line(&invalid.to_string())?;
                Ok(Prompt::AwaitingInput)
            }
            Err(e) => Err(e),
        }
    }
}

impl VersionFinder for AskingVersionFinder<'_> {
    fn name(&self) -> &'static str {
        "asking"
    }

    fn find(&self, _package: &Package, repository: &dyn Repository) -> Result<Option<Version>> {
        self.echo_last_releases(repository)?;

        let mut state = Prompt::AwaitingInput;
        loop {
            state = match state {
                Prompt::AwaitingInput => self.ask_for_version()?,
                Prompt::Resolved(version) => return Ok(Some(version)),
            };
        }
    }
}
