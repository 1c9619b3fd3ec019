use std::path::Path;

use tracing::info;

use crate::config::GitConfig;
use crate::error::Result;
use crate::repository::{GitRepository, NoRepository, Repository, SvnRepository, SystemExecutor};

/// Finds out what kind of checkout a directory is
#[derive(Debug, Clone, Default)]
pub struct RepositoryDetector {
    git: GitConfig,
}

impl RepositoryDetector {
    pub fn new(git: GitConfig) -> Self {
        RepositoryDetector { git }
    }

    /// Detect the repository at `path`.
    ///
    /// A `.git` directory wins over a `.svn` directory; a directory with
    /// neither yields [NoRepository].
    pub fn detect(&self, path: &Path) -> Result<Box<dyn Repository>> {
        if path.join(".git").exists() {
            info!(path = %path.display(), "detected git repository");
            let repository = GitRepository::open(path)?
                .with_remote(self.git.remote.clone())
                .with_push(self.git.push);
            return Ok(Box::new(repository));
        }

        if path.join(".svn").exists() {
            info!(path = %path.display(), "detected svn checkout");
            return Ok(Box::new(SvnRepository::new(SystemExecutor::new(path))?));
        }

        info!(path = %path.display(), "no known repository type");
        Ok(Box::new(NoRepository))
    }
}
