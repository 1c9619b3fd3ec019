use tracing::debug;

use crate::domain::{Key, Series, Version};
use crate::error::{ReleaseError, Result};
use crate::repository::{select_releases, Executor, Repository, SystemExecutor};

/// Subversion checkout, driven through the `svn` command line client.
///
/// Releases are copies of the checkout below the `tags` directory that sits
/// next to `trunk` and `branches` in the repository layout.
pub struct SvnRepository<E: Executor = SystemExecutor> {
    executor: E,
    svn_url: String,
    tags_url: String,
}

impl<E: Executor> SvnRepository<E> {
    /// Inspect the checkout via `svn info` and derive its tags URL
    pub fn new(executor: E) -> Result<Self> {
        let info = executor
            .output_of("svn", &["info"])
            .map_err(|e| ReleaseError::repository_caused_by("Failure while checking svn info", e))?;

        let svn_url = info
            .iter()
            .find_map(|line| line.strip_prefix("URL: "))
            .map(str::to_string)
            .ok_or_else(|| {
                ReleaseError::repository(
                    "Could not retrieve svn tag url, can not create release for this svn repository",
                )
            })?;
        let tags_url = tags_url_of(&svn_url)?;
        debug!(%svn_url, %tags_url, "detected svn checkout");

        Ok(SvnRepository {
            executor,
            svn_url,
            tags_url,
        })
    }

    pub fn tags_url(&self) -> &str {
        &self.tags_url
    }

    fn execute(&self, args: &[&str], error_message: &str) -> Result<Vec<String>> {
        self.executor
            .output_of("svn", args)
            .map_err(|e| ReleaseError::repository_caused_by(error_message, e))
    }
}

fn tags_url_of(svn_url: &str) -> Result<String> {
    if let Some(index) = svn_url.find("/trunk") {
        return Ok(format!("{}/tags", &svn_url[..index]));
    }

    if let Some(index) = svn_url.find("/branches/") {
        return Ok(format!("{}/tags", &svn_url[..index]));
    }

    Err(ReleaseError::repository(format!(
        "Can not extract tag url from current svn checkout url {}",
        svn_url
    )))
}

impl<E: Executor> Repository for SvnRepository<E> {
    fn is_dirty(&self) -> Result<bool> {
        let status = self.execute(&["status"], "Failure while checking svn status")?;
        Ok(status.iter().any(|line| !line.trim().is_empty()))
    }

    fn read_status(&self) -> Result<Vec<String>> {
        self.execute(&["status"], "Failure while checking svn status")
    }

    fn branch(&self) -> Result<String> {
        if self.svn_url.contains("/trunk") {
            return Ok("trunk".to_string());
        }

        Ok(self
            .svn_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string())
    }

    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>> {
        let listing = self.execute(
            &["list", &self.tags_url],
            "Failure while retrieving last releases",
        )?;

        Ok(select_releases(
            listing
                .into_iter()
                .map(|entry| entry.trim_end_matches('/').to_string()),
            series,
            limit,
        ))
    }

    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>> {
        if key.is_some() {
            return Err(ReleaseError::repository(
                "Signing releases is not supported for svn repositories",
            ));
        }

        let target = format!("{}/{}", self.tags_url, version);
        let message = format!("tag release {}", version);
        self.execute(
            &["cp", ".", &target, "-m", &message],
            "Failure while creating release",
        )
    }
}
