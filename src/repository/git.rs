use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{ErrorCode, Repository as Git2Repo, Status, StatusOptions};
use tracing::{debug, warn};

use crate::domain::{Key, Series, Version};
use crate::error::{ReleaseError, Result};
use crate::repository::{select_releases, Repository};

/// Git checkout, accessed through `git2`.
///
/// Releases are annotated tags pushed to a remote. libgit2 can't sign tags,
/// so signed releases are tagged by the `git` command line client instead.
pub struct GitRepository {
    repo: Git2Repo,
    remote: String,
    push: bool,
}

impl GitRepository {
    /// Open the git repository at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path.as_ref()).map_err(|e| {
            ReleaseError::repository_caused_by(
                format!("Not a git repository: {}", path.as_ref().display()),
                e,
            )
        })?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        GitRepository {
            repo,
            remote: "origin".to_string(),
            push: true,
        }
    }

    /// Remote new release tags are pushed to
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Whether new release tags are pushed at all
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseError::repository("Can't create release from a bare repository"))
    }

    fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<Vec<String>> {
        let failure = |e: git2::Error| ReleaseError::repository_caused_by("Failure while creating release", e);

        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(failure)?;
        let signature = self.repo.signature().map_err(failure)?;
        self.repo
            .tag(tag_name, head.as_object(), &signature, message, false)
            .map_err(failure)?;

        Ok(vec![format!("Created tag {}", tag_name)])
    }

    fn create_signed_tag(&self, tag_name: &str, message: &str, key: &Key) -> Result<Vec<String>> {
        let workdir = self.workdir()?;
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(&workdir)
            .args(signed_tag_args(tag_name, message, key));

        debug!(?command, "creating signed tag");
        let output = command
            .output()
            .map_err(|e| ReleaseError::repository_caused_by("Failure while creating release", e))?;

        if !output.status.success() {
            return Err(ReleaseError::repository(format!(
                "Failure while creating release: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        lines.push(format!("Created tag {} signed with {}", tag_name, key));
        Ok(lines)
    }

    fn changes(&self) -> Result<Vec<(Status, String)>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .map_err(|e| ReleaseError::repository_caused_by("Failure while checking git status", e))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT && !entry.status().is_ignored())
            .map(|entry| {
                (
                    entry.status(),
                    entry.path().unwrap_or("<non utf-8 path>").to_string(),
                )
            })
            .collect())
    }

    /// Pushes a tag to the configured remote.
    ///
    /// Authenticates with SSH keys from ~/.ssh/, the SSH agent or the
    /// default credential helper, in that order.
    fn push_tag(&self, tag_name: &str) -> Result<()> {
        let failure = |e: git2::Error| {
            ReleaseError::repository_caused_by(
                format!("Failure while pushing release {} to {}", tag_name, self.remote),
                e,
            )
        };

        let mut remote = self.repo.find_remote(&self.remote).map_err(failure)?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key_name in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let key_path = home.join(".ssh").join(key_name);
                        if key_path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &key_path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                warn!(refname, status, "remote rejected reference");
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(failure)
    }
}

/// Arguments for `git` creating a signed annotated tag.
///
/// The default key is picked by `-s`, a specific one by `-u <id>`.
fn signed_tag_args(tag_name: &str, message: &str, key: &Key) -> Vec<String> {
    let mut args = vec!["tag".to_string()];
    match key.id() {
        Some(id) => args.extend(["-u".to_string(), id.to_string()]),
        None => args.push("-s".to_string()),
    }
    args.extend(["-a", tag_name, "-m", message].map(str::to_string));
    args
}

/// Two letter status code as printed by `git status --short`
fn short_status(status: Status) -> &'static str {
    if status.is_conflicted() {
        return "UU";
    }
    if status.is_wt_new() {
        return "??";
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };
    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    match (index, worktree) {
        ('A', ' ') => "A ",
        ('A', 'M') => "AM",
        ('A', 'D') => "AD",
        ('M', ' ') => "M ",
        ('M', 'M') => "MM",
        ('M', 'D') => "MD",
        ('D', _) => "D ",
        ('R', ' ') => "R ",
        ('R', 'M') => "RM",
        ('T', _) => "T ",
        (_, 'M') => " M",
        (_, 'D') => " D",
        (_, 'R') => " R",
        (_, 'T') => " T",
        _ => "  ",
    }
}

impl Repository for GitRepository {
    fn is_dirty(&self) -> Result<bool> {
        Ok(!self.changes()?.is_empty())
    }

    fn read_status(&self) -> Result<Vec<String>> {
        Ok(self
            .changes()?
            .into_iter()
            .map(|(status, path)| format!("{} {}", short_status(status), path))
            .collect())
    }

    fn branch(&self) -> Result<String> {
        let no_branch =
            || ReleaseError::repository("Failure while retrieving current branch: no branches available");

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Err(no_branch())
            }
            Err(e) => {
                return Err(ReleaseError::repository_caused_by(
                    "Failure while retrieving current branch",
                    e,
                ))
            }
        };

        if !head.is_branch() {
            return Err(no_branch());
        }

        head.shorthand().map(str::to_string).ok_or_else(no_branch)
    }

    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None).map_err(|e| {
            ReleaseError::repository_caused_by("Failure while retrieving last releases", e)
        })?;

        Ok(select_releases(
            tags.iter().flatten().map(str::to_string),
            series,
            limit,
        ))
    }

    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>> {
        let tag_name = version.to_string();
        let message = format!("tag release {}", tag_name);

        let mut output = match key {
            Some(key) => self.create_signed_tag(&tag_name, &message, key)?,
            None => self.create_annotated_tag(&tag_name, &message)?,
        };

        if self.push {
            self.push_tag(&tag_name)?;
            output.push(format!("Pushed tag {} to {}", tag_name, self.remote));
        } else {
            debug!(tag = %tag_name, "push disabled, tag only created locally");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_status() {
        assert_eq!(short_status(Status::WT_NEW), "??");
        assert_eq!(short_status(Status::WT_MODIFIED), " M");
        assert_eq!(short_status(Status::INDEX_NEW), "A ");
        assert_eq!(short_status(Status::INDEX_MODIFIED | Status::WT_MODIFIED), "MM");
        assert_eq!(short_status(Status::CONFLICTED), "UU");
    }

    #[test]
    fn test_signed_tag_args_default_key() {
        let args = signed_tag_args("v1.1.0", "tag release v1.1.0", &Key::default());
        assert_eq!(
            args,
            vec!["tag", "-s", "-a", "v1.1.0", "-m", "tag release v1.1.0"]
        );
    }

    #[test]
    fn test_signed_tag_args_named_key() {
        let args = signed_tag_args("v1.1.0", "tag release v1.1.0", &Key::new("0xCAFE"));
        assert_eq!(
            args,
            vec!["tag", "-u", "0xCAFE", "-a", "v1.1.0", "-m", "tag release v1.1.0"]
        );
    }

    #[test]
    fn test_open_not_a_repo() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = GitRepository::open(temp_dir.path());
        assert!(matches!(result, Err(ReleaseError::Repository { .. })));
    }
}
