use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::domain::{Key, Series, Version};
use crate::error::{ReleaseError, Result};
use crate::repository::{select_releases, Executor, Repository};

/// Mock repository for testing without actual version control operations
#[derive(Debug, Default)]
pub struct MockRepository {
    dirty: bool,
    status: Vec<String>,
    branch: Option<String>,
    releases: Vec<String>,
    release_output: Vec<String>,
    release_queries: RefCell<Vec<(Option<String>, usize)>>,
    created: RefCell<Vec<(Version, Option<Key>)>>,
}

impl MockRepository {
    /// Create a new clean mock repository without branch and releases
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Add existing release tags
    pub fn with_releases<I, S>(mut self, releases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.releases.extend(releases.into_iter().map(Into::into));
        self
    }

    /// Mark the checkout as having local changes described by `status`
    pub fn dirty<I, S>(mut self, status: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirty = true;
        self.status = status.into_iter().map(Into::into).collect();
        self
    }

    /// Output returned when a release is created
    pub fn with_release_output<I, S>(mut self, output: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.release_output = output.into_iter().map(Into::into).collect();
        self
    }

    /// Series filter and limit of every `last_releases` call, in order
    pub fn release_queries(&self) -> Vec<(Option<String>, usize)> {
        self.release_queries.borrow().clone()
    }

    /// Releases created so far
    pub fn created_releases(&self) -> Vec<(Version, Option<Key>)> {
        self.created.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn read_status(&self) -> Result<Vec<String>> {
        Ok(self.status.clone())
    }

    fn branch(&self) -> Result<String> {
        self.branch.clone().ok_or_else(|| {
            ReleaseError::repository("Failure while retrieving current branch: no branches available")
        })
    }

    fn last_releases(&self, series: Option<&Series>, limit: usize) -> Result<Vec<String>> {
        self.release_queries
            .borrow_mut()
            .push((series.map(Series::to_string), limit));
        Ok(select_releases(self.releases.clone(), series, limit))
    }

    fn create_release(&self, version: &Version, key: Option<&Key>) -> Result<Vec<String>> {
        self.created
            .borrow_mut()
            .push((version.clone(), key.cloned()));
        Ok(self.release_output.clone())
    }
}

/// Executor replaying prepared command results and recording the commands it got
#[derive(Debug, Default)]
pub struct MockExecutor {
    results: RefCell<VecDeque<std::result::Result<Vec<String>, String>>>,
    calls: RefCell<Vec<String>>,
}

impl MockExecutor {
    /// Create an executor answering every command with empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful command producing `lines`
    pub fn returns<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.results
            .borrow_mut()
            .push_back(Ok(lines.into_iter().map(Into::into).collect()));
        self
    }

    /// Queue a failing command
    pub fn fails(self, message: impl Into<String>) -> Self {
        self.results.borrow_mut().push_back(Err(message.into()));
        self
    }

    /// Commands executed so far, program and arguments joined by spaces
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Executor for MockExecutor {
    fn output_of(&self, program: &str, args: &[&str]) -> io::Result<Vec<String>> {
        let mut call = vec![program];
        call.extend_from_slice(args);
        self.calls.borrow_mut().push(call.join(" "));

        match self.results.borrow_mut().pop_front() {
            Some(Ok(lines)) => Ok(lines),
            Some(Err(message)) => Err(io::Error::new(io::ErrorKind::Other, message)),
            None => Ok(Vec::new()),
        }
    }
}
