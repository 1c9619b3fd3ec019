use crate::domain::{Key, Series, Version};
use crate::error::{ReleaseError, Result};
use crate::repository::Repository;

const NOT_A_REPOSITORY: &str = "Current directory is not a known type of repository";

/// Stands in for a directory that is no known type of checkout.
///
/// It always reports itself as dirty so that no release is attempted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRepository;

impl Repository for NoRepository {
    fn is_dirty(&self) -> Result<bool> {
        Ok(true)
    }

    fn read_status(&self) -> Result<Vec<String>> {
        Ok(vec![NOT_A_REPOSITORY.to_string()])
    }

    fn branch(&self) -> Result<String> {
        Err(ReleaseError::repository(NOT_A_REPOSITORY))
    }

    fn last_releases(&self, _series: Option<&Series>, _limit: usize) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn create_release(&self, _version: &Version, _key: Option<&Key>) -> Result<Vec<String>> {
        Err(ReleaseError::repository(
            "Can't create release here, is not a known repository",
        ))
    }
}
