use std::fmt;

/// Reference to the key a release tag is signed with.
///
/// Without an id the repository's default signing key is meant; what that
/// is is left to the repository adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Key {
    key_id: Option<String>,
}

impl Key {
    /// Reference a specific key by id
    pub fn new(key_id: impl Into<String>) -> Self {
        Key {
            key_id: Some(key_id.into()),
        }
    }

    pub fn is_default(&self) -> bool {
        self.key_id.is_none()
    }

    pub fn id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key_id {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "default key"),
        }
    }
}
