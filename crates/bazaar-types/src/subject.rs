//! Subject identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity reference of a subject (regular user or super-admin).
///
/// Regular users and super-admins live in disjoint stores, so the same
/// value in two stores names two unrelated subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Create a new random subject ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a subject ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SubjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
