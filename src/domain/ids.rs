//! Domain identifier types
//!
//! Newtype wrappers that keep film identifiers and job identifiers from being
//! mixed up. Both are 64-bit integers at the storage boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Film identifier newtype wrapper
///
/// Unique and stable for the lifetime of a catalog entry.
///
/// # Examples
///
/// ```
/// use filmo_batch::domain::ids::FilmId;
/// use std::str::FromStr;
///
/// let id = FilmId::from_str("42").unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilmId(i64);

impl FilmId {
    /// Creates a new FilmId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for FilmId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FilmId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid film ID '{s}': {e}"))
    }
}

/// Job identifier newtype wrapper
///
/// Identifies one pipeline run. It is stamped onto every marker the run
/// creates and is advisory metadata only: nothing relies on it for
/// correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

impl JobId {
    /// Creates a new JobId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid job ID '{s}': {e}"))
    }
}
