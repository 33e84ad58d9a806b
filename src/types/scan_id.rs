//! Identifiers for saved scan sessions.
//!
//! Ids look like `scan-1718000000000-k3j9x0a2b`: the creation time in epoch
//! milliseconds followed by a random base-36 suffix.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A unique identifier for a saved scan session.
///
/// Stored blobs may carry ids produced by other writers, so deserialization
/// accepts any string; only freshly generated ids follow the format above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
    /// Generate a new id for a scan created at `now_ms`.
    pub fn generate(now_ms: i64) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();

        Self(format!("scan-{}-{}", now_ms, suffix))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for display: the random suffix of generated ids, or the
    /// first eight characters of anything else.
    pub fn short(&self) -> &str {
        match self.0.rsplit_once('-') {
            Some((head, tail)) if head.starts_with("scan-") && !tail.is_empty() => tail,
            _ => self.0.get(..8).unwrap_or(&self.0),
        }
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ScanId {
    type Err = ScanIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ScanIdError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ScanIdError::InvalidFormat(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

/// Error type for ScanId parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanIdError {
    #[error("scan ID cannot be empty")]
    Empty,
    #[error("invalid scan ID format: {0}")]
    InvalidFormat(String),
}
