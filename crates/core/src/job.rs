//! Validated Slurm job identifiers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Job IDs are plain digit strings.
static JOB_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]+$").expect("valid regex"));

/// A Slurm job ID that has passed the numeric format check.
///
/// `scancel` and `scontrol` take `&JobId`, so an unvalidated string can
/// never reach a spawned process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
    /// Validate `raw` against `^[0-9]+$`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if JOB_ID_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CoreError::InvalidJobId(raw.to_string()))
        }
    }

    /// The validated digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
