//! Check status and failure classification.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Outcome of checking a single tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Installed and the version satisfies the requirement
    Ok,
    /// Not found on PATH
    Missing,
    /// Installed but the version falls outside the requirement
    Outdated,
    /// The check itself could not be completed
    Error,
}

impl CheckStatus {
    /// Short lowercase name, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Missing => "missing",
            CheckStatus::Outdated => "outdated",
            CheckStatus::Error => "error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stage of a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckErrorKind {
    /// The tool definition itself is unusable
    Configuration,
    /// The version command could not run or exited unsuccessfully
    Execution,
    /// Output or version text could not be parsed
    Parsing,
    /// The version command exceeded its timeout
    Timeout,
    /// The detected version does not satisfy the requirement
    VersionMismatch,
}

/// A classified check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub message: String,
}

impl CheckError {
    pub fn new(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
