//! Manifest schema definitions.
//!
//! These structs map one-to-one onto the `tools.yaml` format. Every
//! section deserializes leniently (missing fields take their zero value)
//! so that the validator can report all problems at once instead of
//! failing on the first absent key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Manifest schema version understood by this build.
pub const SUPPORTED_MANIFEST_VERSION: i64 = 1;

/// Command timeout used when neither the tool nor the manifest sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Capture group name preferred when extracting versions.
pub const DEFAULT_REGEX_KEY: &str = "ver";

/// Root of a tool manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub meta: ManifestMeta,

    #[serde(skip_serializing_if = "Defaults::is_empty")]
    pub defaults: Defaults,

    pub tools: Vec<ToolDefinition>,
}

/// Manifest metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestMeta {
    /// Schema version, must be 1
    pub version: i64,

    /// Display name of the manifest
    pub name: String,

    /// ISO 639-1 language code
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
}

/// Values applied to tools that do not set their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Command timeout in seconds; 0 means the built-in default
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout_sec: i64,

    /// Preferred named capture group for version extraction
    #[serde(skip_serializing_if = "String::is_empty")]
    pub regex_key: String,
}

impl Defaults {
    /// Effective command timeout.
    pub fn timeout(&self) -> Duration {
        if self.timeout_sec > 0 {
            Duration::from_secs(self.timeout_sec as u64)
        } else {
            DEFAULT_TIMEOUT
        }
    }

    /// Effective capture group name.
    pub fn regex_key(&self) -> &str {
        if self.regex_key.is_empty() {
            DEFAULT_REGEX_KEY
        } else {
            &self.regex_key
        }
    }

    fn is_empty(&self) -> bool {
        self.timeout_sec == 0 && self.regex_key.is_empty()
    }
}

/// A required tool, how to detect it, and where to get it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefinition {
    /// Stable identifier (`^[a-z0-9-]+$`)
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Why the team needs this tool
    pub rationale: String,

    /// Constraint list such as `>=1.22 <1.25`
    #[serde(rename = "require")]
    pub required_version: String,

    /// Detection command and extraction pattern
    pub check: CheckConfig,

    /// Named help links (homepage, docs, download, ...)
    pub links: BTreeMap<String, String>,

    /// Per-tool command timeout in seconds; 0 means inherit
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout_sec: i64,
}

impl ToolDefinition {
    /// Argv of the version command.
    pub fn check_command(&self) -> &[String] {
        &self.check.cmd
    }

    /// Regex used to pull the version out of command output.
    pub fn version_regex(&self) -> &str {
        &self.check.regex
    }

    /// Tool-specific timeout, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_sec > 0).then(|| Duration::from_secs(self.timeout_sec as u64))
    }

    /// Fill unset values from the manifest defaults.
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        if self.timeout_sec == 0 && defaults.timeout_sec > 0 {
            self.timeout_sec = defaults.timeout_sec;
        }
    }
}

/// How a tool's version is detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Program and arguments; executed directly, never via a shell
    pub cmd: Vec<String>,

    /// Extraction pattern with a named capture group
    pub regex: String,
}

impl Manifest {
    /// Apply manifest defaults to every tool.
    pub fn apply_defaults(&mut self) {
        let defaults = self.defaults.clone();
        for tool in &mut self.tools {
            tool.apply_defaults(&defaults);
        }
    }

    /// Look up a tool by id.
    pub fn tool(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
