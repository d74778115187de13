//! Check results and the aggregated environment report.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::status::{CheckErrorKind, CheckStatus};
use crate::error::{DoctorError, Result};
use crate::platform::PlatformInfo;

/// Report schema version emitted in JSON output.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Outcome of checking one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    #[serde(rename = "id")]
    pub tool_id: String,

    #[serde(rename = "name")]
    pub tool_name: String,

    pub status: CheckStatus,

    pub required_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(skip)]
    pub error_kind: Option<CheckErrorKind>,

    pub platform: String,

    pub links: BTreeMap<String, String>,

    #[serde(rename = "check_duration_ms", serialize_with = "serialize_millis")]
    pub check_duration: Duration,
}

fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl CheckResult {
    /// Whether the tool needs attention.
    pub fn needs_attention(&self) -> bool {
        !self.status.is_ok()
    }

    /// Check that the status agrees with the populated fields.
    pub fn validate(&self) -> Result<()> {
        if self.tool_id.is_empty() || self.tool_name.is_empty() || self.required_version.is_empty()
        {
            return Err(invalid("required fields cannot be empty"));
        }

        if self.links.is_empty() {
            return Err(invalid("links cannot be empty"));
        }

        match self.status {
            CheckStatus::Ok if self.actual_version.is_none() => {
                Err(invalid("ok status must have an actual version"))
            }
            CheckStatus::Outdated if self.actual_version.is_none() => {
                Err(invalid("outdated status must have an actual version"))
            }
            CheckStatus::Missing if self.actual_version.is_some() => {
                Err(invalid("missing status must not have an actual version"))
            }
            CheckStatus::Error if self.error_message.is_none() => {
                Err(invalid("error status must have an error message"))
            }
            _ => Ok(()),
        }
    }
}

/// Per-status totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub ok: usize,
    pub missing: usize,
    pub outdated: usize,
    pub errors: usize,
}

impl CheckSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            match result.status {
                CheckStatus::Ok => summary.ok += 1,
                CheckStatus::Missing => summary.missing += 1,
                CheckStatus::Outdated => summary.outdated += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }

        summary
    }

    /// Tools that are not OK.
    pub fn needing_attention(&self) -> usize {
        self.missing + self.outdated + self.errors
    }
}

/// Full result of a doctor run.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub schema_version: u32,
    pub platform: PlatformInfo,
    pub summary: CheckSummary,
    pub manifest_source: String,
    pub items: Vec<CheckResult>,
    pub generated_at: DateTime<Utc>,
}

impl EnvironmentReport {
    /// Build a report stamped with the current time.
    pub fn new(
        platform: PlatformInfo,
        manifest_source: impl Into<String>,
        items: Vec<CheckResult>,
    ) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            platform,
            summary: CheckSummary::from_results(&items),
            manifest_source: manifest_source.into(),
            items,
            generated_at: Utc::now(),
        }
    }

    /// True when no tool is missing, outdated, or errored.
    pub fn is_successful(&self) -> bool {
        self.summary.needing_attention() == 0
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        if self.is_successful() {
            0
        } else {
            1
        }
    }

    /// Items that are not OK, in report order.
    pub fn failing_items(&self) -> impl Iterator<Item = &CheckResult> {
        self.items.iter().filter(|item| item.needs_attention())
    }

    /// Check the report's internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != REPORT_SCHEMA_VERSION {
            return Err(invalid(format!(
                "unsupported schema version: {}",
                self.schema_version
            )));
        }

        if self.manifest_source.is_empty() {
            return Err(invalid("manifest source cannot be empty"));
        }

        if self.summary.total != self.items.len() {
            return Err(invalid("summary total mismatch"));
        }

        let counted = self.summary.ok + self.summary.needing_attention();
        if counted != self.summary.total {
            return Err(invalid("summary counts don't add up to total"));
        }

        for (index, item) in self.items.iter().enumerate() {
            item.validate().map_err(|e| {
                invalid(format!("item {} ({}) is invalid: {}", index, item.tool_id, e))
            })?;
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> DoctorError {
    DoctorError::InvalidReport {
        message: message.into(),
    }
}
