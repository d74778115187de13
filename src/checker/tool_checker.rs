//! Per-tool checks.
//!
//! A check runs four stages in order: locate the program on PATH, run the
//! version command, extract the version text, and test it against the
//! tool's requirement. The first failing stage decides the status.

use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use super::command::run_command;
use super::config::CheckerConfig;
use super::extract::extract_version;
use super::path::{parse_system_path, resolve_tool_path};
use super::result::CheckResult;
use super::status::{CheckError, CheckErrorKind, CheckStatus};
use crate::error::DoctorError;
use crate::manifest::ToolDefinition;
use crate::platform::PlatformInfo;
use crate::semver::{ConstraintSet, Version};

/// Checks tool definitions against the local machine.
pub struct ToolChecker {
    config: CheckerConfig,
    path_entries: Vec<PathBuf>,
}

impl ToolChecker {
    /// Create a checker that searches the process PATH.
    pub fn new(config: CheckerConfig) -> Self {
        Self::with_path(config, parse_system_path())
    }

    /// Create a checker that searches the given directories.
    pub fn with_path(config: CheckerConfig, path_entries: Vec<PathBuf>) -> Self {
        Self {
            config,
            path_entries,
        }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check every tool, sequentially and in order.
    pub fn check_all(&self, tools: &[ToolDefinition], platform: &PlatformInfo) -> Vec<CheckResult> {
        tools
            .iter()
            .map(|tool| self.check_tool(tool, platform))
            .collect()
    }

    /// Check a single tool.
    pub fn check_tool(&self, tool: &ToolDefinition, platform: &PlatformInfo) -> CheckResult {
        let start = Instant::now();
        debug!("Checking tool '{}'", tool.id);

        let mut result = CheckResult {
            tool_id: tool.id.clone(),
            tool_name: tool.name.clone(),
            status: CheckStatus::Missing,
            required_version: tool.required_version.clone(),
            actual_version: None,
            command_path: None,
            error_message: None,
            error_kind: None,
            platform: platform.to_string(),
            links: tool.links.clone(),
            check_duration: Default::default(),
        };

        match self.evaluate(tool, &mut result) {
            Ok(status) => result.status = status,
            Err(e) => {
                result.status = match e.kind {
                    CheckErrorKind::VersionMismatch => CheckStatus::Outdated,
                    _ => CheckStatus::Error,
                };
                result.error_kind = Some(e.kind);
                result.error_message = Some(e.message);
            }
        }

        result.check_duration = start.elapsed();
        debug!(
            "Tool '{}' is {} ({:?})",
            tool.id, result.status, result.check_duration
        );

        result
    }

    fn evaluate(
        &self,
        tool: &ToolDefinition,
        result: &mut CheckResult,
    ) -> Result<CheckStatus, CheckError> {
        let program = tool.check_command().first().ok_or_else(|| {
            CheckError::new(CheckErrorKind::Configuration, "no check command specified")
        })?;

        let Some(path) = resolve_tool_path(program, &self.path_entries) else {
            result.error_message = Some("Command not found".to_string());
            return Ok(CheckStatus::Missing);
        };
        result.command_path = Some(path.clone());

        let mut argv = tool.check_command().to_vec();
        argv[0] = path.display().to_string();

        let timeout = self.config.timeout_for(tool);
        let output = run_command(&argv, timeout).map_err(|e| match e {
            DoctorError::CommandTimeout { timeout, .. } => CheckError::new(
                CheckErrorKind::Timeout,
                format!("command timed out after {}s", timeout.as_secs()),
            ),
            other => CheckError::new(
                CheckErrorKind::Execution,
                format!("failed to run version command: {}", other),
            ),
        })?;

        let text = extract_version(&output.output, tool.version_regex(), &self.config.regex_key)
            .map_err(|e| CheckError::new(e.kind, format!("failed to parse version: {}", e)))?;
        result.actual_version = Some(text.clone());

        let actual = Version::parse(&text).map_err(|e| {
            CheckError::new(
                CheckErrorKind::Parsing,
                format!("invalid actual version format: {}", e),
            )
        })?;

        let required = ConstraintSet::parse(&tool.required_version).map_err(|e| {
            CheckError::new(
                CheckErrorKind::Configuration,
                format!("invalid required version constraint: {}", e),
            )
        })?;

        if required.is_satisfied_by(&actual) {
            Ok(CheckStatus::Ok)
        } else {
            Err(CheckError::new(
                CheckErrorKind::VersionMismatch,
                format!("version {} does not satisfy {}", text, required),
            ))
        }
    }
}
