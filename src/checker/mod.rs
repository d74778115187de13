//! Tool detection and version checking.
//!
//! This module locates each tool, runs its version command, and decides
//! whether the detected version meets the manifest requirement.
//!
//! # Modules
//!
//! - [`config`] - Run-wide checker settings
//! - [`path`] - Executable lookup on PATH
//! - [`command`] - Version command execution with timeout
//! - [`extract`] - Regex-based version extraction
//! - [`status`] - Check status and error classification
//! - [`result`] - Per-tool results and the environment report
//! - [`tool_checker`] - The per-tool check pipeline

pub mod command;
pub mod config;
pub mod extract;
pub mod path;
pub mod result;
pub mod status;
pub mod tool_checker;

pub use command::{run_command, CommandOutput};
pub use config::CheckerConfig;
pub use extract::extract_version;
pub use path::{is_executable, parse_system_path, resolve_tool_path};
pub use result::{CheckResult, CheckSummary, EnvironmentReport, REPORT_SCHEMA_VERSION};
pub use status::{CheckError, CheckErrorKind, CheckStatus};
pub use tool_checker::ToolChecker;
