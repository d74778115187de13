//! Checker configuration.

use std::time::Duration;

use crate::manifest::{Defaults, ToolDefinition, DEFAULT_REGEX_KEY, DEFAULT_TIMEOUT};

/// Settings that apply to every tool check in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Timeout for tools that do not set their own.
    pub command_timeout: Duration,

    /// Capture group name tried first when extracting versions.
    pub regex_key: String,

    /// Apply `command_timeout` to every tool, ignoring manifest timeouts.
    pub force_timeout: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_TIMEOUT,
            regex_key: DEFAULT_REGEX_KEY.to_string(),
            force_timeout: false,
        }
    }
}

impl CheckerConfig {
    /// Build from manifest defaults, with an optional override timeout.
    ///
    /// The override (from `--timeout` or the environment) wins over both
    /// `defaults.timeout_sec` and per-tool `timeout_sec`.
    pub fn from_defaults(defaults: &Defaults, timeout_override: Option<Duration>) -> Self {
        Self {
            command_timeout: timeout_override.unwrap_or_else(|| defaults.timeout()),
            regex_key: defaults.regex_key().to_string(),
            force_timeout: timeout_override.is_some(),
        }
    }

    /// Set the fallback timeout for tools without their own.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Timeout to use when checking `tool`.
    pub fn timeout_for(&self, tool: &ToolDefinition) -> Duration {
        if self.force_timeout {
            return self.command_timeout;
        }
        tool.timeout().unwrap_or(self.command_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtins() {
        let config = CheckerConfig::default();
        assert_eq!(config.command_timeout, Duration::from_secs(5));
        assert_eq!(config.regex_key, "ver");
    }

    #[test]
    fn from_defaults_reads_manifest() {
        let defaults = Defaults {
            timeout_sec: 12,
            regex_key: "version".into(),
        };
        let config = CheckerConfig::from_defaults(&defaults, None);
        assert_eq!(config.command_timeout, Duration::from_secs(12));
        assert_eq!(config.regex_key, "version");
    }

    #[test]
    fn override_beats_manifest_timeout() {
        let defaults = Defaults {
            timeout_sec: 12,
            regex_key: String::new(),
        };
        let config = CheckerConfig::from_defaults(&defaults, Some(Duration::from_secs(2)));
        assert_eq!(config.command_timeout, Duration::from_secs(2));
        assert_eq!(config.regex_key, "ver");
        assert!(config.force_timeout);
    }

    #[test]
    fn tool_timeout_applies_unless_forced() {
        let tool = ToolDefinition {
            timeout_sec: 9,
            ..Default::default()
        };
        let untimed = ToolDefinition::default();

        let config = CheckerConfig::default();
        assert_eq!(config.timeout_for(&tool), Duration::from_secs(9));
        assert_eq!(config.timeout_for(&untimed), Duration::from_secs(5));

        let forced = CheckerConfig::from_defaults(&Defaults::default(), Some(Duration::from_secs(1)));
        assert_eq!(forced.timeout_for(&tool), Duration::from_secs(1));
    }

    #[test]
    fn with_timeout_replaces_timeout() {
        let config = CheckerConfig::default().with_timeout(Duration::from_millis(250));
        assert_eq!(config.command_timeout, Duration::from_millis(250));
    }
}
