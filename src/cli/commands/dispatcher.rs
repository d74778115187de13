//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the global flags every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::time::Duration;

use tracing::{debug, warn};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::manifest::{load_manifests, Manifest};
use crate::ui::{should_use_colors, UserInterface};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Build a result from an exit code.
    pub fn from_exit_code(exit_code: u8) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Manifest sources in override order.
    pub manifests: Vec<String>,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Per-command timeout override.
    pub timeout: Option<Duration>,
    /// Style human output.
    pub colors: bool,
}

impl CommandContext {
    /// Build the context from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            manifests: cli.manifests.clone(),
            json: cli.json,
            timeout: cli.timeout(),
            colors: !cli.json && should_use_colors(cli.no_color),
        }
    }

    /// Manifest sources for display, comma separated.
    pub fn manifest_source(&self) -> String {
        self.manifests
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Load the merged manifest, reporting failures through the UI.
    ///
    /// Returns `None` when loading failed and the error was shown.
    pub fn load_manifest(&self, ui: &mut dyn UserInterface) -> Option<Manifest> {
        match load_manifests(&self.manifests) {
            Ok(manifest) => {
                debug!(
                    "Loaded manifest '{}' with {} tool(s)",
                    manifest.meta.name,
                    manifest.tools.len()
                );
                Some(manifest)
            }
            Err(e) => {
                warn!("Manifest load failed: {}", e);
                ui.error(&format!("Error loading manifest: {}", e));
                None
            }
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. With no subcommand, `doctor` runs.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = cli.command.unwrap_or(Commands::Doctor);
        debug!("Dispatching {:?}", command);

        match command {
            Commands::Doctor => super::doctor::DoctorCommand::new(self.context.clone()).execute(ui),
            Commands::List => super::list::ListCommand::new(self.context.clone()).execute(ui),
            Commands::Validate => {
                super::validate::ValidateCommand::new(self.context.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn command_result_from_exit_code() {
        assert!(CommandResult::from_exit_code(0).success);
        assert!(!CommandResult::from_exit_code(1).success);
    }

    #[test]
    fn context_from_cli() {
        let cli = Cli::try_parse_from([
            "envdoctor",
            "-f",
            "a.yaml",
            "-f",
            "b.yaml",
            "--json",
            "--timeout",
            "7",
        ])
        .unwrap();
        let context = CommandContext::from_cli(&cli);

        assert_eq!(context.manifests, vec!["a.yaml", "b.yaml"]);
        assert!(context.json);
        assert!(!context.colors);
        assert_eq!(context.timeout, Some(Duration::from_secs(7)));
        assert_eq!(context.manifest_source(), "a.yaml, b.yaml");
    }

    #[test]
    fn load_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let context = CommandContext {
            manifests: vec![temp.path().join("tools.yaml").display().to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::new();

        assert!(context.load_manifest(&mut ui).is_none());
        assert!(ui.has_error("Error loading manifest: Manifest not found"));
    }

    #[test]
    fn dispatcher_defaults_to_doctor() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("tools.yaml").display().to_string();
        let cli = Cli::try_parse_from(["envdoctor", "-f", missing.as_str()]).unwrap();
        let dispatcher = CommandDispatcher::new(CommandContext::from_cli(&cli));
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Error loading manifest"));
    }
}
