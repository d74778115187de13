//! Doctor command implementation.
//!
//! The `envdoctor doctor` command checks every tool in the manifest and
//! prints a report. It is also what runs when no subcommand is given.

use std::path::PathBuf;

use tracing::debug;

use crate::checker::{CheckerConfig, EnvironmentReport, ToolChecker};
use crate::error::Result;
use crate::output::{format_report_json, HumanFormatter};
use crate::platform::PlatformInfo;
use crate::ui::{DoctorTheme, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    context: CommandContext,
    platform: Option<PlatformInfo>,
    path_entries: Option<Vec<PathBuf>>,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(context: CommandContext) -> Self {
        Self {
            context,
            platform: None,
            path_entries: None,
        }
    }

    /// Check against a fixed platform instead of the detected one.
    pub fn with_platform(mut self, platform: PlatformInfo) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Search these directories instead of the process PATH.
    pub fn with_path(mut self, path_entries: Vec<PathBuf>) -> Self {
        self.path_entries = Some(path_entries);
        self
    }

    fn checker(&self, config: CheckerConfig) -> ToolChecker {
        match &self.path_entries {
            Some(entries) => ToolChecker::with_path(config, entries.clone()),
            None => ToolChecker::new(config),
        }
    }

    fn render(&self, report: &EnvironmentReport, ui: &mut dyn UserInterface) -> Result<()> {
        if self.context.json {
            ui.emit(&format_report_json(report, true)?);
            return Ok(());
        }

        let mode = ui.output_mode();
        let formatter = HumanFormatter::new(DoctorTheme::for_colors(self.context.colors))
            .verbose(mode.shows_details());

        if mode == OutputMode::Quiet {
            ui.emit(&formatter.format_quick_summary(report));
        } else {
            ui.emit(&formatter.format_report(report));
        }
        Ok(())
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(manifest) = self.context.load_manifest(ui) else {
            return Ok(CommandResult::failure(1));
        };

        let platform = self.platform.clone().unwrap_or_else(PlatformInfo::detect);
        if let Err(e) = platform.validate() {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(1));
        }

        let config = CheckerConfig::from_defaults(&manifest.defaults, self.context.timeout);
        debug!(
            "Checking {} tool(s) on {} with {:?} timeout",
            manifest.tools.len(),
            platform,
            config.command_timeout
        );

        let items = self.checker(config).check_all(&manifest.tools, &platform);
        let report = EnvironmentReport::new(platform, self.context.manifest_source(), items);
        report.validate()?;

        debug!(
            "{} of {} tool(s) OK",
            report.summary.ok, report.summary.total
        );

        self.render(&report, ui)?;
        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake_tool(dir: &Path, name: &str, output: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\necho '{}'\n", output)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    const MANIFEST: &str = r#"
meta:
  version: 1
  name: Test
tools:
  - id: go
    name: Go
    rationale: Backend services
    require: ">=1.22"
    check:
      cmd: ["go", "version"]
      regex: 'go(?P<ver>\d+\.\d+(\.\d+)?)'
    links:
      homepage: https://go.dev/
  - id: node
    name: Node.js
    rationale: Frontend tooling
    require: ">=20"
    check:
      cmd: ["node", "--version"]
      regex: 'v(?P<ver>\d+\.\d+\.\d+)'
    links:
      homepage: https://nodejs.org/
"#;

    fn setup(with_node: bool) -> (TempDir, DoctorCommand, CommandContext) {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fake_tool(&bin, "go", "go version go1.22.3 linux/amd64");
        if with_node {
            fake_tool(&bin, "node", "v20.11.0");
        }

        let manifest = temp.path().join("tools.yaml");
        fs::write(&manifest, MANIFEST).unwrap();

        let context = CommandContext {
            manifests: vec![manifest.display().to_string()],
            ..Default::default()
        };
        let cmd = DoctorCommand::new(context.clone())
            .with_platform(PlatformInfo::new("linux", "amd64"))
            .with_path(vec![bin]);
        (temp, cmd, context)
    }

    #[test]
    fn all_tools_ok_succeeds() {
        let (_temp, cmd, _) = setup(true);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        let out = ui.stdout();
        assert!(out.contains("Development Environment Check"));
        assert!(out.contains("✓ 2 tools OK"));
        assert!(!out.contains("Recommendations:"));
    }

    #[test]
    fn missing_tool_fails() {
        let (_temp, cmd, _) = setup(false);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        let out = ui.stdout();
        assert!(out.contains("✗ 1 tools missing"));
        assert!(out.contains("Install this tool to continue development"));
    }

    #[test]
    fn quiet_mode_prints_summary_line() {
        let (_temp, cmd, _) = setup(false);
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.documents(), &["✗ 1 of 2 tools need attention".to_string()]);
    }

    #[test]
    fn json_mode_emits_report() {
        let (temp, _, mut context) = setup(true);
        context.json = true;
        let bin = temp.path().join("bin");
        let cmd = DoctorCommand::new(context)
            .with_platform(PlatformInfo::new("darwin", "arm64"))
            .with_path(vec![bin]);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);

        let value: serde_json::Value = serde_json::from_str(&ui.stdout()).unwrap();
        assert_eq!(value["summary"]["ok"], 2);
        assert_eq!(value["platform"]["os"], "darwin");
        assert_eq!(value["items"][1]["actual_version"], "20.11.0");
    }

    #[test]
    fn unsupported_platform_fails() {
        let (_temp, cmd, _) = setup(true);
        let cmd = cmd.with_platform(PlatformInfo::new("windows", "amd64"));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Unsupported platform"));
        assert!(ui.documents().is_empty());
    }

    #[test]
    fn missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let context = CommandContext {
            manifests: vec![temp.path().join("none.yaml").display().to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = DoctorCommand::new(context).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Error loading manifest"));
    }
}
