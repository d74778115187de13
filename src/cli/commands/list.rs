//! List command implementation.
//!
//! The `envdoctor list` command prints the tools a manifest declares
//! without checking any of them.

use crate::error::Result;
use crate::output::{format_tool_list_json, HumanFormatter};
use crate::ui::{DoctorTheme, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(manifest) = self.context.load_manifest(ui) else {
            return Ok(CommandResult::failure(1));
        };
        let source = self.context.manifest_source();

        if self.context.json {
            ui.emit(&format_tool_list_json(&manifest, &source, true)?);
        } else {
            let formatter = HumanFormatter::new(DoctorTheme::for_colors(self.context.colors))
                .verbose(ui.output_mode().shows_details());
            ui.emit(&formatter.format_tool_list(&manifest, &source));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
meta:
  version: 1
  name: Test
tools:
  - id: git
    name: Git
    rationale: Version control
    require: ">=2.30"
    check:
      cmd: ["git", "--version"]
      regex: 'git version (?P<ver>\S+)'
    links:
      homepage: https://git-scm.com/
      docs: https://git-scm.com/doc
"#;

    fn context(temp: &TempDir, json: bool) -> CommandContext {
        let path = temp.path().join("tools.yaml");
        fs::write(&path, MANIFEST).unwrap();
        CommandContext {
            manifests: vec![path.display().to_string()],
            json,
            ..Default::default()
        }
    }

    #[test]
    fn lists_tools_as_text() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ListCommand::new(context(&temp, false))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let out = ui.stdout();
        assert!(out.contains("1. Git (git)"));
        assert!(out.contains("   Rationale: Version control"));
        assert!(out.contains("     docs: https://git-scm.com/doc"));
        assert!(!out.contains("Check:"));
    }

    #[test]
    fn verbose_list_shows_check_command() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        ListCommand::new(context(&temp, false))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.stdout().contains("   Check: git --version"));
    }

    #[test]
    fn lists_tools_as_json() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        ListCommand::new(context(&temp, true))
            .execute(&mut ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.stdout()).unwrap();
        assert_eq!(value["tools"][0]["id"], "git");
        assert_eq!(value["tools"][0]["version_regex"], r"git version (?P<ver>\S+)");
    }

    #[test]
    fn missing_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let context = CommandContext {
            manifests: vec![temp.path().join("none.yaml").display().to_string()],
            ..Default::default()
        };

        let result = ListCommand::new(context).execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }
}
