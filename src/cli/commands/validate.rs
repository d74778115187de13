//! Validate command implementation.
//!
//! The `envdoctor validate` command loads the manifest and reports every
//! rule it breaks, without running any tool.

use serde::Serialize;

use crate::error::{DoctorError, Result};
use crate::manifest::{read_manifests, validate_manifest, ValidationError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    context: CommandContext,
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    manifest_source: &'a str,
    valid: bool,
    tools: usize,
    errors: Vec<JsonProblem<'a>>,
}

#[derive(Serialize)]
struct JsonProblem<'a> {
    rule: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<&'a str>,
}

impl<'a> From<&'a ValidationError> for JsonProblem<'a> {
    fn from(error: &'a ValidationError) -> Self {
        Self {
            rule: &error.rule,
            message: &error.message,
            tool: error.tool.as_deref(),
        }
    }
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let manifest = match read_manifests(&self.context.manifests) {
            Ok(manifest) => manifest,
            Err(e) => {
                ui.error(&format!("Error loading manifest: {}", e));
                return Ok(CommandResult::failure(1));
            }
        };

        let source = self.context.manifest_source();
        let errors = validate_manifest(&manifest);

        if self.context.json {
            let doc = JsonValidation {
                manifest_source: &source,
                valid: errors.is_empty(),
                tools: manifest.tools.len(),
                errors: errors.iter().map(JsonProblem::from).collect(),
            };
            let json = serde_json::to_string_pretty(&doc)
                .map_err(|e| DoctorError::Other(anyhow::anyhow!("failed to serialize JSON: {}", e)))?;
            ui.emit(&json);
        } else if errors.is_empty() {
            ui.success(&format!(
                "{} is valid ({} tools)",
                source,
                manifest.tools.len()
            ));
        } else {
            for error in &errors {
                ui.error(&format!("[{}] {}", error.rule, error.message));
            }
            ui.error(&format!("{} has {} problem(s)", source, errors.len()));
        }

        Ok(if errors.is_empty() {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
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
"#;

    const INVALID: &str = r#"
meta:
  version: 2
  name: Test
tools:
  - id: Git
    name: Git
    rationale: Version control
    require: "=>2.30"
    check:
      cmd: ["git", "--version"]
      regex: 'git version (\S+)'
    links:
      homepage: ftp://git-scm.com/
"#;

    fn context(temp: &TempDir, content: &str, json: bool) -> CommandContext {
        let path = temp.path().join("tools.yaml");
        fs::write(&path, content).unwrap();
        CommandContext {
            manifests: vec![path.display().to_string()],
            json,
            ..Default::default()
        }
    }

    #[test]
    fn valid_manifest_passes() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(context(&temp, VALID, false))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("is valid (1 tools)"));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn invalid_manifest_reports_every_problem() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(context(&temp, INVALID, false))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("[unsupported-version]"));
        assert!(ui.has_error("[invalid-id] Tool id 'Git'"));
        assert!(ui.has_error("[invalid-requirement]"));
        assert!(ui.has_error("[missing-named-group]"));
        assert!(ui.has_error("[invalid-link]"));
        assert!(ui.has_error("problem(s)"));
    }

    #[test]
    fn json_output_lists_problems() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        ValidateCommand::new(context(&temp, INVALID, true))
            .execute(&mut ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.stdout()).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["tools"], 1);
        assert!(value["errors"].as_array().unwrap().len() >= 5);
    }

    #[test]
    fn unreadable_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(context(&temp, "meta: [", false))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Error loading manifest"));
    }
}
