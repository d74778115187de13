//! Manifest validation rules.
//!
//! This module validates manifests for correctness:
//! - `meta` declares schema version 1 and a name
//! - default and per-tool timeouts stay within bounds
//! - tool ids are well-formed and unique
//! - requirements parse as constraint lists
//! - extraction patterns compile and name a capture group
//! - help links are http(s) URLs

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::schema::{Manifest, ToolDefinition, SUPPORTED_MANIFEST_VERSION};
use crate::error::{DoctorError, Result};
use crate::semver::ConstraintSet;

/// Upper bound for `defaults.timeout_sec` and per-tool `timeout_sec`.
pub const MAX_TIMEOUT_SECS: i64 = 300;

static TOOL_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("TOOL_ID_REGEX must compile"));

static LANGUAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("LANGUAGE_REGEX must compile"));

/// Validation error with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Tool id if error is tool-specific
    pub tool: Option<String>,
}

impl ValidationError {
    fn manifest(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            tool: None,
        }
    }

    fn tool(rule: &str, tool: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            tool: Some(tool.to_string()),
        }
    }
}

/// Validate a manifest and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_manifest(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_meta(manifest));
    errors.extend(validate_defaults(manifest));
    errors.extend(validate_tool_list(manifest));

    for (index, tool) in manifest.tools.iter().enumerate() {
        errors.extend(validate_tool(index, tool));
    }

    errors
}

fn validate_meta(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let meta = &manifest.meta;

    if meta.version != SUPPORTED_MANIFEST_VERSION {
        errors.push(ValidationError::manifest(
            "unsupported-version",
            format!("unsupported manifest version: {}", meta.version),
        ));
    }

    if meta.name.trim().is_empty() {
        errors.push(ValidationError::manifest(
            "missing-name",
            "meta.name cannot be empty",
        ));
    }

    if !meta.language.is_empty() && !LANGUAGE_REGEX.is_match(&meta.language) {
        errors.push(ValidationError::manifest(
            "invalid-language",
            format!("invalid language code: {}", meta.language),
        ));
    }

    errors
}

fn validate_defaults(manifest: &Manifest) -> Vec<ValidationError> {
    let timeout = manifest.defaults.timeout_sec;

    if !(0..=MAX_TIMEOUT_SECS).contains(&timeout) {
        vec![ValidationError::manifest(
            "invalid-default-timeout",
            format!(
                "defaults.timeout_sec must be between 0 and {}, got {}",
                MAX_TIMEOUT_SECS, timeout
            ),
        )]
    } else {
        Vec::new()
    }
}

fn validate_tool_list(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if manifest.tools.is_empty() {
        errors.push(ValidationError::manifest(
            "empty-tools",
            "tools list cannot be empty",
        ));
    }

    let mut seen = HashSet::new();
    for tool in &manifest.tools {
        if !tool.id.is_empty() && !seen.insert(tool.id.as_str()) {
            errors.push(ValidationError::tool(
                "duplicate-tool-id",
                &tool.id,
                format!("duplicate tool ID: {}", tool.id),
            ));
        }
    }

    errors
}

fn validate_tool(index: usize, tool: &ToolDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let label = if tool.id.is_empty() {
        format!("#{}", index)
    } else {
        tool.id.clone()
    };

    let required = [
        ("id", tool.id.is_empty()),
        ("name", tool.name.is_empty()),
        ("rationale", tool.rationale.is_empty()),
        ("require", tool.required_version.trim().is_empty()),
        ("check.cmd", tool.check.cmd.is_empty()),
        ("check.regex", tool.check.regex.is_empty()),
    ];
    for (field, missing) in required {
        if missing {
            errors.push(ValidationError::tool(
                "missing-field",
                &label,
                format!("Tool '{}' is missing required field '{}'", label, field),
            ));
        }
    }

    if !tool.id.is_empty() && !TOOL_ID_REGEX.is_match(&tool.id) {
        errors.push(ValidationError::tool(
            "invalid-id",
            &label,
            format!(
                "Tool id '{}' must be lowercase alphanumeric with hyphens",
                tool.id
            ),
        ));
    }

    if tool.check.cmd.first().is_some_and(|program| program.is_empty()) {
        errors.push(ValidationError::tool(
            "empty-program",
            &label,
            format!("Tool '{}' has an empty program in check.cmd", label),
        ));
    }

    if !tool.required_version.trim().is_empty() {
        if let Err(e) = ConstraintSet::parse(&tool.required_version) {
            errors.push(ValidationError::tool(
                "invalid-requirement",
                &label,
                format!(
                    "Tool '{}' has invalid version constraint '{}': {}",
                    label, tool.required_version, e
                ),
            ));
        }
    }

    if !tool.check.regex.is_empty() {
        errors.extend(validate_regex(&label, &tool.check.regex));
    }

    errors.extend(validate_links(&label, tool));

    if !(0..=MAX_TIMEOUT_SECS).contains(&tool.timeout_sec) {
        errors.push(ValidationError::tool(
            "invalid-timeout",
            &label,
            format!(
                "Tool '{}' timeout_sec must be between 0 and {}, got {}",
                label, MAX_TIMEOUT_SECS, tool.timeout_sec
            ),
        ));
    }

    errors
}

fn validate_regex(label: &str, pattern: &str) -> Vec<ValidationError> {
    match Regex::new(pattern) {
        Err(e) => vec![ValidationError::tool(
            "invalid-regex",
            label,
            format!("Tool '{}' has malformed regex: {}", label, e),
        )],
        Ok(regex) if regex.capture_names().flatten().next().is_none() => {
            vec![ValidationError::tool(
                "missing-named-group",
                label,
                format!(
                    "Tool '{}' regex must contain a named capture group, e.g. (?P<ver>...)",
                    label
                ),
            )]
        }
        Ok(_) => Vec::new(),
    }
}

fn validate_links(label: &str, tool: &ToolDefinition) -> Vec<ValidationError> {
    if tool.links.is_empty() {
        return vec![ValidationError::tool(
            "missing-links",
            label,
            format!("Tool '{}' must have at least one link", label),
        )];
    }

    tool.links
        .iter()
        .filter(|(_, url)| !is_valid_url(url))
        .map(|(kind, url)| {
            ValidationError::tool(
                "invalid-link",
                label,
                format!("Tool '{}' has invalid URL for {}: '{}'", label, kind, url),
            )
        })
        .collect()
}

/// An http(s) URL with a non-empty host part.
fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !rest.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ManifestValidationError` if any validation rules fail.
pub fn validate(manifest: &Manifest) -> Result<()> {
    let errors = validate_manifest(manifest);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DoctorError::ManifestValidationError {
            message: messages.join("; "),
        })
    }
}
