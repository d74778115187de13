//! JSON rendering for reports and tool lists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::checker::EnvironmentReport;
use crate::error::{DoctorError, Result};
use crate::manifest::{Manifest, ToolDefinition};

/// Serialize a doctor report.
pub fn format_report_json(report: &EnvironmentReport, pretty: bool) -> Result<String> {
    to_json(report, pretty)
}

/// Machine-readable view of a manifest's tools.
#[derive(Debug, Clone, Serialize)]
pub struct JsonToolList<'a> {
    pub manifest_source: &'a str,
    pub tools: Vec<JsonTool<'a>>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonTool<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub required_version: &'a str,
    pub rationale: &'a str,
    pub check_command: &'a [String],
    pub version_regex: &'a str,
    pub links: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
}

impl<'a> From<&'a ToolDefinition> for JsonTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            id: &tool.id,
            name: &tool.name,
            required_version: &tool.required_version,
            rationale: &tool.rationale,
            check_command: tool.check_command(),
            version_regex: tool.version_regex(),
            links: &tool.links,
            timeout_seconds: (tool.timeout_sec > 0).then_some(tool.timeout_sec),
        }
    }
}

/// Serialize the tools declared in a manifest.
pub fn format_tool_list_json(manifest: &Manifest, source: &str, pretty: bool) -> Result<String> {
    let list = JsonToolList {
        manifest_source: source,
        tools: manifest.tools.iter().map(JsonTool::from).collect(),
        generated_at: Utc::now(),
    };
    to_json(&list, pretty)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| DoctorError::Other(anyhow::anyhow!("failed to serialize JSON: {}", e)))
}
