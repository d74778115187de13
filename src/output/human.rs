//! Human-readable report rendering.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::checker::{CheckResult, CheckStatus, CheckSummary, EnvironmentReport};
use crate::manifest::Manifest;
use crate::ui::DoctorTheme;

const REPORT_TITLE: &str = "Development Environment Check";

/// Renders reports and tool lists as terminal text.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    theme: DoctorTheme,
    verbose: bool,
}

impl HumanFormatter {
    pub fn new(theme: DoctorTheme) -> Self {
        Self {
            theme,
            verbose: false,
        }
    }

    /// Include per-tool check durations.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Render the full doctor report.
    pub fn format_report(&self, report: &EnvironmentReport) -> String {
        let mut out = String::new();

        out.push_str(&self.theme.format_header(REPORT_TITLE));
        out.push('\n');
        let _ = writeln!(out, "Platform: {}/{}", report.platform.os, report.platform.arch);
        if self.verbose {
            if let Some(host) = &report.platform.hostname {
                let _ = writeln!(out, "Host: {}", host);
            }
        }
        let _ = writeln!(out, "Manifest: {}", report.manifest_source);
        let _ = writeln!(
            out,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        );

        out.push('\n');
        out.push_str(&self.format_summary(&report.summary));

        out.push('\n');
        out.push_str(&self.theme.format_section("Detailed Results:"));
        out.push('\n');
        for item in &report.items {
            out.push_str(&self.format_result(item));
            out.push('\n');
        }

        if !report.is_successful() {
            out.push_str(&self.format_recommendations(report.failing_items()));
        }

        out
    }

    fn format_summary(&self, summary: &CheckSummary) -> String {
        let mut out = self.theme.format_section("Summary:");
        out.push('\n');
        let _ = writeln!(out, "Total tools: {}", summary.total);

        let lines = [
            (CheckStatus::Ok, summary.ok, "tools OK"),
            (CheckStatus::Missing, summary.missing, "tools missing"),
            (CheckStatus::Outdated, summary.outdated, "tools outdated"),
            (CheckStatus::Error, summary.errors, "tools with errors"),
        ];
        for (status, count, label) in lines {
            if count > 0 {
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    self.theme.format_status_icon(status),
                    count,
                    label
                );
            }
        }

        out
    }

    fn format_result(&self, result: &CheckResult) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} ({})",
            self.theme.format_status_icon(result.status),
            self.theme.highlight.apply_to(&result.tool_name),
            result.tool_id
        );

        if let Some(actual) = &result.actual_version {
            let _ = writeln!(out, "  Installed: {}", actual);
        }
        let _ = writeln!(out, "  Required:  {}", result.required_version);
        if let Some(path) = &result.command_path {
            let _ = writeln!(out, "  Path:      {}", path.display());
        }
        if self.verbose {
            let _ = writeln!(
                out,
                "  Duration:  {}",
                format_duration(result.check_duration)
            );
        }

        match result.status {
            CheckStatus::Missing => out.push_str("  Tool not found in PATH\n"),
            CheckStatus::Outdated => {
                out.push_str("  Installed version does not meet requirements\n")
            }
            CheckStatus::Error => {
                if let Some(message) = &result.error_message {
                    let _ = writeln!(out, "  {} {}", self.theme.error.apply_to("Error:"), message);
                }
            }
            CheckStatus::Ok => {}
        }

        out
    }

    fn format_recommendations<'a>(&self, items: impl Iterator<Item = &'a CheckResult>) -> String {
        let mut out = self.theme.format_section("Recommendations:");
        out.push('\n');

        for item in items.filter(|item| item.needs_attention()) {
            let _ = writeln!(out, "\n{} ({}):", item.tool_name, item.tool_id);
            match item.status {
                CheckStatus::Missing => out.push_str("  Install this tool to continue development\n"),
                CheckStatus::Outdated => {
                    let _ = writeln!(out, "  Update to version {} or later", item.required_version);
                }
                CheckStatus::Error => {
                    out.push_str("  Check tool installation and PATH configuration\n")
                }
                CheckStatus::Ok => {}
            }

            if !item.links.is_empty() {
                out.push_str("  Links:\n");
                for (kind, url) in &item.links {
                    let _ = writeln!(out, "    {}: {}", title_case(kind), url);
                }
            }
        }

        out
    }

    /// Render the tools declared in a manifest.
    pub fn format_tool_list(&self, manifest: &Manifest, source: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Tools defined in manifest ({}):\n", source);

        for (index, tool) in manifest.tools.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({})",
                index + 1,
                self.theme.highlight.apply_to(&tool.name),
                tool.id
            );
            let _ = writeln!(out, "   Required version: {}", tool.required_version);
            let _ = writeln!(out, "   Rationale: {}", tool.rationale);
            if self.verbose {
                let _ = writeln!(out, "   Check: {}", tool.check_command().join(" "));
            }
            write_links(&mut out, &tool.links);
            out.push('\n');
        }

        out
    }

    /// One-line verdict for quiet mode.
    pub fn format_quick_summary(&self, report: &EnvironmentReport) -> String {
        let summary = &report.summary;
        if report.is_successful() {
            self.theme
                .format_success(&format!("All {} tools are ready", summary.total))
        } else {
            self.theme.format_error(&format!(
                "{} of {} tools need attention",
                summary.needing_attention(),
                summary.total
            ))
        }
    }
}

fn write_links(out: &mut String, links: &BTreeMap<String, String>) {
    if links.is_empty() {
        return;
    }
    out.push_str("   Links:\n");
    for (kind, url) in links {
        let _ = writeln!(out, "     {}: {}", kind, url);
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a check duration for display.
pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", secs)
    }
}
