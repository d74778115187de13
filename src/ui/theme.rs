//! Visual theme and styling.

use console::Style;

use crate::checker::CheckStatus;

/// Colours used by the doctor's terminal output.
#[derive(Debug, Clone)]
pub struct DoctorTheme {
    /// Style for OK tools and success messages (green).
    pub success: Style,
    /// Style for outdated tools and warnings (yellow).
    pub warning: Style,
    /// Style for missing or errored tools (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for tool names (bold).
    pub highlight: Style,
    /// Style for section headers (bold magenta).
    pub header: Style,
    /// Style for key labels in key-value lines (bold).
    pub key: Style,
}

impl Default for DoctorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorTheme {
    /// Create the coloured theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick the coloured or plain theme.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Icon for a check status: ✓ ok, ✗ missing, ⚠ outdated, ! error.
    pub fn status_icon(status: CheckStatus) -> &'static str {
        match status {
            CheckStatus::Ok => "✓",
            CheckStatus::Missing => "✗",
            CheckStatus::Outdated => "⚠",
            CheckStatus::Error => "!",
        }
    }

    /// Style matching a check status.
    pub fn status_style(&self, status: CheckStatus) -> &Style {
        match status {
            CheckStatus::Ok => &self.success,
            CheckStatus::Outdated => &self.warning,
            CheckStatus::Missing | CheckStatus::Error => &self.error,
        }
    }

    /// The status icon, styled.
    pub fn format_status_icon(&self, status: CheckStatus) -> String {
        format!(
            "{}",
            self.status_style(status).apply_to(Self::status_icon(status))
        )
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format the report title, underlined with `=`.
    pub fn format_header(&self, title: &str) -> String {
        self.underlined(title, '=')
    }

    /// Format a report section title, underlined with `-`.
    pub fn format_section(&self, title: &str) -> String {
        self.underlined(title, '-')
    }

    fn underlined(&self, title: &str, rule: char) -> String {
        let line: String = std::iter::repeat(rule).take(title.chars().count()).collect();
        format!(
            "{}\n{}",
            self.header.apply_to(title),
            self.dim.apply_to(line)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = DoctorTheme::plain();
        assert_eq!(theme.format_success("Complete"), "✓ Complete");
    }

    #[test]
    fn theme_formats_error() {
        let theme = DoctorTheme::plain();
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn theme_formats_header() {
        let theme = DoctorTheme::plain();
        assert_eq!(theme.format_header("Check"), "Check\n=====");
        assert_eq!(theme.format_section("Summary:"), "Summary:\n--------");
    }

    #[test]
    fn status_icons() {
        assert_eq!(DoctorTheme::status_icon(CheckStatus::Ok), "✓");
        assert_eq!(DoctorTheme::status_icon(CheckStatus::Missing), "✗");
        assert_eq!(DoctorTheme::status_icon(CheckStatus::Outdated), "⚠");
        assert_eq!(DoctorTheme::status_icon(CheckStatus::Error), "!");

        let theme = DoctorTheme::plain();
        assert_eq!(theme.format_status_icon(CheckStatus::Error), "!");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = DoctorTheme::default();
        let new = DoctorTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!should_use_colors(true));
    }
}
