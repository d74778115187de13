//! Plain stdout/stderr UI.

use std::io::Write;

use super::theme::DoctorTheme;
use super::{OutputMode, UserInterface};

/// UI that writes documents to stdout and errors to stderr.
///
/// Rendered documents (reports, tool lists, JSON) always reach stdout
/// so they can be piped. Status lines respect the output mode; errors
/// are always shown.
pub struct ConsoleUI {
    mode: OutputMode,
    theme: DoctorTheme,
}

impl ConsoleUI {
    /// Create a new console UI.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        Self {
            mode,
            theme: DoctorTheme::for_colors(colors),
        }
    }
}

impl UserInterface for ConsoleUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn emit(&mut self, document: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(document.as_bytes());
        if !document.ends_with('\n') {
            let _ = stdout.write_all(b"\n");
        }
        let _ = stdout.flush();
    }
}
