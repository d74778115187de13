//! User interface abstraction.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`ConsoleUI`] writing to stdout/stderr
//! - [`MockUI`] capturing output for tests
//! - [`DoctorTheme`] and [`OutputMode`]
//!
//! # Example
//!
//! ```
//! use envdoctor::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet, false);
//! ui.success("All tools are ready");
//! ```

pub mod console;
pub mod mock;
pub mod output;
pub mod theme;

pub use console::ConsoleUI;
pub use mock::MockUI;
pub use output::OutputMode;
pub use theme::{should_use_colors, DoctorTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Write a rendered document to stdout regardless of output mode.
    fn emit(&mut self, document: &str);
}

/// Create the UI for a CLI run.
pub fn create_ui(mode: OutputMode, colors: bool) -> Box<dyn UserInterface> {
    Box::new(ConsoleUI::new(mode, colors))
}
