//! envdoctor - Development environment verification.
//!
//! envdoctor reads a YAML manifest of the tools a project needs, finds each
//! one on PATH, runs its version command, and checks the detected version
//! against a semver constraint list.
//!
//! # Modules
//!
//! - [`checker`] - Tool lookup, version commands, and check results
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`manifest`] - Manifest loading, merging, and validation
//! - [`output`] - Human and JSON rendering
//! - [`platform`] - Host OS and architecture detection
//! - [`semver`] - Version parsing, ordering, and constraints
//! - [`ui`] - Terminal output abstraction
//!
//! # Example
//!
//! ```
//! use envdoctor::semver::{ConstraintSet, Version};
//!
//! let required = ConstraintSet::parse(">=1.20 <2").unwrap();
//! assert!(required.is_satisfied_by(&Version::parse("1.22.3").unwrap()));
//! ```
//!
//! For running checks against real tools, see the integration tests.

pub mod checker;
pub mod cli;
pub mod error;
pub mod manifest;
pub mod output;
pub mod platform;
pub mod semver;
pub mod ui;

pub use error::{DoctorError, Result};
