//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::manifest::DEFAULT_MANIFEST_PATH;
use crate::ui::OutputMode;

/// envdoctor - Check that a development machine has the tools a project needs.
#[derive(Debug, Parser)]
#[command(name = "envdoctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Manifest file; repeat to layer files, later ones override earlier ones
    #[arg(
        short = 'f',
        long = "manifest",
        value_name = "PATH",
        global = true,
        env = "ENVDOCTOR_MANIFEST",
        value_delimiter = ',',
        default_value = DEFAULT_MANIFEST_PATH
    )]
    pub manifests: Vec<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Timeout for each version command, in seconds
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        env = "ENVDOCTOR_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub timeout: Option<u64>,

    /// Show check durations and extra detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the one-line summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output mode chosen by `--quiet`/`--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }

    /// Command timeout override, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Check every tool in the manifest (default if no command specified)
    Doctor,

    /// List the tools defined in the manifest
    List,

    /// Validate the manifest without running any checks
    Validate,
}
