//! Error types for envdoctor operations.
//!
//! This module defines [`DoctorError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DoctorError` for domain-specific errors that need distinct handling
//! - Version and constraint problems arrive as [`SemverError`] and convert via `?`
//! - Use `anyhow::Error` (via `DoctorError::Other`) for unexpected errors

use std::time::Duration;

use thiserror::Error;

use crate::semver::SemverError;

/// Core error type for envdoctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// Manifest file not found at the given location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// Failed to parse manifest YAML.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: String, message: String },

    /// Manifest parsed but failed validation.
    #[error("Invalid manifest: {message}")]
    ManifestValidationError { message: String },

    /// Manifest source is a URL.
    #[error("Remote manifests are not supported: {url}")]
    RemoteManifestUnsupported { url: String },

    /// No manifest sources were given.
    #[error("No manifest sources provided")]
    NoManifestSources,

    /// Check command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// Check command did not finish in time and was killed.
    #[error("Command timed out after {}s: {command}", timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    /// A check result or report is internally inconsistent.
    #[error("Invalid report: {message}")]
    InvalidReport { message: String },

    /// The host OS/architecture pair is not supported.
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    /// Version or constraint parse failure.
    #[error(transparent)]
    Semver(#[from] SemverError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envdoctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;
