//! Tool manifest loading, merging, and validation.
//!
//! This module handles all aspects of the manifest:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Layering in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use envdoctor::manifest::parse_manifest;
//!
//! let yaml = r#"
//! meta:
//!   version: 1
//!   name: Example
//! tools:
//!   - id: git
//!     name: Git
//!     rationale: Version control
//!     require: ">=2.30"
//!     check:
//!       cmd: ["git", "--version"]
//!       regex: 'git version (?P<ver>\d+\.\d+\.\d+)'
//!     links:
//!       homepage: https://git-scm.com/
//! "#;
//!
//! let manifest = parse_manifest(yaml, "inline").unwrap();
//! assert_eq!(manifest.tool("git").unwrap().required_version, ">=2.30");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    is_remote_source, load_manifest, load_manifest_file, load_manifests, parse_manifest,
    read_manifests, DEFAULT_MANIFEST_PATH,
};
pub use merger::merge_manifests;
pub use schema::{
    CheckConfig, Defaults, Manifest, ManifestMeta, ToolDefinition, DEFAULT_REGEX_KEY,
    DEFAULT_TIMEOUT,
};
pub use validator::{validate, validate_manifest, ValidationError};
