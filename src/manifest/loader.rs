//! Manifest loading.
//!
//! A manifest source is a file path. Sources that look like URLs are
//! rejected up front; manifests are only ever read from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::merger::merge_manifests;
use super::schema::Manifest;
use super::validator::validate;
use crate::error::{DoctorError, Result};

/// Default manifest location, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "./tools.yaml";

/// Whether a source string names a remote manifest.
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse YAML content into a validated manifest.
///
/// Defaults are applied before validation.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source` - Source name for error reporting
pub fn parse_manifest(content: &str, source: &str) -> Result<Manifest> {
    let manifest = deserialize(content, source)?;
    validate(&manifest)?;
    Ok(manifest)
}

fn deserialize(content: &str, source: &str) -> Result<Manifest> {
    let mut manifest: Manifest =
        serde_yaml::from_str(content).map_err(|e| DoctorError::ManifestParseError {
            path: source.to_string(),
            message: e.to_string(),
        })?;

    manifest.apply_defaults();
    Ok(manifest)
}

fn read_source(source: &str) -> Result<Manifest> {
    if is_remote_source(source) {
        return Err(DoctorError::RemoteManifestUnsupported {
            url: source.to_string(),
        });
    }

    let path = Path::new(source);
    debug!("Loading manifest from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoctorError::ManifestNotFound {
                path: path.display().to_string(),
            }
        } else {
            DoctorError::Io(e)
        }
    })?;

    deserialize(&content, source)
}

/// Load and parse a single manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParseError` if the YAML is invalid.
/// Returns `ManifestValidationError` if the manifest breaks a rule.
pub fn load_manifest_file(path: &Path) -> Result<Manifest> {
    let manifest = read_source(&path.display().to_string())?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Load a manifest from a source string.
pub fn load_manifest(source: &str) -> Result<Manifest> {
    let manifest = read_source(source)?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Read and merge manifests without validating the result.
///
/// Empty source strings are skipped. Later sources override earlier ones.
/// Used by callers that want every validation problem rather than the
/// first failure.
///
/// # Errors
///
/// Returns `NoManifestSources` if nothing was loaded.
pub fn read_manifests<S: AsRef<str>>(sources: &[S]) -> Result<Manifest> {
    let manifests = sources
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .map(read_source)
        .collect::<Result<Vec<_>>>()?;

    debug!("Merging {} manifest(s)", manifests.len());

    let mut merged = merge_manifests(manifests).ok_or(DoctorError::NoManifestSources)?;
    merged.apply_defaults();
    Ok(merged)
}

/// Load several manifests and merge them, later sources overriding earlier.
///
/// Only the merged manifest is validated, so an overlay may rely on
/// settings from the file it layers over.
pub fn load_manifests<S: AsRef<str>>(sources: &[S]) -> Result<Manifest> {
    let merged = read_manifests(sources)?;
    validate(&merged)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASE: &str = r#"
meta:
  version: 1
  name: Base
defaults:
  timeout_sec: 8
tools:
  - id: go
    name: Go
    rationale: Backend services
    require: ">=1.20"
    check:
      cmd: ["go", "version"]
      regex: 'go(?P<ver>\d+\.\d+(\.\d+)?)'
    links:
      homepage: https://go.dev/
  - id: git
    name: Git
    rationale: Version control
    require: ">=2.30"
    check:
      cmd: ["git", "--version"]
      regex: 'git version (?P<ver>\d+\.\d+\.\d+)'
    links:
      homepage: https://git-scm.com/
"#;

    const OVERRIDE: &str = r#"
meta:
  version: 1
  name: Override
tools:
  - id: go
    name: Go
    rationale: Backend services
    require: ">=1.22"
    check:
      cmd: ["go", "version"]
      regex: 'go(?P<ver>\d+\.\d+(\.\d+)?)'
    links:
      homepage: https://go.dev/
"#;

    fn write(temp: &TempDir, name: &str, content: &str) -> String {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn parse_manifest_applies_defaults() {
        let manifest = parse_manifest(BASE, "inline").unwrap();
        assert_eq!(manifest.meta.name, "Base");
        assert_eq!(manifest.tool("go").unwrap().timeout_sec, 8);
    }

    #[test]
    fn parse_manifest_reports_yaml_errors_with_source() {
        let err = parse_manifest("meta: [unclosed", "broken.yaml").unwrap_err();
        assert!(matches!(err, DoctorError::ManifestParseError { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn parse_manifest_rejects_huge_tool_timeout() {
        let content = OVERRIDE.replace(
            "      homepage: https://go.dev/\n",
            "      homepage: https://go.dev/\n    timeout_sec: 9223372036854775807\n",
        );
        let err = parse_manifest(&content, "inline").unwrap_err();
        assert!(matches!(err, DoctorError::ManifestValidationError { .. }));
        assert!(err.to_string().contains("timeout_sec must be between 0 and 300"));
    }

    #[test]
    fn parse_manifest_rejects_invalid_content() {
        let err = parse_manifest("meta:\n  version: 1\n  name: x\ntools: []\n", "x").unwrap_err();
        assert!(matches!(err, DoctorError::ManifestValidationError { .. }));
    }

    #[test]
    fn load_manifest_file_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "tools.yaml", BASE);
        let manifest = load_manifest_file(Path::new(&path)).unwrap();
        assert_eq!(manifest.tools.len(), 2);
    }

    #[test]
    fn load_manifest_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_manifest_file(&temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, DoctorError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_manifest_rejects_urls() {
        for url in ["http://example.com/tools.yaml", "https://example.com/tools.yaml"] {
            let err = load_manifest(url).unwrap_err();
            assert!(matches!(err, DoctorError::RemoteManifestUnsupported { .. }));
        }
    }

    #[test]
    fn load_manifests_merges_in_order() {
        let temp = TempDir::new().unwrap();
        let base = write(&temp, "base.yaml", BASE);
        let overlay = write(&temp, "override.yaml", OVERRIDE);

        let merged = load_manifests(&[base, overlay]).unwrap();

        assert_eq!(merged.meta.name, "Override");
        let ids: Vec<&str> = merged.tools.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["go", "git"]);
        assert_eq!(merged.tool("go").unwrap().required_version, ">=1.22");
        // Base default timeout survives the merge and reaches the new tool.
        assert_eq!(merged.tool("go").unwrap().timeout_sec, 8);
    }

    #[test]
    fn load_manifests_skips_empty_sources() {
        let temp = TempDir::new().unwrap();
        let base = write(&temp, "base.yaml", BASE);
        let merged = load_manifests(&["", base.as_str()]).unwrap();
        assert_eq!(merged.meta.name, "Base");
    }

    #[test]
    fn load_manifests_requires_a_source() {
        let err = load_manifests::<&str>(&[]).unwrap_err();
        assert!(matches!(err, DoctorError::NoManifestSources));

        let err = load_manifests(&[""]).unwrap_err();
        assert!(matches!(err, DoctorError::NoManifestSources));
    }

    #[test]
    fn load_manifests_fails_on_any_bad_source() {
        let temp = TempDir::new().unwrap();
        let base = write(&temp, "base.yaml", BASE);
        let missing = temp.path().join("missing.yaml").display().to_string();
        assert!(load_manifests(&[base, missing]).is_err());
    }

    #[test]
    fn read_manifests_skips_validation() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "empty.yaml", "meta:\n  version: 2\n");

        let manifest = read_manifests(&[path.as_str()]).unwrap();
        assert_eq!(manifest.meta.version, 2);
        assert!(manifest.tools.is_empty());

        let err = load_manifests(&[path]).unwrap_err();
        assert!(matches!(err, DoctorError::ManifestValidationError { .. }));
    }

    #[test]
    fn detects_remote_sources() {
        assert!(is_remote_source("https://x.dev/tools.yaml"));
        assert!(!is_remote_source("./tools.yaml"));
    }
}
