//! Version extraction from command output.

use regex::{Captures, Regex};

use super::status::{CheckError, CheckErrorKind};

/// Capture group names recognised as holding the version, after the
/// configured preferred key.
const VERSION_GROUP_NAMES: &[&str] = &["ver", "version", "v"];

/// Pull the version string out of `output` using `pattern`.
///
/// Named groups are tried in order: `preferred_key`, then `ver`, `version`
/// and `v`, all compared case-insensitively. The first group that matched
/// non-empty text wins. If none did, capture group 1 is used. The result
/// is trimmed.
pub fn extract_version(
    output: &str,
    pattern: &str,
    preferred_key: &str,
) -> Result<String, CheckError> {
    if pattern.is_empty() {
        return Err(CheckError::new(
            CheckErrorKind::Configuration,
            "empty regex pattern",
        ));
    }

    let regex = Regex::new(pattern).map_err(|e| {
        CheckError::new(CheckErrorKind::Configuration, format!("invalid regex: {}", e))
    })?;

    let caps = regex
        .captures(output)
        .ok_or_else(|| CheckError::new(CheckErrorKind::Parsing, "no version found in output"))?;

    let keys = std::iter::once(preferred_key)
        .chain(VERSION_GROUP_NAMES.iter().copied())
        .filter(|key| !key.is_empty());

    for key in keys {
        if let Some(value) = named_group(&regex, &caps, key) {
            return Ok(value);
        }
    }

    caps.get(1)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CheckError::new(CheckErrorKind::Parsing, "no version captured by regex"))
}

fn named_group(regex: &Regex, caps: &Captures<'_>, key: &str) -> Option<String> {
    regex
        .capture_names()
        .enumerate()
        .filter(|(_, name)| name.is_some_and(|n| n.eq_ignore_ascii_case(key)))
        .filter_map(|(index, _)| caps.get(index))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ver_group() {
        let version = extract_version(
            "go version go1.22.1 linux/amd64",
            r"go(?P<ver>\d+\.\d+(\.\d+)?)",
            "ver",
        )
        .unwrap();
        assert_eq!(version, "1.22.1");
    }

    #[test]
    fn accepts_angle_bracket_syntax() {
        let version =
            extract_version("git version 2.43.0", r"git version (?<ver>\S+)", "ver").unwrap();
        assert_eq!(version, "2.43.0");
    }

    #[test]
    fn recognises_alternative_names_case_insensitively() {
        let version =
            extract_version("node v20.11.0", r"node v(?P<Version>[\d.]+)", "ver").unwrap();
        assert_eq!(version, "20.11.0");

        let version = extract_version("tool 3.1", r"tool (?P<V>[\d.]+)", "ver").unwrap();
        assert_eq!(version, "3.1");
    }

    #[test]
    fn preferred_key_wins() {
        let version = extract_version(
            "python 3.12.1 (pip 23.3)",
            r"python (?P<ver>[\d.]+) \(pip (?P<pip>[\d.]+)\)",
            "pip",
        )
        .unwrap();
        assert_eq!(version, "23.3");
    }

    #[test]
    fn falls_back_to_first_group() {
        let version =
            extract_version("docker 24.0.7, build afdd53b", r"(?P<other>docker) ([\d.]+)", "ver")
                .unwrap();
        assert_eq!(version, "docker");

        let version = extract_version("make 4.3", r"make ([\d.]+)", "ver").unwrap();
        assert_eq!(version, "4.3");
    }

    #[test]
    fn skips_empty_named_group() {
        let version = extract_version(
            "release 1.2",
            r"release (?P<ver>x?)(?P<version>[\d.]+)",
            "ver",
        )
        .unwrap();
        assert_eq!(version, "1.2");
    }

    #[test]
    fn trims_whitespace() {
        let version = extract_version("v:  1.2.3  \n", r"v:(?P<ver>\s*[\d.]+\s*)", "ver").unwrap();
        assert_eq!(version, "1.2.3");
    }

    #[test]
    fn no_match_is_parsing_error() {
        let err = extract_version("command not found", r"go(?P<ver>\d+)", "ver").unwrap_err();
        assert_eq!(err.kind, CheckErrorKind::Parsing);
        assert_eq!(err.message, "no version found in output");
    }

    #[test]
    fn match_without_capture_is_parsing_error() {
        let err = extract_version("version", r"version(?P<ver>\d*)", "ver").unwrap_err();
        assert_eq!(err.kind, CheckErrorKind::Parsing);
    }

    #[test]
    fn bad_pattern_is_configuration_error() {
        let err = extract_version("x", r"(?P<ver>[", "ver").unwrap_err();
        assert_eq!(err.kind, CheckErrorKind::Configuration);

        let err = extract_version("x", "", "ver").unwrap_err();
        assert_eq!(err.kind, CheckErrorKind::Configuration);
    }
}
