//! Version parsing and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::error::SemverError;

/// Version grammar, anchored at both ends.
///
/// Digit classes are spelled `[0-9]` because `\d` is Unicode-aware in the
/// `regex` crate and would accept non-ASCII digits.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([0-9A-Za-z\-\.]+))?(?:\+([0-9A-Za-z\-\.]+))?$",
    )
    .expect("VERSION_REGEX must compile")
});

/// A parsed semantic version.
///
/// Minor and patch default to 0 when absent, so `"1.22"` and `"1.22.0"`
/// parse to versions that compare equal. Build metadata is carried for
/// display only and never takes part in ordering or equality.
#[derive(Debug, Clone, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Prerelease tag without the leading `-`. `None` means a release.
    pub prerelease: Option<String>,
    /// Build metadata without the leading `+`.
    pub build: Option<String>,
}

impl Version {
    /// Create a release version with no prerelease or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version string such as `v1.2.3-beta.1+build.5`.
    pub fn parse(input: &str) -> Result<Self, SemverError> {
        if input.is_empty() {
            return Err(SemverError::EmptyVersion);
        }

        let caps = VERSION_REGEX
            .captures(input)
            .ok_or_else(|| SemverError::InvalidVersion(input.to_string()))?;

        let component = |index: usize, name: &'static str| -> Result<u64, SemverError> {
            match caps.get(index) {
                Some(m) => m.as_str().parse().map_err(|_| SemverError::InvalidComponent {
                    component: name,
                    value: m.as_str().to_string(),
                }),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: component(1, "major")?,
            minor: component(2, "minor")?,
            patch: component(3, "patch")?,
            prerelease: caps.get(4).map(|m| m.as_str().to_string()),
            build: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Whether this version carries a prerelease tag.
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Total order over versions.
    ///
    /// Numeric components are compared first. On a tie a release outranks
    /// any prerelease, and two prereleases compare as plain strings (byte
    /// order, not SemVer identifier precedence: `alpha.10 < alpha.2`).
    pub fn compare(&self, other: &Version) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| compare_prerelease(self.prerelease.as_deref(), other.prerelease.as_deref()))
    }
}

fn compare_prerelease(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => l.cmp(r),
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl FromStr for Version {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
