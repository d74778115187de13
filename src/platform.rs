//! Host platform detection.
//!
//! OS and architecture names are reported in the short form used in
//! reports (`darwin`, `linux`, `amd64`, `arm64`, `386`).

use std::fmt;

use serde::Serialize;

use crate::error::{DoctorError, Result};

const SUPPORTED_OS: &[&str] = &["darwin", "linux"];
const SUPPORTED_ARCH: &[&str] = &["amd64", "arm64", "386"];

/// Information about the machine being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl PlatformInfo {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            hostname: None,
        }
    }

    /// Detect the current platform.
    ///
    /// Hostname lookup is best-effort and never fails detection.
    pub fn detect() -> Self {
        Self {
            os: normalize_os(std::env::consts::OS).to_string(),
            arch: normalize_arch(std::env::consts::ARCH).to_string(),
            hostname: system_hostname(),
        }
    }

    /// Whether checks are supported on this OS/architecture pair.
    pub fn is_supported(&self) -> bool {
        SUPPORTED_OS.contains(&self.os.as_str()) && SUPPORTED_ARCH.contains(&self.arch.as_str())
    }

    /// Like [`is_supported`](Self::is_supported), naming what is unsupported.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_OS.contains(&self.os.as_str()) {
            return Err(DoctorError::UnsupportedPlatform {
                platform: format!("unsupported operating system: {}", self.os),
            });
        }
        if !SUPPORTED_ARCH.contains(&self.arch.as_str()) {
            return Err(DoctorError::UnsupportedPlatform {
                platform: format!("unsupported architecture: {}", self.arch),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)?;
        if let Some(host) = &self.hostname {
            write!(f, " ({})", host)?;
        }
        Ok(())
    }
}

fn normalize_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn normalize_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: buf is writable for buf.len() bytes; gethostname truncates to fit.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return None;
    }

    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME")
        .ok()
        .filter(|name| !name.is_empty())
}
