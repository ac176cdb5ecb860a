//! Availability probing for the external conversion binary
//!
//! Resolution goes through the `which` crate, which implements the
//! platform's executable-search semantics on both POSIX and Windows, so
//! "not found" means the same thing everywhere. A missing binary is a
//! normal `false` result here, never an error.

use crate::traits::ConvertTool;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Outcome of probing for a conversion tool.
#[derive(Debug, Clone)]
pub struct ToolCheck {
    /// Whether a usable binary was found.
    pub available: bool,
    /// Absolute path of the resolved binary, when found. Callers should
    /// reuse this path for invocations instead of re-resolving.
    pub resolved_path: Option<PathBuf>,
    /// Human-readable reason when not found.
    pub error: Option<String>,
}

/// Resolve a binary name (or explicit path) on the executable search path.
#[must_use = "returns the resolved path when the binary is available"]
pub fn resolve_binary(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Probe a tool's binary candidates in preference order.
#[must_use = "returns the probe result"]
pub fn check_tool(tool: &dyn ConvertTool) -> ToolCheck {
    for candidate in tool.binary_candidates() {
        if let Some(path) = resolve_binary(candidate) {
            log::debug!("{} resolved to {}", tool.name(), path.display());
            return ToolCheck {
                available: true,
                resolved_path: Some(path),
                error: None,
            };
        }
    }

    ToolCheck {
        available: false,
        resolved_path: None,
        error: Some(format!(
            "{} not found in PATH (tried: {})",
            tool.name(),
            tool.binary_candidates().join(", ")
        )),
    }
}

/// Probe an explicitly configured binary path.
#[must_use = "returns the probe result"]
pub fn check_binary(path: &Path) -> ToolCheck {
    match resolve_binary(path) {
        Some(resolved) => ToolCheck {
            available: true,
            resolved_path: Some(resolved),
            error: None,
        },
        None => ToolCheck {
            available: false,
            resolved_path: None,
            error: Some(format!(
                "configured binary is not executable: {}",
                path.display()
            )),
        },
    }
}
