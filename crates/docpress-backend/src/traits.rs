//! Strategy trait for the external conversion tools
//!
//! The two supported tools take different argument shapes and locate their
//! output differently: `LibreOffice` is given an output *directory* and names
//! the file itself, unoconv is given the exact output *path*. Both end up
//! producing `<stem>.<format>` next to the input, so the executor can verify
//! the same expected path either way.

use std::ffi::OsString;
use std::path::Path;

use crate::libreoffice::LibreOfficeTool;
use crate::unoconv::UnoconvTool;

/// One external conversion tool convention.
///
/// Implementations build an argument vector; the command is always spawned
/// directly with that vector, never through a shell, so filenames with
/// special characters cannot change the command line.
pub trait ConvertTool {
    /// Tool name used in log and error messages.
    fn name(&self) -> &'static str;

    /// Binary names to probe on the search path, in preference order.
    fn binary_candidates(&self) -> &'static [&'static str];

    /// Argument vector for converting `input` so that `expected_output`
    /// appears afterwards. Both paths live in the same workspace directory.
    fn args(&self, input: &Path, expected_output: &Path, target_format: &str) -> Vec<OsString>;
}

/// Selector for the available [`ConvertTool`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ToolKind {
    /// `LibreOffice` in headless mode (default)
    #[default]
    LibreOffice,
    /// unoconv, the standalone UNO conversion wrapper
    Unoconv,
}

impl ToolKind {
    /// The strategy implementation for this tool.
    #[must_use = "returns the tool implementation"]
    pub fn tool(self) -> &'static dyn ConvertTool {
        match self {
            Self::LibreOffice => &LibreOfficeTool,
            Self::Unoconv => &UnoconvTool,
        }
    }
}

impl std::fmt::Display for ToolKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LibreOffice => write!(f, "libreoffice"),
            Self::Unoconv => write!(f, "unoconv"),
        }
    }
}

impl std::str::FromStr for ToolKind {
    type Err = String;

    /// Parse a tool name (case-insensitive)
    ///
    /// Accepts: "libreoffice", "soffice" | "unoconv"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "libreoffice" | "soffice" => Ok(Self::LibreOffice),
            "unoconv" => Ok(Self::Unoconv),
            _ => Err(format!(
                "Unknown conversion tool '{s}'. Valid options: libreoffice, unoconv"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_from_str() {
        assert_eq!("libreoffice".parse(), Ok(ToolKind::LibreOffice));
        assert_eq!("SOFFICE".parse(), Ok(ToolKind::LibreOffice));
        assert_eq!("unoconv".parse(), Ok(ToolKind::Unoconv));
        assert!("pandoc".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_tool_kind_display_round_trip() {
        for kind in [ToolKind::LibreOffice, ToolKind::Unoconv] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }
}
