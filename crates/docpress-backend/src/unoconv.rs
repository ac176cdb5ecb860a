//! unoconv conversion
//!
//! Invocation shape:
//!
//! ```text
//! unoconv -f <format> -o <output> <input>
//! ```
//!
//! Unlike `LibreOffice`, unoconv takes the exact output path, so the expected
//! output location is dictated up front rather than inferred afterwards.

use crate::traits::ConvertTool;
use std::ffi::OsString;
use std::path::Path;

/// The `unoconv` command-line wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnoconvTool;

impl ConvertTool for UnoconvTool {
    fn name(&self) -> &'static str {
        "unoconv"
    }

    fn binary_candidates(&self) -> &'static [&'static str] {
        &["unoconv"]
    }

    fn args(&self, input: &Path, expected_output: &Path, target_format: &str) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from(target_format),
            OsString::from("-o"),
            expected_output.as_os_str().to_os_string(),
            input.as_os_str().to_os_string(),
        ]
    }
}
