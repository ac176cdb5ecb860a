//! LibreOffice headless conversion
//!
//! Invocation shape:
//!
//! ```text
//! soffice --headless --convert-to <format> --outdir <dir> <input>
//! ```
//!
//! LibreOffice names the output itself by replacing the input's extension,
//! so the executor locates `<stem>.<format>` in the workspace afterwards.

use crate::traits::ConvertTool;
use std::ffi::OsString;
use std::path::Path;

/// LibreOffice (`libreoffice` / `soffice`) in headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LibreOfficeTool;

impl ConvertTool for LibreOfficeTool {
    fn name(&self) -> &'static str {
        "libreoffice"
    }

    fn binary_candidates(&self) -> &'static [&'static str] {
        &["libreoffice", "soffice"]
    }

    fn args(&self, input: &Path, expected_output: &Path, target_format: &str) -> Vec<OsString> {
        // The output directory is the workspace the expected output sits in.
        let outdir = expected_output.parent().unwrap_or_else(|| Path::new("."));
        vec![
            OsString::from("--headless"),
            OsString::from("--convert-to"),
            OsString::from(target_format),
            OsString::from("--outdir"),
            outdir.as_os_str().to_os_string(),
            input.as_os_str().to_os_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_shape() {
        let args = LibreOfficeTool.args(
            Path::new("/ws/report.docx"),
            Path::new("/ws/report.pdf"),
            "pdf",
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                "/ws",
                "/ws/report.docx",
            ]
        );
    }
}
