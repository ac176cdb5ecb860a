//! Isolated-workspace conversion executor
//!
//! Every conversion gets its own uniquely-named temporary directory: the
//! input bytes are written there under their original filename (the external
//! tool sniffs the source format from the extension, not the content), the
//! tool is invoked against the workspace, and the produced file is read
//! back. The workspace is removed when the call returns, whatever happened
//! in between.

use crate::probe;
use crate::traits::{ConvertTool, ToolKind};
use docpress_core::{DocpressError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs one conversion at a time against a resolved external binary.
pub struct Executor {
    tool: &'static dyn ConvertTool,
    binary: PathBuf,
}

impl Executor {
    /// Executor using an already-resolved (or caller-supplied) binary path.
    #[must_use = "returns the configured executor"]
    pub fn new(kind: ToolKind, binary: impl Into<PathBuf>) -> Self {
        Self {
            tool: kind.tool(),
            binary: binary.into(),
        }
    }

    /// Resolve the tool's binary on the search path and build an executor
    /// around it.
    ///
    /// # Errors
    ///
    /// Returns [`DocpressError::ToolUnavailable`] when no candidate binary
    /// resolves.
    pub fn resolve(kind: ToolKind) -> Result<Self> {
        let check = probe::check_tool(kind.tool());
        match check.resolved_path {
            Some(binary) => Ok(Self::new(kind, binary)),
            None => Err(DocpressError::ToolUnavailable(
                check.error.unwrap_or_else(|| kind.to_string()),
            )),
        }
    }

    /// The binary this executor invokes.
    #[must_use = "returns the resolved binary path"]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Convert one document.
    ///
    /// `original_filename` must carry the real source extension; it is
    /// preserved verbatim inside the workspace. The returned bytes are the
    /// converted document; the output filename the tool produced is always
    /// `<stem of original_filename>.<target_format>`.
    ///
    /// # Errors
    ///
    /// - [`DocpressError::ToolFailed`] when the tool exits non-zero. Stderr
    ///   output with a zero exit is tolerated (`LibreOffice` is noisy on
    ///   success) and only logged.
    /// - [`DocpressError::OutputMissing`] when the tool exits zero but the
    ///   expected output file does not exist.
    /// - [`DocpressError::ConversionError`] when the process cannot be
    ///   spawned or the filename is unusable.
    ///
    /// The workspace is removed on every path; a failed removal is logged
    /// and never replaces the conversion result.
    pub fn convert(
        &self,
        input: &[u8],
        target_format: &str,
        original_filename: &str,
    ) -> Result<Vec<u8>> {
        let workspace = tempfile::Builder::new().prefix("docpress-").tempdir()?;

        let result = self.convert_in(workspace.path(), input, target_format, original_filename);

        if let Err(err) = workspace.close() {
            log::warn!("failed to remove conversion workspace: {err}");
        }

        result
    }

    fn convert_in(
        &self,
        workspace: &Path,
        input: &[u8],
        target_format: &str,
        original_filename: &str,
    ) -> Result<Vec<u8>> {
        // Reduce to the filename component so the input cannot escape the
        // workspace.
        let filename = Path::new(original_filename).file_name().ok_or_else(|| {
            DocpressError::ConversionError(format!("invalid input filename: {original_filename:?}"))
        })?;
        let stem = Path::new(filename).file_stem().ok_or_else(|| {
            DocpressError::ConversionError(format!("invalid input filename: {original_filename:?}"))
        })?;

        let input_path = workspace.join(filename);
        fs::write(&input_path, input)?;

        let expected_output =
            workspace.join(format!("{}.{}", stem.to_string_lossy(), target_format));

        let args = self.tool.args(&input_path, &expected_output, target_format);
        log::debug!(
            "executing: {} {}",
            self.binary.display(),
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.binary).args(&args).output().map_err(|e| {
            DocpressError::ConversionError(format!(
                "failed to execute {}: {e}",
                self.binary.display()
            ))
        })?;

        if !output.status.success() {
            return Err(DocpressError::ToolFailed {
                tool: self.tool.name().to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // The tool writes diagnostics to stderr even on success; only the
        // exit status decides failure.
        if !output.stderr.is_empty() {
            log::debug!(
                "{} stderr: {}",
                self.tool.name(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        if !expected_output.exists() {
            return Err(DocpressError::OutputMissing(expected_output));
        }

        Ok(fs::read(&expected_output)?)
    }
}
