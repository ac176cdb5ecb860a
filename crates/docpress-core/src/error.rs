//! Error types for batch conversion operations.
//!
//! Per-file errors (`ToolFailed`, `OutputMissing`, `OutputWriteFailure`,
//! `ConversionError`) are caught at the batch orchestrator boundary and
//! recorded in the summary; batch-level errors (`ToolUnavailable`,
//! `DirectoryNotFound`, `ScanFailure`) propagate to the caller and abort the
//! run.

use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while scanning for and converting documents.
#[derive(Error, Debug)]
pub enum DocpressError {
    /// The external conversion binary could not be resolved on the search
    /// path. Fatal for the whole batch, raised before any file is touched.
    #[error("conversion tool not found: {0}")]
    ToolUnavailable(String),

    /// The input directory handed to the scanner does not exist.
    #[error("directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// Enumerating a directory failed partway through. The scan never
    /// returns a truncated listing; it fails with this instead.
    #[error("failed to scan directory {path}: {source}")]
    ScanFailure {
        /// Directory being enumerated when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The external tool exited with a non-zero status. Stderr output alone
    /// is never treated as failure; only the exit status is.
    #[error("{tool} exited with status {code}: {stderr}")]
    ToolFailed {
        /// Tool name for the error message (e.g. "libreoffice").
        tool: String,
        /// Exit code, or -1 when the process was terminated by a signal.
        code: i32,
        /// Captured stderr output, trimmed.
        stderr: String,
    },

    /// The external tool exited with status zero but the expected output
    /// file was never written. Distinct from [`DocpressError::ToolFailed`]:
    /// some tools exit 0 and silently no-op.
    #[error("conversion produced no output: expected {0}")]
    OutputMissing(PathBuf),

    /// Writing the converted bytes into the output directory failed.
    #[error("failed to write output {path}: {source}")]
    OutputWriteFailure {
        /// Destination path of the failed write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other per-file conversion failure (spawn error, unreadable
    /// input, invalid filename).
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for [`Result<T, DocpressError>`].
pub type Result<T> = std::result::Result<T, DocpressError>;
