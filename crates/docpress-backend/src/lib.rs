//! Conversion backend for docpress
//!
//! Office documents go in, converted bytes come out; all actual rendering is
//! delegated to an external headless tool. Two tool conventions are
//! supported behind one strategy trait:
//!
//! - [`LibreOfficeTool`] — `soffice --headless --convert-to … --outdir …`
//! - [`UnoconvTool`] — `unoconv -f … -o …`
//!
//! Each conversion runs inside its own temporary workspace which is removed
//! unconditionally afterwards, so concurrent callers could never collide on
//! paths even though the reference flow is strictly sequential.
//!
//! # Example
//!
//! ```no_run
//! use docpress_backend::{BatchConverter, BatchEvent, ToolKind};
//! use std::path::PathBuf;
//!
//! # fn run() -> docpress_core::Result<()> {
//! let converter = BatchConverter::new(ToolKind::LibreOffice, "data/output", "pdf");
//! let files = vec![PathBuf::from("data/input/report.docx")];
//! let summary = converter.convert_all(&files, |event| {
//!     if let BatchEvent::Converted { file, .. } = event {
//!         println!("done: {}", file.display());
//!     }
//! })?;
//! println!("{}/{} converted", summary.succeeded, summary.total);
//! # Ok(())
//! # }
//! ```

/// Batch orchestration over a file list
pub mod batch;
/// Single-conversion executor with workspace isolation
pub mod executor;
/// `LibreOffice` tool convention
pub mod libreoffice;
/// Search-path probing for tool binaries
pub mod probe;
/// The tool strategy trait and selector
pub mod traits;
/// unoconv tool convention
pub mod unoconv;

pub use batch::{BatchConverter, BatchEvent, BatchSummary, FileOutcome, FileResult};
pub use executor::Executor;
pub use libreoffice::LibreOfficeTool;
pub use probe::ToolCheck;
pub use traits::{ConvertTool, ToolKind};
pub use unoconv::UnoconvTool;

// Re-export the shared error types for downstream convenience.
pub use docpress_core::{DocpressError, Result};
