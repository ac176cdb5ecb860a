//! Core types for the docpress batch document converter
//!
//! This crate holds the pieces shared by the conversion backend and the CLI:
//!
//! - [`error`] — the [`DocpressError`] taxonomy and `Result` alias
//! - [`format`] — supported input formats and the extension allow-list
//! - [`scanner`] — directory scanning for convertible files
//!
//! The actual conversion work (external tool invocation, workspace
//! management, batch orchestration) lives in `docpress-backend`.
//!
//! # Example
//!
//! ```no_run
//! use docpress_core::{Result, Scanner};
//! use std::path::Path;
//!
//! fn list_candidates() -> Result<()> {
//!     let files = Scanner::new().scan(Path::new("data/input"))?;
//!     for file in &files {
//!         println!("{} ({} bytes)", file.name, file.size);
//!     }
//!     Ok(())
//! }
//! ```

/// Error types for conversion operations
pub mod error;
/// Input format detection and extension filtering
pub mod format;
/// Directory scanning
pub mod scanner;

pub use error::{DocpressError, Result};
pub use format::{ExtensionFilter, InputFormat};
pub use scanner::{FileDescriptor, Scanner};
