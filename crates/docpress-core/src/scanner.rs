//! Directory scanning for convertible documents
//!
//! Lists a directory's entries, stats each one, and keeps the files whose
//! extension passes the configured [`ExtensionFilter`]. Results come back in
//! filesystem enumeration order; no sorting is applied.

use crate::error::{DocpressError, Result};
use crate::format::ExtensionFilter;
use std::fs;
use std::path::{Path, PathBuf};

/// One candidate input file found by the scanner.
///
/// Immutable after creation; lives only for the duration of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Filename with extension, e.g. `report.docx`.
    pub name: String,
    /// Resolved path to the file.
    pub path: PathBuf,
    /// Lower-cased extension including the leading dot, e.g. `.docx`.
    /// Empty when the file has no extension.
    pub extension: String,
    /// Filename without its extension, e.g. `report`.
    pub base_name: String,
    /// File size in bytes. Informational only.
    pub size: u64,
}

impl FileDescriptor {
    fn from_path(path: PathBuf, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            extension,
            base_name,
            size,
        }
    }
}

/// Finds supported files in a directory.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    filter: ExtensionFilter,
    recursive: bool,
}

impl Scanner {
    /// Scanner with the default extension allow-list, non-recursive.
    #[must_use = "returns the configured scanner"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension allow-list.
    #[must_use = "returns the configured scanner"]
    pub fn with_filter(mut self, filter: ExtensionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable descent into subdirectories.
    #[must_use = "returns the configured scanner"]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan a directory for supported files.
    ///
    /// Subdirectories are skipped unless recursion is enabled, in which case
    /// the scan descends depth-first. Symlinked directories are never
    /// descended into, so link cycles cannot loop the scan.
    ///
    /// # Errors
    ///
    /// Returns [`DocpressError::DirectoryNotFound`] if the path does not
    /// exist, and [`DocpressError::ScanFailure`] if any entry cannot be
    /// enumerated or stat-ed. A failed scan never returns a partial listing.
    pub fn scan(&self, dir: &Path) -> Result<Vec<FileDescriptor>> {
        if !dir.exists() {
            return Err(DocpressError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut found = Vec::new();
        self.scan_into(dir, &mut found)?;
        log::debug!("scan of {} found {} file(s)", dir.display(), found.len());
        Ok(found)
    }

    fn scan_into(&self, dir: &Path, found: &mut Vec<FileDescriptor>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|source| DocpressError::ScanFailure {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| DocpressError::ScanFailure {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| DocpressError::ScanFailure {
                path: path.clone(),
                source,
            })?;

            if file_type.is_dir() {
                if self.recursive {
                    self.scan_into(&path, found)?;
                }
                continue;
            }

            // Follows the link for regular files; symlinked directories and
            // broken links are skipped.
            let metadata = if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(meta) if meta.is_file() => meta,
                    _ => continue,
                }
            } else {
                entry.metadata().map_err(|source| DocpressError::ScanFailure {
                    path: path.clone(),
                    source,
                })?
            };

            let name = entry.file_name();
            if self.filter.is_supported(&name.to_string_lossy()) {
                found.push(FileDescriptor::from_path(path, metadata.len()));
            }
        }

        Ok(())
    }
}
