//! Batch conversion orchestration
//!
//! Walks a list of input files, converts each one through the
//! [`Executor`](crate::Executor), writes the results into the output
//! directory, and accumulates a [`BatchSummary`]. One file's failure never
//! stops the loop; batch-level problems (tool unavailable, output directory
//! uncreatable) abort before or instead of the loop.

use crate::executor::Executor;
use crate::probe::{self, ToolCheck};
use crate::traits::ToolKind;
use docpress_core::{DocpressError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of one file's conversion. Exactly one side is ever populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Conversion succeeded; `output` is the written file.
    Converted {
        /// Path of the written output file.
        output: PathBuf,
    },
    /// Conversion failed; the batch carried on with the next file.
    Failed {
        /// Rendered error description.
        error: String,
    },
}

/// One entry of a batch summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    /// The input file this entry describes.
    pub input: PathBuf,
    /// What happened to it.
    pub outcome: FileOutcome,
}

/// Aggregate outcome of a batch run.
///
/// `results` is ordered by input order, not completion order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Number of files in the batch.
    pub total: usize,
    /// Files converted and written successfully.
    pub succeeded: usize,
    /// Files that failed at any per-file step.
    pub failed: usize,
    /// Per-file outcomes in input order.
    pub results: Vec<FileResult>,
}

impl BatchSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
            ..Self::default()
        }
    }

    fn record_success(&mut self, input: PathBuf, output: PathBuf) {
        self.succeeded += 1;
        self.results.push(FileResult {
            input,
            outcome: FileOutcome::Converted { output },
        });
    }

    fn record_failure(&mut self, input: PathBuf, error: String) {
        self.failed += 1;
        self.results.push(FileResult {
            input,
            outcome: FileOutcome::Failed { error },
        });
    }
}

/// Lifecycle notification emitted while a batch runs.
///
/// Delivered synchronously through the callback passed to
/// [`BatchConverter::convert_all`]; purely informational, the batch behaves
/// identically with a no-op observer.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// A file's conversion is about to start.
    Started {
        /// Input file.
        file: &'a Path,
    },
    /// A file was converted and written.
    Converted {
        /// Input file.
        file: &'a Path,
        /// Written output file.
        output: &'a Path,
    },
    /// A file's conversion failed; the batch continues.
    Failed {
        /// Input file.
        file: &'a Path,
        /// The per-file error.
        error: &'a DocpressError,
    },
    /// All files processed.
    Completed {
        /// The finished summary.
        summary: &'a BatchSummary,
    },
}

/// Sequential batch converter around one external tool.
#[derive(Debug, Clone)]
pub struct BatchConverter {
    kind: ToolKind,
    binary: Option<PathBuf>,
    output_dir: PathBuf,
    target_format: String,
}

impl BatchConverter {
    /// Converter writing `target_format` files into `output_dir`.
    #[must_use = "returns the configured converter"]
    pub fn new(
        kind: ToolKind,
        output_dir: impl Into<PathBuf>,
        target_format: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            binary: None,
            output_dir: output_dir.into(),
            target_format: target_format.into(),
        }
    }

    /// Use an explicit binary path instead of searching the PATH. The path
    /// is still verified once per batch before any file is touched.
    #[must_use = "returns the configured converter"]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    /// Probe whether the configured tool can be invoked.
    #[must_use = "returns the probe result"]
    pub fn check_availability(&self) -> ToolCheck {
        match &self.binary {
            Some(path) => probe::check_binary(path),
            None => probe::check_tool(self.kind.tool()),
        }
    }

    fn executor(&self) -> Result<Executor> {
        let check = self.check_availability();
        match check.resolved_path {
            Some(binary) => Ok(Executor::new(self.kind, binary)),
            None => Err(DocpressError::ToolUnavailable(
                check.error.unwrap_or_else(|| self.kind.to_string()),
            )),
        }
    }

    /// Convert a single file and write the result into the output
    /// directory.
    ///
    /// # Errors
    ///
    /// [`DocpressError::ToolUnavailable`] when the tool cannot be resolved;
    /// otherwise any per-file error from the conversion or the output write.
    pub fn convert_file(&self, input: &Path) -> Result<PathBuf> {
        let executor = self.executor()?;
        fs::create_dir_all(&self.output_dir).map_err(|source| {
            DocpressError::OutputWriteFailure {
                path: self.output_dir.clone(),
                source,
            }
        })?;
        self.convert_with(&executor, input)
    }

    fn convert_with(&self, executor: &Executor, input: &Path) -> Result<PathBuf> {
        let filename = input
            .file_name()
            .ok_or_else(|| {
                DocpressError::ConversionError(format!("invalid input path: {}", input.display()))
            })?
            .to_string_lossy()
            .into_owned();
        let stem = input
            .file_stem()
            .ok_or_else(|| {
                DocpressError::ConversionError(format!("invalid input path: {}", input.display()))
            })?
            .to_string_lossy()
            .into_owned();

        let bytes = fs::read(input).map_err(|e| {
            DocpressError::ConversionError(format!("failed to read {}: {e}", input.display()))
        })?;

        let converted = executor.convert(&bytes, &self.target_format, &filename)?;

        let output_path = self
            .output_dir
            .join(format!("{stem}.{}", self.target_format));
        fs::write(&output_path, converted).map_err(|source| DocpressError::OutputWriteFailure {
            path: output_path.clone(),
            source,
        })?;

        Ok(output_path)
    }

    /// Convert every file in `files`, in order.
    ///
    /// The tool is probed once, up front; when it is unavailable the batch
    /// aborts before any input file or the output directory is touched.
    /// After that, per-file failures are recorded in the summary and the
    /// loop always continues. `observer` receives the lifecycle events.
    ///
    /// # Errors
    ///
    /// [`DocpressError::ToolUnavailable`] from the up-front probe, or an
    /// [`DocpressError::OutputWriteFailure`] when the output directory
    /// cannot be created. Per-file errors never surface here.
    pub fn convert_all(
        &self,
        files: &[PathBuf],
        mut observer: impl FnMut(BatchEvent<'_>),
    ) -> Result<BatchSummary> {
        let executor = self.executor()?;

        fs::create_dir_all(&self.output_dir).map_err(|source| {
            DocpressError::OutputWriteFailure {
                path: self.output_dir.clone(),
                source,
            }
        })?;

        let mut summary = BatchSummary::new(files.len());

        for file in files {
            observer(BatchEvent::Started { file });
            match self.convert_with(&executor, file) {
                Ok(output) => {
                    log::info!("converted {} -> {}", file.display(), output.display());
                    observer(BatchEvent::Converted {
                        file,
                        output: &output,
                    });
                    summary.record_success(file.clone(), output);
                }
                Err(error) => {
                    log::warn!("failed to convert {}: {error}", file.display());
                    observer(BatchEvent::Failed {
                        file,
                        error: &error,
                    });
                    summary.record_failure(file.clone(), error.to_string());
                }
            }
        }

        observer(BatchEvent::Completed { summary: &summary });
        Ok(summary)
    }
}
