//! Result types describing what a conversion run produced.
//!
//! One [`FileResult`] per input PDF, aggregated into a [`BatchOutput`] with
//! summary [`BatchStats`]. All types serialise to JSON for machine-readable
//! run records (`pdf2png --json`).

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of converting a single PDF.
///
/// A failed file carries its [`FileError`] and counts as zero pages; it
/// never aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// The input PDF this result describes.
    pub pdf_path: PathBuf,

    /// Number of page images written, in page order. Zero on failure.
    pub pages_written: usize,

    /// Paths of the PNG files produced, `<base>_page_1.png` onwards.
    pub outputs: Vec<PathBuf>,

    /// The contained error, if this file failed.
    pub error: Option<FileError>,

    /// Wall-clock time spent on this file in milliseconds.
    pub duration_ms: u64,
}

impl FileResult {
    /// True when the file converted without error.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn failure(pdf_path: PathBuf, error: FileError, duration_ms: u64) -> Self {
        Self {
            pdf_path,
            pages_written: 0,
            outputs: Vec::new(),
            error: Some(error),
            duration_ms,
        }
    }
}

/// Aggregate counters for a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// PDFs matched by the input (1 in single-file mode).
    pub total_files: usize,
    /// Files that converted without error.
    pub converted_files: usize,
    /// Files whose conversion failed and was contained.
    pub failed_files: usize,
    /// Pages written across the whole run.
    pub total_pages: usize,
    /// Wall-clock time for the whole run in milliseconds.
    pub total_duration_ms: u64,
}

/// Everything produced by one run: per-file results plus summary stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub files: Vec<FileResult>,
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Assemble the output from per-file results, computing the stats.
    pub(crate) fn from_results(files: Vec<FileResult>, total_duration_ms: u64) -> Self {
        let converted = files.iter().filter(|f| f.succeeded()).count();
        let failed = files.len() - converted;
        let total_pages = files.iter().map(|f| f.pages_written).sum();
        let stats = BatchStats {
            total_files: files.len(),
            converted_files: converted,
            failed_files: failed,
            total_pages,
            total_duration_ms,
        };
        Self { files, stats }
    }
}
