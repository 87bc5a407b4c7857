//! Progress-callback trait for per-file and per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline works through a batch.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log sink, or a job queue
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so it works correctly when files
//! are processed concurrently.

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes files and pages.
///
/// Implementations must be `Send + Sync` (batch mode can process files
/// concurrently). All methods have default no-op implementations so callers
/// only override what they care about.
///
/// # Thread safety
///
/// When `concurrency > 1`, the file-level and page-level methods may be
/// called from different threads at once. Implementations must protect shared
/// mutable state with appropriate synchronisation primitives.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any file is converted.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a PDF starts rendering.
    ///
    /// `file_num` is 1-indexed within the batch.
    fn on_file_start(&self, file_num: usize, total_files: usize, path: &Path) {
        let _ = (file_num, total_files, path);
    }

    /// Called after each page image has been written to disk.
    ///
    /// `page_num` is the 1-based page index; `output` is the saved PNG path.
    fn on_page_saved(&self, page_num: usize, total_pages: usize, output: &Path) {
        let _ = (page_num, total_pages, output);
    }

    /// Called when every page of a PDF has been written.
    fn on_file_complete(&self, file_num: usize, total_files: usize, pages_written: usize) {
        let _ = (file_num, total_files, pages_written);
    }

    /// Called when a PDF fails; the batch continues with the next file.
    ///
    /// The error is passed by value so the callback can be moved into
    /// spawned tasks without lifetime trouble.
    fn on_file_error(&self, file_num: usize, total_files: usize, error: String) {
        let _ = (file_num, total_files, error);
    }

    /// Called once after all files have been attempted.
    fn on_batch_complete(&self, total_files: usize, total_pages: usize) {
        let _ = (total_files, total_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
