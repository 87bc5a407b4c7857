//! Error types for the pdf2png library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2PngError`] — **Fatal**: the run cannot proceed at all
//!   (input path is neither a file nor a directory, the input directory
//!   cannot be listed, invalid configuration). Returned as
//!   `Err(Pdf2PngError)` from the top-level `convert*` functions.
//!
//! * [`FileError`] — **Non-fatal**: a single PDF failed (corrupt file,
//!   rasterisation error, PNG write error) but other files in the batch
//!   are fine. Stored inside [`crate::output::FileResult`] so callers can
//!   inspect partial success rather than losing the whole batch to one
//!   bad document.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first file failure, log and continue, or collect all errors for a
//! post-run report. The batch driver always continues.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2png library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    /// Input path is neither an existing file nor an existing directory.
    #[error("Invalid input path: '{path}' is neither a file nor a directory\nCheck the path exists and is readable.")]
    InvalidInput { path: PathBuf },

    /// The input directory exists but its entries could not be listed.
    #[error("Failed to list directory '{path}': {source}")]
    ListDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single PDF file.
///
/// Stored inside [`crate::output::FileResult`] when a file fails.
/// The overall batch continues; the failing file counts as zero pages.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The file exists and was read, but does not start with `%PDF`.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The file could not be opened for reading.
    #[error("Failed to read '{path}': {detail}")]
    Unreadable { path: PathBuf, detail: String },

    /// pdfium could not parse the document at all.
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium returned an error while rasterising a specific page.
    #[error("Rasterisation failed for page {page} of '{path}': {detail}")]
    RenderFailed {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    /// The page image could not be encoded or written to disk.
    #[error("Failed to write '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "PDF engine unavailable: {detail}\n\n\
Set PDFIUM_LIB_PATH=/path/to/directory containing libpdfium, or install\n\
pdfium as a system library. Prebuilt binaries: bblanchon/pdfium-binaries."
    )]
    Engine { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display_names_path() {
        let e = Pdf2PngError::InvalidInput {
            path: PathBuf::from("/no/such/thing"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/no/such/thing"), "got: {msg}");
        assert!(msg.contains("neither a file nor a directory"));
    }

    #[test]
    fn not_a_pdf_display_shows_magic() {
        let e = FileError::NotAPdf {
            path: PathBuf::from("plans.txt"),
            magic: *b"GIF8",
        };
        let msg = e.to_string();
        assert!(msg.contains("plans.txt"));
        assert!(msg.contains("71"), "magic bytes should be listed: {msg}");
    }

    #[test]
    fn render_failed_display_names_page() {
        let e = FileError::RenderFailed {
            path: PathBuf::from("site_plan.pdf"),
            page: 7,
            detail: "bitmap allocation failed".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 7"));
        assert!(msg.contains("site_plan.pdf"));
        assert!(msg.contains("bitmap allocation failed"));
    }

    #[test]
    fn file_error_round_trips_through_json() {
        let e = FileError::CorruptPdf {
            path: PathBuf::from("broken.pdf"),
            detail: "bad xref".into(),
        };
        let json = serde_json::to_string(&e).expect("serialise");
        let back: FileError = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back.to_string(), e.to_string());
    }
}
