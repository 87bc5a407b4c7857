//! Input classification and PDF discovery.
//!
//! The entry point accepts either a single PDF file or a directory of PDFs.
//! [`classify`] decides which mode applies; [`discover_pdfs`] enumerates a
//! directory's matching files. Discovery is non-recursive and the result is
//! sorted lexicographically by file name: the platform's directory order is
//! arbitrary, and a stable processing order keeps batch runs reproducible.
//!
//! A cheap `%PDF` magic-byte check runs before handing a file to pdfium so
//! callers get a meaningful "not a PDF" error rather than an opaque parser
//! failure.

use crate::error::{FileError, Pdf2PngError};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What kind of input the user pointed us at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A single PDF file.
    File(PathBuf),
    /// A directory to scan for `.pdf` files.
    Directory(PathBuf),
}

/// Classify the input path as a file or directory.
///
/// Anything else (missing path, special file) is the one fatal input error:
/// no conversion is attempted and no output directory is created.
pub fn classify(path: &Path) -> Result<InputKind, Pdf2PngError> {
    if path.is_file() {
        debug!("Input is a single file: {}", path.display());
        Ok(InputKind::File(path.to_path_buf()))
    } else if path.is_dir() {
        debug!("Input is a directory: {}", path.display());
        Ok(InputKind::Directory(path.to_path_buf()))
    } else {
        Err(Pdf2PngError::InvalidInput {
            path: path.to_path_buf(),
        })
    }
}

/// List the PDF files directly inside `dir`, sorted by file name.
///
/// Matching is by `.pdf` extension (ASCII case-insensitive). Subdirectories
/// are never traversed, and directory entries that merely *look* like PDFs
/// (a folder named `x.pdf`) are skipped.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, Pdf2PngError> {
    let entries = fs::read_dir(dir).map_err(|e| Pdf2PngError::ListDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_pdf_extension(path))
        .collect();

    pdfs.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    debug!("Discovered {} PDF file(s) in {}", pdfs.len(), dir.display());
    Ok(pdfs)
}

/// True when the path's extension is `pdf`, ignoring ASCII case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Verify the file starts with the `%PDF` magic bytes.
pub fn check_pdf_magic(path: &Path) -> Result<(), FileError> {
    let mut file = fs::File::open(path).map_err(|e| FileError::Unreadable {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) if &magic == b"%PDF" => Ok(()),
        Ok(()) => Err(FileError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        }),
        // Shorter than 4 bytes cannot be a PDF either.
        Err(_) => Err(FileError::NotAPdf {
            path: path.to_path_buf(),
            magic: [0; 4],
        }),
    }
}
