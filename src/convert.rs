//! Conversion entry points.
//!
//! ## Containment boundary
//!
//! [`convert_file`] is where failures stop: a corrupt PDF, a rasterisation
//! error, or a write error is caught there, logged with the offending path,
//! and recorded as a zero-page [`FileResult`]. One bad document therefore
//! never halts a batch. The only fatal errors are the ones no per-file
//! policy can absorb: an input path that is neither a file nor a directory,
//! and a directory that cannot be listed.

use crate::config::ConversionConfig;
use crate::error::Pdf2PngError;
use crate::output::{BatchOutput, FileResult};
use crate::pipeline::{input, render};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert a PDF file or a directory of PDFs into per-page PNG images.
///
/// This is the primary entry point for the library. The input path decides
/// the mode: a regular file is converted on its own, a directory is treated
/// as a batch, anything else is an error and nothing is written (the output
/// directory is not created either).
///
/// # Returns
/// `Ok(BatchOutput)` on success, even if some files failed
/// (check `output.stats.failed_files`).
///
/// # Errors
/// Returns `Err(Pdf2PngError)` only for fatal errors:
/// - Input path is neither an existing file nor a directory
/// - The input directory could not be listed
pub async fn convert(
    input_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchOutput, Pdf2PngError> {
    let input_path = input_path.as_ref();
    let output_dir = output_dir.as_ref();
    info!("Starting conversion: {}", input_path.display());

    match input::classify(input_path)? {
        input::InputKind::File(pdf) => {
            let start = Instant::now();
            if let Some(ref cb) = config.progress_callback {
                cb.on_batch_start(1);
            }
            let result = convert_with_events(&pdf, 1, 1, output_dir, config).await;
            fire_batch_complete(config, 1, result.pages_written);
            Ok(BatchOutput::from_results(
                vec![result],
                start.elapsed().as_millis() as u64,
            ))
        }
        input::InputKind::Directory(dir) => convert_dir(&dir, output_dir, config).await,
    }
}

/// Convert a single PDF, writing one PNG per page into `output_dir`.
///
/// The output directory is created if absent (recursively). Every failure
/// is contained: the returned [`FileResult`] carries either the page count
/// or the error, and the function never propagates a failure to the caller.
pub async fn convert_file(
    pdf_path: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
) -> FileResult {
    let start = Instant::now();

    if let Err(e) = input::check_pdf_magic(pdf_path) {
        warn!("Error converting {}: {}", pdf_path.display(), e);
        return FileResult::failure(
            pdf_path.to_path_buf(),
            e,
            start.elapsed().as_millis() as u64,
        );
    }

    match render::render_to_files(pdf_path, output_dir, config).await {
        Ok(outputs) => {
            info!(
                "Converted {}: {} page(s)",
                pdf_path.display(),
                outputs.len()
            );
            FileResult {
                pdf_path: pdf_path.to_path_buf(),
                pages_written: outputs.len(),
                outputs,
                error: None,
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
        Err(e) => {
            warn!("Error converting {}: {}", pdf_path.display(), e);
            FileResult::failure(
                pdf_path.to_path_buf(),
                e,
                start.elapsed().as_millis() as u64,
            )
        }
    }
}

/// Convert every `.pdf` file directly inside `input_dir`.
///
/// Files are discovered non-recursively and processed in lexicographic
/// file-name order; with `concurrency > 1` several files run at once, and
/// the per-file results are re-sorted by path afterwards so the returned
/// output is deterministic either way. An empty match is not an error:
/// the result simply reports zero files and the output directory is left
/// uncreated.
pub async fn convert_dir(
    input_dir: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
) -> Result<BatchOutput, Pdf2PngError> {
    let start = Instant::now();

    let pdfs = input::discover_pdfs(input_dir)?;
    if pdfs.is_empty() {
        info!("No PDF files found in {}", input_dir.display());
        return Ok(BatchOutput::from_results(
            Vec::new(),
            start.elapsed().as_millis() as u64,
        ));
    }

    let total_files = pdfs.len();
    info!("Found {} PDF file(s)", total_files);
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total_files);
    }

    let mut results: Vec<FileResult> = stream::iter(pdfs.into_iter().enumerate().map(
        |(index, pdf)| {
            let config = config.clone();
            let out_dir = output_dir.to_path_buf();
            async move {
                convert_with_events(&pdf, index + 1, total_files, &out_dir, &config).await
            }
        },
    ))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    // Completion order varies under concurrency; report in input order.
    results.sort_by(|a, b| a.pdf_path.cmp(&b.pdf_path));

    let total_pages = results.iter().map(|r| r.pages_written).sum();
    fire_batch_complete(config, total_files, total_pages);
    info!(
        "Conversion complete: {} page(s) from {} file(s)",
        total_pages, total_files
    );

    Ok(BatchOutput::from_results(
        results,
        start.elapsed().as_millis() as u64,
    ))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchOutput, Pdf2PngError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2PngError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input_path, output_dir, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run [`convert_file`] bracketed by the file-level progress events.
async fn convert_with_events(
    pdf_path: &Path,
    file_num: usize,
    total_files: usize,
    output_dir: &Path,
    config: &ConversionConfig,
) -> FileResult {
    if let Some(ref cb) = config.progress_callback {
        cb.on_file_start(file_num, total_files, pdf_path);
    }
    let result = convert_file(pdf_path, output_dir, config).await;
    if let Some(ref cb) = config.progress_callback {
        match &result.error {
            None => cb.on_file_complete(file_num, total_files, result.pages_written),
            Some(e) => cb.on_file_error(file_num, total_files, e.to_string()),
        }
    }
    result
}

fn fire_batch_complete(config: &ConversionConfig, total_files: usize, total_pages: usize) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total_files, total_pages);
    }
}
