//! PDF rasterisation: render every page to a PNG file via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! thread pool thread designed for blocking operations, preventing the
//! Tokio worker threads from stalling during CPU-heavy rendering. Pages are
//! written to disk inside the same blocking task, immediately after each
//! one is rasterised, so a long document never holds more than one page
//! bitmap in memory.
//!
//! ## DPI and the pixel cap
//!
//! PDF user space is 72 units per inch, so the render scale is `dpi / 72`.
//! Page sizes vary wildly: an A0 sheet at 300 DPI is roughly 14 000 px on
//! the long edge. `max_rendered_pixels` caps either dimension regardless of
//! physical size, keeping pdfium's bitmap allocation bounded.

use crate::config::ConversionConfig;
use crate::error::FileError;
use crate::pipeline::write;
use crate::progress::ProgressCallback;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rasterise every page of `pdf_path` into PNG files under `output_dir`.
///
/// The output directory is created first (recursive, idempotent), matching
/// the contract that directory creation belongs to single-file conversion.
/// Runs inside `spawn_blocking` since pdfium operations are CPU-bound.
///
/// # Returns
/// The written PNG paths, in page order (`<base>_page_1.png` onwards).
pub async fn render_to_files(
    pdf_path: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, FileError> {
    let path = pdf_path.to_path_buf();
    let out_dir = output_dir.to_path_buf();
    let dpi = config.dpi;
    let max_pixels = config.max_rendered_pixels;
    let callback = config.progress_callback.clone();

    tokio::task::spawn_blocking(move || {
        render_to_files_blocking(&path, &out_dir, dpi, max_pixels, callback.as_ref())
    })
    .await
    .map_err(|e| FileError::Engine {
        detail: format!("render task panicked: {e}"),
    })?
}

/// Blocking implementation of page rendering and writing.
fn render_to_files_blocking(
    pdf_path: &Path,
    output_dir: &Path,
    dpi: u32,
    max_pixels: u32,
    callback: Option<&ProgressCallback>,
) -> Result<Vec<PathBuf>, FileError> {
    write::ensure_output_dir(output_dir).map_err(|e| FileError::WriteFailed {
        path: output_dir.to_path_buf(),
        detail: e.to_string(),
    })?;

    let pdfium = bind_pdfium()?;

    let document =
        pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| FileError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: format!("{e:?}"),
            })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("{}: {} pages", pdf_path.display(), total_pages);

    let render_config = PdfRenderConfig::new()
        .scale_page_by_factor(dpi as f32 / 72.0)
        .set_maximum_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let base = write::base_name(pdf_path);
    let mut outputs = Vec::with_capacity(total_pages);

    for (index, page) in pages.iter().enumerate() {
        let page_num = index + 1;

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| FileError::RenderFailed {
                    path: pdf_path.to_path_buf(),
                    page: page_num,
                    detail: format!("{e:?}"),
                })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {}/{} → {}x{} px",
            page_num,
            total_pages,
            image.width(),
            image.height()
        );

        let out_path = write::page_output_path(output_dir, &base, page_num);
        write::save_png(&image, &out_path).map_err(|e| FileError::WriteFailed {
            path: out_path.clone(),
            detail: e.to_string(),
        })?;
        info!("Saved: {}", out_path.display());

        if let Some(cb) = callback {
            cb.on_page_saved(page_num, total_pages, &out_path);
        }
        outputs.push(out_path);
    }

    Ok(outputs)
}

/// Bind to a pdfium library: `PDFIUM_LIB_PATH`, then the executable's
/// directory, then the system library.
fn bind_pdfium() -> Result<Pdfium, FileError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(dir) if !dir.is_empty() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
        }
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| FileError::Engine {
        detail: format!("{e:?}"),
    })?;

    Ok(Pdfium::new(bindings))
}
