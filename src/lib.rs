//! # pdf2png
//!
//! Rasterise PDF documents into per-page PNG images.
//!
//! ## Why this crate?
//!
//! Image-based model pipelines (layout analysis, drawing understanding,
//! OCR training) consume page rasters, not PDFs. This crate turns a PDF, or
//! a whole directory of PDFs, into one PNG per page at a configurable DPI
//! with a deterministic naming scheme, delegating all parsing and rendering
//! to pdfium and containing per-file failures so one corrupt document never
//! spoils a batch.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input path
//!  │
//!  ├─ 1. Input   classify file vs. directory, discover *.pdf (sorted)
//!  ├─ 2. Render  rasterise pages via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 3. Write   <base>_page_<n>.png into the output directory
//!  └─ 4. Output  per-file results + batch stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2png::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder().dpi(300).build()?;
//!     let output = convert("plans/", "rendered/", &config).await?;
//!     println!(
//!         "{} pages from {} files",
//!         output.stats.total_pages, output.stats.total_files
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Naming contract
//!
//! Each page is written as `<pdf_basename>_page_<n>.png`, `n` starting at 1
//! with no zero-padding. `plan_page_10.png` therefore sorts before
//! `plan_page_2.png` lexicographically; consumers that need numeric order
//! must parse the index. Re-running a conversion overwrites prior outputs
//! of the same name.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2png` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2png = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_DPI};
pub use convert::{convert, convert_dir, convert_file, convert_sync};
pub use error::{FileError, Pdf2PngError};
pub use output::{BatchOutput, BatchStats, FileResult};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
