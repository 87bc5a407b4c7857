//! Pipeline stages for PDF-to-PNG conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ write
//! (path)    (pdfium)   (PNG files)
//! ```
//!
//! 1. [`input`]  — classify the input path, discover `.pdf` files in a
//!    directory, sanity-check PDF magic bytes
//! 2. [`render`] — rasterise every page at the configured DPI; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 3. [`write`]  — the output naming scheme, directory creation, and
//!    PNG encode-and-save for each rendered page

pub mod input;
pub mod render;
pub mod write;
