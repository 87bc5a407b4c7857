//! Output naming scheme, directory creation, and PNG writing.
//!
//! The naming contract is `<pdf_basename>_page_<n>.png` with `n` starting
//! at 1 and no zero-padding. The unpadded index means `_page_10` sorts
//! before `_page_2` lexicographically; that quirk is part of the contract
//! consumed downstream and must not be "fixed" here.
//!
//! PNG is the only output format: lossless compression keeps thin linework
//! and small text crisp for the model pipeline that consumes these images.

use image::{DynamicImage, ImageFormat};
use std::io;
use std::path::{Path, PathBuf};

/// The base name used in output files: the PDF's file stem.
///
/// Non-UTF-8 stems are converted lossily; the replacement character is
/// preferable to refusing the file.
pub fn base_name(pdf_path: &Path) -> String {
    pdf_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}

/// File name for one page image: `<base>_page_<n>.png`, `n` 1-based.
pub fn page_file_name(base: &str, page_num: usize) -> String {
    format!("{base}_page_{page_num}.png")
}

/// Create the output directory, parents included. Idempotent.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Encode a rendered page as PNG and write it to `path`.
///
/// An existing file of the same name is silently overwritten; re-running a
/// conversion replaces its previous output rather than accumulating copies.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<(), image::ImageError> {
    image.save_with_format(path, ImageFormat::Png)
}

/// Full output path for one page of the given PDF.
pub fn page_output_path(output_dir: &Path, base: &str, page_num: usize) -> PathBuf {
    output_dir.join(page_file_name(base, page_num))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn base_name_strips_extension_and_directories() {
        assert_eq!(base_name(Path::new("/plans/site_plan.pdf")), "site_plan");
        assert_eq!(base_name(Path::new("floor.PDF")), "floor");
    }

    #[test]
    fn page_names_are_one_based_and_unpadded() {
        assert_eq!(page_file_name("plan", 1), "plan_page_1.png");
        assert_eq!(page_file_name("plan", 10), "plan_page_10.png");
        // Unpadded indices sort out of numeric order; intended behaviour.
        assert!(page_file_name("plan", 10) < page_file_name("plan", 2));
    }

    #[test]
    fn ensure_output_dir_creates_nested_paths_idempotently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b").join("c");

        ensure_output_dir(&nested).expect("first create");
        ensure_output_dir(&nested).expect("second create is a no-op");
        assert!(nested.is_dir());
    }

    #[test]
    fn save_png_writes_a_decodable_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny_page_1.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));

        save_png(&img, &path).expect("save");

        let back = image::open(&path).expect("file must be a valid PNG");
        assert_eq!(back.width(), 4);
        assert_eq!(back.height(), 4);
    }

    #[test]
    fn save_png_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page_page_1.png");

        let white = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([255; 4])));
        let black = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        save_png(&white, &path).expect("first save");
        save_png(&black, &path).expect("overwrite");

        let back = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
