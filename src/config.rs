//! Configuration types for PDF-to-PNG conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across tasks and to diff two runs to understand
//! why their outputs differ. The resolution default lives here as an explicit
//! field threaded through every entry point, not as a hidden module constant.

use crate::error::Pdf2PngError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Rendering resolution in dots per inch used when no override is given.
pub const DEFAULT_DPI: u32 = 300;

/// Configuration for a PDF-to-PNG conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2png::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(150)
///     .concurrency(4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 72–1200. Default: 300.
    ///
    /// 300 DPI keeps fine linework and small annotation text legible for a
    /// downstream vision model. Drop to 150 when file size or rendering time
    /// matters more than pixel density; large-format drawings may need the
    /// pixel cap below long before they need less DPI.
    pub dpi: u32,

    /// Maximum rendered image dimension (width or height) in pixels. Default: 20 000.
    ///
    /// A safety cap independent of DPI. A 300-DPI render of an A0 sheet is
    /// roughly 14 000 px on the long edge; anything past this cap is scaled
    /// down proportionally so pdfium never allocates an unbounded bitmap.
    pub max_rendered_pixels: u32,

    /// Number of PDFs converted concurrently in batch mode. Default: 1.
    ///
    /// Files are independent, so batch conversion may fan out across them.
    /// Page order *within* each PDF stays strictly sequential regardless of
    /// this setting; only whole files run in parallel.
    pub concurrency: usize,

    /// Callback receiving per-file and per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_rendered_pixels: 20_000,
            concurrency: 1,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 1200);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PngError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 1200 {
            return Err(Pdf2PngError::InvalidConfig(format!(
                "DPI must be 72–1200, got {}",
                c.dpi
            )));
        }
        if c.concurrency == 0 {
            return Err(Pdf2PngError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dpi_is_300() {
        assert_eq!(ConversionConfig::default().dpi, 300);
    }

    #[test]
    fn builder_clamps_dpi_into_range() {
        let low = ConversionConfig::builder().dpi(10).build().unwrap();
        assert_eq!(low.dpi, 72);
        let high = ConversionConfig::builder().dpi(5000).build().unwrap();
        assert_eq!(high.dpi, 1200);
    }

    #[test]
    fn builder_clamps_concurrency_to_one() {
        let config = ConversionConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn debug_does_not_require_callback_debug() {
        let config = ConversionConfig::default();
        let s = format!("{config:?}");
        assert!(s.contains("dpi: 300"), "got: {s}");
    }
}
