//! CLI binary for pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2png::{convert, ConversionConfig, ConversionProgressCallback, ProgressCallback};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar over the files in
/// a batch plus a log line per saved page. Designed to work correctly when
/// files complete out-of-order (`--jobs > 1`).
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-file wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    /// Count of files that errored out.
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically
    /// by `on_batch_start` (called before any file is processed).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Looking for PDF files…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
    }

    /// Tear the bar down if it is still running (empty batch: no events fire).
    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    fn elapsed_secs(&self, file_num: usize) -> f64 {
        self.start_times
            .lock()
            .unwrap()
            .remove(&file_num)
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {total_files} PDF file(s)"))
        ));
    }

    fn on_file_start(&self, file_num: usize, _total: usize, path: &Path) {
        self.start_times
            .lock()
            .unwrap()
            .insert(file_num, Instant::now());
        self.bar
            .set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
    }

    fn on_page_saved(&self, _page_num: usize, _total_pages: usize, output: &Path) {
        self.bar
            .println(dim(&format!("  Saved: {}", output.display())));
    }

    fn on_file_complete(&self, file_num: usize, total: usize, pages_written: usize) {
        let secs = self.elapsed_secs(file_num);
        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {:<10}  {}",
            green("✓"),
            file_num,
            total,
            format!("{pages_written} page(s)"),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_num: usize, total: usize, error: String) {
        let secs = self.elapsed_secs(file_num);
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let first_line = error.lines().next().unwrap_or("");
        let msg = if first_line.len() > 80 {
            format!("{}\u{2026}", &first_line[..79])
        } else {
            first_line.to_string()
        };

        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}  {}",
            red("✗"),
            file_num,
            total,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, total_pages: usize) {
        let failed = self.errors.load(Ordering::SeqCst);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} Conversion complete! Total pages converted: {}",
                green("✔"),
                bold(&total_pages.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files converted, {} pages total  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&(total_files - failed).to_string()),
                total_files,
                total_pages,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one PDF (one PNG per page)
  pdf2png plan.pdf rendered/

  # Convert every PDF in a directory
  pdf2png plans/ rendered/

  # Lower resolution, four files at a time
  pdf2png --dpi 150 --jobs 4 plans/ rendered/

  # Machine-readable run record
  pdf2png --json plans/ rendered/ > run.json

OUTPUT NAMING:
  Each page is written as <pdf_basename>_page_<n>.png with n starting at 1
  and no zero-padding (plan_page_10.png sorts before plan_page_2.png).
  Existing files of the same name are overwritten.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Directory containing the pdfium shared library.
                    Without it, the executable's directory and the system
                    library path are tried in that order. Prebuilt
                    binaries: github.com/bblanchon/pdfium-binaries
"#;

/// Rasterise PDF documents into per-page PNG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Rasterise PDF documents into per-page PNG images",
    long_about = "Convert a PDF file, or every PDF in a directory, into one PNG image per page \
at a configurable resolution. Rendering is delegated to pdfium; a corrupt or unreadable \
PDF is reported and skipped without stopping the rest of a batch.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a PDF file or a directory containing PDF files.
    input: PathBuf,

    /// Output directory for PNG images (created if missing).
    output: PathBuf,

    /// Rendering DPI (72–1200).
    #[arg(long, env = "PDF2PNG_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=1200))]
    dpi: u32,

    /// Number of PDFs converted concurrently in batch mode.
    #[arg(short, long, env = "PDF2PNG_JOBS", default_value_t = 1)]
    jobs: usize,

    /// Output a structured JSON run record instead of human-readable text.
    #[arg(long, env = "PDF2PNG_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2PNG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2PNG_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let cli_callback = show_progress.then(CliProgressCallback::new_dynamic);
    let progress_cb: Option<ProgressCallback> = cli_callback
        .clone()
        .map(|cb| cb as Arc<dyn ConversionProgressCallback>);

    let mut builder = ConversionConfig::builder().dpi(cli.dpi).concurrency(cli.jobs);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    // An invalid input path (neither file nor directory) surfaces here and
    // exits non-zero; per-file failures are contained inside the output.
    let result = convert(&cli.input, &cli.output, &config).await;
    if let Some(ref cb) = cli_callback {
        cb.clear();
    }
    let output = result.context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    if output.stats.total_files == 0 && cli.input.is_dir() {
        eprintln!("No PDF files found in {}", cli.input.display());
        return Ok(());
    }

    // The progress callback already printed per-file lines and the final
    // tick; repeat the numbers only when the bar was disabled.
    if !show_progress {
        eprintln!(
            "Converted {} page(s) from {} file(s) in {}ms",
            output.stats.total_pages, output.stats.total_files, output.stats.total_duration_ms
        );
        if output.stats.failed_files > 0 {
            eprintln!("  {} file(s) failed", output.stats.failed_files);
        }
    }

    Ok(())
}
