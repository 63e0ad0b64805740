//! CLI binary for pdfmd.
//!
//! A thin shim over the library crate: dispatches between argument mode and
//! interactive mode, and prints results.

use anyhow::Result;
use clap::Parser;
use pdfmd::{extract, resolve, PdfExtractBackend, Selection, Selector};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract a specific PDF (writes report.md next to report.pdf)
  pdfmd ~/Documents/report.pdf

  # Quoted drag-and-drop paths work too
  pdfmd "'/home/me/My Files/report.pdf'"

  # No argument: choose interactively (manual entry or directory search)
  pdfmd

  # Machine-readable report
  pdfmd report.pdf --json

OUTPUT:
  The Markdown file is always written to the same directory as the source
  PDF, with the same base name and a .md extension. An existing file at
  that path is OVERWRITTEN without prompting.

EXIT STATUS:
  0  success, or the user quit the interactive dialogue
  1  resolution, extraction, or write failure
"#;

/// Extract text from a PDF and save it as Markdown alongside the source.
#[derive(Parser, Debug)]
#[command(
    name = "pdfmd",
    version,
    about = "Extract text from a PDF and save it as Markdown alongside the source",
    long_about = "Extract the text content of a local PDF document and save it as a Markdown \
file in the same directory as the source. Run with a path for one-shot extraction, or with \
no arguments to pick a file interactively (manual entry or recursive directory search).",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file. Omit to choose interactively.
    pdf: Option<String>,

    /// Print the extraction report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFMD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFMD_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", red("✗"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    // ── Pick the PDF: argument mode or interactive mode ──────────────────
    let pdf = match &cli.pdf {
        Some(raw) => resolve::resolve(raw)?,
        None => {
            if !cli.quiet {
                println!("PDF to Markdown Extractor");
                println!("-------------------------");
            }
            let stdin = io::stdin();
            let mut selector = Selector::new(stdin.lock(), io::stdout());
            match selector.select()? {
                Selection::Pdf(pdf) => pdf,
                Selection::Cancelled => {
                    if !cli.quiet {
                        println!("No file selected. Exiting.");
                    }
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }
    };

    // ── Extract and report ───────────────────────────────────────────────
    if !cli.quiet && !cli.json {
        println!("Extracting text from: {pdf}");
    }

    let report = extract::run(&pdf, &PdfExtractBackend)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(json.as_bytes())?;
        handle.write_all(b"\n")?;
    } else if !cli.quiet {
        println!(
            "{} Extraction completed successfully ({} bytes)",
            green("✔"),
            report.bytes_written
        );
        println!("  Input PDF:       {}", report.source.display());
        println!(
            "  Output Markdown: {}",
            bold(&report.output.display().to_string())
        );
    }

    Ok(ExitCode::SUCCESS)
}
