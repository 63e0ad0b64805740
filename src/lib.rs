//! # pdfmd
//!
//! Extract the text content of a local PDF and save it as a Markdown file
//! next to the source — `report.pdf` becomes `report.md`.
//!
//! ## Pipeline Overview
//!
//! ```text
//! raw path ── resolve ──► ResolvedPdf ── run ──► report.md
//!    ▲                                   │
//!    └── select (menu / search) ◄────────┘ collaborator: MarkdownExtractor
//! ```
//!
//! * [`resolve::resolve`] turns a raw candidate string (typed, pasted, or
//!   drag-and-dropped) into a validated [`ResolvedPdf`].
//! * [`discover::search`] walks a directory tree for PDF files, symlink-cycle
//!   safe, in lexical order.
//! * [`select::Selector`] drives the interactive menu over injected I/O
//!   handles.
//! * [`extract::run`] invokes the [`MarkdownExtractor`] collaborator and
//!   atomically writes the sibling `.md` file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfmd::{extract, resolve, PdfExtractBackend};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pdf = resolve::resolve("~/Documents/report.pdf")?;
//!     let report = extract::run(&pdf, &PdfExtractBackend)?;
//!     println!("Markdown saved to: {}", report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfmd` binary (clap + anyhow + tracing-subscriber) |
//!
//! Everything is synchronous and single-threaded: one invocation, one file,
//! no state between runs.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod discover;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod select;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use error::ExtractError;
pub use extract::{ExtractionReport, MarkdownExtractor, PdfExtractBackend};
pub use resolve::ResolvedPdf;
pub use select::{Selection, Selector};
