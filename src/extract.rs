//! Extraction orchestration: collaborator call plus atomic output write.
//!
//! ## Why an injected collaborator?
//!
//! The actual PDF parsing lives behind the [`MarkdownExtractor`] trait so the
//! orchestrator can be exercised with fakes that return canned text or canned
//! errors. The shipped backend wraps the `pdf-extract` crate; swapping in a
//! different engine means implementing one method.
//!
//! ## Why write via a temp file?
//!
//! The output is written to a named temp file in the destination directory
//! and renamed into place. A failure at any point drops the temp file, so a
//! `WriteFailed` never leaves a partial `.md` behind — and neither does an
//! extraction failure, which happens before anything touches the disk.

use crate::error::ExtractError;
use crate::resolve::ResolvedPdf;
use gag::Gag;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The external component that turns a PDF file into Markdown text.
///
/// May fail on malformed, encrypted, or unsupported input; the orchestrator
/// maps any failure to [`ExtractError::ExtractionFailed`].
pub trait MarkdownExtractor {
    fn extract_markdown(
        &self,
        pdf: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Default backend: the `pdf-extract` crate.
///
/// Its parser prints stray warnings directly to stdout/stderr while walking
/// content streams; both are gagged for the duration of the call so they
/// cannot corrupt interactive prompts or piped output.
#[derive(Debug, Default)]
pub struct PdfExtractBackend;

impl MarkdownExtractor for PdfExtractBackend {
    fn extract_markdown(
        &self,
        pdf: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let _gag_out = Gag::stdout().ok();
        let _gag_err = Gag::stderr().ok();
        Ok(pdf_extract::extract_text(pdf)?)
    }
}

/// Outcome of a successful extraction, for display or `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// The source PDF.
    pub source: PathBuf,
    /// The Markdown file written next to it.
    pub output: PathBuf,
    /// Size of the written Markdown in bytes.
    pub bytes_written: u64,
}

/// Extract `pdf` to its sibling `.md` file.
///
/// An existing file at the output path is overwritten without prompting.
///
/// # Errors
/// * [`ExtractError::ExtractionFailed`] — the collaborator could not parse
///   the PDF; nothing is written.
/// * [`ExtractError::WriteFailed`] — the output could not be created or
///   renamed into place; no partial file remains.
pub fn run(
    pdf: &ResolvedPdf,
    backend: &dyn MarkdownExtractor,
) -> Result<ExtractionReport, ExtractError> {
    let output = pdf.output_path();
    info!("Extracting text from: {pdf}");

    let markdown =
        backend
            .extract_markdown(pdf.path())
            .map_err(|e| ExtractError::ExtractionFailed {
                path: pdf.path().to_path_buf(),
                detail: e.to_string(),
            })?;
    debug!("Collaborator returned {} bytes of Markdown", markdown.len());

    write_atomic(&output, &markdown)?;
    info!("Markdown saved to: {}", output.display());

    Ok(ExtractionReport {
        source: pdf.path().to_path_buf(),
        output,
        bytes_written: markdown.len() as u64,
    })
}

/// Write `contents` to `path` via temp-file-then-rename in the same
/// directory, flushed before the rename so success implies durable bytes.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ExtractError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let write_failed = |source: std::io::Error| ExtractError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    // Same directory as the target: rename never crosses filesystems.
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(contents.as_bytes()).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;
    use std::fs;

    struct CannedText(&'static str);

    impl MarkdownExtractor for CannedText {
        fn extract_markdown(
            &self,
            _pdf: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.0.to_string())
        }
    }

    struct AlwaysFails;

    impl MarkdownExtractor for AlwaysFails {
        fn extract_markdown(
            &self,
            _pdf: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("document is encrypted".into())
        }
    }

    fn fixture_pdf(dir: &Path) -> ResolvedPdf {
        let pdf = dir.join("report.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        resolve::resolve(pdf.to_str().unwrap()).unwrap()
    }

    #[test]
    fn writes_collaborator_text_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fixture_pdf(dir.path());

        let report = run(&pdf, &CannedText("# Title\n\nBody text.\n")).unwrap();
        assert_eq!(report.source, pdf.path());
        assert_eq!(report.output, pdf.path().with_extension("md"));
        assert_eq!(report.bytes_written, "# Title\n\nBody text.\n".len() as u64);
        assert_eq!(
            fs::read_to_string(&report.output).unwrap(),
            "# Title\n\nBody text.\n"
        );
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fixture_pdf(dir.path());
        let out = pdf.output_path();
        fs::write(&out, "stale").unwrap();

        run(&pdf, &CannedText("fresh")).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "fresh");
    }

    #[test]
    fn collaborator_failure_maps_to_extraction_failed() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fixture_pdf(dir.path());

        let err = run(&pdf, &AlwaysFails).unwrap_err();
        match err {
            ExtractError::ExtractionFailed { path, detail } => {
                assert_eq!(path, pdf.path());
                assert!(detail.contains("encrypted"));
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn no_output_file_after_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fixture_pdf(dir.path());

        run(&pdf, &AlwaysFails).unwrap_err();
        assert!(!pdf.output_path().exists(), "no partial file may remain");
    }

    #[test]
    fn default_backend_fails_cleanly_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("garbage.pdf");
        fs::write(&pdf, b"this is not a pdf at all").unwrap();
        let resolved = resolve::resolve(pdf.to_str().unwrap()).unwrap();

        let err = run(&resolved, &PdfExtractBackend).unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailed { .. }));
        assert!(!resolved.output_path().exists());
    }
}
