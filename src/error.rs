//! Error types for the pdfmd library.
//!
//! One enum covers both phases of a run:
//!
//! * Resolution-time — [`ExtractError::NotFound`], [`ExtractError::InvalidFormat`],
//!   [`ExtractError::PermissionDenied`]. Inside the interactive selector these
//!   are recovered locally by re-prompting; in argument mode they propagate to
//!   the top level as a reported failure.
//!
//! * Extraction-time — [`ExtractError::ExtractionFailed`],
//!   [`ExtractError::WriteFailed`]. Never retried; surfaced immediately with
//!   the failing path.
//!
//! User cancellation is deliberately *not* an error. It is modelled as
//! [`crate::select::Selection::Cancelled`] so callers can exit cleanly with
//! status 0 instead of routing a non-fault through error reporting.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfmd library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The path (file or search root) does not exist.
    #[error("No such file or directory: '{path}'\nCheck the path exists and is spelled correctly.")]
    NotFound { path: PathBuf },

    /// The path exists but is not a `.pdf` file.
    #[error("Not a PDF file: '{path}'\nThe extension must be .pdf (case-insensitive).")]
    InvalidFormat { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The extraction collaborator failed to parse the PDF
    /// (corrupt file, encryption, unsupported structure).
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_path() {
        let e = ExtractError::NotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        assert!(e.to_string().contains("/tmp/missing.pdf"));
    }

    #[test]
    fn invalid_format_mentions_extension() {
        let e = ExtractError::InvalidFormat {
            path: PathBuf::from("notes.txt"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains(".pdf"));
    }

    #[test]
    fn write_failed_keeps_io_source() {
        use std::error::Error as _;
        let e = ExtractError::WriteFailed {
            path: PathBuf::from("/out/report.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(e.to_string().contains("/out/report.md"));
        assert!(e.source().is_some());
    }
}
