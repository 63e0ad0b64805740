//! Path resolution: normalise a raw, user-supplied path into a validated PDF.
//!
//! ## Why so much cleanup before touching the filesystem?
//!
//! Interactive users drag files into the terminal or copy paths from file
//! managers, which arrive wrapped in quotes or as `file://` URLs and often
//! start with `~`. The resolver strips all of that first, so that exactly one
//! canonical form reaches the existence/extension/readability checks and
//! every error message names the path the checks actually ran against.

use crate::error::ExtractError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An absolute path that existed, carried a `.pdf` extension, and was
/// readable when [`resolve`] constructed it.
///
/// Best-effort guarantee: the file can still disappear before extraction
/// runs, which surfaces later as [`ExtractError::ExtractionFailed`] rather
/// than a precondition violation here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPdf(PathBuf);

impl ResolvedPdf {
    /// The validated absolute path.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Consume the wrapper, keeping the path.
    pub fn into_path(self) -> PathBuf {
        self.0
    }

    /// Derive the output Markdown path: same directory, same stem, `.md`.
    ///
    /// Deterministic function of the source path — deriving again from the
    /// same input always yields the same result.
    pub fn output_path(&self) -> PathBuf {
        self.0.with_extension("md")
    }
}

impl fmt::Display for ResolvedPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolve a raw candidate string into a [`ResolvedPdf`].
///
/// Checks run in a fixed order so the reported failure is the most specific
/// one: existence ([`ExtractError::NotFound`]), then extension
/// ([`ExtractError::InvalidFormat`]), then readability
/// ([`ExtractError::PermissionDenied`]).
///
/// No side effects beyond filesystem reads.
pub fn resolve(raw: &str) -> Result<ResolvedPdf, ExtractError> {
    let cleaned = clean_input(raw);
    let expanded = expand_home(cleaned);

    if !expanded.exists() {
        return Err(ExtractError::NotFound { path: expanded });
    }

    if !has_pdf_extension(&expanded) {
        return Err(ExtractError::InvalidFormat { path: expanded });
    }

    // Canonicalize only after the existence check, so a missing file reports
    // NotFound with the path the user typed rather than a canonicalization
    // failure. This also resolves `.`/`..` segments and yields an absolute
    // path.
    let absolute = std::fs::canonicalize(&expanded).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ExtractError::PermissionDenied { path: expanded }
        } else {
            ExtractError::NotFound { path: expanded }
        }
    })?;

    if !absolute.is_file() {
        return Err(ExtractError::InvalidFormat { path: absolute });
    }

    // Probe readability by actually opening the file; metadata alone cannot
    // see ACLs or parent-directory restrictions.
    match std::fs::File::open(&absolute) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied { path: absolute });
        }
        Err(_) => {
            return Err(ExtractError::NotFound { path: absolute });
        }
    }

    debug!("Resolved PDF: {}", absolute.display());
    Ok(ResolvedPdf(absolute))
}

/// `true` if the path's extension is `.pdf`, case-insensitively.
pub(crate) fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Strip surrounding whitespace, one layer of matching quotes, and a
/// `file://` prefix (drag-and-drop URLs).
pub(crate) fn clean_input(raw: &str) -> &str {
    let mut s = raw.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
            break;
        }
    }
    s.strip_prefix("file://").unwrap_or(s)
}

/// Expand a leading `~` to the user's home directory.
pub(crate) fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
