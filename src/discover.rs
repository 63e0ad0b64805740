//! Recursive discovery of PDF files under a search root.
//!
//! ## Why an explicit stack and visited set?
//!
//! A home directory can contain symlink cycles (`~/links/home -> ~`), and a
//! naive recursive walk would follow them forever. The walk below keeps an
//! explicit pending stack and records the canonical identity of every
//! directory it enters, so each physical directory is visited at most once
//! per search regardless of how many links point at it.
//!
//! Unreadable subdirectories are skipped, not fatal: a single locked folder
//! must not abort a whole home-directory search.

use crate::error::ExtractError;
use crate::resolve::has_pdf_extension;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recursively collect every `.pdf` file (case-insensitive) under `root`.
///
/// Results are sorted lexically so numbered selection is reproducible across
/// runs. An empty directory yields `Ok(vec![])`, not an error.
///
/// # Errors
/// [`ExtractError::NotFound`] if `root` does not exist or is not a directory.
pub fn search(root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    if !root.is_dir() {
        return Err(ExtractError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        // Canonical path is the physical identity of the directory; a cycle
        // re-presents an identity we have already recorded.
        let identity = match std::fs::canonicalize(&dir) {
            Ok(p) => p,
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        };
        if !visited.insert(identity) {
            debug!("Already visited {}, skipping", dir.display());
            continue;
        }

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            // `is_dir`/`is_file` follow symlinks, so linked directories are
            // walked too (and caught by the visited set if they cycle).
            if path.is_dir() {
                pending.push(path);
            } else if has_pdf_extension(&path) && path.is_file() {
                found.push(path);
            }
        }
    }

    found.sort();
    debug!("Discovered {} PDF file(s) under {}", found.len(), root.display());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_pdfs_case_insensitively_in_lexical_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.PDF"), b"%PDF").unwrap();
        fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("c.txt"), b"nope").unwrap();

        let found = search(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a.pdf"), dir.path().join("b.PDF")]
        );
    }

    #[test]
    fn walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("top.pdf"), b"%PDF").unwrap();

        let found = search(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&nested.join("deep.pdf")));
    }

    #[test]
    fn empty_directory_is_ok_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(search(dir.path()).unwrap(), Vec::<PathBuf>::new());
    }

    #[test]
    fn missing_root_is_not_found() {
        let err = search(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn file_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        fs::write(&file, b"%PDF").unwrap();

        let err = search(&file).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("doc.pdf"), b"%PDF").unwrap();
        // sub/loop -> root: walking must not recurse forever.
        std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();

        let found = search(dir.path()).unwrap();
        assert_eq!(found.len(), 1, "cycle must not duplicate results: {found:?}");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.pdf"), b"%PDF").unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.pdf"), b"%PDF").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permission bits; the walk then simply
        // finds both files, which is also correct.
        let found = search(dir.path()).unwrap();
        assert!(found.contains(&dir.path().join("ok.pdf")));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
