// Media root browsing: containment guard and ordered directory listings
use crate::error::{Result, SubshiftError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Resolve `relative` against `root`, requiring the canonicalized result to
/// stay inside the canonicalized root. Traversal attempts (`..`, symlinks
/// pointing outside) are rejected before any I/O on the target.
pub fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf> {
    let root = root
        .canonicalize()
        .map_err(|_| SubshiftError::FileNotFound(root.display().to_string()))?;

    let joined = root.join(relative.trim_start_matches('/'));
    let resolved = joined
        .canonicalize()
        .map_err(|_| SubshiftError::FileNotFound(joined.display().to_string()))?;

    if !resolved.starts_with(&root) {
        return Err(SubshiftError::PathTraversal(relative.to_string()));
    }

    Ok(resolved)
}

/// List a directory under the media root, directories first and then
/// alphabetically by name within each group.
pub fn list_directory(root: &Path, relative: &str) -> Result<Vec<MediaEntry>> {
    let dir = resolve_within(root, relative)?;
    debug!("Listing media directory: {}", dir.display());

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        entries.push(MediaEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
        });
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("shows")).unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("b-movie.mp4"), b"xx").unwrap();
        fs::write(dir.path().join("a-movie.mp4"), b"xxxx").unwrap();
        dir
    }

    #[test]
    fn test_listing_orders_dirs_first_then_alpha() {
        let root = sample_tree();
        let entries = list_directory(root.path(), "").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["archive", "shows", "a-movie.mp4", "b-movie.mp4"]);
        assert!(entries[0].is_dir);
        assert!(!entries[2].is_dir);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = sample_tree();
        // tempdirs live under a shared parent that exists, so `..` resolves
        // to a real directory outside the root
        let result = resolve_within(root.path(), "..");
        assert!(matches!(result, Err(SubshiftError::PathTraversal(_))));
    }

    #[test]
    fn test_resolve_missing_target() {
        let root = sample_tree();
        assert!(matches!(
            resolve_within(root.path(), "nope/missing.mp4"),
            Err(SubshiftError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_within_root() {
        let root = sample_tree();
        let resolved = resolve_within(root.path(), "shows").unwrap();
        assert!(resolved.ends_with("shows"));
    }
}
