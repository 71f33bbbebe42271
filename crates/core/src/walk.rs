//! Recursive file discovery
//!
//! Enumerates the files below a directory, optionally filtered by
//! extension. Directories are excluded and the result is sorted so folder
//! uploads are reproducible.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Collect all files under `root`, recursively.
///
/// `extensions` filters by file extension, compared without the leading
/// dot (`"png"`, not `".png"`). A missing or unreadable `root` fails with
/// an IO error before any upload is scheduled.
pub fn walk(root: &Path, extensions: Option<&HashSet<String>>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(wanted) = extensions {
            let ext = entry
                .path()
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !wanted.contains(&ext) {
                continue;
            }
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_walk_recurses_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("sub/a.txt"));
        touch(&dir.path().join("sub/deep/c.png"));

        let files = walk(dir.path(), None).unwrap();
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_walk_excludes_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("empty/nested")).unwrap();
        touch(&dir.path().join("a.txt"));

        let files = walk(dir.path(), None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.txt"));
    }

    #[test]
    fn test_walk_extension_filter() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("b.txt"));
        touch(&dir.path().join("sub/c.png"));
        touch(&dir.path().join("noext"));

        let wanted: HashSet<String> = ["png".to_string()].into();
        let files = walk(dir.path(), Some(&wanted)).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "png"));
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let result = walk(&dir.path().join("does-not-exist"), None);
        assert!(result.is_err());
    }
}
