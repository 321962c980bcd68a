//! Scanning a pages root for entry directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::map::EntryMap;

/// Errors raised when the pages root cannot be listed.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("pages root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("pages root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read pages root {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: io::Error,
    },
}

/// Discover build entries under a pages root.
///
/// Each immediate subdirectory becomes one entry: the directory base name is
/// the entry name, the absolute directory path is the entry path. The
/// consuming bundler resolves an `index` file beneath each entry by
/// convention. Symlinks that resolve to directories count; anything else in
/// the root is skipped.
///
/// A missing or unreadable root is an error, never an empty map: an empty
/// substitute would silently drop every build target. An empty root is fine
/// and yields an empty map.
pub fn discover(pages_root: impl AsRef<Path>) -> Result<EntryMap, DiscoverError> {
    let pages_root = pages_root.as_ref();

    if !pages_root.exists() {
        return Err(DiscoverError::RootNotFound(pages_root.to_path_buf()));
    }

    // Canonicalize so entry paths come out absolute no matter how the root
    // was spelled.
    let root = fs::canonicalize(pages_root).map_err(|e| DiscoverError::Unreadable {
        path: pages_root.to_path_buf(),
        source: e,
    })?;

    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(pages_root.to_path_buf()));
    }

    let mut entries = EntryMap::new();

    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&root).to_path_buf();
            DiscoverError::Unreadable {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop")),
            }
        })?;

        if !entry.file_type().is_dir() {
            tracing::debug!("Skipping non-directory entry: {}", entry.path().display());
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        entries.insert(name, entry.path().to_path_buf());
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn maps_each_subdirectory_to_an_entry() {
        let temp = tempdir().unwrap();
        for page in ["a", "b", "c"] {
            fs::create_dir(temp.path().join(page)).unwrap();
        }

        let entries = discover(temp.path()).unwrap();

        let names: Vec<_> = entries.names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let root = fs::canonicalize(temp.path()).unwrap();
        for page in ["a", "b", "c"] {
            assert_eq!(entries.get(page), Some(root.join(page).as_path()));
        }
    }

    #[test]
    fn entry_paths_are_absolute() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("home")).unwrap();

        let entries = discover(temp.path()).unwrap();

        assert!(entries.get("home").unwrap().is_absolute());
    }

    #[test]
    fn empty_root_yields_empty_map() {
        let temp = tempdir().unwrap();

        let entries = discover(temp.path()).unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("no-such-dir");

        let result = discover(&missing);

        assert!(matches!(result, Err(DiscoverError::RootNotFound(_))));
    }

    #[test]
    fn root_that_is_a_file_is_an_error() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("pages");
        fs::write(&file, "not a directory").unwrap();

        let result = discover(&file);

        assert!(matches!(result, Err(DiscoverError::NotADirectory(_))));
    }

    #[test]
    fn stray_files_are_not_entries() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("home")).unwrap();
        fs::write(temp.path().join("README.md"), "# readme").unwrap();

        let entries = discover(temp.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert!(!entries.contains("README.md"));
    }

    #[test]
    fn rediscovery_yields_equal_maps() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("home")).unwrap();
        fs::create_dir(temp.path().join("about")).unwrap();

        let first = discover(temp.path()).unwrap();
        let second = discover(temp.path()).unwrap();

        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_counts_as_a_page() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("real-page");
        fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("linked")).unwrap();

        let entries = discover(temp.path()).unwrap();

        assert!(entries.contains("linked"));
        assert!(entries.contains("real-page"));
    }
}
