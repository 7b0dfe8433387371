#![deny(missing_docs)]

//! # File Store
//!
//! File primitives over a fixed project root. Every generated or edited path
//! is relative to that root. Edits go through [`edit_file`], a full
//! read-transform-write cycle that never writes when the transform fails.

use crate::error::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File primitives consumed by the pipeline. Paths are relative to the project root.
pub trait FileStore {
    /// The project root all paths resolve against.
    fn root(&self) -> &Path;

    /// True when `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Reads `path` as UTF-8 text.
    fn read(&self, path: &Path) -> AppResult<String>;

    /// Writes `content` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> AppResult<()>;

    /// Deletes the file at `path`.
    fn delete(&self, path: &Path) -> AppResult<()>;

    /// Names of the entries in directory `path`, sorted.
    fn list_dir(&self, path: &Path) -> AppResult<Vec<String>>;
}

/// A [`FileStore`] backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct ProjectFs {
    root: PathBuf,
}

impl ProjectFs {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn abs(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileStore for ProjectFs {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> bool {
        self.abs(path).exists()
    }

    fn read(&self, path: &Path) -> AppResult<String> {
        Ok(fs::read_to_string(self.abs(path))?)
    }

    fn write(&self, path: &Path, content: &str) -> AppResult<()> {
        let target = self.abs(path);
        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&target, content)?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> AppResult<()> {
        Ok(fs::remove_file(self.abs(path))?)
    }

    fn list_dir(&self, path: &Path) -> AppResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.abs(path))? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// Outcome of [`edit_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited<T> {
    /// True when new content was written.
    pub changed: bool,
    /// Whatever the transform reported alongside the new text.
    pub detail: T,
}

/// Reads `path`, transforms it, and writes the result back if it changed.
///
/// A failing transform leaves the file untouched and returns its error.
pub fn edit_file<S, T, F>(store: &S, path: &Path, transform: F) -> AppResult<Edited<T>>
where
    S: FileStore + ?Sized,
    F: FnOnce(&str) -> AppResult<(String, T)>,
{
    if !store.exists(path) {
        return Err(AppError::NotFound(format!("File not found: {}", path.display())));
    }
    let original = store.read(path)?;
    let (updated, detail) = transform(&original)?;
    let changed = updated != original;
    if changed {
        store.write(path, &updated)?;
    }
    Ok(Edited { changed, detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents_and_lists() {
        let dir = tempdir().unwrap();
        let store = ProjectFs::new(dir.path());
        store.write(Path::new("a/b/c.txt"), "x").unwrap();
        store.write(Path::new("a/b/a.txt"), "y").unwrap();
        assert!(store.exists(Path::new("a/b/c.txt")));
        assert_eq!(
            store.list_dir(Path::new("a/b")).unwrap(),
            vec!["a.txt".to_string(), "c.txt".to_string()]
        );
        store.delete(Path::new("a/b/c.txt")).unwrap();
        assert!(!store.exists(Path::new("a/b/c.txt")));
    }

    #[test]
    fn test_edit_file_keeps_original_on_error() {
        let dir = tempdir().unwrap();
        let store = ProjectFs::new(dir.path());
        let path = Path::new("Foo.java");
        store.write(path, "class Foo {}").unwrap();

        let res: AppResult<Edited<()>> =
            edit_file(&store, path, |_| Err(AppError::General("boom".into())));
        assert!(res.is_err());
        assert_eq!(store.read(path).unwrap(), "class Foo {}");

        let ok = edit_file(&store, path, |s| Ok((s.replace("Foo", "Bar"), 1))).unwrap();
        assert!(ok.changed);
        assert_eq!(ok.detail, 1);
        assert_eq!(store.read(path).unwrap(), "class Bar {}");
    }

    #[test]
    fn test_edit_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = ProjectFs::new(dir.path());
        let res = edit_file(&store, Path::new("nope.java"), |s| Ok((s.to_string(), ())));
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }
}
