//! Line sources for top-level documents and templates

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Provides the raw lines of a named file
pub trait LineSource {
    /// Read every line of `path`, without line terminators
    ///
    /// A missing file must be reported as [`io::ErrorKind::NotFound`]; the
    /// template resolver treats that case as recoverable.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Reads files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl LineSource for FileSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(content.lines().map(String::from).collect())
    }
}

/// Serves files from memory, keyed by normalized path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Returns `&mut Self` for chaining.
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> &mut Self {
        self.files
            .insert(normalize_path(path.as_ref()), content.into());
        self
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(&normalize_path(path.as_ref()))
    }
}

impl LineSource for MemorySource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        self.files
            .get(&normalize_path(path))
            .map(|content| content.lines().map(String::from).collect())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )
            })
    }
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_lines(path)
    }
}

/// Fold `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("./a/b.dem")), PathBuf::from("a/b.dem"));
        assert_eq!(
            normalize_path(Path::new("a/../b/./c.dem")),
            PathBuf::from("b/c.dem")
        );
        assert_eq!(normalize_path(Path::new("../x.dem")), PathBuf::from("../x.dem"));
        assert_eq!(normalize_path(Path::new(".")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_memory_source_reads_lines() {
        let source = MemorySource::new().with_file("dir/a.dem", "# Title\nbody\n");
        let lines = source.read_lines(Path::new("./dir/a.dem")).expect("Should read");
        assert_eq!(lines, vec!["# Title".to_string(), "body".to_string()]);
        assert!(source.contains("dir/x/../a.dem"));
    }

    #[test]
    fn test_memory_source_missing_file() {
        let source = MemorySource::new();
        let err = source.read_lines(Path::new("missing.dem")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_source_missing_file() {
        let err = FileSource
            .read_lines(Path::new("definitely/not/here.dem"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
