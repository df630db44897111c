//! Mock reader implementation for testing.
//!
//! Provides [`MockReader`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::reader::{SourceFile, SourceReader, StorageError, StorageErrorKind, split_lines};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory reader for testing.
///
/// Paths are normalized lexically (`.` and `..` are folded), so nested
/// relative includes resolve the same way they would on disk.
///
/// # Example
///
/// ```ignore
/// use mrst_storage::{MockReader, SourceReader};
///
/// let reader = MockReader::new()
///     .with_file("docs/index.mrst", "~dumpfile \"../src/a.hpp\"")
///     .with_file("src/a.hpp", "// ...");
///
/// let template = reader.read("docs/index.mrst").unwrap();
/// let header = template.reader.read("../src/a.hpp").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockReader {
    files: Arc<HashMap<PathBuf, String>>,
    base_dir: PathBuf,
}

impl MockReader {
    /// Create a new empty mock reader rooted at `""`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.files).insert(normalize(path.as_ref()), content.into());
        self
    }

    /// Root the reader at `dir`.
    #[must_use]
    pub fn at(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = normalize(dir.as_ref());
        self
    }
}

impl SourceReader for MockReader {
    fn read(&self, path: &str) -> Result<SourceFile, StorageError> {
        if path.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath).with_backend(BACKEND));
        }

        let full_path = normalize(&self.base_dir.join(path));
        let content = self
            .files
            .get(&full_path)
            .ok_or_else(|| StorageError::not_found(full_path.clone()).with_backend(BACKEND))?;

        Ok(SourceFile {
            lines: split_lines(content),
            reader: Box::new(Self {
                files: Arc::clone(&self.files),
                base_dir: full_path.parent().map(Path::to_path_buf).unwrap_or_default(),
            }),
            path: full_path,
        })
    }
}

/// Fold `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
