//! Filesystem reader implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::reader::{SourceFile, SourceReader, StorageError, StorageErrorKind, split_lines};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Reads files from the local filesystem relative to a base directory.
///
/// Absolute paths are read as given. The reader returned with each file is
/// rooted at that file's parent directory.
///
/// # Example
///
/// ```ignore
/// use mrst_storage::{FsReader, SourceReader};
///
/// let template = FsReader::new("docs").read("index.mrst")?;
/// // Resolves to docs/src/beam.hpp
/// let source = template.reader.read("src/beam.hpp")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsReader {
    /// Directory relative paths are resolved against.
    base_dir: PathBuf,
}

impl FsReader {
    /// Create a reader rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a reader rooted at the parent directory of `file`.
    #[must_use]
    pub fn for_file(file: &Path) -> Self {
        Self::new(file.parent().map(Path::to_path_buf).unwrap_or_default())
    }

    /// Directory relative paths are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl SourceReader for FsReader {
    fn read(&self, path: &str) -> Result<SourceFile, StorageError> {
        if path.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath).with_backend(BACKEND));
        }

        let full_path = self.base_dir.join(path);
        tracing::debug!(path = %full_path.display(), "Reading source file");

        let content = fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, full_path.clone()).with_backend(BACKEND))?;

        Ok(SourceFile {
            lines: split_lines(&content),
            reader: Box::new(Self::for_file(&full_path)),
            path: full_path,
        })
    }
}
