//! Reader trait and error types.
//!
//! A [`SourceReader`] is a capability: reading a file hands back both its
//! lines and a new reader that resolves further paths relative to the
//! directory of that file. Recursive includes thread these readers down the
//! call stack instead of sharing a root path.

use std::path::{Path, PathBuf};

/// A file returned by [`SourceReader::read`].
pub struct SourceFile {
    /// Resolved path of the file.
    pub path: PathBuf,
    /// File content split into lines, without line terminators.
    pub lines: Vec<String>,
    /// Reader resolving paths relative to this file's directory.
    pub reader: Box<dyn SourceReader>,
}

impl SourceFile {
    /// Extension of the resolved path, lowercased.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("lines", &self.lines.len())
            .finish_non_exhaustive()
    }
}

/// Capability for reading source files relative to some location.
pub trait SourceReader {
    /// Read the file at `path`, resolved relative to this reader's location.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<SourceFile, StorageError>;
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// File does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path cannot be resolved (e.g., empty).
    InvalidPath,
    /// Content is not valid UTF-8.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Reader error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path the error refers to, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if known.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Split file content into lines without terminators.
pub(crate) fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_full() {
        let err = StorageError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "/docs/a.cpp",
        )
        .with_backend("Fs");
        assert_eq!(err.to_string(), "[Fs] Not found: gone (path: /docs/a.cpp)");
        assert_eq!(err.kind(), StorageErrorKind::NotFound);
    }

    #[test]
    fn test_display_minimal() {
        let err = StorageError::new(StorageErrorKind::InvalidPath);
        assert_eq!(err.to_string(), "Invalid path");
        assert!(err.path().is_none());
    }

    #[test]
    fn test_io_kind_mapping() {
        let denied = StorageError::io(
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            "x",
        );
        assert_eq!(denied.kind(), StorageErrorKind::PermissionDenied);

        let invalid = StorageError::io(std::io::Error::from(std::io::ErrorKind::InvalidData), "x");
        assert_eq!(invalid.kind(), StorageErrorKind::InvalidData);
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;

        let err = StorageError::io(std::io::Error::other("boom"), "x");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_split_lines_strips_terminators() {
        assert_eq!(split_lines("a\r\nb\n\nc\n"), vec!["a", "b", "", "c"]);
        assert!(split_lines("").is_empty());
    }
}
