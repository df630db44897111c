//! Error types for assembly, conversion, generation and site building.

use std::path::PathBuf;

use mrst_directive::DirectiveError;
use mrst_storage::StorageError;
use mrst_translate::TranslateError;

/// Error returned by a [`MarkdownConverter`](crate::MarkdownConverter).
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Scratch files could not be written or read back.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The converter program could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
    /// The converter exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
}

/// Error resolving one `~dumpfile` directive.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    /// Included file cannot be read.
    #[error(transparent)]
    Read(#[from] StorageError),
    /// Included source file failed to translate.
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// Markdown conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// `start_after` or `end_before` marker does not occur in the range.
    #[error("Marker {marker:?} not found")]
    MarkerNotFound {
        /// Marker text.
        marker: String,
    },
}

/// Error assembling a template.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// Template cannot be read.
    #[error("Cannot read template: {0}")]
    Template(#[source] StorageError),
    /// Bad `~dumpfile` arguments.
    #[error("Invalid dumpfile directive at line {line}: {source}")]
    Directive {
        /// Template line (1-indexed).
        line: usize,
        /// Argument error.
        #[source]
        source: DirectiveError,
    },
    /// `~dumpfile` target could not be included.
    #[error("Cannot include {path:?} at line {line}: {source}")]
    Include {
        /// Template line (1-indexed).
        line: usize,
        /// Path as written in the directive.
        path: String,
        /// Resolution error.
        #[source]
        source: IncludeError,
    },
    /// Output could not be written.
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),
}

/// Error generating the reStructuredText tree.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Filesystem operation failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Source tree walk failed.
    #[error("Cannot walk source directory: {0}")]
    Walk(String),
    /// A template failed to assemble.
    #[error("{}: {source}", path.display())]
    Assemble {
        /// Template path.
        path: PathBuf,
        /// Assembly error.
        #[source]
        source: AssembleError,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Error building the site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Generation step failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// The site builder could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
    /// The site builder exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
}
