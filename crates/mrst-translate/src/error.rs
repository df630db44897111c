//! Translator error types.

use mrst_directive::DirectiveError;
use mrst_storage::StorageError;

/// Error raised while translating an annotated source file.
///
/// Line numbers are 1-indexed and relative to the file the lines came from.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Ruler/title/ruler structure that is incomplete or not terminated.
    #[error("Malformed header at line {line}: {message}")]
    MalformedHeader {
        /// Line where the problem was detected.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// Section character that is not on the heading ladder.
    #[error("Invalid section {0:?}: expected one of = - ~ ^ '")]
    InvalidSection(String),
    /// Heading level beyond the last ladder character.
    #[error("Heading at line {line} is nested too deep (level {level})")]
    HeadingTooDeep {
        /// Line of the header's opening ruler.
        line: usize,
        /// Rendered level that was requested.
        level: usize,
    },
    /// Bad `~see-file` arguments.
    #[error("Invalid see-file directive at line {line}: {source}")]
    Directive {
        /// Line of the directive.
        line: usize,
        /// Underlying argument error.
        #[source]
        source: DirectiveError,
    },
    /// `~see-file` target that cannot be read.
    #[error("Cannot read see-file {path:?} at line {line}: {source}")]
    Include {
        /// Line of the directive.
        line: usize,
        /// Path as written in the directive.
        path: String,
        /// Reader error.
        #[source]
        source: StorageError,
    },
}
