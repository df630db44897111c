//! Directive error types.

/// Error raised while tokenizing or binding directive arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// Bad quoting or token structure.
    #[error("Malformed directive arguments: {0}")]
    Malformed(String),
    /// Named argument not in the directive's schema.
    #[error("Unknown {directive} arg: {name}")]
    UnknownParameter {
        /// Directive name (e.g., "dumpfile").
        directive: &'static str,
        /// The offending argument name.
        name: String,
    },
    /// Argument bound twice, positionally or by name.
    #[error("{directive} arg {name} set twice")]
    DuplicateParameter {
        /// Directive name.
        directive: &'static str,
        /// The argument bound twice.
        name: &'static str,
    },
    /// Mandatory argument absent.
    #[error("{directive} requires argument {name}")]
    MissingRequiredArgument {
        /// Directive name.
        directive: &'static str,
        /// The missing argument.
        name: &'static str,
    },
    /// Integer argument that does not parse.
    #[error("{directive} arg {name} expects a non-negative integer, got {value:?}")]
    InvalidInteger {
        /// Directive name.
        directive: &'static str,
        /// Argument name.
        name: &'static str,
        /// The raw value.
        value: String,
    },
}
