//! Directive argument mini-language for mrst.
//!
//! Templates and annotated sources reference other files through directives
//! whose arguments follow a small shell-like syntax:
//!
//! ```text
//! ~dumpfile "src/beam.hpp" 10 ~ 4 section = "~"
//! ```
//!
//! Parsing happens in two steps:
//!
//! 1. [`split_args`] turns the argument string into [`Token`]s, honoring
//!    double quotes and `\"` escapes and isolating every `=`.
//! 2. [`bind`] maps the tokens onto a [`ParamSchema`]: leading values bind
//!    positionally, `name = value` triples bind by name.
//!
//! [`DumpfileArgs`] and [`SeeFileArgs`] build typed arguments on top.

mod args;
mod binder;
mod directive;
mod error;

pub use args::{Token, split_args};
pub use binder::{BoundArgs, ParamSchema, bind};
pub use directive::{
    BEGIN_DOC, DUMPFILE_SCHEMA, DumpfileArgs, END_DOC, SEE_FILE_SCHEMA, SeeFileArgs,
    match_dumpfile, match_see_file,
};
pub use error::DirectiveError;
