//! Annotated-source translator for mrst.
//!
//! Turns comment banners in source files into reStructuredText headings,
//! paragraphs, and `code-block` directives. Headings are placed on a fixed
//! ladder (see [`LADDER`]) so translated fragments can be nested below the
//! section they are included from.
//!
//! # Example
//!
//! ```
//! use mrst_storage::FsReader;
//! use mrst_translate::{Languages, Translator};
//!
//! let languages = Languages::default();
//! let cpp = languages.get("hpp").unwrap();
//! let lines = vec!["int not_documented;".to_owned()];
//!
//! let rst = Translator::new(&languages, cpp)
//!     .translate(&lines, Some("-"), &FsReader::new("."))
//!     .unwrap();
//! assert!(rst.is_empty());
//! ```

mod block;
mod error;
mod ladder;
mod language;
mod translator;

pub use error::TranslateError;
pub use ladder::{LADDER, ladder_index, section_offset, underline_char};
pub use language::{Languages, MIN_RULER_LEN, SourceLanguage};
pub use translator::Translator;
