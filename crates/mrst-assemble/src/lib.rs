//! Template assembly for mrst.
//!
//! Expands `~dumpfile` directives in `.mrst` templates into
//! reStructuredText, generates a documentation tree from a source directory,
//! and hands it to the site builder.
//!
//! # Example
//!
//! ```no_run
//! use mrst_assemble::{Assembler, IncludeResolver, PandocConverter};
//! use mrst_storage::FsReader;
//! use mrst_translate::Languages;
//!
//! let languages = Languages::default();
//! let converter = PandocConverter::default();
//! let assembler = Assembler::new(IncludeResolver::new(&languages, &converter));
//!
//! let lines = assembler.assemble("index.mrst", &FsReader::new("docs")).unwrap();
//! println!("{}", lines.join("\n"));
//! ```

mod assembler;
mod builder;
mod converter;
mod error;
mod generator;
mod resolver;

pub use assembler::Assembler;
pub use builder::SiteBuilder;
pub use converter::{MarkdownConverter, PandocConverter};
pub use error::{AssembleError, BuildError, ConvertError, GenerateError, IncludeError};
pub use generator::{GenerateReport, Generator};
pub use resolver::IncludeResolver;
