//! Source reader abstraction for mrst.
//!
//! This crate provides the [`SourceReader`] capability used by the translator
//! and the document assembler to read templates and annotated sources. Each
//! read returns the file's lines together with a reader rooted at the file's
//! own directory, so nested includes resolve relative to the file that
//! references them rather than the root template.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SourceReader`] trait with a single `read()` method
//! - [`FsReader`] for the local filesystem
//! - [`MockReader`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use mrst_storage::{FsReader, SourceReader};
//!
//! let template = FsReader::new("docs").read("index.mrst")?;
//! for line in &template.lines {
//!     println!("{line}");
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod reader;

pub use fs::FsReader;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockReader;
pub use reader::{SourceFile, SourceReader, StorageError, StorageErrorKind};
