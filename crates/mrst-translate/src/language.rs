//! Source languages and line classification.
//!
//! A [`SourceLanguage`] knows its line-comment prefix and the name used in
//! the `code-block` directive. Every input line is classified against that
//! prefix before the translator looks at it.

use std::collections::HashMap;
use std::path::Path;

use mrst_directive::{BEGIN_DOC, END_DOC};

/// Minimum number of border characters in a ruler.
pub const MIN_RULER_LEN: usize = 10;

/// Comment convention and highlighting name of a source language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLanguage {
    /// Language name for `.. code-block::`.
    pub code_block: String,
    /// Line-comment prefix (e.g., `//`).
    pub comment: String,
}

impl SourceLanguage {
    /// Create a language description.
    #[must_use]
    pub fn new(code_block: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            code_block: code_block.into(),
            comment: comment.into(),
        }
    }

    /// Classify a line of this language.
    pub(crate) fn classify<'l>(&self, line: &'l str) -> Line<'l> {
        let Some(body) = line.trim_start().strip_prefix(self.comment.as_str()) else {
            return Line::Code;
        };

        let trimmed = body.trim();
        if trimmed == BEGIN_DOC {
            Line::Begin
        } else if trimmed == END_DOC {
            Line::End
        } else if let Some(ruler) = Ruler::parse(trimmed) {
            Line::Ruler(ruler)
        } else {
            Line::Comment(body)
        }
    }
}

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'l> {
    /// Anything that is not a comment, including empty lines.
    Code,
    /// Comment line with the prefix removed (untrimmed).
    Comment(&'l str),
    /// Structural ruler.
    Ruler(Ruler),
    /// `~begin-doc` marker.
    Begin,
    /// `~end-doc` marker.
    End,
}

impl Line<'_> {
    pub(crate) fn is_comment(self) -> bool {
        !matches!(self, Self::Code)
    }
}

/// A comment line of repeated `-` or `=`, optionally ending in `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ruler {
    /// Border character.
    pub(crate) border: char,
    /// Whether the ruler ends in `/`.
    pub(crate) slashed: bool,
}

impl Ruler {
    fn parse(trimmed: &str) -> Option<Self> {
        let (rule, slashed) = match trimmed.strip_suffix('/') {
            Some(rule) => (rule.trim_end(), true),
            None => (trimmed, false),
        };

        let border = rule.chars().next()?;
        if !matches!(border, '-' | '=') {
            return None;
        }
        if rule.chars().count() < MIN_RULER_LEN || rule.chars().any(|c| c != border) {
            return None;
        }

        Some(Self { border, slashed })
    }

    /// Whether closing a header with this ruler starts implicit code capture.
    pub(crate) fn opens_code(self) -> bool {
        !self.slashed
    }
}

/// Source languages keyed by lowercase file extension.
#[derive(Debug, Clone)]
pub struct Languages {
    by_extension: HashMap<String, SourceLanguage>,
}

impl Default for Languages {
    fn default() -> Self {
        const SLASH_COMMENTED: &[(&str, &str)] = &[
            ("c", "c"),
            ("h", "c"),
            ("cpp", "c++"),
            ("cc", "c++"),
            ("cxx", "c++"),
            ("hpp", "c++"),
            ("hh", "c++"),
            ("hxx", "c++"),
            ("ipp", "c++"),
            ("rs", "rust"),
            ("java", "java"),
            ("js", "javascript"),
            ("ts", "typescript"),
            ("go", "go"),
            ("swift", "swift"),
            ("kt", "kotlin"),
            ("cs", "csharp"),
        ];
        const HASH_COMMENTED: &[(&str, &str)] = &[("py", "python"), ("sh", "bash")];

        let mut languages = Self::empty();
        for (ext, name) in SLASH_COMMENTED {
            languages.insert(ext, SourceLanguage::new(*name, "//"));
        }
        for (ext, name) in HASH_COMMENTED {
            languages.insert(ext, SourceLanguage::new(*name, "#"));
        }
        languages
    }
}

impl Languages {
    /// Create a registry without any languages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    /// Register (or replace) the language for an extension.
    pub fn insert(&mut self, extension: &str, language: SourceLanguage) {
        self.by_extension
            .insert(extension.trim_start_matches('.').to_lowercase(), language);
    }

    /// Look up a language by extension (case-insensitive, leading dot optional).
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&SourceLanguage> {
        self.by_extension
            .get(&extension.trim_start_matches('.').to_lowercase())
    }

    /// Look up the language for a path by its extension.
    #[must_use]
    pub fn for_path(&self, path: &Path) -> Option<&SourceLanguage> {
        self.get(&path.extension()?.to_string_lossy())
    }
}
