//! `~dumpfile` resolution.
//!
//! An included file is narrowed to the requested line range and then
//! dispatched by extension:
//! - Markdown goes through the [`MarkdownConverter`]
//! - known source languages go through the [`Translator`]
//! - anything else is copied verbatim with the requested indent

use mrst_directive::DumpfileArgs;
use mrst_storage::{SourceFile, SourceReader};
use mrst_translate::{Languages, SourceLanguage, Translator};

use crate::{IncludeError, MarkdownConverter};

/// Extensions handed to the Markdown converter.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Resolves `~dumpfile` directives into output lines.
#[derive(Clone, Copy)]
pub struct IncludeResolver<'a> {
    languages: &'a Languages,
    converter: &'a dyn MarkdownConverter,
}

impl<'a> IncludeResolver<'a> {
    /// Create a resolver.
    #[must_use]
    pub fn new(languages: &'a Languages, converter: &'a dyn MarkdownConverter) -> Self {
        Self {
            languages,
            converter,
        }
    }

    /// Resolve `args` against `reader`, the reader of the including template.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a marker is missing, or
    /// translation or conversion fails.
    pub fn resolve(
        &self,
        args: &DumpfileArgs,
        reader: &dyn SourceReader,
    ) -> Result<Vec<String>, IncludeError> {
        tracing::debug!(
            input_file = %args.input_file,
            start = args.start,
            end = ?args.end,
            indent = args.indent,
            section = ?args.section,
            "Resolving dumpfile"
        );

        let file = reader.read(&args.input_file)?;
        let (first_line, range) = narrow(&file.lines, args)?;

        let extension = file.extension().unwrap_or_default();
        if MARKDOWN_EXTENSIONS.contains(&extension.as_str()) {
            return Ok(self.converter.convert(range)?);
        }

        if let Some(language) = self.languages.get(&extension) {
            return self.translate(&file, language, first_line, range, args);
        }

        let prefix = " ".repeat(args.indent);
        Ok(range
            .iter()
            .map(|line| match line.trim_end() {
                "" => String::new(),
                line => format!("{prefix}{line}"),
            })
            .collect())
    }

    fn translate(
        &self,
        file: &SourceFile,
        language: &SourceLanguage,
        first_line: usize,
        range: &[String],
        args: &DumpfileArgs,
    ) -> Result<Vec<String>, IncludeError> {
        let lines = Translator::new(self.languages, language)
            .starting_at(first_line)
            .translate(range, args.section.as_deref(), file.reader.as_ref())?;
        Ok(lines)
    }
}

/// Narrow `lines` to the directive's range and markers.
///
/// Returns the index of the first kept line along with the kept lines.
/// `[start, end)` is clamped to the file; `start_after` drops everything up to
/// and including the first line containing it, `end_before` drops everything
/// from the first following line containing it.
fn narrow<'l>(
    lines: &'l [String],
    args: &DumpfileArgs,
) -> Result<(usize, &'l [String]), IncludeError> {
    let end = args.end.unwrap_or(lines.len()).min(lines.len());
    let start = args.start.min(end);
    let mut first_line = start;
    let mut range = &lines[start..end];

    if let Some(marker) = &args.start_after {
        let found = find_marker(range, marker)?;
        first_line += found + 1;
        range = &range[found + 1..];
    }
    if let Some(marker) = &args.end_before {
        let found = find_marker(range, marker)?;
        range = &range[..found];
    }

    Ok((first_line, range))
}

fn find_marker(lines: &[String], marker: &str) -> Result<usize, IncludeError> {
    lines
        .iter()
        .position(|line| line.contains(marker))
        .ok_or_else(|| IncludeError::MarkerNotFound {
            marker: marker.to_owned(),
        })
}
