//! Annotated-source translation.
//!
//! Converts banner comments in source files into reStructuredText:
//!
//! ```text
//! // ---------------------------------------------
//! // class Beam                        <- title
//! // ---------------------------------------------   <- `=` here makes a stronger heading
//! //    The hyper beam is responsible for the madness.
//! // ---------------------------------------------   <- ends in `/` to skip code capture
//! class Beam { ... };                  <- captured as a code block
//! ```
//!
//! Files containing `~begin-doc` / `~end-doc` markers capture only the code
//! between markers; implicit capture after headers is disabled for the whole
//! file.

use mrst_directive::{SeeFileArgs, match_see_file};
use mrst_storage::SourceReader;

use crate::TranslateError;
use crate::block::{Block, render};
use crate::ladder::{raw_level, section_offset, underline_char};
use crate::language::{Languages, Line, SourceLanguage};

/// How code outside header descriptions is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureMode {
    /// Code after a header's plain closing ruler is captured.
    Implicit,
    /// Only marker spans are captured; headers still render.
    Explicit,
    /// Only marker spans are output; headers are skipped.
    CodeOnly,
}

/// Translator state between lines.
#[derive(Debug)]
enum State {
    /// Between structures.
    Scanning,
    /// Opening ruler seen, title expected.
    HeaderTitle,
    /// Title seen, level ruler expected.
    HeaderLevel { title: String },
    /// Collecting description comment lines until the closing ruler.
    HeaderDescription {
        title: String,
        raw_level: usize,
        items: Vec<DescriptionItem>,
    },
    /// Capturing code after a header.
    ImplicitCode { lines: Vec<String> },
    /// Capturing code between markers.
    ExplicitCode { lines: Vec<String> },
}

/// A piece of a header description.
#[derive(Debug)]
enum DescriptionItem {
    /// Comment body, indentation intact.
    Text(String),
    /// Blank comment line.
    Break,
    /// Code spliced in by `~see-file`.
    Code(Vec<Block>),
}

/// Translates annotated source lines into reStructuredText lines.
///
/// # Example
///
/// ```
/// use mrst_storage::FsReader;
/// use mrst_translate::{Languages, SourceLanguage, Translator};
///
/// let source: Vec<String> = [
///     "// ----------------------------------------",
///     "// Beam",
///     "// ----------------------------------------",
///     "//   Fires the beam.",
///     "// ---------------------------------------/",
/// ]
/// .iter()
/// .map(|l| (*l).to_owned())
/// .collect();
///
/// let languages = Languages::default();
/// let cpp = SourceLanguage::new("c++", "//");
/// let output = Translator::new(&languages, &cpp)
///     .translate(&source, None, &FsReader::new("."))
///     .unwrap();
/// assert_eq!(output, vec!["Beam", "----", "", "Fires the beam."]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    languages: &'a Languages,
    language: &'a SourceLanguage,
    first_line: usize,
}

impl<'a> Translator<'a> {
    /// Create a translator for sources written in `language`.
    ///
    /// `languages` picks the code-block language of `~see-file` targets.
    #[must_use]
    pub fn new(languages: &'a Languages, language: &'a SourceLanguage) -> Self {
        Self {
            languages,
            language,
            first_line: 0,
        }
    }

    /// Report line numbers as if the first line were line `first_line + 1`.
    ///
    /// Used when translating a slice of a larger file.
    #[must_use]
    pub fn starting_at(mut self, first_line: usize) -> Self {
        self.first_line = first_line;
        self
    }

    /// Translate `lines` into reStructuredText.
    ///
    /// `section` is the heading character active where the output lands;
    /// headings are shifted below it. `reader` resolves `~see-file` paths
    /// relative to the file the lines came from.
    pub fn translate(
        &self,
        lines: &[String],
        section: Option<&str>,
        reader: &dyn SourceReader,
    ) -> Result<Vec<String>, TranslateError> {
        let offset = section_offset(section)?;
        let has_markers = lines
            .iter()
            .any(|line| self.language.classify(line) == Line::Begin);
        let mode = if has_markers {
            CaptureMode::Explicit
        } else {
            CaptureMode::Implicit
        };

        let blocks = self.run(lines, mode, offset, reader)?;
        Ok(render(&blocks))
    }

    /// Extract only the marker spans of `lines` as code blocks.
    fn extract_code(
        &self,
        lines: &[String],
        reader: &dyn SourceReader,
    ) -> Result<Vec<Block>, TranslateError> {
        self.run(lines, CaptureMode::CodeOnly, 0, reader)
    }

    fn run(
        &self,
        lines: &[String],
        mode: CaptureMode,
        offset: usize,
        reader: &dyn SourceReader,
    ) -> Result<Vec<Block>, TranslateError> {
        let mut machine = Machine {
            translator: *self,
            reader,
            mode,
            offset,
            state: State::Scanning,
            blocks: Vec::new(),
            line: 0,
            header_line: 0,
        };
        for (index, line) in lines.iter().enumerate() {
            machine.line = self.first_line + index + 1;
            machine.step(line)?;
        }
        machine.finish()
    }
}

/// One translation pass over a file.
struct Machine<'a> {
    translator: Translator<'a>,
    reader: &'a dyn SourceReader,
    mode: CaptureMode,
    offset: usize,
    state: State,
    blocks: Vec<Block>,
    /// Current line (1-indexed).
    line: usize,
    /// Line of the opening ruler of the current header.
    header_line: usize,
}

impl Machine<'_> {
    fn step(&mut self, raw: &str) -> Result<(), TranslateError> {
        let line = self.translator.language.classify(raw);

        match std::mem::replace(&mut self.state, State::Scanning) {
            State::Scanning => self.scan(line),
            State::HeaderTitle => match line {
                Line::Comment(body) if !body.trim().is_empty() => {
                    self.state = State::HeaderLevel {
                        title: body.trim().to_owned(),
                    };
                }
                _ => return Err(malformed(self.line, "expected a title after the ruler")),
            },
            State::HeaderLevel { title } => match line {
                Line::Ruler(ruler) => {
                    self.state = State::HeaderDescription {
                        title,
                        raw_level: raw_level(ruler.border),
                        items: Vec::new(),
                    };
                }
                _ => {
                    return Err(malformed(
                        self.line,
                        format!("expected a ruler after title {title:?}"),
                    ));
                }
            },
            State::HeaderDescription {
                title,
                raw_level,
                mut items,
            } => match line {
                Line::Ruler(ruler) => self.close_header(title, raw_level, items, ruler.opens_code())?,
                Line::Comment(body) => {
                    items.push(self.description_item(body)?);
                    self.state = State::HeaderDescription {
                        title,
                        raw_level,
                        items,
                    };
                }
                Line::Begin | Line::End => {
                    return Err(malformed(
                        self.line,
                        "code marker inside a header description",
                    ));
                }
                Line::Code => {
                    return Err(malformed(
                        self.line,
                        format!("description of {title:?} is not closed by a ruler"),
                    ));
                }
            },
            State::ImplicitCode { mut lines } => {
                if line.is_comment() {
                    self.push_code(lines);
                    self.scan(line);
                } else {
                    lines.push(raw.to_owned());
                    self.state = State::ImplicitCode { lines };
                }
            }
            State::ExplicitCode { mut lines } => match line {
                Line::End => self.push_code(lines),
                Line::Begin => self.state = State::ExplicitCode { lines },
                _ => {
                    lines.push(raw.to_owned());
                    self.state = State::ExplicitCode { lines };
                }
            },
        }

        Ok(())
    }

    /// Handle a line while between structures.
    fn scan(&mut self, line: Line<'_>) {
        match (line, self.mode) {
            (Line::Begin, CaptureMode::Explicit | CaptureMode::CodeOnly) => {
                self.state = State::ExplicitCode { lines: Vec::new() };
            }
            (Line::Ruler(_), CaptureMode::Implicit | CaptureMode::Explicit) => {
                self.header_line = self.line;
                self.state = State::HeaderTitle;
            }
            _ => {}
        }
    }

    fn description_item(&self, body: &str) -> Result<DescriptionItem, TranslateError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Ok(DescriptionItem::Break);
        }
        match match_see_file(trimmed) {
            Some(args) => self.see_file(args).map(DescriptionItem::Code),
            None => Ok(DescriptionItem::Text(body.to_owned())),
        }
    }

    /// Resolve a `~see-file` directive into the target's marker spans.
    fn see_file(&self, args: &str) -> Result<Vec<Block>, TranslateError> {
        let args = SeeFileArgs::parse(args).map_err(|source| TranslateError::Directive {
            line: self.line,
            source,
        })?;
        tracing::debug!(path = %args.path, line = self.line, "Resolving see-file");

        let file = self
            .reader
            .read(&args.path)
            .map_err(|source| TranslateError::Include {
                line: self.line,
                path: args.path.clone(),
                source,
            })?;

        let languages = self.translator.languages;
        let language = languages
            .for_path(&file.path)
            .unwrap_or(self.translator.language);
        Translator::new(languages, language).extract_code(&file.lines, file.reader.as_ref())
    }

    fn close_header(
        &mut self,
        title: String,
        raw_level: usize,
        items: Vec<DescriptionItem>,
        opens_code: bool,
    ) -> Result<(), TranslateError> {
        let description = description_blocks(items);

        if description.is_empty() {
            // Header without description: demoted to a plain paragraph.
            self.blocks.push(Block::Paragraph(vec![title]));
        } else {
            let level = raw_level + self.offset;
            let underline = underline_char(level).ok_or(TranslateError::HeadingTooDeep {
                line: self.header_line,
                level,
            })?;
            self.blocks.push(Block::Heading { title, underline });
            self.blocks.extend(description);
        }

        if opens_code && self.mode == CaptureMode::Implicit {
            self.state = State::ImplicitCode { lines: Vec::new() };
        }
        Ok(())
    }

    fn push_code(&mut self, lines: Vec<String>) {
        if let Some(block) = Block::code(&self.translator.language.code_block, lines) {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> Result<Vec<Block>, TranslateError> {
        match std::mem::replace(&mut self.state, State::Scanning) {
            State::Scanning => {}
            State::HeaderTitle | State::HeaderLevel { .. } | State::HeaderDescription { .. } => {
                return Err(malformed(
                    self.header_line,
                    "header is not terminated before end of file",
                ));
            }
            State::ImplicitCode { lines } | State::ExplicitCode { lines } => self.push_code(lines),
        }
        Ok(self.blocks)
    }
}

fn malformed(line: usize, message: impl Into<String>) -> TranslateError {
    TranslateError::MalformedHeader {
        line,
        message: message.into(),
    }
}

/// Turn description items into paragraphs and spliced code blocks.
///
/// Text is dedented by the indentation common to all its non-blank lines.
fn description_blocks(items: Vec<DescriptionItem>) -> Vec<Block> {
    let indent = items
        .iter()
        .filter_map(|item| match item {
            DescriptionItem::Text(text) => Some(leading_whitespace(text)),
            _ => None,
        })
        .min()
        .unwrap_or(0);

    let mut blocks = Vec::new();
    let mut paragraph = Vec::new();
    for item in items {
        match item {
            DescriptionItem::Text(text) => {
                paragraph.push(text.chars().skip(indent).collect::<String>().trim_end().to_owned());
            }
            DescriptionItem::Break => flush_paragraph(&mut paragraph, &mut blocks),
            DescriptionItem::Code(code) => {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.extend(code);
            }
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn leading_whitespace(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use mrst_storage::MockReader;
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.strip_prefix('\n')
            .unwrap_or(text)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn translate_with(
        source: &str,
        section: Option<&str>,
        reader: &dyn SourceReader,
    ) -> Result<String, TranslateError> {
        let languages = Languages::default();
        let cpp = SourceLanguage::new("c++", "//");
        Translator::new(&languages, &cpp)
            .translate(&lines(source), section, reader)
            .map(|out| out.join("\n"))
    }

    fn translate(source: &str, section: Option<&str>) -> String {
        translate_with(source, section, &MockReader::new()).unwrap()
    }

    const HYPER_MODULE: &str = r#"
// --------------------------------------------------
// Hyper Module
// ==================================================
//       This module contains hyper capabilities.
//       Watch yourself!
// -------------------------------------------------/

#include "blahblahblah"

// --------------------------------------------------
// class Beam
// --------------------------------------------------
//    The hyper beam is responsible for the madness.
// --------------------------------------------------
class Hyper {
public:
    void launch_laser();
}


// --------------------------------------------------
// Hyper adaptive_resonance(const Res & r);
// --------------------------------------------------
//    Returns a Hyper given the harmonic resonance.
// --------------------------------------------------
Hype adaptive_resonance(const Res & r);

// end-doc
"#;

    #[test]
    fn test_headers_descriptions_and_implicit_code() {
        let signature = "Hyper adaptive_resonance(const Res & r);";
        let expected = [
            "Hyper Module",
            "============",
            "",
            "This module contains hyper capabilities.",
            "Watch yourself!",
            "",
            "class Beam",
            "----------",
            "",
            "The hyper beam is responsible for the madness.",
            "",
            ".. code-block:: c++",
            "",
            "    class Hyper {",
            "    public:",
            "        void launch_laser();",
            "    }",
            "",
            signature,
            &"-".repeat(signature.len()),
            "",
            "Returns a Hyper given the harmonic resonance.",
            "",
            ".. code-block:: c++",
            "",
            "    Hype adaptive_resonance(const Res & r);",
        ]
        .join("\n");

        assert_eq!(translate(HYPER_MODULE, None), expected);
    }

    const SECTIONED: &str = r#"
// --------------------------------------------------
// Big Header
// ==================================================
//       Desc
// --------------------------------------------------

#include "blahblahblah"

// --------------------------------------------------
// section 2
// --------------------------------------------------
//    Desc 2
// -------------------------------------------------/
int hidden;
"#;

    #[test]
    fn test_section_shifts_heading_levels() {
        let expected = r#"Big Header
^^^^^^^^^^

Desc

.. code-block:: c++

    #include "blahblahblah"

section 2
'''''''''

Desc 2"#;

        assert_eq!(translate(SECTIONED, Some("~")), expected);
    }

    #[test]
    fn test_slash_ruler_never_captures_code() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//   Text
// -----------------------------/
int a;
int b;
";
        assert_eq!(translate(source, None), "Title\n-----\n\nText");
    }

    #[test]
    fn test_description_paragraphs_and_dedent() {
        let source = "
// ------------------------------
// Title
// ==============================
//     First paragraph
//       indented continuation
//
//
//     Second paragraph
// -----------------------------/
";
        assert_eq!(
            translate(source, None),
            "Title\n=====\n\nFirst paragraph\n  indented continuation\n\nSecond paragraph"
        );
    }

    // Inferred from observed output; revisit if a real source contradicts it.
    #[test]
    fn test_header_without_description_demotes_to_paragraph() {
        let source = "
// ------------------------------
// Lonely Title
// ==============================
// -----------------------------/
// ------------------------------
// Real
// ------------------------------
//   Body
// -----------------------------/
";
        assert_eq!(translate(source, None), "Lonely Title\n\nReal\n----\n\nBody");
    }

    #[test]
    fn test_blank_only_description_demotes_to_paragraph() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//
// ------------------------------
int captured;
";
        assert_eq!(
            translate(source, None),
            "Title\n\n.. code-block:: c++\n\n    int captured;"
        );
    }

    #[test]
    fn test_explicit_markers_override_implicit_capture() {
        let source = "
// ------------------------------
// Widget
// ------------------------------
//   A widget.
// ------------------------------
int not_captured;
// ~begin-doc
Widget make();

// ~end-doc
int dropped;
// ~begin-doc

void use(Widget w);
// ~end-doc
";
        assert_eq!(
            translate(source, None),
            "Widget\n------\n\nA widget.\n\n\
             .. code-block:: c++\n\n    Widget make();\n\n\
             .. code-block:: c++\n\n    void use(Widget w);"
        );
    }

    #[test]
    fn test_explicit_span_closed_by_end_of_file() {
        let source = "
int before;
// ~begin-doc
int inside;
";
        assert_eq!(
            translate(source, None),
            ".. code-block:: c++\n\n    int inside;"
        );
    }

    #[test]
    fn test_code_outside_headers_is_dropped() {
        assert_eq!(translate("int a;\n\nint b;", None), "");
    }

    #[test]
    fn test_implicit_code_stops_at_comment() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//   Text
// ------------------------------
int a;
// an ordinary comment
int b;
";
        assert_eq!(
            translate(source, None),
            "Title\n-----\n\nText\n\n.. code-block:: c++\n\n    int a;"
        );
    }

    #[test]
    fn test_see_file_splices_marker_spans() {
        let reader = MockReader::new()
            .with_file(
                "samples/demo.cpp",
                "#include \"beam.hpp\"\n// ~begin-doc\nBeam b;\nb.fire();\n// ~end-doc\nreturn 0;\n",
            );
        let source = r#"
// ------------------------------
// Beam
// ------------------------------
//   Usage:
//   ~see-file "samples/demo.cpp"
//   That is all.
// -----------------------------/
"#;
        assert_eq!(
            translate_with(source, None, &reader).unwrap(),
            "Beam\n----\n\nUsage:\n\n\
             .. code-block:: c++\n\n    Beam b;\n    b.fire();\n\n\
             That is all."
        );
    }

    #[test]
    fn test_see_file_uses_target_language() {
        let reader = MockReader::new().with_file(
            "demo.py",
            "# ~begin-doc\nprint('hi')\n# ~end-doc\n",
        );
        let source = r#"
// ------------------------------
// Script
// ------------------------------
//   ~see-file "demo.py"
// -----------------------------/
"#;
        assert_eq!(
            translate_with(source, None, &reader).unwrap(),
            "Script\n------\n\n.. code-block:: python\n\n    print('hi')"
        );
    }

    #[test]
    fn test_see_file_ignores_headers_in_target() {
        let reader = MockReader::new().with_file(
            "other.cpp",
            "// ------------------------------\n// Ignored\n",
        );
        let source = r#"
// ------------------------------
// Title
// ------------------------------
//   Text
//   ~see-file "other.cpp"
// -----------------------------/
"#;
        assert_eq!(
            translate_with(source, None, &reader).unwrap(),
            "Title\n-----\n\nText"
        );
    }

    #[test]
    fn test_see_file_missing_target_propagates() {
        let source = r#"
// ------------------------------
// Title
// ------------------------------
//   ~see-file "missing.cpp"
// -----------------------------/
"#;
        let err = translate_with(source, None, &MockReader::new()).unwrap_err();
        match err {
            TranslateError::Include { line, path, source } => {
                assert_eq!(line, 4);
                assert_eq!(path, "missing.cpp");
                assert_eq!(source.kind(), mrst_storage::StorageErrorKind::NotFound);
            }
            other => panic!("expected Include error, got {other:?}"),
        }
    }

    #[test]
    fn test_see_file_bad_arguments() {
        let source = r#"
// ------------------------------
// Title
// ------------------------------
//   ~see-file "unterminated
// -----------------------------/
"#;
        let err = translate_with(source, None, &MockReader::new()).unwrap_err();
        assert!(matches!(err, TranslateError::Directive { line: 4, .. }));
    }

    #[test]
    fn test_unterminated_header_is_error() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//   Text that never ends
";
        let err = translate_with(source, None, &MockReader::new()).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn test_missing_level_ruler_is_error() {
        let source = "
// ------------------------------
// Title
//   not a ruler
";
        let err = translate_with(source, None, &MockReader::new()).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedHeader { line: 3, .. }));
    }

    #[test]
    fn test_code_inside_description_is_error() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//   Text
int oops;
// ------------------------------
";
        let err = translate_with(source, None, &MockReader::new()).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedHeader { line: 5, .. }));
    }

    #[test]
    fn test_heading_too_deep() {
        let source = "
// ------------------------------
// Title
// ------------------------------
//   Text
// -----------------------------/
";
        let err = translate_with(source, Some("'"), &MockReader::new()).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::HeadingTooDeep { line: 1, level: 6 }
        ));
    }

    #[test]
    fn test_invalid_section() {
        let err = translate_with("", Some("*"), &MockReader::new()).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidSection(_)));
    }

    #[test]
    fn test_line_numbers_honor_starting_offset() {
        let languages = Languages::default();
        let cpp = SourceLanguage::new("c++", "//");
        let source = lines("// ------------------------------\n// Title\n");
        let err = Translator::new(&languages, &cpp)
            .starting_at(40)
            .translate(&source, None, &MockReader::new())
            .unwrap_err();
        assert!(matches!(err, TranslateError::MalformedHeader { line: 41, .. }));
    }
}
