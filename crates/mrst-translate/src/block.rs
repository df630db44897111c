//! Output blocks and their reStructuredText rendering.

use unicode_width::UnicodeWidthStr;

/// Columns code lines are indented by under a `code-block` directive.
const CODE_INDENT: &str = "    ";

/// A unit of translated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    /// Title underlined with a ladder character.
    Heading { title: String, underline: char },
    /// Lines of literal text.
    Paragraph(Vec<String>),
    /// Source lines rendered under a `code-block` directive.
    Code { language: String, lines: Vec<String> },
}

impl Block {
    /// Build a code block, trimming leading and trailing blank lines.
    ///
    /// Returns `None` when nothing but blank lines remain.
    pub(crate) fn code(language: &str, lines: Vec<String>) -> Option<Self> {
        let first = lines.iter().position(|l| !l.trim().is_empty())?;
        let last = lines.iter().rposition(|l| !l.trim().is_empty())?;
        Some(Self::Code {
            language: language.to_owned(),
            lines: lines[first..=last].to_vec(),
        })
    }

    fn render_into(&self, out: &mut Vec<String>) {
        match self {
            Self::Heading { title, underline } => {
                out.push(title.clone());
                // Wide characters take two columns, combining marks none.
                out.push(underline.to_string().repeat(title.width()));
            }
            Self::Paragraph(lines) => out.extend(lines.iter().cloned()),
            Self::Code { language, lines } => {
                out.push(format!(".. code-block:: {language}"));
                out.push(String::new());
                for line in lines {
                    let line = line.trim_end();
                    if line.is_empty() {
                        out.push(String::new());
                    } else {
                        out.push(format!("{CODE_INDENT}{line}"));
                    }
                }
            }
        }
    }
}

/// Render blocks separated by exactly one blank line.
pub(crate) fn render(blocks: &[Block]) -> Vec<String> {
    let mut out = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            out.push(String::new());
        }
        block.render_into(&mut out);
    }
    out
}
