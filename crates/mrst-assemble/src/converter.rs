//! Markdown to reStructuredText conversion.

use std::process::Command;

use crate::ConvertError;

/// Converts Markdown lines into reStructuredText lines.
pub trait MarkdownConverter {
    /// Convert `lines` of Markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion cannot be performed.
    fn convert(&self, lines: &[String]) -> Result<Vec<String>, ConvertError>;
}

/// Converter that shells out to `pandoc`.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
}

impl PandocConverter {
    /// Create a converter running `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::new("pandoc")
    }
}

impl MarkdownConverter for PandocConverter {
    fn convert(&self, lines: &[String]) -> Result<Vec<String>, ConvertError> {
        let scratch = tempfile::tempdir()?;
        let input = scratch.path().join("input.md");
        let output = scratch.path().join("output.rst");

        let mut markdown = lines.join("\n");
        markdown.push('\n');
        std::fs::write(&input, markdown)?;

        tracing::debug!(program = %self.program, lines = lines.len(), "Converting markdown");
        let result = Command::new(&self.program)
            .arg(&input)
            .args(["--from", "markdown", "--to", "rst", "-s", "-o"])
            .arg(&output)
            .arg("--wrap=none")
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        let rst = std::fs::read_to_string(&output)?;
        Ok(rst.lines().map(|line| line.trim_end().to_owned()).collect())
    }
}
