//! Template assembly.

use std::io::Write;

use mrst_directive::{DumpfileArgs, match_dumpfile};
use mrst_storage::SourceReader;

use crate::{AssembleError, IncludeResolver};

/// Expands `~dumpfile` directives in `.mrst` templates.
///
/// Lines that are not directives pass through unchanged. The assembler only
/// processes the template it is given; nesting happens inside the resolver
/// and translator.
#[derive(Clone, Copy)]
pub struct Assembler<'a> {
    resolver: IncludeResolver<'a>,
}

impl<'a> Assembler<'a> {
    /// Create an assembler that resolves directives with `resolver`.
    #[must_use]
    pub fn new(resolver: IncludeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Read `template` through `reader` and assemble it.
    ///
    /// Directive paths are resolved relative to the template's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be read or any directive fails.
    pub fn assemble(
        &self,
        template: &str,
        reader: &dyn SourceReader,
    ) -> Result<Vec<String>, AssembleError> {
        let file = reader.read(template).map_err(AssembleError::Template)?;
        self.assemble_lines(&file.lines, file.reader.as_ref())
    }

    /// Assemble already-read template lines.
    ///
    /// `reader` must resolve paths relative to the template's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any directive fails.
    pub fn assemble_lines(
        &self,
        lines: &[String],
        reader: &dyn SourceReader,
    ) -> Result<Vec<String>, AssembleError> {
        let mut output = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let Some(raw_args) = match_dumpfile(line) else {
                output.push(line.clone());
                continue;
            };

            let line_number = index + 1;
            let args = DumpfileArgs::parse(raw_args).map_err(|source| {
                AssembleError::Directive {
                    line: line_number,
                    source,
                }
            })?;
            let included = self.resolver.resolve(&args, reader).map_err(|source| {
                AssembleError::Include {
                    line: line_number,
                    path: args.input_file.clone(),
                    source,
                }
            })?;
            output.extend(included);
        }

        Ok(output)
    }

    /// Assemble `template` and write it to `writer`, one line per row.
    ///
    /// # Errors
    ///
    /// Returns an error if assembly fails or the writer fails.
    pub fn render_to(
        &self,
        template: &str,
        reader: &dyn SourceReader,
        writer: &mut dyn Write,
    ) -> Result<(), AssembleError> {
        for line in self.assemble(template, reader)? {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
