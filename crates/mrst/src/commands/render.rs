//! `mrst render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mrst_assemble::{Assembler, IncludeResolver};
use mrst_storage::FsReader;

use super::{CommonArgs, converter, languages, load_config};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Template to assemble.
    template: PathBuf,

    /// Write to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = load_config(&self.common, None)?;
        let languages = languages(&config);
        let converter = converter(&config);
        let assembler = Assembler::new(IncludeResolver::new(&languages, &converter));

        let name = self
            .template
            .file_name()
            .ok_or_else(|| {
                CliError::Validation(format!("Not a file: {}", self.template.display()))
            })?
            .to_string_lossy()
            .into_owned();
        let reader = FsReader::for_file(&self.template);

        // Nothing is written until the whole template has assembled.
        let mut rendered = Vec::new();
        assembler.render_to(&name, &reader, &mut rendered)?;
        match &self.output {
            Some(path) => std::fs::write(path, &rendered)?,
            None => std::io::stdout().lock().write_all(&rendered)?,
        }

        tracing::info!(template = %self.template.display(), "Rendered");
        Ok(())
    }
}
