//! `mrst generate` command implementation.

use clap::Args;
use mrst_assemble::{Assembler, IncludeResolver};

use super::{CommonArgs, DirArgs, converter, generator, languages, load_config, print_report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    dirs: DirArgs,
}

impl GenerateArgs {
    /// Execute the generate command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(&self.common, Some(&self.dirs))?;
        let generator = generator(&config)?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", generator.gen_dir().display()));

        let languages = languages(&config);
        let converter = converter(&config);
        let assembler = Assembler::new(IncludeResolver::new(&languages, &converter));

        let report = generator.generate(&assembler)?;

        print_report(&output, &report);
        output.success(&format!(
            "Sources generated in {}",
            generator.gen_dir().display()
        ));
        Ok(())
    }
}
