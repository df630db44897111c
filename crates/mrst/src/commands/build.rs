//! `mrst build` command implementation.

use clap::Args;
use mrst_assemble::{Assembler, IncludeResolver, SiteBuilder};

use super::{CommonArgs, DirArgs, converter, generator, languages, load_config, print_report};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    dirs: DirArgs,

    /// Sphinx builder name (overrides config).
    #[arg(short, long)]
    builder: Option<String>,
}

impl BuildArgs {
    /// Execute the build command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(&self.common, Some(&self.dirs))?;
        let generator = generator(&config)?;

        let builder_name = self.builder.unwrap_or_else(|| config.sphinx.builder.clone());
        if builder_name.trim().is_empty() {
            return Err(CliError::Validation("--builder cannot be empty".to_owned()));
        }

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", generator.build_dir().display()));

        let languages = languages(&config);
        let converter = converter(&config);
        let assembler = Assembler::new(IncludeResolver::new(&languages, &converter));
        let site = SiteBuilder::new(config.sphinx.program.clone(), builder_name);

        let report = site.build(&generator, &assembler)?;

        print_report(&output, &report);
        output.success(&format!(
            "Site built successfully to {}",
            generator.build_dir().display()
        ));
        Ok(())
    }
}
