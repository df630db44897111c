//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod generate;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use mrst_assemble::{GenerateReport, Generator, PandocConverter};
use mrst_config::{CliSettings, Config};
use mrst_translate::{Languages, SourceLanguage};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use generate::GenerateArgs;
pub(crate) use render::RenderArgs;

/// Options shared by every command.
#[derive(Args, Debug)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover mrst.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log progress at info level (otherwise RUST_LOG applies).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Source and output directory overrides.
#[derive(Args, Debug)]
pub(crate) struct DirArgs {
    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output directory receiving gen/ and build/ (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl DirArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source.clone(),
            output_dir: self.output.clone(),
        }
    }
}

/// Load configuration with optional directory overrides.
fn load_config(common: &CommonArgs, dirs: Option<&DirArgs>) -> Result<Config, CliError> {
    let settings = dirs.map(DirArgs::cli_settings);
    Ok(Config::load(common.config.as_deref(), settings.as_ref())?)
}

/// Built-in languages with the configured ones merged over them.
fn languages(config: &Config) -> Languages {
    let mut languages = Languages::default();
    for (extension, language) in &config.languages {
        languages.insert(
            extension,
            SourceLanguage::new(language.code_block(), language.comment()),
        );
    }
    languages
}

fn converter(config: &Config) -> PandocConverter {
    PandocConverter::new(config.pandoc.program.clone())
}

fn generator(config: &Config) -> Result<Generator, CliError> {
    let docs = &config.docs_resolved;
    if !docs.source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            docs.source_dir.display()
        )));
    }
    Ok(Generator::new(
        docs.source_dir.clone(),
        docs.gen_dir(),
        docs.build_dir(),
    ))
}

fn print_report(output: &Output, report: &GenerateReport) {
    output.info(&format!(
        "Copied {} file(s), generated {} file(s)",
        report.copied.len(),
        report.generated.len()
    ));
    if report.generated.is_empty() {
        output.warning("No .mrst templates found");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_languages_merge_config_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mrst.toml");
        std::fs::write(
            &path,
            "[languages]\nh = \"c++\"\ncmake = { code_block = \"cmake\", comment = \"#\" }\n",
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let languages = languages(&config);

        assert_eq!(languages.get("h").unwrap().code_block, "c++");
        assert_eq!(languages.get("cmake").unwrap().comment, "#");
        assert_eq!(languages.get("rs").unwrap().code_block, "rust");
    }

    #[test]
    fn test_generator_requires_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let common = CommonArgs {
            config: None,
            verbose: false,
        };
        let dirs = DirArgs {
            source: Some(dir.path().join("missing")),
            output: Some(dir.path().join("out")),
        };
        let config = load_config(&common, Some(&dirs)).unwrap();

        let err = generator(&config).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(config.docs_resolved.gen_dir(), dir.path().join("out/gen"));
        assert!(!dir.path().join("out").exists());
    }
}
