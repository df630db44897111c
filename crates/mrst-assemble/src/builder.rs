//! Site building with `sphinx-build`.

use std::process::Command;

use crate::{Assembler, BuildError, GenerateReport, Generator};

/// Runs the generator and then the site builder.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    program: String,
    builder: String,
}

impl SiteBuilder {
    /// Create a site builder running `program -b <builder>`.
    #[must_use]
    pub fn new(program: impl Into<String>, builder: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            builder: builder.into(),
        }
    }

    /// Generate the sources, then build the site into the build directory.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or the builder exits unsuccessfully.
    pub fn build(
        &self,
        generator: &Generator,
        assembler: &Assembler<'_>,
    ) -> Result<GenerateReport, BuildError> {
        let report = generator.generate(assembler)?;

        tracing::info!(
            program = %self.program,
            builder = %self.builder,
            "Building site"
        );
        let result = Command::new(&self.program)
            .arg("-b")
            .arg(&self.builder)
            .arg(generator.gen_dir())
            .arg(generator.build_dir())
            .output()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(BuildError::Failed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        Ok(report)
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new("sphinx-build", "html")
    }
}

#[cfg(test)]
mod tests {
    use mrst_translate::Languages;

    use super::*;
    use crate::{IncludeResolver, PandocConverter};

    fn run(program: &str) -> (tempfile::TempDir, Result<GenerateReport, BuildError>) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("index.rst"), "Index\n").unwrap();

        let languages = Languages::default();
        let converter = PandocConverter::default();
        let assembler = Assembler::new(IncludeResolver::new(&languages, &converter));
        let generator = Generator::new(&source, dir.path().join("gen"), dir.path().join("build"));

        let result = SiteBuilder::new(program, "html").build(&generator, &assembler);
        (dir, result)
    }

    #[test]
    fn test_missing_builder_is_spawn_error() {
        let (dir, result) = run("mrst-test-no-such-sphinx");
        assert!(matches!(result, Err(BuildError::Spawn { .. })));
        assert!(dir.path().join("gen/index.rst").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_builder_returns_report() {
        let (_dir, result) = run("true");
        let report = result.unwrap();
        assert_eq!(report.copied, vec![std::path::PathBuf::from("index.rst")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_builder() {
        let (_dir, result) = run("false");
        assert!(matches!(result, Err(BuildError::Failed { .. })));
    }
}
