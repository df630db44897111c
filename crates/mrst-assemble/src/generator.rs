//! reStructuredText tree generation.
//!
//! Mirrors a documentation source directory into a generated directory that a
//! site builder can consume:
//!
//! ```text
//! docs/                       <output>/gen/
//! ├── conf.py          ->     ├── conf.py
//! ├── index.rst        ->     ├── index.rst          (copied)
//! └── api/beam.mrst    ->     └── api/beam.rst       (assembled)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use mrst_storage::FsReader;

use crate::{Assembler, GenerateError};

/// Sphinx configuration copied alongside the generated sources.
const CONF_FILE: &str = "conf.py";

/// Extension of plain reStructuredText sources.
const RST_EXTENSION: &str = "rst";

/// Extension of templates.
const TEMPLATE_EXTENSION: &str = "mrst";

/// Directory layout for a generation run.
#[derive(Debug, Clone)]
pub struct Generator {
    source_dir: PathBuf,
    gen_dir: PathBuf,
    build_dir: PathBuf,
}

/// Files produced by a generation run, relative to the generated directory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Copied `.rst` files (and `conf.py`).
    pub copied: Vec<PathBuf>,
    /// `.rst` files assembled from `.mrst` templates.
    pub generated: Vec<PathBuf>,
}

impl Generator {
    /// Create a generator reading `source_dir` and writing into `gen_dir`.
    ///
    /// `build_dir` is created for the site builder but not written.
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        gen_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            gen_dir: gen_dir.into(),
            build_dir: build_dir.into(),
        }
    }

    /// Directory holding the generated sources.
    #[must_use]
    pub fn gen_dir(&self) -> &Path {
        &self.gen_dir
    }

    /// Directory reserved for the site builder.
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Recreate the generated directory from the source directory.
    ///
    /// The generated directory is removed first; the build directory is
    /// kept. Hidden files and directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem fails or a template fails to
    /// assemble.
    pub fn generate(&self, assembler: &Assembler<'_>) -> Result<GenerateReport, GenerateError> {
        if let Err(e) = fs::remove_dir_all(&self.gen_dir)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            return Err(GenerateError::io(&self.gen_dir)(e));
        }
        fs::create_dir_all(&self.gen_dir).map_err(GenerateError::io(&self.gen_dir))?;
        fs::create_dir_all(&self.build_dir).map_err(GenerateError::io(&self.build_dir))?;

        let mut report = GenerateReport::default();

        let conf = self.source_dir.join(CONF_FILE);
        if conf.is_file() {
            let target = self.gen_dir.join(CONF_FILE);
            fs::copy(&conf, &target).map_err(GenerateError::io(&conf))?;
            report.copied.push(PathBuf::from(CONF_FILE));
        } else {
            tracing::warn!(path = %conf.display(), "No conf.py in source directory");
        }

        for source in self.source_files()? {
            let Ok(relative) = source.strip_prefix(&self.source_dir) else {
                continue;
            };
            let relative = relative.to_path_buf();
            match source.extension().and_then(|e| e.to_str()) {
                Some(RST_EXTENSION) => {
                    let target = self.prepare_target(&relative)?;
                    fs::copy(&source, &target).map_err(GenerateError::io(&source))?;
                    tracing::info!(file = %relative.display(), "Copied");
                    report.copied.push(relative);
                }
                Some(TEMPLATE_EXTENSION) => {
                    let output = relative.with_extension(RST_EXTENSION);
                    self.assemble_template(assembler, &source, &output)?;
                    tracing::info!(file = %output.display(), "Generated");
                    report.generated.push(output);
                }
                _ => {}
            }
        }

        Ok(report)
    }

    /// Every non-hidden file below the source directory, sorted.
    fn source_files(&self) -> Result<Vec<PathBuf>, GenerateError> {
        let root = Pattern::escape(&self.source_dir.to_string_lossy());
        let pattern = format!("{root}/**/*");
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)
            .map_err(|e| GenerateError::Walk(e.to_string()))?
        {
            let path = entry.map_err(|e| GenerateError::Walk(e.to_string()))?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn assemble_template(
        &self,
        assembler: &Assembler<'_>,
        source: &Path,
        output: &Path,
    ) -> Result<(), GenerateError> {
        let assemble_error = |err| GenerateError::Assemble {
            path: source.to_path_buf(),
            source: err,
        };

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reader = FsReader::for_file(source);
        let lines = assembler.assemble(&name, &reader).map_err(assemble_error)?;

        let target = self.prepare_target(output)?;
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&target, content).map_err(GenerateError::io(&target))
    }

    /// Absolute target path for `relative`, with parent directories created.
    fn prepare_target(&self, relative: &Path) -> Result<PathBuf, GenerateError> {
        let target = self.gen_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(GenerateError::io(parent))?;
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use mrst_translate::Languages;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ConvertError, IncludeResolver, MarkdownConverter};

    struct NoMarkdown;

    impl MarkdownConverter for NoMarkdown {
        fn convert(&self, _lines: &[String]) -> Result<Vec<String>, ConvertError> {
            Ok(Vec::new())
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn generate(source: &Path, output: &Path) -> Result<GenerateReport, GenerateError> {
        let languages = Languages::default();
        let assembler = Assembler::new(IncludeResolver::new(&languages, &NoMarkdown));
        Generator::new(source, output.join("gen"), output.join("build")).generate(&assembler)
    }

    #[test]
    fn test_generate_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let output = dir.path().join("out");
        write(&source, "conf.py", "project = 'demo'\n");
        write(&source, "index.rst", "Demo\n====\n");
        write(&source, "api/beam.mrst", "API\n~dumpfile \"../../src/beam.txt\" 0 ~ 2\n");
        write(dir.path(), "src/beam.txt", "fire()\n");
        write(&source, "notes.txt", "ignored\n");

        let report = generate(&source, &output).unwrap();

        assert_eq!(
            report.copied,
            vec![PathBuf::from("conf.py"), PathBuf::from("index.rst")]
        );
        assert_eq!(report.generated, vec![PathBuf::from("api/beam.rst")]);
        assert_eq!(
            fs::read_to_string(output.join("gen/api/beam.rst")).unwrap(),
            "API\n  fire()\n"
        );
        assert_eq!(
            fs::read_to_string(output.join("gen/index.rst")).unwrap(),
            "Demo\n====\n"
        );
        assert!(!output.join("gen/notes.txt").exists());
        assert!(output.join("build").is_dir());
    }

    #[test]
    fn test_generate_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        let output = dir.path().join("out");
        write(&source, "index.rst", "Demo\n");
        write(&output, "gen/stale.rst", "old\n");
        write(&output, "build/keep.html", "<html/>\n");

        let report = generate(&source, &output).unwrap();

        assert_eq!(report.copied, vec![PathBuf::from("index.rst")]);
        assert!(!output.join("gen/stale.rst").exists());
        assert!(output.join("build/keep.html").exists());
    }

    #[test]
    fn test_generate_skips_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        write(&source, ".hidden.rst", "x\n");
        write(&source, ".cache/page.rst", "x\n");

        let report = generate(&source, &dir.path().join("out")).unwrap();

        assert!(report.copied.is_empty());
    }

    #[test]
    fn test_generate_template_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("docs");
        write(&source, "broken.mrst", "~dumpfile \"missing.txt\"\n");

        let err = generate(&source, &dir.path().join("out")).unwrap_err();

        match err {
            GenerateError::Assemble { path, .. } => assert_eq!(path, source.join("broken.mrst")),
            other => panic!("expected Assemble error, got {other:?}"),
        }
    }
}
