//! Configuration management for mrst.
//!
//! Parses `mrst.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `pandoc.program`
//! - `sphinx.program`
//! - `sphinx.builder`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override template source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mrst.toml";

/// Default line-comment prefix for configured languages.
const DEFAULT_COMMENT: &str = "//";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Markdown converter configuration.
    pub pandoc: PandocConfig,
    /// Site builder configuration.
    pub sphinx: SphinxConfig,
    /// Extra source languages keyed by file extension.
    pub languages: BTreeMap<String, LanguageConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding `.rst`, `.mrst` and `conf.py`.
    pub source_dir: PathBuf,
    /// Directory receiving `gen/` and `build/`.
    pub output_dir: PathBuf,
}

impl DocsConfig {
    /// Generated reStructuredText tree (`<output>/gen`).
    #[must_use]
    pub fn gen_dir(&self) -> PathBuf {
        self.output_dir.join("gen")
    }

    /// Site builder output (`<output>/build`).
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.output_dir.join("build")
    }
}

/// Markdown converter configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PandocConfig {
    /// Converter executable.
    pub program: String,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_owned(),
        }
    }
}

/// Site builder configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SphinxConfig {
    /// Builder executable.
    pub program: String,
    /// Builder name passed as `-b`.
    pub builder: String,
}

impl Default for SphinxConfig {
    fn default() -> Self {
        Self {
            program: "sphinx-build".to_owned(),
            builder: "html".to_owned(),
        }
    }
}

/// Source language registered for an extension.
///
/// Either a bare code-block name (`ipp = "c++"`, `//` comments) or a table
/// with `code_block` and `comment`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LanguageConfig {
    /// Code-block name only.
    Name(String),
    /// Code-block name and comment prefix.
    Detailed {
        /// Language name for `.. code-block::`.
        code_block: String,
        /// Line-comment prefix.
        #[serde(default = "default_comment")]
        comment: String,
    },
}

impl LanguageConfig {
    /// Language name for `.. code-block::`.
    #[must_use]
    pub fn code_block(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { code_block, .. } => code_block,
        }
    }

    /// Line-comment prefix.
    #[must_use]
    pub fn comment(&self) -> &str {
        match self {
            Self::Name(_) => DEFAULT_COMMENT,
            Self::Detailed { comment, .. } => comment,
        }
    }
}

fn default_comment() -> String {
    DEFAULT_COMMENT.to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pandoc.program`").
        field: String,
        /// Error message (e.g., "${`PANDOC`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mrst.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            pandoc: PandocConfig::default(),
            sphinx: SphinxConfig::default(),
            languages: BTreeMap::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("_build"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.pandoc.program, "pandoc.program")?;
        require_non_empty(&self.sphinx.program, "sphinx.program")?;
        require_non_empty(&self.sphinx.builder, "sphinx.builder")?;
        self.validate_languages()
    }

    fn validate_languages(&self) -> Result<(), ConfigError> {
        for (extension, language) in &self.languages {
            let field = format!("languages.{extension}");
            require_non_empty(extension.trim_start_matches('.'), "languages key")?;
            require_non_empty(language.code_block(), &field)?;
            require_non_empty(language.comment(), &format!("{field}.comment"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.pandoc.program = expand::expand_env(&self.pandoc.program, "pandoc.program")?;
        self.sphinx.program = expand::expand_env(&self.sphinx.program, "sphinx.program")?;
        self.sphinx.builder = expand::expand_env(&self.sphinx.builder, "sphinx.builder")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "_build"),
        };
    }
}
