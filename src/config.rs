//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mutxml/mutxml.toml`
//! 3. Explicit config file passed to [`Settings::load`]
//! 4. Environment variables: `MUTXML_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::expand_env_vars;
use crate::infrastructure::{InfraError, InfraResult};

/// Output settings for rendering documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory that relative output filenames are resolved against (default: cwd at load time)
    pub output_dir: PathBuf,
    /// Spaces per nesting level
    pub indent: usize,
    /// Emit the `<?xml ...?>` declaration line
    pub xml_declaration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let output_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            output_dir,
            indent: 2,
            xml_declaration: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub indent: Option<usize>,
    pub xml_declaration: Option<bool>,
}

/// Get the XDG config directory for mutxml.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mutxml").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mutxml.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> InfraResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| InfraError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| InfraError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> InfraError {
    InfraError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Settings rooted at `output_dir`, everything else default.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Overlay values that are specified in `raw`.
    fn merge_with(&self, raw: &RawSettings) -> Self {
        Self {
            output_dir: raw
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            indent: raw.indent.unwrap_or(self.indent),
            xml_declaration: raw.xml_declaration.unwrap_or(self.xml_declaration),
        }
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output_dir.to_string_lossy().as_ref());
        self.output_dir = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional TOML file layered above the global config.
    ///   A missing file is an error, since the caller asked for it explicitly.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> InfraResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply MUTXML_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> InfraResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MUTXML")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        // Set but unparseable typed values are errors.
        if config.get_string("indent").is_ok() {
            let val = config.get_int("indent").map_err(config_err)?;
            settings.indent = usize::try_from(val).map_err(|_| InfraError::Config {
                message: format!("indent must not be negative: {}", val),
            })?;
        }
        if config.get_string("xml_declaration").is_ok() {
            settings.xml_declaration = config.get_bool("xml_declaration").map_err(config_err)?;
        }

        Ok(settings)
    }

    /// Resolve `filename` against `output_dir`. Absolute filenames are returned unchanged.
    pub fn resolve_output(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(filename)
    }
}
