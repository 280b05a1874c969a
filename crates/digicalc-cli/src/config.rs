//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the
//! [`SessionOptions`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DIGICALC_<SECTION>__<KEY>`, e.g.
//!    `DIGICALC_DISPLAY__RESULT_FORMAT=compact` (a `.env` file is honoured)
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use digicalc_core::{
    application::{DEFAULT_ERROR_MARKER, SessionOptions},
    domain::{EraseBehavior, ResultFormat},
};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DIGICALC";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What the result field shows.
    pub display: DisplayConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Keypad behaviour.
    pub keypad: KeypadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Shown in place of a result when evaluation fails.
    pub error_marker: String,
    pub result_format: ResultFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            error_marker: DEFAULT_ERROR_MARKER.into(),
            result_format: ResultFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypadConfig {
    pub erase: EraseBehavior,
    /// Key-map file for `digicalc pad`.
    pub keymap: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.digicalc.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "digicalc", "digicalc")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".digicalc.toml"))
    }

    /// The file actually consulted for this run.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Session knobs for the core.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            erase: self.keypad.erase,
            result_format: self.display.result_format,
            error_marker: self.display.error_marker.clone(),
        }
    }
}
