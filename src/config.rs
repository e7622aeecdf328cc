//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/parhuff/parhuff.toml`
//! 3. Explicit config file (`--config <PATH>`)
//! 4. Environment variables: `PARHUFF_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::AggregationStrategy;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};

/// Unified configuration for parhuff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Worker count; `None` means ask on stdin
    pub workers: Option<usize>,
    /// Suppress code table and status output
    pub quiet: bool,
    /// How workers combine their counts
    pub strategy: AggregationStrategy,
}

/// Get the XDG config directory for parhuff.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "parhuff").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("parhuff.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings from the global config file, an optional explicit file
    /// and `PARHUFF_*` environment variables.
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load with an explicit global path (`None` skips the global layer).
    ///
    /// A missing global file is ignored; a missing explicit file is an error.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_layers(global, explicit, None)
    }

    /// Like [`Settings::load_from`], with `vars` read in place of the
    /// process environment.
    pub fn load_with_env(
        global: Option<&Path>,
        explicit: Option<&Path>,
        vars: Map<String, String>,
    ) -> ApplicationResult<Self> {
        Self::load_layers(global, explicit, Some(vars))
    }

    fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> ApplicationResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = global {
            debug!("load: global config {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        if let Some(path) = explicit {
            debug!("load: explicit config {}", path.display());
            let content =
                std::fs::read_to_string(path).with_path_context("read config", path)?;
            builder = builder.add_source(File::from_str(&content, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("PARHUFF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        let settings: Self = builder
            .build()
            .map_err(config_err)?
            .try_deserialize()
            .map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that can never run.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.workers == Some(0) {
            return Err(ApplicationError::Config {
                message: "workers must be a positive integer".into(),
            });
        }
        Ok(())
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
