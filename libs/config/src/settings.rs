//! Settings Loader
//!
//! Loads precision and repeg settings for the pricing core.
//! Supports loading from TOML files with environment-specific overrides.

use crate::{PrecisionConfig, RepegConfig};
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the base settings file
pub const DEFAULT_SETTINGS_PATH: &str = "config/vamm.toml";

/// Directory holding `<environment>.toml` override files
pub const ENVIRONMENTS_DIR: &str = "config/environments";

/// Top-level settings for the pricing core
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VammSettings {
    /// Numeric scales
    pub precision: PrecisionConfig,

    /// Repeg budget policy
    pub repeg: RepegConfig,
}

impl VammSettings {
    /// Load settings from files with environment overrides
    ///
    /// Sources are layered in order: the base file (optional unless a path
    /// is given explicitly), `config/environments/<env>.toml`, then
    /// `VAMM__SECTION__KEY` environment variables.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let (base, required) = match base_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_PATH), false),
        };

        debug!("Loading settings from {:?} (required: {})", base, required);
        let mut builder = Config::builder().add_source(File::from(base).required(required));

        if let Some(env) = environment {
            let env_file = PathBuf::from(ENVIRONMENTS_DIR).join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment settings: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment settings not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("VAMM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build settings")?;

        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.precision
            .validate()
            .context("Invalid precision settings")?;
        self.repeg.validate().context("Invalid repeg settings")?;
        Ok(())
    }
}

/// Convenience function to load settings with defaults
pub fn load_settings(path: Option<&Path>) -> Result<VammSettings> {
    VammSettings::load(path, None)
}
