//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod hold;
pub mod logging;
pub mod venue;

use serde::{Deserialize, Serialize};

use self::hold::HoldConfig;
use self::logging::LoggingConfig;
use self::venue::VenueConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay). Every
/// section has full defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Venue capacity settings.
    #[serde(default)]
    pub venue: VenueConfig,
    /// Hold lifetime and sweep settings.
    #[serde(default)]
    pub hold: HoldConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BOXOFFICE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BOXOFFICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(env, "configuration loaded");
        Ok(config)
    }
}
