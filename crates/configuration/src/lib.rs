use crate::error::ConfigError;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Config, LoggingSettings, ServerSettings, StoreSettings};

/// Prefix for environment overrides, e.g. `BOTWATCH__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "BOTWATCH";

/// Loads the application configuration.
///
/// Reads the TOML file at `path` if it exists, then applies `BOTWATCH__SECTION__KEY`
/// environment overrides, deserializes into our strongly-typed `Config` struct and
/// validates it. Anything left unset keeps its default.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|source| load_error(path, source))?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder
        .try_deserialize::<Config>()
        .map_err(|source| load_error(path, source))?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

fn load_error(path: &Path, source: config::ConfigError) -> ConfigError {
    ConfigError::LoadError {
        path: path.to_path_buf(),
        source,
    }
}

/// Checks the values serde cannot reject on its own.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }
    if config.server.body_limit_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "server.body_limit_bytes must be non-zero".to_string(),
        ));
    }
    if config.store.snapshot_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "store.snapshot_path must not be empty".to_string(),
        ));
    }
    EnvFilter::try_new(&config.logging.level).map_err(|e| {
        ConfigError::ValidationError(format!(
            "logging.level '{}' is not a valid filter: {}",
            config.logging.level, e
        ))
    })?;
    Ok(())
}
