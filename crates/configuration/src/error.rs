use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `BOTWATCH__*` override could not be read or deserialized.
    #[error("Failed to load botwatch configuration from '{}': {source}", path.display())]
    LoadError {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    /// A value parsed but is outside what the application can run with.
    #[error("Invalid botwatch configuration: {0}")]
    ValidationError(String),
}
