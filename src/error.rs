use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvfigError {
    #[error("Missing required keys: {}", .0.join(", "))]
    MissingRequiredKeys(Vec<String>),

    #[error("Invalid environment file: {0}")]
    InvalidEnvironment(String),

    #[error("Environment initialization failed: {underlying}")]
    InitializationFailed {
        #[source]
        underlying: Box<EnvfigError>,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not resolve root directory: {0}")]
    RootUnavailable(String),

    #[error("App name is required for the platform root; call .app_name() on the builder")]
    AppNameRequired,
}

impl EnvfigError {
    /// Wrap `self` as the cause of an [`InitializationFailed`](Self::InitializationFailed).
    pub fn into_initialization_failure(self) -> Self {
        EnvfigError::InitializationFailed {
            underlying: Box::new(self),
        }
    }

    /// The keys reported missing, looking through one level of wrapping.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            EnvfigError::MissingRequiredKeys(keys) => Some(keys),
            EnvfigError::InitializationFailed { underlying } => underlying.missing_keys(),
            _ => None,
        }
    }
}
