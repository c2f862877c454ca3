use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the calendar pipeline
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Transformation error: {0}")]
    #[diagnostic(code(clubcal::transform))]
    Transform(String),

    #[error("Schedule provider error: {0}")]
    #[diagnostic(code(clubcal::provider))]
    Provider(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(clubcal::config))]
    Config(String),

    #[error("Data source error: {0}")]
    #[diagnostic(code(clubcal::datasource))]
    DataSource(String),

    #[error(transparent)]
    #[diagnostic(code(clubcal::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(clubcal::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(clubcal::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create transformation errors
pub fn transform_error(message: &str) -> Error {
    Error::Transform(message.to_string())
}

/// Helper to create provider errors
pub fn provider_error(message: &str) -> Error {
    Error::Provider(message.to_string())
}

/// Helper to create data source errors
pub fn datasource_error(message: &str) -> Error {
    Error::DataSource(message.to_string())
}
