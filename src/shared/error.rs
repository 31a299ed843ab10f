use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TrackerError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        TrackerError::InvalidOperation(message.into())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
