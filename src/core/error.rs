use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl FieldError {
    pub fn config(message: impl Into<String>) -> Self {
        FieldError::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
