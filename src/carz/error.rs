use thiserror::Error;

/// The one message shown for any rejected car form.
pub const VALIDATION_MESSAGE: &str = "Please fill all required fields correctly.";

#[derive(Error, Debug)]
pub enum CarzError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not persist {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CarzError {
    pub fn validation() -> Self {
        CarzError::Validation(VALIDATION_MESSAGE.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CarzError>;
