use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SignError>;
