use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

pub type Result<T> = std::result::Result<T, BuildError>;
