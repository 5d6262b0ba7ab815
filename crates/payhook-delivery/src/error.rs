use payhook_signing::SignError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Invalid webhook URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("Failed to sign payload: {0}")]
    Signing(#[from] SignError),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
