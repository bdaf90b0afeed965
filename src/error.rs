use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{service} responded with {status}: {body}")]
    UpstreamError {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Store error: {0}")]
    StoreError(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;
