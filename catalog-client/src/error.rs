use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} responded with status: {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] fancy_regex::Error),
    #[error("Empty {0}")]
    EmptyQuery(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// HTTP status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            CatalogError::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
