use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaproomError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Brewery not found: {0}")]
    NotFound(String),

    #[error("Page appended before the result list was reset")]
    InvalidSequence,

    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl TaproomError {
    /// True for failures of a remote fetch: transport errors, non-success
    /// statuses and bodies that don't match the expected shape.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::HttpStatus { .. } | Self::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TaproomError>;
