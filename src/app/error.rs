use thiserror::Error;

/// Message shown in place of the topic list when the feed cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load data. Please run the backend pipeline first.";

#[derive(Error, Debug)]
pub enum TrendAlertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Theme preference error: {0}")]
    Theme(String),

    #[error("{0}")]
    Other(String),
}

impl TrendAlertError {
    /// Whether this error belongs to the feed-loading family (transport,
    /// status, or body shape). All of them surface as the same error view.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            TrendAlertError::Http(_)
                | TrendAlertError::Status { .. }
                | TrendAlertError::FeedParse(_)
                | TrendAlertError::InvalidUrl(_)
                | TrendAlertError::Io(_)
        )
    }
}

impl From<serde_json::Error> for TrendAlertError {
    fn from(e: serde_json::Error) -> Self {
        TrendAlertError::FeedParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrendAlertError>;
