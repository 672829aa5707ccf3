use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown feed category: {0}")]
    UnknownCategory(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Feed unavailable after {attempts} attempts: {url} ({message})")]
    FeedUnavailable {
        url: String,
        attempts: u32,
        message: String,
    },

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("Keyword source unavailable: {0}")]
    KeywordSource(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type NewsResult<T> = Result<T, NewsError>;
