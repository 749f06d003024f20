use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    // Source errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed too large: {0} bytes")]
    FeedTooLarge(u64),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
