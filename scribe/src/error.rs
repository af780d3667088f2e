use std::path::PathBuf;

/// All errors that can occur in scribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("OPENAI_API_KEY not found in environment variables or .env file")]
    MissingApiKey,

    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
