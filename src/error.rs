//! Custom error types for autocommit-bot.
//!
//! Every fallible operation returns [`Result`], and errors propagate to a
//! single handler in `main` which reports them and sets the exit status.

use thiserror::Error;

/// Main error type for autocommit-bot operations.
#[derive(Error, Debug)]
pub enum AutocommitError {
    // Configuration errors
    #[error(
        "no GitHub token found: set GITHUB_TOKEN or create {token_file}"
    )]
    MissingToken { token_file: String },

    #[error("Invalid iteration count '{0}': must be a positive integer")]
    InvalidIterations(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Repository '{0}' not found with the current token")]
    RepositoryNotFound(String),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("{context} failed ({status}): {body}")]
    Api {
        context: String,
        status: u16,
        body: String,
    },

    #[error("API rate limit exceeded ({status}): {body}")]
    RateLimited { status: u16, body: String },

    // Parsing errors
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Prompt failed: {0}")]
    PromptError(#[from] inquire::InquireError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using AutocommitError
pub type Result<T> = std::result::Result<T, AutocommitError>;

impl AutocommitError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an error for a non-success API response. Rate limit responses
    /// get their own variant so they can be told apart in the report.
    pub fn api(context: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status == 429
            || (status == 403 && body.to_lowercase().contains("rate limit"))
        {
            return Self::RateLimited { status, body };
        }
        Self::Api {
            context: context.into(),
            status,
            body,
        }
    }

    /// Create an unexpected response error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }
}

// Implement From for reqwest errors. Only transport failures reach here:
// status codes are returned to callers rather than raised.
impl From<reqwest::Error> for AutocommitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UnexpectedResponse(err.to_string())
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for AutocommitError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidConfig(format!("Invalid header value: {}", err))
    }
}
