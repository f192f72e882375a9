use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Not logged in or session expired. Run 'tickets login' first")]
    NotAuthenticated,

    #[error("Login failed: the server rejected the email or password")]
    LoginFailed,

    #[error("Sign-up rejected: the email may already be registered or the details are invalid")]
    SignUpRejected,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No server URL found. Set TICKETS_BASE_URL, pass --base-url, or add base_url to ~/.config/tickets/config.toml"
    )]
    MissingBaseUrl,

    #[error("No user id given and no user_id in config")]
    NoUser,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, TicketError>;
