use reqwest::StatusCode;
use serde_json::error::Category;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = core::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Response from endpoint isn't an HTTP response")]
    UnknownUrlResponse,

    #[error("Network connection issue, please check your network connection ({0})")]
    Network(#[source] BoxError),

    #[error("Request error (response code: {0})")]
    Request(StatusCode),

    #[error("Server error (response code: {0})")]
    Server(StatusCode),

    #[error("Decoding error ({0})")]
    Decoding(#[source] serde_json::Error),

    #[error("Unhandled error")]
    Unhandled,

    #[error("Request could not be constructed: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Classifies an HTTP status. Success codes yield `None`.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status.as_u16() {
            200..=299 => None,
            400..=499 => Some(Self::Request(status)),
            500..=599 => Some(Self::Server(status)),
            _ => Some(Self::Unhandled),
        }
    }

    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Data | Category::Eof => Self::Decoding(err),
            Category::Io => Self::Unhandled,
        }
    }

    /// The status code for HTTP-level failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request(status) | Self::Server(status) => Some(*status),
            _ => None,
        }
    }
}
