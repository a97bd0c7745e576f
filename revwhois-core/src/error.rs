use thiserror::Error;

use crate::response::ErrorMessage;

#[derive(Error, Debug)]
pub enum ReverseWhoisError {
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    #[error("API key is empty")]
    EmptyApiKey,

    #[error("Authentication failed (HTTP {status}): {message}")]
    ApiAuth { status: u16, message: String },

    #[error("Bad request (HTTP {status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("HTTP request failed (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    #[error("API returned an error: {0}")]
    Response(ErrorMessage),

    #[error("{message}")]
    UnparsableApiResponse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Connection failed: {0}")]
    Connection(#[from] reqwest::Error),
}

impl ReverseWhoisError {
    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        ReverseWhoisError::Parameter(message.into())
    }

    pub(crate) fn unparsable(message: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        ReverseWhoisError::UnparsableApiResponse {
            message: message.into(),
            source,
        }
    }

    /// True for every kind reported by the API layer. Connection failures
    /// (DNS, refused, timed out) are not API errors.
    pub fn is_api_error(&self) -> bool {
        !matches!(self, ReverseWhoisError::Connection(_))
    }

    /// HTTP status carried by the error, if it came from a non-2xx reply.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReverseWhoisError::ApiAuth { status, .. }
            | ReverseWhoisError::BadRequest { status, .. }
            | ReverseWhoisError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReverseWhoisError>;
