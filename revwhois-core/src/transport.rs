//! HTTP transport for the reverse WHOIS API.
//!
//! The client only depends on the [`Transport`] trait, so tests and callers
//! with special networking needs can substitute their own implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument, warn};

use crate::error::{ReverseWhoisError, Result};
use crate::request::RequestPayload;
use crate::response::ErrorMessage;

pub const DEFAULT_BASE_URL: &str = "https://reverse-whois.whoisxmlapi.com/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("revwhois/", env!("CARGO_PKG_VERSION"));

/// Sends one request body and returns the raw reply text.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn post(&self, payload: &RequestPayload) -> Result<String>;
}

/// Blocking JSON-over-POST transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, payload), fields(url = %self.base_url))]
    fn post(&self, payload: &RequestPayload) -> Result<String> {
        debug!(
            mode = %payload.mode(),
            format = %payload.response_format(),
            search_after = ?payload.search_after(),
            "Posting reverse WHOIS query"
        );

        let response = self
            .http
            .post(&self.base_url)
            .timeout(self.timeout)
            .json(payload)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        check_status(status, body)
    }
}

/// Map a reply to the error taxonomy: 401/402/403 are auth failures,
/// 400/422 bad requests, anything else from 300 up a generic HTTP error.
/// A successful reply whose body is an error object is a response error.
pub fn check_status(status: u16, body: String) -> Result<String> {
    let error_message = ErrorMessage::from_body(&body);

    if status < 300 {
        return match error_message {
            Some(error) => {
                warn!(code = error.code, message = %error.message, "API returned an error body");
                Err(ReverseWhoisError::Response(error))
            }
            None => Ok(body),
        };
    }

    let message = error_message.map(|e| e.message).unwrap_or(body);
    warn!(status, message = %message, "API request failed");

    Err(match status {
        401..=403 => ReverseWhoisError::ApiAuth { status, message },
        400 | 422 => ReverseWhoisError::BadRequest { status, message },
        _ => ReverseWhoisError::Http { status, message },
    })
}
