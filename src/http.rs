//! Shared blocking HTTP client and response checks.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

const USER_AGENT: &str = concat!("arxshelf/", env!("CARGO_PKG_VERSION"));

/// Non-success HTTP outcomes.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

/// Builds the client used for feed, PDF and summary requests.
///
/// # Errors
///
/// Returns error if the TLS backend cannot be initialized
pub fn client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Passes successful responses through and maps failures to [`HttpError`].
///
/// 429 responses read `Retry-After` in seconds, falling back to 60 when the
/// header is missing or not a number. Other failures carry the status and
/// response body.
pub fn check_response(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(60);
        return Err(HttpError::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        return Err(HttpError::Status {
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        });
    }

    Ok(response)
}
