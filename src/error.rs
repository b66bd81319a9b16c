//! Error types for the `deribit-analytics` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, DeribitError>`.
//!
//! The analytics engine itself never fails: it returns `None` or degenerate
//! zero-valued results for missing data. [`DeribitError`] covers the fetch
//! layer around it:
//! - **API errors**: JSON-RPC error objects returned by Deribit
//! - **HTTP status errors**: Unexpected status codes with response body
//! - **HTTP transport errors**: Network, TLS, timeout failures
//! - **JSON errors**: Deserialization failures
//! - **URL errors**: Malformed URL construction
//! - **Invalid arguments**: Client-side validation errors
//! - **Unavailable data**: Spot, IV or chain data missing for a request

use std::fmt;

use crate::constants::limits::MAX_MESSAGE_LEN;

/// Error object of a Deribit JSON-RPC response.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Deribit error code (e.g. `10009` for "not_enough_funds",
    /// `-32602` for invalid params).
    pub code: i64,
    /// Human-readable description of the error.
    #[serde(default)]
    pub message: String,
    /// Optional structured detail (e.g. the offending parameter).
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, " ({data})")?;
        }
        Ok(())
    }
}

/// All possible errors produced by the `deribit-analytics` client.
#[derive(Debug, thiserror::Error)]
pub enum DeribitError {
    /// An error object returned by the Deribit JSON-RPC API.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The data needed for a computation could not be obtained
    /// (no spot price, no options for an expiry, no usable IV).
    #[error("Data unavailable: {0}")]
    Unavailable(String),
}

impl DeribitError {
    /// Numeric code for compact error reporting: the JSON-RPC code for API
    /// errors, the HTTP status for status errors, `404` when data is missing
    /// and `-1` otherwise.
    pub fn code(&self) -> i64 {
        match self {
            Self::Api(body) => body.code,
            Self::HttpStatus { status, .. } => i64::from(status.as_u16()),
            Self::Unavailable(_) => 404,
            _ => -1,
        }
    }

    /// Display text cut to [`MAX_MESSAGE_LEN`] characters.
    pub fn short_message(&self) -> String {
        self.to_string().chars().take(MAX_MESSAGE_LEN).collect()
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeribitError>;
