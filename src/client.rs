//! Core HTTP client for the Deribit JSON-RPC API v2.
//!
//! The [`DeribitClient`] struct is the main entry point for talking to the
//! public Deribit endpoints. It wraps [`reqwest::Client`] and exposes a
//! typed [`call_public`](DeribitClient::call_public) method that encodes
//! parameters as a query string and unwraps the JSON-RPC envelope.
//!
//! Endpoint and orchestration methods are added to `DeribitClient` via
//! `impl` blocks in the [`crate::api`] module.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::{ApiErrorBody, DeribitError, Result};
use crate::types::enums::Environment;

/// JSON-RPC response envelope. Exactly one of `result` / `error` is set on
/// a well-formed response.
#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<ApiErrorBody>,
}

/// Core HTTP client for the public Deribit API v2.
///
/// # Example
///
/// ```no_run
/// use deribit_analytics::client::DeribitClient;
/// use deribit_analytics::types::Environment;
///
/// # #[tokio::main]
/// # async fn main() -> deribit_analytics::error::Result<()> {
/// let client = DeribitClient::new(Environment::Prod)?;
/// let now: i64 = client.call_public("get_time", &()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeribitClient {
    http: reqwest::Client,
    /// Base URL for API requests, without trailing slash.
    base_url: String,
    environment: Environment,
}

impl DeribitClient {
    /// Create a client for the given deployment.
    pub fn new(environment: Environment) -> Result<Self> {
        let mut client = Self::with_base_url(environment.base_url())?;
        client.environment = environment;
        Ok(client)
    }

    /// Shorthand for a testnet client.
    pub fn testnet() -> Result<Self> {
        Self::new(Environment::Test)
    }

    /// Create a client pointing at a custom base URL (e.g. a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self::with_http_client(http, base_url))
    }

    /// Use a preconfigured `reqwest::Client` (custom proxy, timeouts, TLS
    /// roots) against `base_url`.
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            environment: Environment::default(),
        }
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Deployment this client was created for. Clients built with
    /// [`with_base_url`](Self::with_base_url) report the default.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    // -----------------------------------------------------------------------
    // JSON-RPC transport
    // -----------------------------------------------------------------------

    /// Call a public method (`"ticker"` or `"public/ticker"`) and decode its
    /// `result`.
    ///
    /// `params` must serialize to a JSON object (or `null` for no
    /// parameters); its fields become query parameters.
    pub async fn call_public<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<R> {
        let url = self.url(method, params)?;
        tracing::debug!(%url, "GET");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        Self::decode_response(status, &bytes)
    }

    /// Decode a raw HTTP response into a method result.
    ///
    /// A JSON-RPC error object maps to [`DeribitError::Api`] whatever the
    /// status; any other non-success status maps to
    /// [`DeribitError::HttpStatus`].
    pub fn decode_response<R: DeserializeOwned>(
        status: reqwest::StatusCode,
        body: &[u8],
    ) -> Result<R> {
        match serde_json::from_slice::<RpcResponse<R>>(body) {
            Ok(RpcResponse {
                error: Some(error), ..
            }) => Err(DeribitError::Api(error)),
            Ok(RpcResponse {
                result: Some(result),
                ..
            }) if status.is_success() => Ok(result),
            Ok(_) if status.is_success() => {
                serde_json::from_value(serde_json::Value::Null).map_err(DeribitError::Json)
            }
            Err(err) if status.is_success() => Err(DeribitError::Json(err)),
            _ => Err(DeribitError::HttpStatus {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the request URL for a public method with query parameters.
    fn url<P: Serialize>(&self, method: &str, params: &P) -> Result<url::Url> {
        let method = method.trim_start_matches('/');
        let path = if method.starts_with("public/") {
            format!("{}/{}", self.base_url, method)
        } else {
            format!("{}/public/{}", self.base_url, method)
        };

        let query = query_pairs(&serde_json::to_value(params)?)?;
        Ok(url::Url::parse_with_params(&path, query)?)
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Flatten a JSON object into query pairs. `null` fields are dropped;
/// strings are passed unquoted.
pub(crate) fn query_pairs(params: &serde_json::Value) -> Result<Vec<(String, String)>> {
    use serde_json::Value;

    let map = match params {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(DeribitError::InvalidArgument(format!(
                "request parameters must be an object, got {other}"
            )));
        }
    };

    Ok(map
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), value)
        })
        .collect())
}
