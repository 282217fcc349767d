//! JSON-over-HTTP client.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use adfeed_core::error::{Error, TransportError};
use adfeed_core::{ApiConfig, Result};

/// Longest error body kept in a status error.
const MAX_ERROR_BODY: usize = 256;

/// HTTP client for the listing and detail endpoints.
#[derive(Debug, Clone)]
pub struct AdClient {
    client: reqwest::Client,
}

impl AdClient {
    /// Create a client honouring the configured timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("adfeed/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(transport_error)?;
        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body.
    #[instrument(skip(self))]
    pub async fn get<R>(&self, url: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// POST a JSON `body` to `url` with `query` parameters and decode the JSON body.
    #[instrument(skip(self, body))]
    pub async fn post<Q, B, R>(&self, url: &str, query: &Q, body: &B) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!("POST request");

        let response = self
            .client
            .post(url)
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Check the status and decode the body.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            debug!(status = status.as_u16(), ?message, "request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        trace!(len = bytes.len(), "response body");

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Classify a reqwest failure.
fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Trimmed, length-capped error body, if any.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    Some(body.chars().take(MAX_ERROR_BODY).collect())
}
