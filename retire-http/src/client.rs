use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use retire_core::client::{CALCULATE_PATH, ErrorBody, HEALTH_PATH};
use retire_core::{CalculationClient, CalculationRequest, ClientError};

/// [`CalculationClient`] speaking JSON over HTTP to the calculator service.
///
/// Every call is a single attempt. No retries, no caching.
pub struct HttpCalculationClient {
    http: Client,
    base_url: String,
}

impl HttpCalculationClient {
    /// Creates a client rooted at `base_url`
    /// (e.g. `http://localhost:8080/api/v1/calculator`).
    ///
    /// # Errors
    /// [`ClientError::Configuration`] when `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Same as [`HttpCalculationClient::new`] with a caller-supplied
    /// `reqwest` client (timeouts, proxies, ...).
    pub fn with_client(
        http: Client,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL '{trimmed}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported scheme '{}' in base URL '{trimmed}'",
                url.scheme()
            )));
        }

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport {
        detail: err.to_string(),
    }
}

/// Turns a non-success response into [`ClientError::Server`], keeping the
/// error envelope when the body carries one.
async fn server_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) => ErrorBody::from_slice(&bytes),
        Err(e) => {
            debug!(status, error = %e, "could not read error body");
            None
        }
    };

    warn!(status, has_body = body.is_some(), "calculator service returned an error");
    ClientError::Server { status, body }
}

#[async_trait]
impl CalculationClient for HttpCalculationClient {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<Value, ClientError> {
        let url = self.endpoint(CALCULATE_PATH);
        debug!(%url, "posting calculation request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport)?;
        let body = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            detail: e.to_string(),
        })?;

        info!(status, "calculation response received");
        Ok(body)
    }

    async fn health(&self) -> Result<String, ClientError> {
        let url = self.endpoint(HEALTH_PATH);
        debug!(%url, "checking service health");

        let response = self.http.get(&url).send().await.map_err(transport)?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }

        response.text().await.map_err(transport)
    }
}
