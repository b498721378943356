use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::CalculationRequest;

/// Path of the calculation endpoint, relative to the configured base URL.
pub const CALCULATE_PATH: &str = "/retirement";

/// Path of the plain-text health endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// No response was received (connection refused, DNS, TLS, ...).
    #[error("transport failure: {detail}")]
    Transport { detail: String },

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        body: Option<ErrorBody>,
    },

    /// A success status whose body was not JSON.
    #[error("undecodable response body: {detail}")]
    Decode { detail: String },

    #[error("client configuration error: {0}")]
    Configuration(String),
}

/// Error envelope returned by the calculator service.
///
/// Every field is optional. A field holding the wrong type is read as absent
/// rather than failing the whole body, so a usable `message` always survives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub status: Option<u16>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub path: Option<String>,
    /// Entries without a `field` name are dropped.
    #[serde(default, deserialize_with = "crate::lenient::items")]
    pub field_errors: Option<Vec<FieldError>>,
}

/// Per-field rejection reported by the server's own validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    #[serde(default)]
    pub rejected_value: Option<Value>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses an error response body. Returns `None` for empty, non-JSON or
    /// non-object bodies.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(bytes).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

/// Transport to the remote calculation service.
///
/// One implementation per transport; the state machine receives it as a
/// constructor argument so tests can substitute a stub.
#[async_trait]
pub trait CalculationClient: Send + Sync {
    /// Posts one request and returns the parsed success body untouched.
    /// Implementations must not retry.
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<Value, ClientError>;

    /// Returns the service's status line.
    async fn health(&self) -> Result<String, ClientError>;
}
