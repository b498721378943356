use async_trait::async_trait;

use retire_core::{CalculationClient, ClientConfig, ClientError, ClientFactory};

use crate::client::HttpCalculationClient;

/// [`ClientFactory`] for the JSON-over-HTTP transport.
///
/// Register this with a [`retire_core::ClientRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use retire_core::ClientRegistry;
/// use retire_http::HttpClientFactory;
///
/// let mut registry = ClientRegistry::new();
/// registry.register(Box::new(HttpClientFactory));
/// ```
pub struct HttpClientFactory;

#[async_trait]
impl ClientFactory for HttpClientFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Build a client rooted at `config.base_url`. Nothing is sent until the
    /// first call.
    async fn create(
        &self,
        config: &ClientConfig,
    ) -> Result<Box<dyn CalculationClient>, ClientError> {
        let client = HttpCalculationClient::new(&config.base_url)?;
        Ok(Box::new(client))
    }
}
