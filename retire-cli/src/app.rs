use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use retire_core::{
    CalculationClient, ClientConfig, ClientRegistry, Notifier, SubmissionMachine,
};
use retire_http::HttpClientFactory;

/// Registry with every transport this binary ships.
pub fn build_registry() -> ClientRegistry {
    let mut registry = ClientRegistry::new();
    registry.register(Box::new(HttpClientFactory));
    registry
}

/// Applies command-line overrides on top of an environment-derived config.
/// Blank overrides are ignored.
pub fn resolve_config(
    mut base: ClientConfig,
    backend: Option<&str>,
    api_url: Option<&str>,
) -> ClientConfig {
    let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

    if let Some(backend) = present(backend) {
        base.backend = backend.to_ascii_lowercase();
    }
    if let Some(url) = present(api_url) {
        base.base_url = url;
    }
    base
}

/// Builds the client for `config` from the shipped registry.
pub async fn connect(config: &ClientConfig) -> Result<Arc<dyn CalculationClient>> {
    debug!(backend = %config.backend, base_url = %config.base_url, "creating client");
    let client = build_registry()
        .create(config)
        .await
        .with_context(|| format!("cannot create '{}' client", config.backend))?;
    Ok(Arc::from(client))
}

/// Wires a ready client into a fresh submission machine.
pub async fn build_machine(
    config: &ClientConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<SubmissionMachine> {
    let client = connect(config).await?;
    Ok(SubmissionMachine::new(client, notifier))
}
