use std::collections::HashMap;

use async_trait::async_trait;

use super::api::{CalculationClient, ClientError};

/// Default location of the calculator API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/calculator";

/// Default transport backend.
pub const DEFAULT_BACKEND: &str = "http";

/// Environment variable overriding [`ClientConfig::backend`].
pub const BACKEND_ENV: &str = "RETIRE_CALC_BACKEND";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "RETIRE_CALC_API_URL";

/// Backend-agnostic client configuration.
///
/// `backend` must match the [`ClientFactory::backend_name`] of a registered
/// factory. `base_url` is passed through to that factory unchanged; the
/// endpoint paths are appended to it.
///
/// | backend | base_url example                            |
/// |---------|---------------------------------------------|
/// | `http`  | `http://localhost:8080/api/v1/calculator`   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads [`BACKEND_ENV`] and [`BASE_URL_ENV`], falling back to the
    /// defaults for unset or blank variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            backend: read(BACKEND_ENV, DEFAULT_BACKEND).to_ascii_lowercase(),
            base_url: read(BASE_URL_ENV, DEFAULT_BASE_URL),
        }
    }
}

/// One implementation per transport backend. Each backend crate exports a
/// unit struct implementing this trait, registered with a
/// [`ClientRegistry`] at startup.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a ready-to-use client for `config.base_url`.
    async fn create(
        &self,
        config: &ClientConfig,
    ) -> Result<Box<dyn CalculationClient>, ClientError>;
}

/// Registry of [`ClientFactory`] instances, keyed by backend name.
pub struct ClientRegistry {
    factories: HashMap<&'static str, Box<dyn ClientFactory>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any factory already registered
    /// under the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn ClientFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`ClientError::Configuration`] - no factory is registered for the
    ///   requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &ClientConfig,
    ) -> Result<Box<dyn CalculationClient>, ClientError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                ClientError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::models::CalculationRequest;

    // ── stub client ──────────────────────────────────────────────────────
    // Only `health` answers; it reports which base URL the factory saw.
    struct StubClient {
        base_url: String,
    }

    #[async_trait]
    impl CalculationClient for StubClient {
        async fn calculate(
            &self,
            _request: &CalculationRequest,
        ) -> Result<Value, ClientError> {
            unimplemented!()
        }

        async fn health(&self) -> Result<String, ClientError> {
            Ok(self.base_url.clone())
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ClientFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        async fn create(
            &self,
            config: &ClientConfig,
        ) -> Result<Box<dyn CalculationClient>, ClientError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubClient {
                base_url: config.base_url.clone(),
            }))
        }
    }

    fn stub(name: &'static str) -> (Box<dyn ClientFactory>, Arc<AtomicBool>) {
        let called = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: called.clone(),
            }),
            called,
        )
    }

    // ── ClientConfig ─────────────────────────────────────────────────────

    #[test]
    fn default_config_points_at_local_calculator() {
        let config = ClientConfig::default();

        assert_eq!(config.backend, "http");
        assert_eq!(config.base_url, "http://localhost:8080/api/v1/calculator");
    }

    #[test]
    fn from_lookup_uses_defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None);

        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (BACKEND_ENV, " HTTP "),
            (BASE_URL_ENV, "https://calc.example.com/api/v1/calculator"),
        ]);

        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend, "http");
        assert_eq!(config.base_url, "https://calc.example.com/api/v1/calculator");
    }

    #[test]
    fn from_lookup_ignores_blank_values() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));

        assert_eq!(config, ClientConfig::default());
    }

    // ── ClientRegistry ───────────────────────────────────────────────────

    #[test]
    fn new_registry_is_empty() {
        let registry = ClientRegistry::new();

        assert!(registry.available_backends().is_empty());
    }

    #[test]
    fn available_backends_are_sorted() {
        let mut registry = ClientRegistry::new();
        registry.register(stub("mock").0);
        registry.register(stub("http").0);

        assert_eq!(registry.available_backends(), vec!["http", "mock"]);
    }

    #[tokio::test]
    async fn create_routes_to_matching_factory() {
        let mut registry = ClientRegistry::new();
        let (http, http_called) = stub("http");
        let (mock, mock_called) = stub("mock");
        registry.register(http);
        registry.register(mock);

        let client = registry.create(&ClientConfig::default()).await.unwrap();

        assert!(http_called.load(Ordering::SeqCst));
        assert!(!mock_called.load(Ordering::SeqCst));
        assert_eq!(client.health().await.unwrap(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn create_rejects_unknown_backend() {
        let mut registry = ClientRegistry::new();
        registry.register(stub("http").0);
        let config = ClientConfig {
            backend: "grpc".to_string(),
            ..Default::default()
        };

        let err = registry.create(&config).await.err().unwrap();

        match err {
            ClientError::Configuration(msg) => {
                assert!(msg.contains("unknown backend 'grpc'"), "{msg}");
                assert!(msg.contains("http"), "{msg}");
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_replaces_factory_with_same_name() {
        let mut registry = ClientRegistry::new();
        let (first, first_called) = stub("http");
        let (second, second_called) = stub("http");
        registry.register(first);
        registry.register(second);

        registry.create(&ClientConfig::default()).await.unwrap();

        assert!(!first_called.load(Ordering::SeqCst));
        assert!(second_called.load(Ordering::SeqCst));
    }
}
