pub mod api;
pub mod factory;

pub use api::{CALCULATE_PATH, CalculationClient, ClientError, ErrorBody, FieldError, HEALTH_PATH};
pub use factory::{ClientConfig, ClientFactory, ClientRegistry, DEFAULT_BASE_URL};
