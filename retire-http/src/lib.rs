//! HTTP transport for the retirement calculator.

pub mod client;
pub mod factory;

pub use client::HttpCalculationClient;
pub use factory::HttpClientFactory;
