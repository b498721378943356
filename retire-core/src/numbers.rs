//! Numeric coercion for raw form input.
//!
//! Form fields arrive as strings. These helpers turn them into [`Decimal`]
//! values the same way for every field so that validation and request
//! building agree on what a string means.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a non-empty string cannot be parsed as a number.
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseNumberError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}


/// Parses a raw field value.
///
/// Surrounding whitespace is ignored; nothing else is rewritten, so a
/// separator such as `,` makes the input invalid. Returns `Ok(None)` for
/// empty or whitespace-only input so callers can distinguish "not entered"
/// from "entered but not a number".
pub fn parse_number(s: &str) -> Result<Option<Decimal>, ParseNumberError> {
    let normalized = s.trim();
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| {
        tracing::debug!(input = %s, "invalid number: {}", e);
        ParseNumberError {
            input: s.to_string(),
            source: e,
        }
    })
}
