//! Trust boundary for success bodies.
//!
//! A 2xx body is only handed to the state machine once the three result
//! fields are confirmed to be JSON numbers. Types are checked, signs are
//! not.

use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::models::CalculationResponse;

/// Fields that must be present and numeric in every success body.
pub const REQUIRED_NUMERIC_FIELDS: [&str; 3] =
    ["totalRetirementSavings", "monthlyDeposit", "yearsToRetirement"];

/// A success body that does not honour the response contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    #[error("invalid response format: expected an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("invalid response format: missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid response format: field `{field}` is {found}, expected a number")]
    NotNumeric {
        field: &'static str,
        found: &'static str,
    },

    /// A result field is numeric but does not fit a decimal.
    #[error("invalid response format: {0}")]
    Malformed(String),
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Checks a raw success body and returns it as a [`CalculationResponse`]
/// without altering any value.
///
/// # Errors
///
/// Returns [`ResponseShapeError`] when the body is not an object, or when
/// any of [`REQUIRED_NUMERIC_FIELDS`] is missing, not a number, or out of
/// decimal range. Other fields are never grounds for rejection.
pub fn validate_response(body: Value) -> Result<CalculationResponse, ResponseShapeError> {
    let result = check_shape(&body).and_then(|()| {
        serde_json::from_value(body).map_err(|e| ResponseShapeError::Malformed(e.to_string()))
    });

    if let Err(violation) = &result {
        error!(%violation, "calculation response rejected");
    }
    result
}

fn check_shape(body: &Value) -> Result<(), ResponseShapeError> {
    let object = body.as_object().ok_or(ResponseShapeError::NotAnObject {
        found: json_type(body),
    })?;

    for field in REQUIRED_NUMERIC_FIELDS {
        match object.get(field) {
            None => return Err(ResponseShapeError::MissingField(field)),
            Some(Value::Number(_)) => {}
            Some(other) => {
                return Err(ResponseShapeError::NotNumeric {
                    field,
                    found: json_type(other),
                });
            }
        }
    }
    Ok(())
}
