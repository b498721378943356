//! Per-field checks: presence, numeric type, and range.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{FieldName, ValidationIssue};
use crate::models::Lifestyle;
use crate::numbers::parse_number;

/// Declared bounds for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: FieldName,
    pub min: Decimal,
    pub max: Decimal,
    /// Reject values with a fractional part.
    pub whole_number: bool,
}

const fn whole(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

pub const CURRENT_AGE: FieldSpec = FieldSpec {
    field: FieldName::CurrentAge,
    min: whole(18),
    max: whole(100),
    whole_number: true,
};

pub const RETIREMENT_AGE: FieldSpec = FieldSpec {
    field: FieldName::RetirementAge,
    min: whole(18),
    max: whole(100),
    whole_number: true,
};

/// Percentage entered by the user when overriding the server's rate.
pub const CUSTOM_INTEREST_RATE: FieldSpec = FieldSpec {
    field: FieldName::CustomInterestRate,
    min: whole(0),
    max: whole(100),
    whole_number: false,
};

/// Checks a required numeric field against its bounds.
///
/// Bounds are inclusive. Returns the parsed value when there is no issue.
///
/// # Errors
///
/// * `Required` - the value is empty or whitespace.
/// * `Invalid` - the value is not a number, or is fractional for a
///   whole-number field.
/// * `BelowMin` / `AboveMax` - out of range; the issue carries the bound
///   that was violated.
pub fn validate_field(
    raw: &str,
    spec: &FieldSpec,
) -> Result<Decimal, ValidationIssue> {
    let value = parse_number(raw)
        .map_err(|_| ValidationIssue::invalid(spec.field))?
        .ok_or_else(|| ValidationIssue::required(spec.field))?;

    if spec.whole_number && !value.fract().is_zero() {
        return Err(ValidationIssue::invalid(spec.field));
    }
    if value < spec.min {
        return Err(ValidationIssue::below_min(spec.field, spec.min));
    }
    if value > spec.max {
        return Err(ValidationIssue::above_max(spec.field, spec.max));
    }
    Ok(value)
}

/// [`validate_field`] for an age, coerced to an integer.
pub fn validate_age(
    raw: &str,
    spec: &FieldSpec,
) -> Result<i32, ValidationIssue> {
    validate_field(raw, spec)?
        .to_i32()
        .ok_or_else(|| ValidationIssue::invalid(spec.field))
}

/// The custom interest rate is optional: blank input means "let the server
/// decide" and is not an issue.
pub fn validate_interest_rate(raw: &str) -> Result<Option<Decimal>, ValidationIssue> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    validate_field(raw, &CUSTOM_INTEREST_RATE).map(Some)
}

/// Blank selects nothing (the request builder applies the default);
/// anything else must name a known lifestyle.
pub fn validate_lifestyle(raw: &str) -> Result<Option<Lifestyle>, ValidationIssue> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Lifestyle::parse(raw)
        .map(Some)
        .ok_or_else(|| ValidationIssue::invalid(FieldName::LifestyleType))
}
