use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result body returned by the remote calculator.
///
/// Only reaches callers after [`crate::validate_response`] has confirmed the
/// three result fields are numeric. The echoed inputs are informational: a
/// missing or mistyped echo reads as `None` instead of rejecting the body.
/// `lifestyle_type` is kept as the server sent it; the backend accepts
/// lifestyle names this client does not offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    #[serde(default, deserialize_with = "crate::lenient::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_age: Option<i32>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retirement_age: Option<i32>,

    /// Annual rate as a percentage, e.g. `5.5`.
    #[serde(default, deserialize_with = "crate::lenient::option")]
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub interest_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "crate::lenient::option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle_type: Option<String>,

    // Calculated values
    #[serde(with = "rust_decimal::serde::float")]
    pub total_retirement_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_deposit: Decimal,
    /// Any JSON number is accepted, `35` and `35.0` alike.
    #[serde(with = "rust_decimal::serde::float")]
    pub years_to_retirement: Decimal,
}

impl fmt::Display for CalculationResponse {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(age) = self.current_age {
            writeln!(f, "Current age:          {age}")?;
        }
        if let Some(age) = self.retirement_age {
            writeln!(f, "Retirement age:       {age}")?;
        }
        writeln!(
            f,
            "Years to retirement:  {}",
            self.years_to_retirement.normalize()
        )?;
        if let Some(lifestyle) = &self.lifestyle_type {
            writeln!(f, "Lifestyle:            {lifestyle}")?;
        }
        if let Some(rate) = self.interest_rate {
            writeln!(f, "Interest rate:        {}%", rate.normalize())?;
        }
        writeln!(f, "Monthly deposit:      ${}", self.monthly_deposit.round_dp(2))?;
        writeln!(
            f,
            "Total savings:        ${}",
            self.total_retirement_savings.round_dp(2)
        )
    }
}
