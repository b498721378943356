use rust_decimal::Decimal;
use serde::Serialize;

use super::Lifestyle;

/// Typed payload posted to the remote calculator.
///
/// Only [`crate::RequestBuilder`] can produce one, and only from a form that
/// passed validation, so the age bounds and ordering always hold. The value
/// is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    current_age: i32,
    retirement_age: i32,
    lifestyle_type: Lifestyle,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    custom_interest_rate: Option<Decimal>,
}

impl CalculationRequest {
    pub(crate) fn new(
        current_age: i32,
        retirement_age: i32,
        lifestyle_type: Lifestyle,
        custom_interest_rate: Option<Decimal>,
    ) -> Self {
        Self {
            current_age,
            retirement_age,
            lifestyle_type,
            custom_interest_rate,
        }
    }

    pub fn current_age(&self) -> i32 {
        self.current_age
    }

    pub fn retirement_age(&self) -> i32 {
        self.retirement_age
    }

    pub fn lifestyle_type(&self) -> Lifestyle {
        self.lifestyle_type
    }

    pub fn custom_interest_rate(&self) -> Option<Decimal> {
        self.custom_interest_rate
    }
}
