use crate::models::{CalculationRequest, CalculatorForm};
use crate::validation::{ValidatedForm, ValidationIssue, validate_form};

/// Shapes validated form values into a [`CalculationRequest`].
///
/// The builder performs no validation of its own; it can only be fed a
/// [`ValidatedForm`], which already carries the coerced numbers.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds the request payload. An unset lifestyle becomes the default
    /// ([`crate::Lifestyle::Simple`]).
    pub fn build(form: ValidatedForm) -> CalculationRequest {
        CalculationRequest::new(
            form.current_age,
            form.retirement_age,
            form.lifestyle_type.unwrap_or_default(),
            form.custom_interest_rate,
        )
    }

    /// Validates a raw form and builds the request in one step.
    ///
    /// # Errors
    ///
    /// Returns the issues reported by [`validate_form`].
    pub fn from_form(form: &CalculatorForm) -> Result<CalculationRequest, Vec<ValidationIssue>> {
        validate_form(form).map(Self::build)
    }
}
