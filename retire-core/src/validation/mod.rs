//! Two-phase form validation.
//!
//! Phase one checks every field on its own ([`field`]). Phase two compares
//! the two ages ([`cross_field`]) and only runs once both ages passed phase
//! one, so an empty field never produces a misleading "age comparison"
//! message.
//!
//! Everything here is a plain function over its inputs. Calling
//! [`validate_form`] twice on the same form yields the same issues.

pub mod cross_field;
pub mod field;

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{CalculatorForm, Lifestyle};

pub use field::{CURRENT_AGE, CUSTOM_INTEREST_RATE, FieldSpec, RETIREMENT_AGE};

/// The input an issue is attached to. `Form` marks form-level issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    CurrentAge,
    RetirementAge,
    LifestyleType,
    CustomInterestRate,
    Form,
}

impl FieldName {
    /// Name as it appears on the wire and in UI bindings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentAge => "currentAge",
            Self::RetirementAge => "retirementAge",
            Self::LifestyleType => "lifestyleType",
            Self::CustomInterestRate => "customInterestRate",
            Self::Form => "form",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Value absent or blank.
    Required,
    /// Below the field's minimum; the issue carries the bound.
    BelowMin,
    /// Above the field's maximum; the issue carries the bound.
    AboveMax,
    /// Present but not a usable value (not a number, fractional age, unknown lifestyle).
    Invalid,
    /// Retirement age not after current age.
    CrossField,
}

/// A single validation finding, consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: FieldName,
    pub kind: IssueKind,
    pub bound: Option<Decimal>,
}

impl ValidationIssue {
    pub fn required(field: FieldName) -> Self {
        Self {
            field,
            kind: IssueKind::Required,
            bound: None,
        }
    }

    pub fn below_min(
        field: FieldName,
        min: Decimal,
    ) -> Self {
        Self {
            field,
            kind: IssueKind::BelowMin,
            bound: Some(min),
        }
    }

    pub fn above_max(
        field: FieldName,
        max: Decimal,
    ) -> Self {
        Self {
            field,
            kind: IssueKind::AboveMax,
            bound: Some(max),
        }
    }

    pub fn invalid(field: FieldName) -> Self {
        Self {
            field,
            kind: IssueKind::Invalid,
            bound: None,
        }
    }

    pub fn cross_field() -> Self {
        Self {
            field: FieldName::Form,
            kind: IssueKind::CrossField,
            bound: None,
        }
    }

    /// Text shown next to the offending input.
    pub fn message(&self) -> String {
        let bound = self.bound.map(|b| b.normalize().to_string()).unwrap_or_default();
        match self.kind {
            IssueKind::Required => "This field is required".to_string(),
            IssueKind::BelowMin => format!("Minimum value is {bound}"),
            IssueKind::AboveMax => format!("Maximum value is {bound}"),
            IssueKind::Invalid if self.field == FieldName::LifestyleType => {
                "Please choose a simple or fancy lifestyle".to_string()
            }
            IssueKind::Invalid => "Please enter a valid number".to_string(),
            IssueKind::CrossField => "Retirement age must be greater than current age".to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

/// Proof that a [`CalculatorForm`] passed both validation phases, holding
/// the coerced values.
///
/// Only [`validate_form`] creates one, which is what lets
/// [`crate::RequestBuilder::build`] skip validation entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub(crate) current_age: i32,
    pub(crate) retirement_age: i32,
    pub(crate) lifestyle_type: Option<Lifestyle>,
    pub(crate) custom_interest_rate: Option<Decimal>,
}

impl ValidatedForm {
    pub fn current_age(&self) -> i32 {
        self.current_age
    }

    pub fn retirement_age(&self) -> i32 {
        self.retirement_age
    }

    /// `None` when the lifestyle was left blank.
    pub fn lifestyle_type(&self) -> Option<Lifestyle> {
        self.lifestyle_type
    }

    pub fn custom_interest_rate(&self) -> Option<Decimal> {
        self.custom_interest_rate
    }
}

/// Runs both validation phases over a raw form.
///
/// # Errors
///
/// Returns every field-level issue found. When both ages are individually
/// valid but out of order, the cross-field issue is included as well.
pub fn validate_form(form: &CalculatorForm) -> Result<ValidatedForm, Vec<ValidationIssue>> {
    let current_age = field::validate_age(&form.current_age, &CURRENT_AGE);
    let retirement_age = field::validate_age(&form.retirement_age, &RETIREMENT_AGE);
    let lifestyle_type = field::validate_lifestyle(&form.lifestyle_type);
    let custom_interest_rate = field::validate_interest_rate(&form.custom_interest_rate);

    let mut issues = Vec::new();

    if let (Ok(current), Ok(retirement)) = (&current_age, &retirement_age) {
        if let Some(issue) = cross_field::validate_age_order(*current, *retirement) {
            issues.push(issue);
        }
    }

    match (current_age, retirement_age, lifestyle_type, custom_interest_rate) {
        (Ok(current_age), Ok(retirement_age), Ok(lifestyle_type), Ok(custom_interest_rate))
            if issues.is_empty() =>
        {
            Ok(ValidatedForm {
                current_age,
                retirement_age,
                lifestyle_type,
                custom_interest_rate,
            })
        }
        (current_age, retirement_age, lifestyle_type, custom_interest_rate) => {
            let field_issues = [
                current_age.err(),
                retirement_age.err(),
                lifestyle_type.err(),
                custom_interest_rate.err(),
            ];
            let mut all: Vec<_> = field_issues.into_iter().flatten().collect();
            all.append(&mut issues);
            Err(all)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // validate_form tests
    // =========================================================================

    #[test]
    fn validate_form_accepts_valid_ages() {
        let form = CalculatorForm::new("30", "65").with_lifestyle("simple");

        let validated = validate_form(&form).unwrap();

        assert_eq!(validated.current_age(), 30);
        assert_eq!(validated.retirement_age(), 65);
        assert_eq!(validated.lifestyle_type(), Some(Lifestyle::Simple));
        assert_eq!(validated.custom_interest_rate(), None);
    }

    #[test]
    fn validate_form_accepts_optional_interest_rate() {
        let form = CalculatorForm::new("30", "65").with_interest_rate("4.75");

        let validated = validate_form(&form).unwrap();

        assert_eq!(validated.custom_interest_rate(), Some(dec!(4.75)));
    }

    #[test]
    fn validate_form_reports_cross_field_when_ages_equal() {
        let form = CalculatorForm::new("65", "65");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(issues, vec![ValidationIssue::cross_field()]);
    }

    #[test]
    fn validate_form_reports_cross_field_when_retirement_before_current() {
        let form = CalculatorForm::new("70", "40");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(issues, vec![ValidationIssue::cross_field()]);
    }

    #[test]
    fn validate_form_skips_cross_field_when_an_age_is_missing() {
        let form = CalculatorForm::new("70", "");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(
            issues,
            vec![ValidationIssue::required(FieldName::RetirementAge)]
        );
    }

    #[test]
    fn validate_form_skips_cross_field_when_an_age_is_out_of_range() {
        let form = CalculatorForm::new("101", "65");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(
            issues,
            vec![ValidationIssue::above_max(FieldName::CurrentAge, dec!(100))]
        );
    }

    #[test]
    fn validate_form_collects_every_field_issue() {
        let form = CalculatorForm::new("", "17")
            .with_lifestyle("luxury")
            .with_interest_rate("abc");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(
            issues,
            vec![
                ValidationIssue::required(FieldName::CurrentAge),
                ValidationIssue::below_min(FieldName::RetirementAge, dec!(18)),
                ValidationIssue::invalid(FieldName::LifestyleType),
                ValidationIssue::invalid(FieldName::CustomInterestRate),
            ]
        );
    }

    #[test]
    fn validate_form_rejects_comma_in_ages() {
        let issues = validate_form(&CalculatorForm::new("3,0", "6,5")).unwrap_err();

        assert_eq!(
            issues,
            vec![
                ValidationIssue::invalid(FieldName::CurrentAge),
                ValidationIssue::invalid(FieldName::RetirementAge),
            ]
        );
    }

    #[test]
    fn validate_form_lists_field_issues_before_cross_field_issue() {
        let form = CalculatorForm::new("50", "40").with_interest_rate("150");

        let issues = validate_form(&form).unwrap_err();

        assert_eq!(
            issues,
            vec![
                ValidationIssue::above_max(FieldName::CustomInterestRate, dec!(100)),
                ValidationIssue::cross_field(),
            ]
        );
    }

    #[test]
    fn validate_form_is_idempotent() {
        let form = CalculatorForm::new("17", "abc");

        let first = validate_form(&form);
        let second = validate_form(&form);

        assert_eq!(first, second);
    }

    // =========================================================================
    // ValidationIssue::message tests
    // =========================================================================

    #[test]
    fn message_for_required() {
        let issue = ValidationIssue::required(FieldName::CurrentAge);

        assert_eq!(issue.message(), "This field is required");
    }

    #[test]
    fn message_echoes_minimum_bound() {
        let issue = ValidationIssue::below_min(FieldName::CurrentAge, dec!(18));

        assert_eq!(issue.message(), "Minimum value is 18");
    }

    #[test]
    fn message_echoes_maximum_bound() {
        let issue = ValidationIssue::above_max(FieldName::RetirementAge, dec!(100));

        assert_eq!(issue.message(), "Maximum value is 100");
    }

    #[test]
    fn message_for_cross_field() {
        assert_eq!(
            ValidationIssue::cross_field().message(),
            "Retirement age must be greater than current age"
        );
    }

    #[test]
    fn display_prefixes_field_name() {
        let issue = ValidationIssue::required(FieldName::RetirementAge);

        assert_eq!(issue.to_string(), "retirementAge: This field is required");
    }

    #[test]
    fn cross_field_issue_is_form_level() {
        assert_eq!(ValidationIssue::cross_field().field.as_str(), "form");
    }
}
