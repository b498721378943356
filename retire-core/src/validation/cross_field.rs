//! Form-level check relating the two ages.

use super::ValidationIssue;

/// Returns a `CrossField` issue unless retirement comes strictly after the
/// current age.
///
/// Callers must only pass ages that already passed field validation.
pub fn validate_age_order(
    current_age: i32,
    retirement_age: i32,
) -> Option<ValidationIssue> {
    (current_age >= retirement_age).then(ValidationIssue::cross_field)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_retirement_after_current() {
        assert_eq!(validate_age_order(30, 65), None);
    }

    #[test]
    fn accepts_one_year_gap() {
        assert_eq!(validate_age_order(64, 65), None);
    }

    #[test]
    fn rejects_equal_ages() {
        assert_eq!(
            validate_age_order(65, 65),
            Some(ValidationIssue::cross_field())
        );
    }

    #[test]
    fn rejects_retirement_before_current() {
        assert_eq!(
            validate_age_order(70, 18),
            Some(ValidationIssue::cross_field())
        );
    }

    #[test]
    fn is_idempotent() {
        assert_eq!(validate_age_order(50, 40), validate_age_order(50, 40));
    }
}
