/// Raw field values exactly as a form front end collects them.
///
/// Everything is a string; nothing here has been validated. Empty strings
/// mean "not entered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorForm {
    pub current_age: String,
    pub retirement_age: String,
    pub lifestyle_type: String,
    pub custom_interest_rate: String,
}

impl CalculatorForm {
    pub fn new(
        current_age: impl Into<String>,
        retirement_age: impl Into<String>,
    ) -> Self {
        Self {
            current_age: current_age.into(),
            retirement_age: retirement_age.into(),
            ..Default::default()
        }
    }

    pub fn with_lifestyle(
        mut self,
        lifestyle_type: impl Into<String>,
    ) -> Self {
        self.lifestyle_type = lifestyle_type.into();
        self
    }

    pub fn with_interest_rate(
        mut self,
        custom_interest_rate: impl Into<String>,
    ) -> Self {
        self.custom_interest_rate = custom_interest_rate.into();
        self
    }
}
