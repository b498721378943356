mod calculation_request;
mod calculation_response;
mod calculator_form;
mod lifestyle;

pub use calculation_request::CalculationRequest;
pub use calculation_response::CalculationResponse;
pub use calculator_form::CalculatorForm;
pub use lifestyle::Lifestyle;
