//! Client-side pipeline for the retirement calculator: validate raw form
//! input, build the request, submit it through a pluggable transport, and
//! turn the outcome into a state a UI can render.

pub mod client;
pub mod errors;
mod lenient;
pub mod models;
pub mod notify;
pub mod numbers;
pub mod request;
pub mod response;
pub mod submission;
pub mod validation;

pub use client::{CalculationClient, ClientConfig, ClientError, ClientFactory, ClientRegistry};
pub use errors::{CalculationFailure, FailureKind, normalize};
pub use models::*;
pub use notify::{Notifier, TracingNotifier};
pub use request::RequestBuilder;
pub use response::{ResponseShapeError, validate_response};
pub use submission::{SubmissionMachine, SubmissionState, SubmitOutcome};
pub use validation::{FieldName, IssueKind, ValidatedForm, ValidationIssue, validate_form};
