//! Failure taxonomy for a submission attempt and the single mapping from a
//! failure to the text the user sees.

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::{ClientError, ErrorBody};
use crate::response::ResponseShapeError;

/// Shown when the server gave no usable explanation.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while calculating retirement savings.";

/// Shown when the server answered with something that is not a valid result.
pub const RETRY_ERROR_MESSAGE: &str = "Error calculating retirement savings. Please try again.";

/// Prefix marking messages that originate on the client side.
pub const CLIENT_ERROR_PREFIX: &str = "Client error: ";

/// Everything that can end a submission after validation passed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationFailure {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    ResponseShape(#[from] ResponseShapeError),
}

/// Coarse classification used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
    /// The server broke the response contract.
    ResponseShape,
}

impl CalculationFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Client(ClientError::Transport { .. } | ClientError::Configuration(_)) => {
                FailureKind::Transport
            }
            Self::Client(ClientError::Server { .. }) => FailureKind::Server,
            Self::Client(ClientError::Decode { .. }) | Self::ResponseShape(_) => {
                FailureKind::ResponseShape
            }
        }
    }

    /// `true` when the server answered successfully but broke the contract.
    pub fn is_contract_violation(&self) -> bool {
        self.kind() == FailureKind::ResponseShape
    }
}

/// Maps a failure to the message presented to the user.
///
/// Precedence is fixed:
/// 1. Client-side failures carry their transport text behind
///    [`CLIENT_ERROR_PREFIX`].
/// 2. A server error body's `message`, else its `error`, verbatim.
/// 3. Otherwise a fixed generic message.
///
/// Blank strings count as absent.
pub fn normalize(failure: &CalculationFailure) -> String {
    let message = match failure {
        CalculationFailure::Client(
            ClientError::Transport { detail } | ClientError::Configuration(detail),
        ) => client_message(detail),
        CalculationFailure::Client(ClientError::Server { status, body }) => {
            server_message(*status, body.as_ref())
        }
        CalculationFailure::Client(ClientError::Decode { .. })
        | CalculationFailure::ResponseShape(_) => RETRY_ERROR_MESSAGE.to_string(),
    };

    warn!(kind = ?failure.kind(), %failure, %message, "calculation failed");
    message
}

fn client_message(detail: &str) -> String {
    match detail.trim() {
        "" => GENERIC_ERROR_MESSAGE.to_string(),
        detail => format!("{CLIENT_ERROR_PREFIX}{detail}"),
    }
}

fn server_message(
    status: u16,
    body: Option<&ErrorBody>,
) -> String {
    let Some(body) = body else {
        return GENERIC_ERROR_MESSAGE.to_string();
    };

    for field_error in body.field_errors.iter().flatten() {
        debug!(
            status,
            field = %field_error.field,
            message = field_error.message.as_deref().unwrap_or_default(),
            "server rejected field"
        );
    }

    [&body.message, &body.error]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map_or_else(|| GENERIC_ERROR_MESSAGE.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::FieldError;

    fn server(body: Option<ErrorBody>) -> CalculationFailure {
        CalculationFailure::Client(ClientError::Server { status: 400, body })
    }

    fn body(
        message: Option<&str>,
        error: Option<&str>,
    ) -> ErrorBody {
        ErrorBody {
            message: message.map(str::to_string),
            error: error.map(str::to_string),
            ..Default::default()
        }
    }

    // =========================================================================
    // transport failures
    // =========================================================================

    #[test]
    fn transport_failure_is_prefixed_as_client_error() {
        let failure = CalculationFailure::from(ClientError::Transport {
            detail: "connection refused".to_string(),
        });

        assert_eq!(normalize(&failure), "Client error: connection refused");
    }

    #[test]
    fn transport_failure_without_text_is_generic() {
        let failure = CalculationFailure::from(ClientError::Transport {
            detail: "  ".to_string(),
        });

        assert_eq!(normalize(&failure), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn configuration_failure_is_client_side() {
        let failure = CalculationFailure::from(ClientError::Configuration(
            "relative URL without a base".to_string(),
        ));

        assert_eq!(normalize(&failure), "Client error: relative URL without a base");
        assert_eq!(failure.kind(), FailureKind::Transport);
    }

    // =========================================================================
    // server failures
    // =========================================================================

    #[test]
    fn server_failure_without_body_is_generic() {
        assert_eq!(normalize(&server(None)), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn server_error_field_is_surfaced_verbatim() {
        let failure = server(Some(body(None, Some("Rate limit exceeded"))));

        assert_eq!(normalize(&failure), "Rate limit exceeded");
    }

    #[test]
    fn server_message_field_is_surfaced_verbatim() {
        let failure = server(Some(body(Some("Lifestyle not found: luxury"), None)));

        assert_eq!(normalize(&failure), "Lifestyle not found: luxury");
    }

    #[test]
    fn message_takes_precedence_over_error() {
        let failure = server(Some(body(Some("A"), Some("B"))));

        assert_eq!(normalize(&failure), "A");
    }

    #[test]
    fn blank_message_falls_back_to_error() {
        let failure = server(Some(body(Some(""), Some("B"))));

        assert_eq!(normalize(&failure), "B");
    }

    #[test]
    fn empty_body_is_generic() {
        let failure = server(Some(ErrorBody::default()));

        assert_eq!(normalize(&failure), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn field_errors_do_not_replace_top_level_message() {
        let failure = server(Some(ErrorBody {
            message: Some("Request validation failed".to_string()),
            error: Some("Validation Error".to_string()),
            field_errors: Some(vec![FieldError {
                field: "currentAge".to_string(),
                rejected_value: None,
                message: Some("Current age must be at least 18 years".to_string()),
            }]),
            ..Default::default()
        }));

        assert_eq!(normalize(&failure), "Request validation failed");
    }

    #[test]
    fn message_survives_mistyped_envelope_fields() {
        let bodies: [&[u8]; 2] = [
            br#"{"message":"A","status":"400"}"#,
            br#"{"message":"A","fieldErrors":[{"message":"x"}]}"#,
        ];

        for bytes in bodies {
            let failure = server(ErrorBody::from_slice(bytes));

            assert_eq!(normalize(&failure), "A");
        }
    }

    // =========================================================================
    // contract violations
    // =========================================================================

    #[test]
    fn response_shape_failure_is_generic_not_raw() {
        let failure =
            CalculationFailure::from(ResponseShapeError::MissingField("monthlyDeposit"));

        let message = normalize(&failure);

        assert_eq!(message, RETRY_ERROR_MESSAGE);
        assert!(!message.contains("monthlyDeposit"));
    }

    #[test]
    fn undecodable_body_is_generic() {
        let failure = CalculationFailure::from(ClientError::Decode {
            detail: "expected value at line 1 column 1".to_string(),
        });

        assert_eq!(normalize(&failure), RETRY_ERROR_MESSAGE);
    }

    #[test]
    fn shape_failures_are_distinguishable_from_server_failures() {
        let shape = CalculationFailure::from(ResponseShapeError::MissingField("monthlyDeposit"));
        let server = server(None);

        assert!(shape.is_contract_violation());
        assert!(!server.is_contract_violation());
        assert_eq!(shape.kind(), FailureKind::ResponseShape);
        assert_eq!(server.kind(), FailureKind::Server);
    }

    #[test]
    fn normalize_is_deterministic() {
        let failure = server(Some(body(Some("A"), Some("B"))));

        assert_eq!(normalize(&failure), normalize(&failure));
    }
}
