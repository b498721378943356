//! The submission state machine.
//!
//! ```text
//!   Idle ──submit──▶ Validating ──issues──▶ Idle
//!                        │
//!                        └──valid──▶ InFlight ──ok──▶ Succeeded(response)
//!                                        └──────err──▶ Failed(message)
//!   Succeeded / Failed ──submit──▶ Validating
//! ```
//!
//! State is published on a [`tokio::sync::watch`] channel so a UI can
//! observe it without being able to change it. A submit while a previous one
//! is still validating or in flight is ignored, which keeps at most one
//! network call open per machine.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::CalculationClient;
use crate::errors::{CalculationFailure, normalize};
use crate::models::{CalculationResponse, CalculatorForm};
use crate::notify::Notifier;
use crate::request::RequestBuilder;
use crate::response::validate_response;
use crate::validation::{ValidationIssue, validate_form};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded(CalculationResponse),
    /// Carries the normalized, user-facing message.
    Failed(String),
}

impl SubmissionState {
    /// `true` while a network call is open; UIs disable the submit control.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// `true` while a submission is being processed and a new one would be
    /// ignored.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::InFlight)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::InFlight => "in-flight",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// What a call to [`SubmissionMachine::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was still running; nothing happened.
    Ignored,
    /// Validation failed; no request was sent.
    Blocked(Vec<ValidationIssue>),
    /// The request completed; holds the resulting state.
    Settled(SubmissionState),
}

/// Drives validate → submit → normalize for one form instance.
pub struct SubmissionMachine {
    client: Arc<dyn CalculationClient>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<SubmissionState>,
    issues: watch::Sender<Vec<ValidationIssue>>,
}

impl SubmissionMachine {
    pub fn new(
        client: Arc<dyn CalculationClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            notifier,
            state: watch::Sender::new(SubmissionState::Idle),
            issues: watch::Sender::new(Vec::new()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Read-only handle on the latest state. States replaced without a
    /// suspension in between (`Validating` right before `InFlight`) are
    /// coalesced.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Issues from the most recent blocked submission; empty once a
    /// submission passes validation.
    pub fn last_issues(&self) -> Vec<ValidationIssue> {
        self.issues.borrow().clone()
    }

    /// Runs one submission attempt to completion.
    ///
    /// The only suspension point is the client call. Dropping the returned
    /// future while the call is open puts the machine back to
    /// [`SubmissionState::Idle`].
    pub async fn submit(
        &self,
        form: &CalculatorForm,
    ) -> SubmitOutcome {
        let accepted = self.state.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            *state = SubmissionState::Validating;
            true
        });
        if !accepted {
            warn!("submission ignored; a calculation is already in progress");
            return SubmitOutcome::Ignored;
        }
        debug!("state -> validating");

        let validated = match validate_form(form) {
            Ok(validated) => validated,
            Err(issues) => {
                warn!(count = issues.len(), "submission blocked by validation");
                self.issues.send_replace(issues.clone());
                self.transition(SubmissionState::Idle);
                return SubmitOutcome::Blocked(issues);
            }
        };
        self.issues.send_replace(Vec::new());

        let request = RequestBuilder::build(validated);
        self.transition(SubmissionState::InFlight);
        debug!(
            current_age = request.current_age(),
            retirement_age = request.retirement_age(),
            lifestyle = %request.lifestyle_type(),
            "submitting calculation"
        );

        let guard = InFlightGuard::new(&self.state);
        let result = self.client.calculate(&request).await;
        guard.disarm();

        let next = match result
            .map_err(CalculationFailure::from)
            .and_then(|body| validate_response(body).map_err(CalculationFailure::from))
        {
            Ok(response) => {
                info!(
                    total_retirement_savings = %response.total_retirement_savings,
                    monthly_deposit = %response.monthly_deposit,
                    years_to_retirement = %response.years_to_retirement,
                    "calculation succeeded"
                );
                SubmissionState::Succeeded(response)
            }
            Err(failure) => {
                let message = normalize(&failure);
                self.notifier.notify(&message);
                SubmissionState::Failed(message)
            }
        };

        self.transition(next.clone());
        SubmitOutcome::Settled(next)
    }

    fn transition(
        &self,
        next: SubmissionState,
    ) {
        debug!("state -> {}", next.name());
        self.state.send_replace(next);
    }
}

/// Resets an abandoned in-flight submission to `Idle` on drop.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<SubmissionState>,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(state: &'a watch::Sender<SubmissionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("in-flight submission abandoned");
            self.state.send_replace(SubmissionState::Idle);
        }
    }
}
