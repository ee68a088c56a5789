//! Submission state machine: form fields, in-flight guard, and outcome
//! classification for the credential form.

use shared::domain::Site;
use shared::protocol::{FetchDealsRequest, FetchDealsResponse};
use thiserror::Error;

use crate::{DealsGateway, FetchError};

/// Outcome classification carried by [`SubmissionState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    InvalidCredentials,
    ServerRejected,
}

/// Exactly one of these holds at any time. There is no terminal state; any
/// settled state re-enters `InFlight` on the next accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Failed {
        kind: FailureKind,
        message: String,
    },
    Succeeded {
        result: FetchDealsResponse,
    },
}

/// Side effect the UI must perform alongside a state transition.
///
/// Declared here rather than done imperatively in the view so the
/// credential-rejection recovery path is testable without a rendering
/// environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEffect {
    FocusPassword,
}

/// Why a `submit` call was not accepted. The controller state is unchanged
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("username must not be empty")]
    MissingUsername,
    #[error("password must not be empty")]
    MissingPassword,
}

/// Owns the form field values, guards the single outstanding request, and
/// exposes a render-ready state.
#[derive(Debug)]
pub struct SubmissionController {
    site: Site,
    username: String,
    password: String,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            username: String::new(),
            password: String::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, SubmissionState::InFlight)
    }

    /// Updates the site only. Username and password survive a site switch:
    /// the same operator may reuse credentials across sites.
    pub fn change_site(&mut self, site: Site) {
        self.site = site;
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Accepts or rejects a submission. On accept the controller enters
    /// `InFlight` (dropping any previous error/result) and hands back a
    /// request snapshot; field edits after this point do not affect the
    /// request already issued.
    pub fn begin_submit(&mut self) -> Result<FetchDealsRequest, SubmitRejection> {
        if self.is_in_flight() {
            return Err(SubmitRejection::AlreadyInFlight);
        }
        if self.username.trim().is_empty() {
            return Err(SubmitRejection::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(SubmitRejection::MissingPassword);
        }

        self.state = SubmissionState::InFlight;
        Ok(FetchDealsRequest {
            website: self.site.identifier().to_string(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Settles the in-flight submission. Always leaves a terminal state,
    /// whichever branch fired. Rejected credentials additionally clear the
    /// stored password and ask the UI to refocus the password field.
    pub fn resolve(
        &mut self,
        outcome: Result<FetchDealsResponse, FetchError>,
    ) -> Option<SubmissionEffect> {
        match outcome {
            Ok(result) => {
                self.state = SubmissionState::Succeeded { result };
                None
            }
            Err(err) => {
                let kind = err.kind();
                self.state = SubmissionState::Failed {
                    kind,
                    message: err.to_string(),
                };
                if kind == FailureKind::InvalidCredentials {
                    self.password.clear();
                    Some(SubmissionEffect::FocusPassword)
                } else {
                    None
                }
            }
        }
    }

    /// One full submission round-trip: guard, issue exactly one request,
    /// settle. Both gateway branches run through [`Self::resolve`], so
    /// `InFlight` cannot persist past completion.
    pub async fn submit(
        &mut self,
        gateway: &dyn DealsGateway,
    ) -> Result<Option<SubmissionEffect>, SubmitRejection> {
        let request = self.begin_submit()?;
        let outcome = gateway.fetch_deals(&request).await;
        Ok(self.resolve(outcome))
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
