use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{ErrorBody, FetchDealsRequest, FetchDealsResponse};
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod controller;

pub use config::{load_settings, Settings};
pub use controller::{
    FailureKind, SubmissionController, SubmissionEffect, SubmissionState, SubmitRejection,
};

/// How a failed submission is surfaced to the operator.
///
/// Every failure is recovered into one of three displayable shapes; nothing
/// from the transport layer propagates as an uncaught fault.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No HTTP response at all (DNS, refused connection, timeout).
    #[error("Failed to reach the server. Is the backend running?")]
    Unreachable {
        #[source]
        source: Option<reqwest::Error>,
    },
    /// The endpoint answered 401.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Any other non-2xx status; `message` is the server's `detail` text
    /// when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Unreachable { .. } => FailureKind::Unreachable,
            FetchError::InvalidCredentials => FailureKind::InvalidCredentials,
            FetchError::Rejected { .. } => FailureKind::ServerRejected,
        }
    }
}

/// Transport seam between the submission controller and the wire, so the
/// state machine is exercisable without a live endpoint.
#[async_trait]
pub trait DealsGateway: Send + Sync {
    async fn fetch_deals(
        &self,
        request: &FetchDealsRequest,
    ) -> Result<FetchDealsResponse, FetchError>;
}

/// HTTP client for the crawler service's single endpoint.
pub struct CrawlerClient {
    http: Client,
    base_url: String,
}

impl CrawlerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    async fn fetch_deals_impl(
        &self,
        request: &FetchDealsRequest,
    ) -> Result<FetchDealsResponse, FetchError> {
        info!(website = %request.website, "submitting credentials to crawler endpoint");

        let response = self
            .http
            .post(format!("{}/get_data", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(website = %request.website, "crawler endpoint unreachable: {err}");
                FetchError::Unreachable { source: Some(err) }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(website = %request.website, "crawler endpoint rejected credentials");
            return Err(FetchError::InvalidCredentials);
        }

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            let message = detail
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!(website = %request.website, status = status.as_u16(), "crawler endpoint rejected request: {message}");
            return Err(FetchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: FetchDealsResponse = response.json().await.map_err(|err| FetchError::Rejected {
            status: status.as_u16(),
            message: format!("invalid response payload: {err}"),
        })?;

        info!(
            website = %body.website,
            deals = body.deals.len(),
            "crawler endpoint returned deals"
        );
        Ok(body)
    }
}

#[async_trait]
impl DealsGateway for CrawlerClient {
    async fn fetch_deals(
        &self,
        request: &FetchDealsRequest,
    ) -> Result<FetchDealsResponse, FetchError> {
        self.fetch_deals_impl(request).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
