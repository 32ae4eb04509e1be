//! Lookup service: one user submission in, one rendered outcome out.

use crate::config::DashboardConfig;
use crate::dashboard::{render_report, RenderOutcome};
use crate::requester::{CompletionClient, InformationRequester, OpenAiClient};
use crate::DashboardResult;
use std::sync::Arc;
use std::time::Instant;

/// Runs the request/parse/render pipeline for a submitted disease name.
///
/// Each call is independent; the service holds no per-request state.
#[derive(Clone)]
pub struct DashboardService {
    requester: InformationRequester,
}

impl DashboardService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            requester: InformationRequester::new(client),
        }
    }

    /// Creates a service backed by [`OpenAiClient`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        let client = OpenAiClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Look up `input` and render the model's answer.
    ///
    /// The input is passed to the prompt unchanged.
    ///
    /// # Returns
    /// * `Ok(None)` - the input is empty or whitespace; no request was made
    /// * `Ok(Some(outcome))` - the rendered dashboard or the parse failure
    ///
    /// # Errors
    /// Transport failures and schema faults abort the lookup.
    pub async fn lookup(&self, input: &str) -> DashboardResult<Option<RenderOutcome>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let started = Instant::now();
        let raw = self.requester.request_report(input).await?;
        let outcome = render_report(&raw)?;

        tracing::info!(
            disease = input,
            parsed = matches!(outcome, RenderOutcome::Rendered(_)),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lookup complete"
        );

        Ok(Some(outcome))
    }
}
