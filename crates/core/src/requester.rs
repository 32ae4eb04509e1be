//! Information requester: sends the report prompt to a chat-completion endpoint.
//!
//! The outbound call sits behind [`CompletionClient`] so that the HTTP surface
//! and tests can substitute the transport. Output is returned verbatim: no
//! post-processing, no retry and no timeout beyond the HTTP client's default.

use crate::config::DashboardConfig;
use crate::constants::CHAT_COMPLETIONS_PATH;
use crate::prompt::build_prompt;
use crate::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`CompletionClient::complete`].
pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = DashboardResult<String>> + Send + 'a>>;

/// A text-generation backend that answers a single system-role message.
pub trait CompletionClient: Send + Sync {
    /// Send `system_message` as the only message and return the raw reply text.
    fn complete<'a>(&'a self, system_message: &'a str) -> CompletionFuture<'a>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    config: DashboardConfig,
}

impl OpenAiClient {
    /// Creates a client for the endpoint described by `config`.
    ///
    /// # Errors
    /// Returns [`DashboardError::ClientBuild`] if the TLS backend cannot be initialised.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(DashboardError::ClientBuild)?;
        let endpoint = format!("{}{}", config.api_base_url(), CHAT_COMPLETIONS_PATH);

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, system_message: &str) -> DashboardResult<String> {
        let body = ChatCompletionReq {
            model: self.config.model(),
            messages: vec![ChatMessage {
                role: "system",
                content: system_message,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.config.api_key())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletionRes = response.json().await?;
        first_choice_content(completion)
    }
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(&'a self, system_message: &'a str) -> CompletionFuture<'a> {
        Box::pin(self.send(system_message))
    }
}

/// Requests raw disease reports from a [`CompletionClient`].
#[derive(Clone)]
pub struct InformationRequester {
    client: Arc<dyn CompletionClient>,
}

impl InformationRequester {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Ask the model for a report on `disease_name` and return its raw text.
    ///
    /// Every call makes one outbound request; nothing is cached.
    ///
    /// # Errors
    /// Transport, HTTP status and authentication failures propagate unchanged.
    pub async fn request_report(&self, disease_name: &str) -> DashboardResult<String> {
        let prompt = build_prompt(disease_name);
        tracing::info!(disease = disease_name, "requesting disease report");
        let raw = self.client.complete(&prompt).await?;
        tracing::debug!(bytes = raw.len(), "received completion");
        Ok(raw)
    }
}

#[derive(Serialize)]
struct ChatCompletionReq<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionRes {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_choice_content(completion: ChatCompletionRes) -> DashboardResult<String> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(DashboardError::EmptyCompletion)
}
