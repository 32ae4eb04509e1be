//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! requester. Request handling never reads process-wide environment variables.

use crate::constants::{API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::{DashboardError, DashboardResult};
use std::fmt;

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct DashboardConfig {
    api_key: String,
    model: String,
    api_base_url: String,
}

impl DashboardConfig {
    /// Create a new `DashboardConfig`.
    ///
    /// # Errors
    /// Returns an error if the API key is blank, the model name is blank, or the
    /// base URL is not an `http(s)` URL.
    pub fn new(api_key: String, model: String, api_base_url: String) -> DashboardResult<Self> {
        if api_key.trim().is_empty() {
            return Err(DashboardError::MissingApiKey(API_KEY_ENV));
        }
        if model.trim().is_empty() {
            return Err(DashboardError::InvalidInput("model cannot be empty".into()));
        }

        let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();
        if !(api_base_url.starts_with("https://") || api_base_url.starts_with("http://")) {
            return Err(DashboardError::InvalidInput(format!(
                "API base URL must start with http:// or https://, got {api_base_url:?}"
            )));
        }

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: model.trim().to_string(),
            api_base_url,
        })
    }

    /// Build a config from optional raw environment values.
    ///
    /// Missing or whitespace-only model and base URL fall back to the defaults.
    /// This does not read the environment itself so it can be tested without
    /// mutating process state.
    pub fn from_env_values(
        api_key: Option<String>,
        model: Option<String>,
        api_base_url: Option<String>,
    ) -> DashboardResult<Self> {
        let api_key = api_key.ok_or(DashboardError::MissingApiKey(API_KEY_ENV))?;
        let model = non_blank(model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base_url = non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        Self::new(api_key, model, api_base_url)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_given() {
        let cfg = DashboardConfig::from_env_values(Some("sk-test".into()), None, None)
            .expect("config");
        assert_eq!(cfg.model(), DEFAULT_MODEL);
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.api_key(), "sk-test");
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let cfg = DashboardConfig::from_env_values(
            Some("sk-test".into()),
            Some("   ".into()),
            Some(String::new()),
        )
        .expect("config");
        assert_eq!(cfg.model(), DEFAULT_MODEL);
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = DashboardConfig::from_env_values(None, None, None).unwrap_err();
        assert!(matches!(err, DashboardError::MissingApiKey(API_KEY_ENV)));

        let err = DashboardConfig::from_env_values(Some("  ".into()), None, None).unwrap_err();
        assert!(matches!(err, DashboardError::MissingApiKey(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let cfg = DashboardConfig::from_env_values(
            Some("sk-test".into()),
            Some("gpt-4o".into()),
            Some("http://localhost:8080/v1/".into()),
        )
        .expect("config");
        assert_eq!(cfg.api_base_url(), "http://localhost:8080/v1");
        assert_eq!(cfg.model(), "gpt-4o");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = DashboardConfig::from_env_values(
            Some("sk-test".into()),
            None,
            Some("ftp://example.org".into()),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = DashboardConfig::from_env_values(Some("sk-secret".into()), None, None)
            .expect("config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
