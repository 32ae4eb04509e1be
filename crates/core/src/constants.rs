//! Constants used throughout the dashboard core crate.
//!
//! Keeps labels, defaults and URL templates in one place so the HTML and
//! terminal surfaces render identical wording.

/// Page title shown above the disease input.
pub const DASHBOARD_TITLE: &str = "Disease Information Dashboard";

/// Placeholder/label for the disease input field.
pub const INPUT_LABEL: &str = "Enter a disease name";

/// Text shown next to the loading indicator while a lookup is in flight.
pub const SPINNER_TEXT: &str = "Fetching disease information...";

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Path appended to the base URL for chat completions.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "OPENAI_MODEL";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Environment variable holding the server bind address.
pub const DASHBOARD_ADDR_ENV: &str = "DASHBOARD_ADDR";

pub const DEFAULT_DASHBOARD_ADDR: &str = "0.0.0.0:3000";

/// Series label for the recovery rate bar.
pub const RECOVERY_RATE_LABEL: &str = "Recovery Rate";

/// Series label for the mortality rate bar.
pub const MORTALITY_RATE_LABEL: &str = "Mortality Rate";

/// The single shared row index of the statistics chart.
pub const RATE_INDEX_LABEL: &str = "Rate";

/// Label of the recovery options tab.
pub const RECOVERY_OPTIONS_TAB: &str = "Recovery Options";

/// Label of the medications tab.
pub const MEDICATIONS_TAB: &str = "Medications";

/// Label preceding the side-effect lines of a medication panel.
pub const SIDE_EFFECTS_LABEL: &str = "Side Effects";

/// Label of the external reference link.
pub const REFERENCE_LABEL: &str = "Read more on WHO";

/// WHO fact sheet URL prefix; the disease slug is appended.
pub const REFERENCE_URL_PREFIX: &str = "https://www.who.int/news-room/fact-sheets/detail/";

/// Message prefix for model output that is not valid JSON.
pub const PARSE_FAILURE_PREFIX: &str =
    "Failed to decode the response into JSON. Please check the format of the model response.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_address_is_a_socket_address() {
        let addr: std::net::SocketAddr = DEFAULT_DASHBOARD_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 3000);
        assert_eq!(DASHBOARD_ADDR_ENV, "DASHBOARD_ADDR");
    }

    #[test]
    fn reference_prefix_ends_with_slash() {
        assert!(REFERENCE_URL_PREFIX.ends_with('/'));
        assert!(CHAT_COMPLETIONS_PATH.starts_with('/'));
    }
}
