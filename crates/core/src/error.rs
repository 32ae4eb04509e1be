/// Errors raised while requesting or rendering a disease report.
///
/// Malformed JSON from the model is deliberately not represented here: it is a
/// handled outcome (see [`crate::RenderOutcome::ParseFailed`]), not a fault.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion response contained no message content")]
    EmptyCompletion,
    #[error("report does not match the expected schema at {path}: {message}")]
    Schema { path: String, message: String },
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
