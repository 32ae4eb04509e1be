//! # Dashboard Core
//!
//! Core logic for the disease information dashboard.
//!
//! This crate contains the whole request/response/render pipeline:
//! - building the instructional prompt and calling the completion endpoint
//! - parsing the model's reply into a typed report
//! - producing a surface-independent [`Dashboard`] view model
//!
//! **No API concerns**: HTTP routing and HTML belong in `api-rest`, terminal
//! output in `dashboard-cli`.

pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod prompt;
pub mod report;
pub mod requester;
pub mod service;
pub mod text;

pub use config::DashboardConfig;
pub use dashboard::{
    render_report, BarChart, ChartSeries, Dashboard, MedicationPanel, ParseFailure,
    RecoveryOptionSection, ReferenceLink, RenderOutcome, Severity, SideEffectLine,
};
pub use error::{DashboardError, DashboardResult};
pub use report::DiseaseReport;
pub use requester::{CompletionClient, CompletionFuture, InformationRequester, OpenAiClient};
pub use service::DashboardService;
