//! Response renderer: turns raw model output into a [`Dashboard`].
//!
//! The dashboard is a surface-independent view model. The HTML page and the
//! terminal CLI both draw from it, so labels and ordering live here rather than
//! in either surface.
//!
//! Rendering steps:
//! 1. parse the raw text as JSON (the only handled failure),
//! 2. extract the report and build the statistics chart,
//! 3. build the recovery options tab,
//! 4. build the medications tab,
//! 5. build the reference link.
//!
//! Any fault after step 1 aborts the whole render; no partial dashboard is
//! produced.

use crate::constants::{
    MORTALITY_RATE_LABEL, PARSE_FAILURE_PREFIX, RATE_INDEX_LABEL, RECOVERY_RATE_LABEL,
    REFERENCE_LABEL,
};
use crate::report::{DiseaseReport, Medication, SideEffect};
use crate::text::{option_heading, reference_url};
use crate::DashboardResult;
use serde::Serialize;
use utoipa::ToSchema;

/// Result of rendering one model response.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Rendered(Dashboard),
    /// The response was not valid JSON; nothing else was rendered.
    ParseFailed(ParseFailure),
}

/// User-visible message for a response that could not be parsed as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParseFailure {
    pub message: String,
}

impl ParseFailure {
    fn new(err: &serde_json::Error) -> Self {
        Self {
            message: format!("{PARSE_FAILURE_PREFIX} {err}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct Dashboard {
    pub disease_name: String,
    /// `Statistics for {name}`.
    pub statistics_heading: String,
    pub total_cases: Option<f64>,
    pub chart: BarChart,
    pub recovery_options: Vec<RecoveryOptionSection>,
    pub medications: Vec<MedicationPanel>,
    pub reference: ReferenceLink,
}

/// Bar chart with one bar per series at each index position.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct BarChart {
    pub index: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// When false each series is drawn with its own extent rather than summed.
    pub stacked: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ChartSeries {
    pub label: String,
    /// One value per entry in [`BarChart::index`].
    pub values: Vec<f64>,
}

impl BarChart {
    /// Largest plotted value, or `0.0` for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecoveryOptionSection {
    pub heading: String,
    pub description: String,
}

/// Collapsible panel describing one medication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct MedicationPanel {
    /// Collapsible header text.
    pub title: String,
    pub expanded: bool,
    pub heading: String,
    pub dosage: String,
    pub side_effects: Vec<SideEffectLine>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct SideEffectLine {
    /// `name (rating)`.
    pub label: String,
    pub description: String,
    pub severity: Severity,
}

/// Colour hint derived from a free-text side-effect rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Unrated,
}

impl Severity {
    pub fn from_rating(rating: &str) -> Self {
        match rating.trim().to_ascii_lowercase().as_str() {
            "mild" => Severity::Mild,
            "moderate" => Severity::Moderate,
            "severe" => Severity::Severe,
            _ => Severity::Unrated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Unrated => "unrated",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReferenceLink {
    pub label: String,
    pub url: String,
}

/// Render raw model output.
///
/// # Returns
/// * `Ok(RenderOutcome::ParseFailed)` - the text is not JSON
/// * `Ok(RenderOutcome::Rendered)` - the full dashboard
///
/// # Errors
/// Returns [`crate::DashboardError::Schema`] if the JSON does not carry the
/// expected report fields.
pub fn render_report(raw_text: &str) -> DashboardResult<RenderOutcome> {
    let value: serde_json::Value = match serde_json::from_str(raw_text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("model response is not valid JSON: {}", err);
            return Ok(RenderOutcome::ParseFailed(ParseFailure::new(&err)));
        }
    };

    let report = DiseaseReport::from_value(value)?;
    Ok(RenderOutcome::Rendered(Dashboard::from_report(&report)))
}

impl Dashboard {
    pub fn from_report(report: &DiseaseReport) -> Self {
        let stats = &report.statistics;

        Self {
            disease_name: report.name.clone(),
            statistics_heading: format!("Statistics for {}", report.name),
            total_cases: stats.total_cases,
            chart: BarChart {
                index: vec![RATE_INDEX_LABEL.to_string()],
                series: vec![
                    ChartSeries {
                        label: RECOVERY_RATE_LABEL.to_string(),
                        values: vec![stats.recovery_rate],
                    },
                    ChartSeries {
                        label: MORTALITY_RATE_LABEL.to_string(),
                        values: vec![stats.mortality_rate],
                    },
                ],
                stacked: false,
            },
            recovery_options: report
                .recovery_options
                .iter()
                .map(|(key, description)| RecoveryOptionSection {
                    heading: option_heading(key),
                    description: description.clone(),
                })
                .collect(),
            medications: report.medication.iter().map(medication_panel).collect(),
            reference: ReferenceLink {
                label: REFERENCE_LABEL.to_string(),
                url: reference_url(&report.name),
            },
        }
    }
}

fn medication_panel(medication: &Medication) -> MedicationPanel {
    MedicationPanel {
        title: medication.name.clone(),
        expanded: false,
        heading: medication.name.clone(),
        dosage: medication.dosage.clone(),
        side_effects: medication.side_effects.iter().map(side_effect_line).collect(),
    }
}

fn side_effect_line(effect: &SideEffect) -> SideEffectLine {
    SideEffectLine {
        label: format!("{} ({})", effect.name, effect.rating),
        description: effect.description.clone(),
        severity: Severity::from_rating(&effect.rating),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DashboardError;

    const SAMPLE: &str = r#"{
        "name": "Lyme Disease",
        "statistics": {"total_cases": 476000, "recovery_rate": 72.5, "mortality_rate": 3.1},
        "recovery_options": {
            "lifestyle_changes": "Rest and hydration.",
            "antibiotic_therapy": "Doxycycline for 10 to 21 days."
        },
        "medication": [
            {
                "name": "Ibuprofen",
                "dosage": "200-400 mg every 4-6 hours",
                "side_effects": [
                    {"name": "Nausea", "description": "Mild stomach upset", "rating": "mild"},
                    {"name": "Ulcers", "description": "Stomach bleeding", "rating": "Severe"}
                ]
            },
            {"name": "Doxycycline", "dosage": "100 mg twice daily", "side_effects": []}
        ]
    }"#;

    fn rendered(raw: &str) -> Dashboard {
        match render_report(raw).expect("render") {
            RenderOutcome::Rendered(dashboard) => dashboard,
            other => panic!("expected dashboard, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_yields_parse_failure_only() {
        let outcome = render_report("Sure! Here is the JSON you asked for").expect("outcome");
        match outcome {
            RenderOutcome::ParseFailed(failure) => {
                assert!(failure.message.starts_with(PARSE_FAILURE_PREFIX));
                assert!(failure.message.contains("line 1 column"), "{}", failure.message);
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn fenced_json_is_not_repaired() {
        let fenced = format!("```json\n{SAMPLE}\n```");
        assert!(matches!(
            render_report(&fenced),
            Ok(RenderOutcome::ParseFailed(_))
        ));
    }

    #[test]
    fn chart_has_two_unstacked_series_under_one_index() {
        let dashboard = rendered(SAMPLE);
        let chart = &dashboard.chart;

        assert!(!chart.stacked);
        assert_eq!(chart.index, vec!["Rate".to_string()]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "Recovery Rate");
        assert_eq!(chart.series[0].values, vec![72.5]);
        assert_eq!(chart.series[1].label, "Mortality Rate");
        assert_eq!(chart.series[1].values, vec![3.1]);
        assert_eq!(chart.max_value(), 72.5);
    }

    #[test]
    fn statistics_heading_and_total_cases() {
        let dashboard = rendered(SAMPLE);
        assert_eq!(dashboard.statistics_heading, "Statistics for Lyme Disease");
        assert_eq!(dashboard.total_cases, Some(476000.0));
    }

    #[test]
    fn recovery_headings_are_title_cased_in_order() {
        let dashboard = rendered(SAMPLE);
        let headings: Vec<&str> = dashboard
            .recovery_options
            .iter()
            .map(|s| s.heading.as_str())
            .collect();
        assert_eq!(headings, ["Lifestyle Changes", "Antibiotic Therapy"]);
        assert_eq!(dashboard.recovery_options[0].description, "Rest and hydration.");
    }

    #[test]
    fn medication_panels_are_collapsed_with_side_effect_lines() {
        let dashboard = rendered(SAMPLE);
        let ibuprofen = &dashboard.medications[0];

        assert_eq!(ibuprofen.title, "Ibuprofen");
        assert_eq!(ibuprofen.heading, "Ibuprofen");
        assert!(!ibuprofen.expanded);
        assert_eq!(ibuprofen.dosage, "200-400 mg every 4-6 hours");
        assert_eq!(ibuprofen.side_effects[0].label, "Nausea (mild)");
        assert_eq!(ibuprofen.side_effects[0].description, "Mild stomach upset");
        assert_eq!(ibuprofen.side_effects[0].severity, Severity::Mild);
        assert_eq!(ibuprofen.side_effects[1].label, "Ulcers (Severe)");
        assert_eq!(ibuprofen.side_effects[1].severity, Severity::Severe);

        assert_eq!(dashboard.medications[1].title, "Doxycycline");
        assert!(dashboard.medications[1].side_effects.is_empty());
    }

    #[test]
    fn reference_link_ends_with_slug() {
        let dashboard = rendered(SAMPLE);
        assert_eq!(dashboard.reference.label, "Read more on WHO");
        assert!(dashboard.reference.url.ends_with("lyme-disease"));
    }

    #[test]
    fn missing_medication_aborts_render() {
        let raw = r#"{
            "name": "Flu",
            "statistics": {"total_cases": 1, "recovery_rate": 99, "mortality_rate": 1},
            "recovery_options": {}
        }"#;
        match render_report(raw) {
            Err(DashboardError::Schema { message, .. }) => {
                assert!(message.contains("medication"), "{message}")
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_rating_is_unrated() {
        assert_eq!(Severity::from_rating(" MODERATE "), Severity::Moderate);
        assert_eq!(Severity::from_rating("rare"), Severity::Unrated);
        assert_eq!(Severity::Unrated.as_str(), "unrated");
    }
}
