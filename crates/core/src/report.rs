//! Disease report wire model and typed extraction.
//!
//! The model's reply is first parsed as untyped JSON by the renderer. This
//! module then maps that JSON onto [`DiseaseReport`], coercing numeric fields
//! and reporting the JSON path of the first field that does not fit.
//!
//! Notes:
//! - Unknown keys are ignored; the model often adds extras.
//! - `recovery_options` keeps the insertion order of the source object.
//! - Side-effect ratings are free text and are not validated.

use crate::{DashboardError, DashboardResult};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Structured description of a disease returned by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseReport {
    pub name: String,
    pub statistics: Statistics,
    /// Option key and description, in source order.
    pub recovery_options: Vec<(String, String)>,
    pub medication: Vec<Medication>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    /// `None` when the model gave something that is not a number.
    pub total_cases: Option<f64>,
    pub recovery_rate: f64,
    pub mortality_rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub side_effects: Vec<SideEffect>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SideEffect {
    pub name: String,
    pub description: String,
    /// Informal severity label, usually mild, moderate or severe.
    pub rating: String,
}

impl DiseaseReport {
    /// Extract a report from already-parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Schema`] naming the failing path (for example
    /// `medication[0].side_effects`) when a required key is missing, a rate is
    /// not numeric, or a value has the wrong shape.
    pub fn from_value(value: Value) -> DashboardResult<Self> {
        let wire = match serde_path_to_error::deserialize::<_, ReportWire>(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(DashboardError::Schema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        Ok(wire_to_domain(wire))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Deserialize)]
struct ReportWire {
    name: Text,
    statistics: StatisticsWire,
    #[serde(deserialize_with = "ordered_entries")]
    recovery_options: Vec<(String, Text)>,
    medication: Vec<MedicationWire>,
}

#[derive(Deserialize)]
struct StatisticsWire {
    #[serde(default, deserialize_with = "lenient_count")]
    total_cases: Option<f64>,
    #[serde(deserialize_with = "rate")]
    recovery_rate: f64,
    #[serde(deserialize_with = "rate")]
    mortality_rate: f64,
}

#[derive(Deserialize)]
struct MedicationWire {
    name: Text,
    dosage: Text,
    side_effects: Vec<SideEffectWire>,
}

#[derive(Deserialize)]
struct SideEffectWire {
    name: Text,
    description: Text,
    rating: Text,
}

/// Any non-null JSON value, kept as display text.
///
/// Strings are used as-is; numbers, booleans, arrays and objects become their
/// JSON text.
struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Err(de::Error::custom("expected text, found null")),
            Value::String(s) => Ok(Text(s)),
            other => Ok(Text(other.to_string())),
        }
    }
}

// ============================================================================
// Field coercion (internal)
// ============================================================================

/// Coerce a rate to `f64`, accepting JSON numbers and numeric strings.
fn rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(de::Error::custom(format!(
            "expected a numeric percentage, found {value}"
        ))),
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Read a JSON object as an ordered list of entries.
fn ordered_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, Text)>, D::Error> {
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Text)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping option names to descriptions")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, text)) = map.next_entry::<String, Text>()? {
                entries.push((key, text));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

fn wire_to_domain(wire: ReportWire) -> DiseaseReport {
    DiseaseReport {
        name: wire.name.0,
        statistics: Statistics {
            total_cases: wire.statistics.total_cases,
            recovery_rate: wire.statistics.recovery_rate,
            mortality_rate: wire.statistics.mortality_rate,
        },
        recovery_options: wire
            .recovery_options
            .into_iter()
            .map(|(key, text)| (key, text.0))
            .collect(),
        medication: wire
            .medication
            .into_iter()
            .map(|m| Medication {
                name: m.name.0,
                dosage: m.dosage.0,
                side_effects: m
                    .side_effects
                    .into_iter()
                    .map(|s| SideEffect {
                        name: s.name.0,
                        description: s.description.0,
                        rating: s.rating.0,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Lyme Disease",
            "statistics": {
                "total_cases": 476000,
                "recovery_rate": 72.5,
                "mortality_rate": 3.1
            },
            "recovery_options": {
                "zinc_supplements": "Short course.",
                "antibiotics": "Doxycycline for 10 to 21 days.",
                "lifestyle_changes": "Rest and hydration."
            },
            "medication": [{
                "name": "Ibuprofen",
                "dosage": "200-400 mg every 4-6 hours",
                "side_effects": [
                    {"name": "Nausea", "description": "Mild stomach upset", "rating": "mild"}
                ]
            }]
        })
    }

    #[test]
    fn extracts_full_report() {
        let report = DiseaseReport::from_value(sample()).expect("report");
        assert_eq!(report.name, "Lyme Disease");
        assert_eq!(report.statistics.total_cases, Some(476000.0));
        assert_eq!(report.statistics.recovery_rate, 72.5);
        assert_eq!(report.statistics.mortality_rate, 3.1);
        assert_eq!(report.medication.len(), 1);
        assert_eq!(report.medication[0].side_effects[0].rating, "mild");
    }

    #[test]
    fn recovery_options_keep_source_order() {
        let report = DiseaseReport::from_value(sample()).expect("report");
        let keys: Vec<&str> = report
            .recovery_options
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["zinc_supplements", "antibiotics", "lifestyle_changes"]);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut value = sample();
        value["statistics"]["recovery_rate"] = json!(" 80.25 ");
        value["statistics"]["mortality_rate"] = json!("2");
        value["statistics"]["total_cases"] = json!("1,200");

        let report = DiseaseReport::from_value(value).expect("report");
        assert_eq!(report.statistics.recovery_rate, 80.25);
        assert_eq!(report.statistics.mortality_rate, 2.0);
        assert_eq!(report.statistics.total_cases, Some(1200.0));
    }

    #[test]
    fn non_numeric_rate_is_a_schema_fault() {
        let mut value = sample();
        value["statistics"]["mortality_rate"] = json!("high");

        match DiseaseReport::from_value(value) {
            Err(DashboardError::Schema { path, message }) => {
                assert_eq!(path, "statistics.mortality_rate");
                assert!(message.contains("numeric percentage"), "{message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_rate_strings_are_schema_faults() {
        for text in ["inf", " -Infinity ", "NaN"] {
            let mut value = sample();
            value["statistics"]["recovery_rate"] = json!(text);

            match DiseaseReport::from_value(value) {
                Err(DashboardError::Schema { path, message }) => {
                    assert_eq!(path, "statistics.recovery_rate");
                    assert!(message.contains("numeric percentage"), "{message}");
                }
                other => panic!("expected Schema error for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unparseable_total_cases_is_unknown() {
        let mut value = sample();
        value["statistics"]["total_cases"] = json!("463 million");
        let report = DiseaseReport::from_value(value).expect("report");
        assert_eq!(report.statistics.total_cases, None);

        let mut value = sample();
        value["statistics"]
            .as_object_mut()
            .unwrap()
            .remove("total_cases");
        let report = DiseaseReport::from_value(value).expect("report");
        assert_eq!(report.statistics.total_cases, None);
    }

    #[test]
    fn missing_medication_names_the_path() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("medication");

        match DiseaseReport::from_value(value) {
            Err(DashboardError::Schema { message, .. }) => {
                assert!(message.contains("medication"), "{message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_side_effects_names_the_path() {
        let mut value = sample();
        value["medication"][0]
            .as_object_mut()
            .unwrap()
            .remove("side_effects");

        match DiseaseReport::from_value(value) {
            Err(DashboardError::Schema { path, message }) => {
                assert!(path.starts_with("medication[0]"), "{path}");
                assert!(message.contains("side_effects"), "{message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn non_object_root_is_a_schema_fault() {
        match DiseaseReport::from_value(json!("Lyme Disease")) {
            Err(DashboardError::Schema { path, .. }) => assert_eq!(path, "<root>"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn extra_keys_are_ignored_and_scalars_become_text() {
        let mut value = sample();
        value["source"] = json!("WHO");
        value["medication"][0]["dosage"] = json!(500);
        value["recovery_options"]["rest"] = json!(["sleep", "fluids"]);

        let report = DiseaseReport::from_value(value).expect("report");
        assert_eq!(report.medication[0].dosage, "500");
        assert_eq!(
            report.recovery_options.last().unwrap(),
            &("rest".to_string(), "[\"sleep\",\"fluids\"]".to_string())
        );
    }

    #[test]
    fn null_text_is_rejected() {
        let mut value = sample();
        value["medication"][0]["side_effects"][0]["description"] = Value::Null;

        match DiseaseReport::from_value(value) {
            Err(DashboardError::Schema { path, message }) => {
                assert_eq!(path, "medication[0].side_effects[0].description");
                assert!(message.contains("null"), "{message}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
