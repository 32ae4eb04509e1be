//! Instructional prompt sent to the language model.
//!
//! The prompt fixes the JSON shape the renderer expects. The disease name is
//! embedded as given; no sanitisation or length limit is applied.

/// Shape each medication entry must follow.
const MEDICATION_TEMPLATE: &str = r#"{
        "name": "",
        "dosage": "",
        "side_effects": [
            {"name": "", "description": "", "rating": ""},
            ...
        ]
    }"#;

/// Build the system message asking for a structured report on `disease_name`.
pub fn build_prompt(disease_name: &str) -> String {
    format!(
        r#"Provide information about {disease_name} covering:
    1. Key Statistics,
    2. Recovery Options,
    3. Recommended Medications.
Respond with a single JSON object using exactly these keys:
    "name" (the disease name),
    "statistics" containing "total_cases" (always a number), "recovery_rate" (always a percentage) and "mortality_rate" (always a percentage),
    "recovery_options" (an object mapping each recovery option to a detailed explanation),
    "medication" (a list; give dosages and example side effects for each).
For each side effect give a short description and a rating on the scale ("mild", "moderate", "severe").
Every medication entry must use this format: {MEDICATION_TEMPLATE}
Return only raw valid JSON. Do not wrap it in backticks or markdown formatting.
All numbers must be actual numeric values (e.g., 463000000, not "463 million")."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_disease_name_verbatim() {
        let prompt = build_prompt("Lyme <Disease> \"quoted\"");
        assert!(prompt.contains("about Lyme <Disease> \"quoted\" covering"));
    }

    #[test]
    fn names_required_topics_and_keys() {
        let prompt = build_prompt("Malaria");
        for topic in ["Key Statistics", "Recovery Options", "Recommended Medications"] {
            assert!(prompt.contains(topic), "missing topic {topic}");
        }
        for key in [
            "\"name\"",
            "\"statistics\"",
            "\"total_cases\"",
            "\"recovery_rate\"",
            "\"mortality_rate\"",
            "\"recovery_options\"",
            "\"medication\"",
            "\"side_effects\"",
            "\"dosage\"",
            "\"rating\"",
        ] {
            assert!(prompt.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn forbids_markdown_and_formatted_numbers() {
        let prompt = build_prompt("Malaria");
        assert!(prompt.contains("Do not wrap it in backticks"));
        assert!(prompt.contains("463000000, not \"463 million\""));
        assert!(prompt.contains("\"mild\", \"moderate\", \"severe\""));
    }
}
