//! Plain-text rendering of a dashboard for terminal output.

use dashboard_core::constants::{MEDICATIONS_TAB, RECOVERY_OPTIONS_TAB, SIDE_EFFECTS_LABEL};
use dashboard_core::text::format_count;
use dashboard_core::{BarChart, Dashboard, MedicationPanel};

const BAR_COLUMNS: f64 = 40.0;

/// Render `dashboard` as text.
///
/// Medication panels are collapsed by default; a collapsed panel prints only
/// its title unless `expand_all` is set.
pub fn render_text(dashboard: &Dashboard, expand_all: bool) -> String {
    let mut out = String::new();

    out.push_str(&dashboard.statistics_heading);
    out.push('\n');
    if let Some(total) = dashboard.total_cases {
        out.push_str(&format!("Total cases: {}\n", format_count(total)));
    }
    out.push('\n');
    out.push_str(&bar_chart(&dashboard.chart));

    out.push_str(&format!("\n== {RECOVERY_OPTIONS_TAB} ==\n"));
    for section in &dashboard.recovery_options {
        out.push_str(&format!("{}\n  {}\n", section.heading, section.description));
    }

    out.push_str(&format!("\n== {MEDICATIONS_TAB} ==\n"));
    for panel in &dashboard.medications {
        medication(&mut out, panel, expand_all);
    }

    out.push_str(&format!(
        "\n{}: {}\n",
        dashboard.reference.label, dashboard.reference.url
    ));
    out
}

fn medication(out: &mut String, panel: &MedicationPanel, expand_all: bool) {
    let open = panel.expanded || expand_all;
    let marker = if open { 'v' } else { '>' };
    out.push_str(&format!("{marker} {}\n", panel.title));
    if !open {
        return;
    }

    out.push_str(&format!("  {}\n", panel.heading));
    out.push_str(&format!("  Dosage: {}\n", panel.dosage));
    out.push_str(&format!("  {SIDE_EFFECTS_LABEL}:\n"));
    for effect in &panel.side_effects {
        out.push_str(&format!("  - {}\n    {}\n", effect.label, effect.description));
    }
}

/// Horizontal grouped bars, one line per series under each index label.
fn bar_chart(chart: &BarChart) -> String {
    let scale_max = chart.max_value().max(100.0);
    let label_width = chart
        .series
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, index) in chart.index.iter().enumerate() {
        out.push_str(index);
        out.push('\n');
        for series in &chart.series {
            let value = series.values.get(i).copied().unwrap_or(0.0);
            let columns = (value.max(0.0) / scale_max * BAR_COLUMNS).round() as usize;
            out.push_str(&format!(
                "  {:<label_width$}  {} {}\n",
                series.label,
                "#".repeat(columns),
                value
            ));
        }
    }
    out
}
