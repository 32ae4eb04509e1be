//! Server-side HTML for the dashboard page.
//!
//! Everything that came from the model or the user is escaped before it is
//! written into the page. Tabs are CSS-only radio groups and medication panels
//! are `<details>` elements, so the page needs no client-side framework. The
//! only script shows the loading indicator while the form submission is pending.

use dashboard_core::constants::{
    DASHBOARD_TITLE, INPUT_LABEL, MEDICATIONS_TAB, RECOVERY_OPTIONS_TAB, SIDE_EFFECTS_LABEL,
    SPINNER_TEXT,
};
use dashboard_core::text::format_count;
use dashboard_core::{BarChart, Dashboard, MedicationPanel, ParseFailure};

/// What to show below the input form.
pub enum PageContent<'a> {
    /// No disease submitted yet.
    Empty,
    Dashboard(&'a Dashboard),
    ParseFailed(&'a ParseFailure),
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #262730; }
main { max-width: 760px; margin: 0 auto; padding: 2rem 1rem; }
form { display: flex; gap: .5rem; align-items: center; flex-wrap: wrap; }
input[name=disease] { flex: 1; padding: .5rem; font-size: 1rem; }
.spinner { margin: 1rem 0; color: #555; }
.spinner .wheel { display: inline-block; width: 1em; height: 1em; border: 2px solid #ccc; border-top-color: #ff4b4b; border-radius: 50%; animation: spin 1s linear infinite; vertical-align: middle; }
@keyframes spin { to { transform: rotate(360deg); } }
.error { background: #ffe6e6; border: 1px solid #ff4b4b; padding: .75rem; border-radius: 4px; }
.caption { color: #555; margin-top: -.5rem; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: .5rem 1rem; cursor: pointer; border-bottom: 2px solid transparent; }
.tabs > input:checked + label { border-bottom-color: #ff4b4b; color: #ff4b4b; }
.tabs > .panel { display: none; padding-top: .5rem; }
#tab-recovery:checked ~ #panel-recovery, #tab-medications:checked ~ #panel-medications { display: block; }
details { border: 1px solid #ddd; border-radius: 4px; margin: .5rem 0; padding: .5rem .75rem; background: #fff; }
summary { cursor: pointer; font-weight: 600; }
.side-effects { list-style: none; padding-left: 0; }
.side-effects li { margin: .5rem 0; padding-left: .5rem; border-left: 4px solid #bbb; }
.severity-mild { border-left-color: #21c354 !important; }
.severity-moderate { border-left-color: #ffbd45 !important; }
.severity-severe { border-left-color: #ff4b4b !important; }
"#;

const SPINNER_SCRIPT: &str = r#"<script>
document.getElementById('lookup').addEventListener('submit', function () {
  document.getElementById('spinner').hidden = false;
});
</script>"#;

/// Render the full page for the current input value.
pub fn render_page(input: &str, content: PageContent<'_>) -> String {
    let mut page = String::with_capacity(8 * 1024);

    page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape(DASHBOARD_TITLE)));
    page.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"));
    page.push_str(&format!("<h1>{}</h1>\n", escape(DASHBOARD_TITLE)));
    page.push_str(&format!(
        "<form id=\"lookup\" method=\"get\" action=\"/\">\n\
         <label for=\"disease\">{label}</label>\n\
         <input id=\"disease\" name=\"disease\" type=\"text\" value=\"{value}\" placeholder=\"{label}\">\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        label = escape(INPUT_LABEL),
        value = escape(input),
    ));
    page.push_str(&format!(
        "<div id=\"spinner\" class=\"spinner\" hidden><span class=\"wheel\"></span> {}</div>\n",
        escape(SPINNER_TEXT)
    ));
    page.push_str(SPINNER_SCRIPT);
    page.push('\n');

    match content {
        PageContent::Empty => {}
        PageContent::ParseFailed(failure) => {
            page.push_str(&format!(
                "<div class=\"error\" role=\"alert\">{}</div>\n",
                escape(&failure.message)
            ));
        }
        PageContent::Dashboard(dashboard) => render_dashboard(&mut page, dashboard),
    }

    page.push_str("</main>\n</body>\n</html>\n");
    page
}

/// Render an error page for faults that abort the lookup.
pub fn render_failure_page(input: &str) -> String {
    let mut page = render_page(input, PageContent::Empty);
    let marker = "</main>";
    if let Some(pos) = page.rfind(marker) {
        page.insert_str(
            pos,
            "<div class=\"error\" role=\"alert\">Something went wrong while fetching disease information. Please try again.</div>\n",
        );
    }
    page
}

fn render_dashboard(page: &mut String, dashboard: &Dashboard) {
    page.push_str(&format!("<h3>{}</h3>\n", escape(&dashboard.statistics_heading)));
    if let Some(total) = dashboard.total_cases {
        page.push_str(&format!(
            "<p class=\"caption\">Total cases: {}</p>\n",
            escape(&format_count(total))
        ));
    }
    page.push_str(&bar_chart_svg(&dashboard.chart));

    page.push_str("<div class=\"tabs\">\n");
    page.push_str(&format!(
        "<input type=\"radio\" name=\"tab\" id=\"tab-recovery\" checked><label for=\"tab-recovery\">{}</label>\n",
        escape(RECOVERY_OPTIONS_TAB)
    ));
    page.push_str(&format!(
        "<input type=\"radio\" name=\"tab\" id=\"tab-medications\"><label for=\"tab-medications\">{}</label>\n",
        escape(MEDICATIONS_TAB)
    ));

    page.push_str(&format!(
        "<section class=\"panel\" id=\"panel-recovery\">\n<h2>{}</h2>\n",
        escape(RECOVERY_OPTIONS_TAB)
    ));
    for section in &dashboard.recovery_options {
        page.push_str(&format!(
            "<h3>{}</h3>\n<p>{}</p>\n",
            escape(&section.heading),
            escape(&section.description)
        ));
    }
    page.push_str("</section>\n");

    page.push_str(&format!(
        "<section class=\"panel\" id=\"panel-medications\">\n<h2>{}</h2>\n",
        escape(MEDICATIONS_TAB)
    ));
    for panel in &dashboard.medications {
        render_medication(page, panel);
    }
    page.push_str("</section>\n</div>\n");

    page.push_str(&format!(
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></p>\n",
        escape(&dashboard.reference.url),
        escape(&dashboard.reference.label)
    ));
}

fn render_medication(page: &mut String, panel: &MedicationPanel) {
    let open = if panel.expanded { " open" } else { "" };
    page.push_str(&format!(
        "<details{open}>\n<summary>{}</summary>\n<h3>{}</h3>\n",
        escape(&panel.title),
        escape(&panel.heading)
    ));
    page.push_str(&format!(
        "<p>\u{1F48A} <strong>Dosage:</strong> {}</p>\n",
        escape(&panel.dosage)
    ));
    page.push_str(&format!(
        "<p>\u{26A0}\u{FE0F} <strong>{}:</strong></p>\n<ul class=\"side-effects\">\n",
        escape(SIDE_EFFECTS_LABEL)
    ));
    for effect in &panel.side_effects {
        page.push_str(&format!(
            "<li class=\"severity-{}\"><strong>{}</strong><br><em>{}</em></li>\n",
            effect.severity.as_str(),
            escape(&effect.label),
            escape(&effect.description)
        ));
    }
    page.push_str("</ul>\n</details>\n");
}

const CHART_WIDTH: f64 = 480.0;
const CHART_HEIGHT: f64 = 260.0;
const MARGIN_LEFT: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 48.0;
const MARGIN_TOP: f64 = 16.0;
const SERIES_COLOURS: [&str; 4] = ["#0068c9", "#ff4b4b", "#29b09d", "#ffbd45"];

/// Grouped (un-stacked) bar chart as inline SVG.
fn bar_chart_svg(chart: &BarChart) -> String {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - 8.0;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_height;
    let scale_max = axis_max(chart.max_value());

    let mut svg = format!(
        "<svg class=\"bar-chart\" role=\"img\" aria-label=\"bar chart\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    for step in 0..=4 {
        let value = scale_max * f64::from(step) / 4.0;
        let y = baseline - plot_height * f64::from(step) / 4.0;
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e6e6e6\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{}</text>\n",
            MARGIN_LEFT + plot_width,
            MARGIN_LEFT - 4.0,
            y + 3.0,
            trim_number(value)
        ));
    }

    let groups = chart.index.len().max(1) as f64;
    let group_width = plot_width / groups;
    let series_count = chart.series.len().max(1) as f64;
    let bar_width = group_width * 0.7 / series_count;

    for (i, label) in chart.index.iter().enumerate() {
        let group_x = MARGIN_LEFT + group_width * i as f64 + group_width * 0.15;
        for (s, series) in chart.series.iter().enumerate() {
            let value = series.values.get(i).copied().unwrap_or(0.0);
            // Bars grow up from the baseline; labels keep the reported value.
            let height = if scale_max > 0.0 {
                plot_height * value.max(0.0) / scale_max
            } else {
                0.0
            };
            let x = group_x + bar_width * s as f64;
            svg.push_str(&format!(
                "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{height:.1}\" fill=\"{}\"><title>{}: {}</title></rect>\n\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\">{}</text>\n",
                baseline - height,
                bar_width * 0.9,
                SERIES_COLOURS[s % SERIES_COLOURS.len()],
                escape(&series.label),
                trim_number(value),
                x + bar_width * 0.45,
                baseline - height - 4.0,
                trim_number(value)
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            MARGIN_LEFT + group_width * (i as f64 + 0.5),
            baseline + 16.0,
            escape(label)
        ));
    }

    let mut legend_x = MARGIN_LEFT;
    for (s, series) in chart.series.iter().enumerate() {
        svg.push_str(&format!(
            "<rect x=\"{legend_x:.1}\" y=\"{:.1}\" width=\"10\" height=\"10\" fill=\"{}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">{}</text>\n",
            CHART_HEIGHT - 14.0,
            SERIES_COLOURS[s % SERIES_COLOURS.len()],
            legend_x + 14.0,
            CHART_HEIGHT - 5.0,
            escape(&series.label)
        ));
        legend_x += 130.0;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Upper bound of the value axis: at least 100 for percentages, otherwise the
/// next multiple of 10.
fn axis_max(max_value: f64) -> f64 {
    if max_value <= 100.0 {
        100.0
    } else {
        (max_value / 10.0).ceil() * 10.0
    }
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
