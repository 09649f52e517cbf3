//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use coursecheck_core::assessment::Assessment;
use coursecheck_core::model::{Category, Priority};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_text(score: Option<i64>) -> String {
    score.map(|s| format!("{s}%")).unwrap_or_else(|| "n/a".to_string())
}

/// Generate an HTML report from an assessment.
pub fn generate_html(assessment: &Assessment) -> String {
    let level = assessment.level();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Course accessibility assessment</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Course accessibility assessment</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} answers | {} recommendations | {}</p>\n",
        assessment.answers.len(),
        assessment.recommendations.len(),
        assessment.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Overall score and level
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Overall</h2>\n");
    html.push_str(&format!(
        "<div class=\"level\" style=\"border-color: {color}\"><span class=\"score\" style=\"color: {color}\">{score}</span> <strong>{name}</strong><p>{desc}</p></div>\n",
        color = level.color,
        score = score_text(assessment.overall_score),
        name = level.level,
        desc = html_escape(level.description),
    ));

    // Category table
    html.push_str("<h2>Categories</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Category</th><th>Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (category, score) in &assessment.category_scores {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            category,
            score_text(*score)
        ));
    }
    html.push_str("</tbody></table>\n");

    html.push_str(&generate_bar_chart(
        assessment
            .category_scores
            .iter()
            .map(|(c, s)| (*c, *s))
            .collect::<Vec<_>>()
            .as_slice(),
    ));
    html.push_str("</section>\n");

    // Recommendations
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Recommendations</h2>\n");
    if assessment.recommendations.is_empty() {
        html.push_str("<p>No recommendations. Keep up the good work.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"results\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Priority</th><th onclick=\"sortTable(1)\">Category</th><th onclick=\"sortTable(2)\">Title</th><th>Description</th><th>Impact</th><th>Resources</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for r in &assessment.recommendations {
            let resources = r
                .resources
                .iter()
                .map(|res| html_escape(res))
                .collect::<Vec<_>>()
                .join("<br>");
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                priority_class(r.priority),
                r.priority,
                r.category,
                html_escape(&r.title),
                html_escape(&r.description),
                html_escape(&r.impact),
                resources
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(assessment).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(assessment: &Assessment, path: &Path) -> Result<()> {
    let html = generate_html(assessment);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

fn generate_bar_chart(scores: &[(Category, Option<i64>)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"Category scores\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let pct = score.unwrap_or(0).clamp(0, 100) as usize;
        let width = pct * max_width / 100;

        let color = if pct >= 80 {
            "#22c55e"
        } else if pct >= 60 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            category
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score_text(*score)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --high: #fde2e2; --medium: #fef3c7; --low: #dcfce7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --high: #7f1d1d; --medium: #78350f; --low: #064e3b; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.level { border-left: 6px solid; padding: 0.5rem 1rem; margin: 1rem 0; }
.level .score { font-size: 2.5rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); cursor: pointer; }
.high { background: var(--high); }
.medium { background: var(--medium); }
.low { background: var(--low); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
