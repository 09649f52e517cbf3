//! CSV export for assessments and page-audit results.

use std::path::Path;

use anyhow::{Context, Result};

use coursecheck_core::assessment::Assessment;
use coursecheck_core::audit::AuditResults;

const ASSESSMENT_HEADER: [&str; 8] = [
    "Type",
    "Category",
    "Score",
    "Priority",
    "Title",
    "Description",
    "Impact",
    "Resources",
];

const AUDIT_HEADER: [&str; 6] = [
    "Type",
    "Impact",
    "Description",
    "Help",
    "Elements Count",
    "Help URL",
];

fn score_cell(score: Option<i64>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}

/// Render an assessment as CSV: one `Score` row for the overall score and
/// each category, then one `Recommendation` row per recommendation.
pub fn assessment_to_csv(assessment: &Assessment) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(ASSESSMENT_HEADER)?;

    writer.write_record([
        "Score",
        "overall",
        score_cell(assessment.overall_score).as_str(),
        "",
        "",
        "",
        "",
        "",
    ])?;
    for (category, score) in &assessment.category_scores {
        writer.write_record([
            "Score",
            category.as_str(),
            score_cell(*score).as_str(),
            "",
            "",
            "",
            "",
            "",
        ])?;
    }

    for r in &assessment.recommendations {
        writer.write_record([
            "Recommendation",
            r.category.as_str(),
            "",
            r.priority.to_string().as_str(),
            r.title.as_str(),
            r.description.as_str(),
            r.impact.as_str(),
            r.resources.join("; ").as_str(),
        ])?;
    }

    finish(writer)
}

/// Render audit results as CSV: violation rows, then pass rows.
pub fn audit_to_csv(results: &AuditResults) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(AUDIT_HEADER)?;

    for v in &results.violations {
        writer.write_record([
            "Violation",
            v.impact.to_string().as_str(),
            v.description.as_str(),
            v.help.as_str(),
            v.nodes.len().to_string().as_str(),
            v.help_url.as_str(),
        ])?;
    }

    for p in &results.passes {
        writer.write_record(["Pass", "N/A", p.description.as_str(), "N/A", "N/A", "N/A"])?;
    }

    finish(writer)
}

fn finish(writer: ::csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Write an assessment CSV to a file.
pub fn write_assessment_csv(assessment: &Assessment, path: &Path) -> Result<()> {
    write_file(path, &assessment_to_csv(assessment)?)
}

/// Write an audit CSV to a file.
pub fn write_audit_csv(results: &AuditResults, path: &Path) -> Result<()> {
    write_file(path, &audit_to_csv(results)?)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write CSV to {}", path.display()))?;
    Ok(())
}
