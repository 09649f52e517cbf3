//! The `coursecheck assess` command.

use std::path::PathBuf;

use anyhow::Result;

use coursecheck_core::assessment::Assessment;
use coursecheck_core::catalog::{load_answers, load_catalog, validate_answers};
use coursecheck_core::config::load_config_from;
use coursecheck_core::engine::{AssessmentEngine, EngineConfig};
use coursecheck_report::csv::write_assessment_csv;
use coursecheck_report::html::write_html_report;

pub fn execute(
    answers_path: PathBuf,
    catalog_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    strict: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = load_catalog(catalog_path.as_deref().or(config.catalog.as_deref()))?;
    let sheet = load_answers(&answers_path)?;
    tracing::debug!(
        catalog = %catalog.id,
        questions = catalog.len(),
        answers = sheet.len(),
        "inputs loaded"
    );

    if strict || config.strict {
        let issues = validate_answers(&catalog, sheet.answers());
        if !issues.is_empty() {
            for issue in &issues {
                let id = issue.question_id.as_deref().unwrap_or("-");
                eprintln!("  [{id}] {}", issue.message);
            }
            anyhow::bail!(
                "{} answer issue(s) found; not scoring in strict mode",
                issues.len()
            );
        }
    }

    let engine = AssessmentEngine::new(catalog, EngineConfig::from(&config));
    let assessment = engine.assess(sheet.into_answers());

    print_summary(&assessment);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "csv", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let output = output.unwrap_or(config.output_dir);
    let timestamp = assessment.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" => {}
            "json" => {
                let path = output.join(format!("assessment-{timestamp}.json"));
                assessment.save_json(&path)?;
                eprintln!("Assessment saved to: {}", path.display());
            }
            "csv" => {
                let path = output.join(format!("assessment-{timestamp}.csv"));
                write_assessment_csv(&assessment, &path)?;
                eprintln!("CSV export: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("assessment-{timestamp}.html"));
                write_html_report(&assessment, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            other => anyhow::bail!("unknown format: {other} (expected text, json, csv, html or all)"),
        }
    }

    Ok(())
}

fn score_text(score: Option<i64>) -> String {
    score
        .map(|s| format!("{s}%"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_summary(assessment: &Assessment) {
    use comfy_table::{Cell, Table};

    let level = assessment.level();
    println!(
        "Overall: {} ({})",
        score_text(assessment.overall_score),
        level.level
    );
    println!("{}", level.description);

    let mut scores = Table::new();
    scores.set_header(vec!["Category", "Score"]);
    for (category, score) in &assessment.category_scores {
        scores.add_row(vec![Cell::new(category), Cell::new(score_text(*score))]);
    }
    println!("\n{scores}");

    if assessment.recommendations.is_empty() {
        println!("\nNo recommendations.");
        return;
    }

    let mut recs = Table::new();
    recs.set_header(vec!["Priority", "Category", "Recommendation"]);
    for r in &assessment.recommendations {
        recs.add_row(vec![
            Cell::new(r.priority),
            Cell::new(r.category),
            Cell::new(&r.title),
        ]);
    }
    println!("\n{recs}");
}
