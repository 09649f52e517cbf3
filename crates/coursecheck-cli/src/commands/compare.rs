//! The `coursecheck compare` command.

use std::path::PathBuf;

use anyhow::Result;

use coursecheck_core::assessment::Assessment;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: i64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0, "threshold must not be negative");

    let baseline = Assessment::load_json(&baseline_path)?;
    let current = Assessment::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            for (heading, changes) in [
                ("Regressions", &report.regressions),
                ("Improvements", &report.improvements),
            ] {
                if changes.is_empty() {
                    continue;
                }
                println!("\n{heading}:");
                for c in changes {
                    println!(
                        "  {} {}% -> {}% ({:+})",
                        c.name, c.baseline_score, c.current_score, c.delta
                    );
                }
            }

            if report.unavailable > 0 {
                println!("\n{} score(s) unavailable in one of the assessments", report.unavailable);
            }
            if !report.resolved_recommendations.is_empty() {
                println!(
                    "{} recommendation(s) resolved",
                    report.resolved_recommendations.len()
                );
            }
            if !report.new_recommendations.is_empty() {
                println!("{} new recommendation(s)", report.new_recommendations.len());
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
