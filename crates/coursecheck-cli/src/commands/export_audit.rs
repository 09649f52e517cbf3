//! The `coursecheck export-audit` command.

use std::path::PathBuf;

use anyhow::Result;

use coursecheck_core::audit::AuditResults;
use coursecheck_report::csv::write_audit_csv;
use coursecheck_report::sarif::write_sarif_report;

pub fn execute(input: PathBuf, format: String, output: PathBuf) -> Result<()> {
    let results = AuditResults::load_json(&input)?;

    match format.as_str() {
        "csv" => write_audit_csv(&results, &output)?,
        "json" => results.save_json(&output)?,
        "sarif" => write_sarif_report(&results, &output)?,
        other => anyhow::bail!("unknown format: {other} (expected csv, json or sarif)"),
    }

    let counts = results
        .impact_counts()
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(impact, n)| format!("{n} {impact}"))
        .collect::<Vec<_>>();
    println!(
        "Exported {} violation(s) from {} to {}",
        results.violations.len(),
        results.source,
        output.display()
    );
    if !counts.is_empty() {
        println!("  {}", counts.join(", "));
    }

    Ok(())
}
