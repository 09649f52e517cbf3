//! SARIF (Static Analysis Results Interchange Format) output.
//!
//! Turns page-audit violations into SARIF 2.1.0 documents for code scanning
//! dashboards.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde_json::json;

use coursecheck_core::audit::{AuditResults, Impact};

fn sarif_level(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical | Impact::Serious => "error",
        Impact::Moderate => "warning",
        Impact::Minor => "note",
    }
}

/// Generate a SARIF 2.1.0 JSON document from audit results.
///
/// One rule per distinct violation id, one result per offending element.
/// A violation without element details still yields a single result located
/// at the audited source.
pub fn generate_sarif(results: &AuditResults) -> serde_json::Value {
    let mut rules = BTreeMap::new();
    let mut sarif_results = Vec::new();

    for v in &results.violations {
        rules.entry(v.id.as_str()).or_insert_with(|| {
            json!({
                "id": v.id,
                "name": v.id,
                "shortDescription": { "text": v.description },
                "help": { "text": v.help },
                "helpUri": v.help_url,
            })
        });

        let level = sarif_level(v.impact);
        if v.nodes.is_empty() {
            sarif_results.push(json!({
                "ruleId": v.id,
                "level": level,
                "message": { "text": format!("[{}] {}", v.impact, v.help) },
                "locations": [location(&results.source, None)]
            }));
            continue;
        }

        for node in &v.nodes {
            let selector = node.target.join(" ");
            let text = if node.failure_summary.is_empty() {
                format!("[{}] {}", v.impact, v.help)
            } else {
                format!("[{}] {}: {}", v.impact, v.help, node.failure_summary)
            };
            sarif_results.push(json!({
                "ruleId": v.id,
                "level": level,
                "message": { "text": text },
                "locations": [location(&results.source, Some(&selector))]
            }));
        }
    }

    json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "coursecheck",
                    "version": env!("CARGO_PKG_VERSION"),
                    "informationUri": "https://github.com/coursecheck/coursecheck",
                    "rules": rules.into_values().collect::<Vec<_>>()
                }
            },
            "results": sarif_results
        }]
    })
}

fn location(source: &str, selector: Option<&str>) -> serde_json::Value {
    let mut loc = json!({
        "physicalLocation": {
            "artifactLocation": { "uri": source }
        }
    });
    if let Some(selector) = selector.filter(|s| !s.is_empty()) {
        loc["logicalLocations"] = json!([{ "fullyQualifiedName": selector, "kind": "element" }]);
    }
    loc
}

/// Write a SARIF report to a file.
pub fn write_sarif_report(results: &AuditResults, path: &Path) -> Result<()> {
    let sarif = generate_sarif(results);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&sarif)?;
    std::fs::write(path, json)?;
    Ok(())
}
