//! Page-audit collaborator interface.
//!
//! Automated page checks are delegated to an external rule engine. This
//! module defines what coursecheck hands it, what comes back, and how
//! failures are reported.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// What to audit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PageSource {
    Url(String),
    Html(String),
}

impl PageSource {
    /// Label stored in the results: the URL, or `HTML Content`.
    pub fn label(&self) -> &str {
        match self {
            PageSource::Url(url) => url,
            PageSource::Html(_) => "HTML Content",
        }
    }
}

/// Severity of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Minor => write!(f, "minor"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Serious => write!(f, "serious"),
            Impact::Critical => write!(f, "critical"),
        }
    }
}

/// A failed rule and the elements it failed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    pub impact: Impact,
    pub description: String,
    pub help: String,
    #[serde(default)]
    pub help_url: String,
    #[serde(default)]
    pub nodes: Vec<ViolationNode>,
}

/// One offending element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationNode {
    /// Selector path to the element.
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub failure_summary: String,
}

/// A rule that passed or could not be decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub id: String,
    pub description: String,
}

/// Output of one page audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResults {
    /// See [`PageSource::label`].
    pub source: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub passes: Vec<RuleOutcome>,
    /// Rules that need manual review.
    #[serde(default)]
    pub incomplete: Vec<RuleOutcome>,
    pub timestamp: DateTime<Utc>,
}

impl AuditResults {
    /// Violation count per impact, with zero entries for impacts not seen.
    pub fn impact_counts(&self) -> BTreeMap<Impact, usize> {
        let mut counts: BTreeMap<Impact, usize> = [
            Impact::Minor,
            Impact::Moderate,
            Impact::Serious,
            Impact::Critical,
        ]
        .into_iter()
        .map(|i| (i, 0))
        .collect();
        for v in &self.violations {
            *counts.entry(v.impact).or_insert(0) += 1;
        }
        counts
    }

    /// Load results from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read audit results from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse audit results JSON")
    }

    /// Save results as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize audit results")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write audit results to {}", path.display()))?;
        Ok(())
    }
}

/// An automated page checker.
///
/// Implementations report failures as errors and never retry; an error is
/// never reported as an empty violation list.
#[async_trait]
pub trait PageAuditor: Send + Sync {
    /// Human-readable engine name.
    fn name(&self) -> &str;

    async fn check_page(&self, source: &PageSource) -> Result<AuditResults, AuditError>;
}

/// Replays previously captured audit results.
#[derive(Debug, Default)]
pub struct RecordedAuditor {
    results: HashMap<PageSource, Result<AuditResults, String>>,
}

impl RecordedAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay `results` for `source`.
    pub fn with_results(mut self, source: PageSource, results: AuditResults) -> Self {
        self.results.insert(source, Ok(results));
        self
    }

    /// Fail the fetch of `source` with `message`.
    pub fn with_fetch_failure(mut self, source: PageSource, message: &str) -> Self {
        self.results.insert(source, Err(message.to_string()));
        self
    }
}

#[async_trait]
impl PageAuditor for RecordedAuditor {
    fn name(&self) -> &str {
        "recorded"
    }

    async fn check_page(&self, source: &PageSource) -> Result<AuditResults, AuditError> {
        match self.results.get(source) {
            Some(Ok(results)) => Ok(results.clone()),
            Some(Err(message)) => {
                tracing::warn!("audit of {} failed: {message}", source.label());
                Err(AuditError::Fetch {
                    source_label: source.label().to_string(),
                    message: message.clone(),
                })
            }
            None => Err(AuditError::Engine(format!(
                "no recorded results for {}",
                source.label()
            ))),
        }
    }
}
