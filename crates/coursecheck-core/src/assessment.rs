//! Assessment record with JSON persistence and score comparison.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::{classify, AccessibilityLevel};
use crate::model::{Answer, Category, Recommendation};

/// The result of scoring one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// The answers that were scored.
    pub answers: Vec<Answer>,
    /// Overall percentage. `None` when unavailable.
    pub overall_score: Option<i64>,
    /// Percentage per category. `None` when unavailable.
    pub category_scores: BTreeMap<Category, Option<i64>>,
    /// Prioritized recommendations.
    pub recommendations: Vec<Recommendation>,
    /// When the assessment was computed.
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    /// Level band of the overall score; an unavailable score is Critical.
    pub fn level(&self) -> AccessibilityLevel {
        classify(self.overall_score.unwrap_or(i64::MIN))
    }

    /// Save the assessment as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize assessment")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write assessment to {}", path.display()))?;
        Ok(())
    }

    /// Load an assessment from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read assessment from {}", path.display()))?;
        let assessment: Assessment =
            serde_json::from_str(&content).context("failed to parse assessment JSON")?;
        Ok(assessment)
    }

    /// Compare this assessment against a baseline.
    ///
    /// A score that moved by more than `threshold` points is a regression or
    /// an improvement. Unavailable scores are counted separately.
    pub fn compare(&self, baseline: &Assessment, threshold: i64) -> ScoreComparison {
        let mut rows: Vec<(String, Option<i64>, Option<i64>)> = vec![(
            "overall".to_string(),
            baseline.overall_score,
            self.overall_score,
        )];
        for category in Category::ALL {
            rows.push((
                category.to_string(),
                baseline.category_scores.get(&category).copied().flatten(),
                self.category_scores.get(&category).copied().flatten(),
            ));
        }

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut unavailable = 0usize;

        for (name, before, after) in rows {
            let (Some(before), Some(after)) = (before, after) else {
                unavailable += 1;
                continue;
            };
            let delta = after - before;
            let change = ScoreChange {
                name,
                baseline_score: before,
                current_score: after,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let baseline_titles: Vec<&str> = baseline
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        let current_titles: Vec<&str> = self
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();

        ScoreComparison {
            regressions,
            improvements,
            unchanged,
            unavailable,
            resolved_recommendations: baseline_titles
                .iter()
                .filter(|t| !current_titles.contains(t))
                .map(|t| t.to_string())
                .collect(),
            new_recommendations: current_titles
                .iter()
                .filter(|t| !baseline_titles.contains(t))
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Result of comparing two assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreComparison {
    /// Scores that went down.
    pub regressions: Vec<ScoreChange>,
    /// Scores that went up.
    pub improvements: Vec<ScoreChange>,
    /// Scores within the threshold.
    pub unchanged: usize,
    /// Scores unavailable on either side.
    pub unavailable: usize,
    /// Recommendation titles present in the baseline only.
    pub resolved_recommendations: Vec<String>,
    /// Recommendation titles present in the current assessment only.
    pub new_recommendations: Vec<String>,
}

/// One score that moved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    /// `overall` or a category name.
    pub name: String,
    pub baseline_score: i64,
    pub current_score: i64,
    pub delta: i64,
}

impl ScoreComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (heading, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {heading}\n\n"));
            md.push_str("| Score | Baseline | Current | Delta |\n");
            md.push_str("|-------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {}% | {}% | {:+} |\n",
                    c.name, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        if !self.resolved_recommendations.is_empty() {
            md.push_str("### Resolved recommendations\n\n");
            for title in &self.resolved_recommendations {
                md.push_str(&format!("- {title}\n"));
            }
            md.push('\n');
        }

        if !self.new_recommendations.is_empty() {
            md.push_str("### New recommendations\n\n");
            for title in &self.new_recommendations {
                md.push_str(&format!("- {title}\n"));
            }
        }

        md
    }

    /// Returns true if any score went down.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
