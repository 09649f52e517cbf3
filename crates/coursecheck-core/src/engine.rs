//! Assessment engine.
//!
//! Runs scoring and then the recommendation pass over one submission and
//! packages both into an [`Assessment`]. The engine holds no state between
//! calls, so one instance can serve any number of submissions.

use crate::assessment::Assessment;
use crate::catalog::Catalog;
use crate::config::CoursecheckConfig;
use crate::model::Answer;
use crate::recommend::recommend;
use crate::scoring::score_traced;

/// Configuration for the assessment engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Emit per-answer scoring diagnostics at trace level.
    pub trace_scoring: bool,
}

impl From<&CoursecheckConfig> for EngineConfig {
    fn from(config: &CoursecheckConfig) -> Self {
        Self {
            trace_scoring: config.trace_scoring,
        }
    }
}

/// Scores submissions against a fixed catalog.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: Catalog,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Score `answers` and derive recommendations.
    pub fn assess(&self, answers: Vec<Answer>) -> Assessment {
        let scores = score_traced(&self.catalog, &answers, self.config.trace_scoring);
        let recommendations = recommend(&self.catalog, &answers, &scores.categories);

        tracing::info!(
            catalog = %self.catalog.id,
            answers = answers.len(),
            overall = ?scores.overall,
            recommendations = recommendations.len(),
            "assessment complete"
        );

        Assessment {
            answers,
            overall_score: scores.overall,
            category_scores: scores.categories,
            recommendations,
            created_at: chrono::Utc::now(),
        }
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin(), EngineConfig::default())
    }
}
