//! Question catalog: the built-in questionnaire, TOML catalog files, and
//! validation of catalogs and answer sheets.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Answer, AnswerSheet, AnswerValue, Category, Question, QuestionKind};

/// An ordered list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn new(id: &str, name: &str, questions: Vec<Question>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            questions,
        }
    }

    /// The 28-question course accessibility questionnaire.
    pub fn builtin() -> Self {
        Self {
            id: "course-accessibility".into(),
            name: "Course Accessibility Self-Assessment".into(),
            description: "Visual, auditory, motor, cognitive and general accessibility of an online course".into(),
            questions: builtin_questions(),
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.category == category)
    }

    /// Sum of weights in `category`.
    pub fn category_weight(&self, category: Category) -> f64 {
        self.in_category(category).map(|q| q.weight).sum()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.questions.iter().map(|q| q.weight).sum()
    }
}

fn builtin_questions() -> Vec<Question> {
    use Category::*;

    vec![
        Question::yes_no(
            "color-contrast",
            "Do you ensure sufficient color contrast between text and background colors?",
            Visual,
            10.0,
        ),
        Question::yes_no(
            "color-only-info",
            "Do you avoid using color as the only way to convey important information?",
            Visual,
            8.0,
        ),
        Question::yes_no(
            "text-size",
            "Can users resize text up to 200% without losing functionality?",
            Visual,
            7.0,
        ),
        Question::scale(
            "font-readability",
            "How readable are the fonts used in your course?",
            Visual,
            6.0,
            (1.0, 5.0),
            &["Very difficult", "Difficult", "Moderate", "Easy", "Very easy"],
        ),
        Question::yes_no(
            "images-alt-text",
            "Do all images have descriptive alternative text?",
            Visual,
            9.0,
        ),
        Question::yes_no(
            "complex-images",
            "For complex images (charts, graphs), do you provide detailed descriptions?",
            Visual,
            8.0,
        ),
        Question::yes_no(
            "video-captions",
            "Do all videos have accurate captions?",
            Auditory,
            10.0,
        ),
        Question::yes_no(
            "audio-transcripts",
            "Do you provide transcripts for audio content?",
            Auditory,
            9.0,
        ),
        Question::yes_no(
            "audio-descriptions",
            "Do videos with important visual information have audio descriptions?",
            Auditory,
            8.0,
        ),
        Question::yes_no(
            "audio-controls",
            "Can users control audio playback (play, pause, volume)?",
            Auditory,
            7.0,
        ),
        Question::yes_no(
            "background-audio",
            "Do you avoid or provide controls for background audio?",
            Auditory,
            6.0,
        ),
        Question::yes_no(
            "keyboard-navigation",
            "Can users navigate your entire course using only a keyboard?",
            Motor,
            10.0,
        ),
        Question::yes_no(
            "focus-indicators",
            "Are focus indicators visible when navigating with keyboard?",
            Motor,
            9.0,
        ),
        Question::yes_no(
            "click-targets",
            "Are interactive elements large enough to be easily clicked/tapped?",
            Motor,
            8.0,
        ),
        Question::yes_no(
            "time-limits",
            "Do you provide options to extend or disable time limits?",
            Motor,
            7.0,
        ),
        Question::yes_no(
            "drag-drop-alternatives",
            "Do drag-and-drop interactions have keyboard alternatives?",
            Motor,
            6.0,
        ),
        Question::scale(
            "clear-navigation",
            "Is your course navigation clear and consistent?",
            Cognitive,
            9.0,
            (1.0, 5.0),
            &["Very confusing", "Confusing", "Moderate", "Clear", "Very clear"],
        ),
        Question::yes_no(
            "content-structure",
            "Do you use proper headings to structure your content?",
            Cognitive,
            8.0,
        ),
        Question::scale(
            "plain-language",
            "Do you use clear, simple language appropriate for your audience?",
            Cognitive,
            7.0,
            (1.0, 5.0),
            &["Very complex", "Complex", "Moderate", "Simple", "Very simple"],
        ),
        Question::scale(
            "instructions-clarity",
            "Are instructions for activities and assignments clear?",
            Cognitive,
            8.0,
            (1.0, 5.0),
            &["Very unclear", "Unclear", "Moderate", "Clear", "Very clear"],
        ),
        Question::yes_no(
            "error-messages",
            "Do you provide clear, helpful error messages?",
            Cognitive,
            6.0,
        ),
        Question::yes_no(
            "progress-indicators",
            "Do you show students their progress through the course?",
            Cognitive,
            5.0,
        ),
        Question::yes_no(
            "forms-labels",
            "Do all form fields have clear labels?",
            General,
            9.0,
        ),
        Question::yes_no(
            "links-descriptive",
            "Are your links descriptive (not just \"click here\")?",
            General,
            7.0,
        ),
        Question::yes_no(
            "page-titles",
            "Do your course pages have descriptive titles?",
            General,
            6.0,
        ),
        Question::yes_no(
            "skip-links",
            "Do you provide skip links for navigation?",
            General,
            5.0,
        ),
        Question::yes_no(
            "mobile-friendly",
            "Is your course mobile-friendly and responsive?",
            General,
            8.0,
        ),
        Question::multiple_choice(
            "assistive-tech-testing",
            "Have you tested your course with assistive technologies?",
            General,
            7.0,
            &[
                "Yes, extensively",
                "Yes, basic testing",
                "Planning to test",
                "No, not yet",
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// TOML catalog files
// ---------------------------------------------------------------------------

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    weight: f64,
    #[serde(default = "default_scale_min")]
    scale_min: f64,
    #[serde(default = "default_scale_max")]
    scale_max: f64,
    #[serde(default)]
    scale_labels: Vec<String>,
    #[serde(default)]
    options: Vec<String>,
}

fn default_scale_min() -> f64 {
    1.0
}

fn default_scale_max() -> f64 {
    5.0
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let category: Category = q
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?;

            let kind = match q.kind.as_str() {
                "yes-no" | "yes_no" => QuestionKind::YesNo,
                "scale" => QuestionKind::Scale {
                    min: q.scale_min,
                    max: q.scale_max,
                    labels: q.scale_labels,
                },
                "multiple-choice" | "multiple_choice" => QuestionKind::MultipleChoice {
                    options: q.options,
                },
                other => anyhow::bail!("question '{}': unknown question type: {other}", q.id),
            };

            Ok(Question {
                id: q.id,
                text: q.text,
                category,
                weight: q.weight,
                kind,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        questions,
    })
}

/// Load the catalog at `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => parse_catalog(p),
        None => Ok(Catalog::builtin()),
    }
}

// ---------------------------------------------------------------------------
// Answer sheet files
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    answers: Vec<Answer>,
}

/// Load answers from a `.json` list or a TOML file with `[[answers]]` tables.
///
/// Later entries for the same question replace earlier ones.
pub fn load_answers(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    let answers: Vec<Answer> = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))?
    } else {
        toml::from_str::<TomlAnswerFile>(&content)
            .with_context(|| format!("failed to parse answers TOML: {}", path.display()))?
            .answers
    };

    let total = answers.len();
    let sheet: AnswerSheet = answers.into_iter().collect();
    if sheet.len() < total {
        tracing::debug!(
            "{}: {} superseded answer(s) dropped",
            path.display(),
            total - sheet.len()
        );
    }
    Ok(sheet)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from catalog or answer validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &catalog.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::for_question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &catalog.questions {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::for_question(&q.id, "question text is empty"));
        }

        if q.weight.is_nan() || q.weight <= 0.0 {
            warnings.push(ValidationWarning::for_question(
                &q.id,
                format!("weight must be positive, got {}", q.weight),
            ));
        }

        match &q.kind {
            QuestionKind::YesNo => {}
            QuestionKind::Scale { min, max, labels } => {
                if max <= min {
                    warnings.push(ValidationWarning::for_question(
                        &q.id,
                        format!("scale_max ({max}) must be greater than scale_min ({min})"),
                    ));
                } else if !labels.is_empty() {
                    let steps = (max - min).floor() as usize + 1;
                    if labels.len() != steps {
                        warnings.push(ValidationWarning::for_question(
                            &q.id,
                            format!(
                                "{} scale labels for a {min}..{max} scale ({steps} points)",
                                labels.len()
                            ),
                        ));
                    }
                }
            }
            QuestionKind::MultipleChoice { options } => {
                if options.is_empty() {
                    warnings.push(ValidationWarning::for_question(
                        &q.id,
                        "multiple-choice question has no options",
                    ));
                } else if options.len() == 1 {
                    warnings.push(ValidationWarning::for_question(
                        &q.id,
                        "multiple-choice question with a single option always scores 0",
                    ));
                }
            }
        }
    }

    for category in Category::ALL {
        if catalog.category_weight(category) <= 0.0 {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("category '{category}' has no weighted questions and always scores 0"),
            });
        }
    }

    warnings
}

/// Check answers against the catalog.
///
/// Scoring itself is lenient; this is the opt-in strict check.
pub fn validate_answers(catalog: &Catalog, answers: &[Answer]) -> Vec<ValidationWarning> {
    let questions: HashMap<&str, &Question> = catalog
        .questions
        .iter()
        .map(|q| (q.id.as_str(), q))
        .collect();

    let mut warnings = Vec::new();

    for answer in answers {
        let id = answer.question_id.as_str();
        let Some(question) = questions.get(id) else {
            warnings.push(ValidationWarning::for_question(id, "unknown question ID"));
            continue;
        };

        match &question.kind {
            QuestionKind::YesNo => {
                if !(answer.value.is_literal("yes") || answer.value.is_literal("no")) {
                    warnings.push(ValidationWarning::for_question(
                        id,
                        format!("expected \"yes\" or \"no\", got \"{}\"", answer.value),
                    ));
                }
            }
            QuestionKind::Scale { min, max, .. } => {
                let n = answer.value.to_number();
                if n.is_nan() || matches!(&answer.value, AnswerValue::Text(s) if s.trim().is_empty()) {
                    warnings.push(ValidationWarning::for_question(
                        id,
                        format!("expected a number, got \"{}\"", answer.value),
                    ));
                } else if n < *min || n > *max {
                    warnings.push(ValidationWarning::for_question(
                        id,
                        format!("value {n} is outside the scale {min}..{max}"),
                    ));
                }
            }
            QuestionKind::MultipleChoice { options } => {
                let matched = answer
                    .value
                    .as_text()
                    .is_some_and(|v| options.iter().any(|o| o == v));
                if !matched {
                    warnings.push(ValidationWarning::for_question(
                        id,
                        format!("\"{}\" is not one of the options", answer.value),
                    ));
                }
            }
        }
    }

    warnings
}
