//! Core data model types for coursecheck.
//!
//! These are the fundamental types that the entire coursecheck system uses
//! to represent questions, answers and recommendations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed accessibility dimensions.
///
/// The declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Visual,
    Auditory,
    Motor,
    Cognitive,
    General,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 5] = [
        Category::Visual,
        Category::Auditory,
        Category::Motor,
        Category::Cognitive,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Visual => "visual",
            Category::Auditory => "auditory",
            Category::Motor => "motor",
            Category::Cognitive => "cognitive",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(Category::Visual),
            "auditory" => Ok(Category::Auditory),
            "motor" | "mobility" => Ok(Category::Motor),
            "cognitive" => Ok(Category::Cognitive),
            "general" => Ok(Category::General),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique key answers refer to.
    pub id: String,
    /// The question as shown to the course author.
    pub text: String,
    pub category: Category,
    /// Relative importance within the category. Always positive in a valid catalog.
    pub weight: f64,
    /// Type and type-specific parameters.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The answer shape a question expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Literal `"yes"` / `"no"`.
    YesNo,
    /// A number in `[min, max]`.
    Scale {
        #[serde(rename = "scale_min")]
        min: f64,
        #[serde(rename = "scale_max")]
        max: f64,
        #[serde(rename = "scale_labels", default, skip_serializing_if = "Vec::is_empty")]
        labels: Vec<String>,
    },
    /// One of `options`; later options are more accessible.
    MultipleChoice { options: Vec<String> },
}

impl QuestionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::YesNo => "yes-no",
            QuestionKind::Scale { .. } => "scale",
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
        }
    }
}

impl Question {
    pub fn yes_no(id: &str, text: &str, category: Category, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            weight,
            kind: QuestionKind::YesNo,
        }
    }

    pub fn scale(
        id: &str,
        text: &str,
        category: Category,
        weight: f64,
        (min, max): (f64, f64),
        labels: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            weight,
            kind: QuestionKind::Scale {
                min,
                max,
                labels: labels.iter().map(|l| l.to_string()).collect(),
            },
        }
    }

    pub fn multiple_choice(
        id: &str,
        text: &str,
        category: Category,
        weight: f64,
        options: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category,
            weight,
            kind: QuestionKind::MultipleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// 0-based position of `value` among the options.
    ///
    /// A value that matches no option (or a question that is not
    /// multiple-choice) resolves to index 0.
    pub fn option_index(&self, value: &AnswerValue) -> usize {
        match (&self.kind, value) {
            (QuestionKind::MultipleChoice { options }, AnswerValue::Text(text)) => {
                options.iter().position(|o| o == text).unwrap_or(0)
            }
            _ => 0,
        }
    }
}

/// A raw answer value: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value.
    ///
    /// Text is trimmed and parsed; blank text reads as `0.0` and anything
    /// unparseable reads as `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            AnswerValue::Number(n) => *n,
            AnswerValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// True if the value is exactly the literal `expected`.
    pub fn is_literal(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

/// A single answer to a catalog question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: &str, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.to_string(),
            value: value.into(),
        }
    }
}

/// Answers collected incrementally, one question at a time.
///
/// Recording an answer for a question that was already answered drops the
/// earlier answer and appends the new one at the end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: Vec<Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, answer: Answer) {
        self.answers.retain(|a| a.question_id != answer.question_id);
        self.answers.push(answer);
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn into_answers(self) -> Vec<Answer> {
        self.answers
    }
}

impl FromIterator<Answer> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut sheet = AnswerSheet::new();
        for answer in iter {
            sheet.record(answer);
        }
        sheet
    }
}

/// Recommendation priority. Ordering is `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// An actionable improvement drawn from the knowledge tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    /// Unique within a recommendation list.
    pub title: String,
    pub description: String,
    /// Who benefits and why.
    pub impact: String,
    #[serde(default)]
    pub resources: Vec<String>,
}
