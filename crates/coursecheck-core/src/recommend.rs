//! Recommendation engine.
//!
//! Recommendations come from two fixed knowledge tables: one keyed by
//! category, triggered by a weak category score, and one keyed by question
//! id, triggered by an answer that signals a gap. The merged list is
//! deduplicated by title, stably sorted by priority and capped.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::catalog::Catalog;
use crate::model::{Answer, Category, Priority, Question, QuestionKind, Recommendation};

/// Maximum length of a recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 15;

/// Category scores below this trigger the high tier.
pub const HIGH_TIER_BELOW: i64 = 60;
/// Category scores below this (and at least [`HIGH_TIER_BELOW`]) trigger the medium tier.
pub const MEDIUM_TIER_BELOW: i64 = 80;

/// Scale answers below this signal a gap, whatever the scale's bounds.
pub const SCALE_GAP_BELOW: f64 = 3.0;
/// Multiple-choice answers among the first this-many options signal a gap.
pub const OPTION_GAP_BELOW: usize = 2;

/// A static knowledge-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationTemplate {
    pub category: Category,
    pub priority: Priority,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub resources: &'static [&'static str],
}

impl RecommendationTemplate {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            category: self.category,
            priority: self.priority,
            title: self.title.to_string(),
            description: self.description.to_string(),
            impact: self.impact.to_string(),
            resources: self.resources.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// How urgently a category needs attention, from its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
}

impl Tier {
    /// `<60` high, `[60, 80)` medium, otherwise none.
    pub fn for_score(score: i64) -> Option<Tier> {
        if score < HIGH_TIER_BELOW {
            Some(Tier::High)
        } else if score < MEDIUM_TIER_BELOW {
            Some(Tier::Medium)
        } else {
            None
        }
    }
}

const CATEGORY_TABLE: &[(Category, &[RecommendationTemplate])] = &[
    (
        Category::Visual,
        &[
            RecommendationTemplate {
                category: Category::Visual,
                priority: Priority::High,
                title: "Improve Color Contrast",
                description: "Ensure text has sufficient contrast against background colors. Use contrast checking tools to verify compliance.",
                impact: "Critical for users with visual impairments and low vision",
                resources: &["WebAIM Contrast Checker", "WCAG Color Contrast Guidelines"],
            },
            RecommendationTemplate {
                category: Category::Visual,
                priority: Priority::High,
                title: "Add Alternative Text to Images",
                description: "Provide descriptive alt text for all images. For decorative images, use empty alt attributes.",
                impact: "Essential for screen reader users",
                resources: &["Alt Text Best Practices Guide", "WebAIM Alternative Text"],
            },
        ],
    ),
    (
        Category::Auditory,
        &[
            RecommendationTemplate {
                category: Category::Auditory,
                priority: Priority::High,
                title: "Add Video Captions",
                description: "Provide accurate, synchronized captions for all video content.",
                impact: "Critical for deaf and hard-of-hearing learners",
                resources: &["How to Create Video Captions", "Caption Quality Guidelines"],
            },
            RecommendationTemplate {
                category: Category::Auditory,
                priority: Priority::Medium,
                title: "Provide Audio Transcripts",
                description: "Create text transcripts for audio-only content like podcasts or lectures.",
                impact: "Helps deaf users and improves SEO",
                resources: &["Transcript Creation Guide", "Audio Accessibility Standards"],
            },
        ],
    ),
    (
        Category::Motor,
        &[
            RecommendationTemplate {
                category: Category::Motor,
                priority: Priority::High,
                title: "Ensure Keyboard Navigation",
                description: "Make sure all interactive elements can be accessed and operated using only the keyboard.",
                impact: "Essential for users who cannot use a mouse",
                resources: &["Keyboard Navigation Testing", "WCAG Keyboard Guidelines"],
            },
            RecommendationTemplate {
                category: Category::Motor,
                priority: Priority::Medium,
                title: "Improve Focus Indicators",
                description: "Ensure visible focus indicators for all interactive elements when navigating with keyboard.",
                impact: "Helps keyboard users know where they are",
                resources: &["Focus Indicator Design", "CSS Focus Styles"],
            },
        ],
    ),
    (
        Category::Cognitive,
        &[
            RecommendationTemplate {
                category: Category::Cognitive,
                priority: Priority::High,
                title: "Simplify Navigation Structure",
                description: "Create clear, consistent navigation that helps users understand where they are and where they can go.",
                impact: "Reduces confusion for all users, especially those with cognitive disabilities",
                resources: &["Navigation Design Principles", "Cognitive Load Theory"],
            },
            RecommendationTemplate {
                category: Category::Cognitive,
                priority: Priority::Medium,
                title: "Use Clear Language",
                description: "Write content using plain language principles. Avoid jargon and explain complex terms.",
                impact: "Makes content understandable for broader audience",
                resources: &["Plain Language Guidelines", "Writing for Accessibility"],
            },
        ],
    ),
    (
        Category::General,
        &[RecommendationTemplate {
            category: Category::General,
            priority: Priority::Medium,
            title: "Test with Assistive Technologies",
            description: "Regularly test your course with screen readers and other assistive technologies.",
            impact: "Identifies real-world accessibility barriers",
            resources: &["Screen Reader Testing Guide", "Assistive Technology Overview"],
        }],
    ),
];

const QUESTION_TABLE: &[(&str, &[RecommendationTemplate])] = &[
    (
        "color-contrast",
        &[RecommendationTemplate {
            category: Category::Visual,
            priority: Priority::High,
            title: "Fix Color Contrast Issues",
            description: "Use tools like WebAIM Contrast Checker to ensure text meets WCAG AA standards (4.5:1 for normal text, 3:1 for large text).",
            impact: "Makes text readable for users with low vision",
            resources: &["WebAIM Contrast Checker", "Color Universal Design"],
        }],
    ),
    (
        "video-captions",
        &[RecommendationTemplate {
            category: Category::Auditory,
            priority: Priority::High,
            title: "Add Professional Captions",
            description: "Create accurate, properly timed captions for all video content. Consider professional captioning services for important content.",
            impact: "Makes video content accessible to deaf and hard-of-hearing users",
            resources: &[
                "Rev.com Captioning",
                "YouTube Auto-Captions",
                "Caption Quality Standards",
            ],
        }],
    ),
    (
        "keyboard-navigation",
        &[RecommendationTemplate {
            category: Category::Motor,
            priority: Priority::High,
            title: "Implement Full Keyboard Support",
            description: "Ensure all interactive elements can be reached and activated using only the Tab, Enter, Space, and arrow keys.",
            impact: "Essential for users with motor disabilities",
            resources: &["Keyboard Navigation Patterns", "ARIA Authoring Practices"],
        }],
    ),
];

/// Category-table entries for a weak `category`.
///
/// Either tier triggers the category's full entry list; each entry keeps the
/// priority it is declared with.
pub fn category_recommendations(category: Category) -> &'static [RecommendationTemplate] {
    CATEGORY_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, entries)| *entries)
        .unwrap_or(&[])
}

/// Question-table entries for `question_id`; most questions have none.
pub fn question_recommendations(question_id: &str) -> &'static [RecommendationTemplate] {
    QUESTION_TABLE
        .iter()
        .find(|(id, _)| *id == question_id)
        .map(|(_, entries)| *entries)
        .unwrap_or(&[])
}

/// True if the answer reveals an accessibility gap.
///
/// The scale threshold is absolute (`< 3`), not relative to the question's
/// own bounds.
pub fn signals_gap(question: &Question, answer: &Answer) -> bool {
    match &question.kind {
        QuestionKind::YesNo => answer.value.is_literal("no"),
        QuestionKind::Scale { .. } => answer.value.to_number() < SCALE_GAP_BELOW,
        QuestionKind::MultipleChoice { .. } => question.option_index(&answer.value) < OPTION_GAP_BELOW,
    }
}

/// Derive the prioritized recommendation list.
///
/// Category entries come first (in category order), then question entries
/// (in answer order). The first occurrence of a title wins, the list is
/// stably sorted high to low priority and truncated to
/// [`MAX_RECOMMENDATIONS`]. Unavailable category scores, and categories
/// without catalog weight, trigger nothing.
pub fn recommend(
    catalog: &Catalog,
    answers: &[Answer],
    category_scores: &BTreeMap<Category, Option<i64>>,
) -> Vec<Recommendation> {
    let mut candidates: Vec<&RecommendationTemplate> = Vec::new();

    for (&category, score) in category_scores {
        // A category the catalog never asks about has nothing to recommend.
        if catalog.category_weight(category) <= 0.0 {
            continue;
        }
        if score.and_then(Tier::for_score).is_some() {
            candidates.extend(category_recommendations(category));
        }
    }

    let by_id: HashMap<&str, &Question> = catalog
        .questions
        .iter()
        .map(|q| (q.id.as_str(), q))
        .collect();

    for answer in answers {
        let Some(question) = by_id.get(answer.question_id.as_str()) else {
            continue;
        };
        if signals_gap(question, answer) {
            candidates.extend(question_recommendations(&question.id));
        }
    }

    let recommendations = rank(candidates);
    tracing::debug!("{} recommendation(s) derived", recommendations.len());
    recommendations
}

/// Drop repeated titles (first occurrence wins), stably sort high to low
/// priority and keep at most [`MAX_RECOMMENDATIONS`].
pub fn rank(candidates: Vec<&RecommendationTemplate>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut recommendations: Vec<Recommendation> = candidates
        .into_iter()
        .filter(|t| seen.insert(t.title))
        .map(RecommendationTemplate::to_recommendation)
        .collect();

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
