//! Weighted scoring of answers against a catalog.
//!
//! Every answer is normalized onto `[0, 1]` (yes-no, scale position or
//! option position), scaled by its question's weight and summed per
//! category. Scores are reported as rounded percentages of the catalog's
//! weight.
//!
//! Scoring is lenient: unknown question ids are skipped, unmatched options
//! read as the first option, and out-of-range scale values are not clamped.
//! A scale value that cannot be read as a number makes its category (and the
//! overall score) unavailable, reported as `None`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{Answer, AnswerValue, Category, Question, QuestionKind};

/// Rounded percentage scores for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Overall score across all categories. `None` when unavailable.
    pub overall: Option<i64>,
    /// Per-category score, one entry for every category.
    pub categories: BTreeMap<Category, Option<i64>>,
}

/// Weight earned versus weight available in one category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTally {
    pub earned: f64,
    pub available: f64,
}

impl CategoryTally {
    /// Rounded percentage, `Some(0)` for a category with no weight.
    pub fn percent(&self) -> Option<i64> {
        if self.available <= 0.0 {
            return Some(0);
        }
        round_percent(self.earned / self.available * 100.0)
    }
}

/// Points an answer earns for its question.
///
/// Yes-no earns the full weight for the literal `"yes"`. Scale answers are
/// placed linearly between `min` and `max`. Multiple-choice answers earn
/// `index / (options - 1)` of the weight, or nothing for a single option.
pub fn answer_points(question: &Question, value: &AnswerValue) -> f64 {
    let normalized = match &question.kind {
        QuestionKind::YesNo => {
            if value.is_literal("yes") {
                1.0
            } else {
                0.0
            }
        }
        QuestionKind::Scale { min, max, .. } => (value.to_number() - min) / (max - min),
        QuestionKind::MultipleChoice { options } => {
            if options.len() > 1 {
                question.option_index(value) as f64 / (options.len() - 1) as f64
            } else {
                0.0
            }
        }
    };
    normalized * question.weight
}

/// Accumulate earned and available weight per category.
pub fn tally(catalog: &Catalog, answers: &[Answer], trace: bool) -> BTreeMap<Category, CategoryTally> {
    let mut tallies: BTreeMap<Category, CategoryTally> = Category::ALL
        .iter()
        .map(|&c| (c, CategoryTally::default()))
        .collect();

    for question in &catalog.questions {
        if let Some(t) = tallies.get_mut(&question.category) {
            t.available += question.weight;
        }
    }

    let by_id: HashMap<&str, &Question> = catalog
        .questions
        .iter()
        .map(|q| (q.id.as_str(), q))
        .collect();

    for answer in answers {
        let Some(question) = by_id.get(answer.question_id.as_str()) else {
            tracing::debug!("ignoring answer for unknown question '{}'", answer.question_id);
            continue;
        };

        let points = answer_points(question, &answer.value);
        if trace {
            tracing::trace!(
                question = %question.id,
                kind = question.kind.type_name(),
                value = %answer.value,
                weight = question.weight,
                points,
                "scored answer"
            );
        }

        if let Some(t) = tallies.get_mut(&question.category) {
            t.earned += points;
        }
    }

    tallies
}

/// Score `answers` against `catalog`.
pub fn score(catalog: &Catalog, answers: &[Answer]) -> Scores {
    score_traced(catalog, answers, false)
}

/// Like [`score`], emitting per-answer and per-category diagnostics at
/// trace level when `trace` is set.
pub fn score_traced(catalog: &Catalog, answers: &[Answer], trace: bool) -> Scores {
    let tallies = tally(catalog, answers, trace);

    let earned: f64 = tallies.values().map(|t| t.earned).sum();
    let available = catalog.total_weight();

    let overall = if available > 0.0 {
        round_percent(earned / available * 100.0)
    } else {
        Some(0)
    };

    if trace {
        for (category, t) in &tallies {
            tracing::trace!(
                category = %category,
                earned = t.earned,
                available = t.available,
                "category tally"
            );
        }
        tracing::trace!(earned, available, questions = catalog.len(), answers = answers.len(), "overall tally");
    }

    Scores {
        overall,
        categories: tallies.iter().map(|(&c, t)| (c, t.percent())).collect(),
    }
}

/// Round half up to an integer; non-finite input is unavailable.
fn round_percent(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some((value + 0.5).floor() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Answer;

    fn single(question: Question) -> Catalog {
        Catalog::new("test", "Test", vec![question])
    }

    #[test]
    fn weight_identity_holds() {
        let catalog = Catalog::builtin();
        let tallies = tally(&catalog, &[], false);
        let per_category: f64 = tallies.values().map(|t| t.available).sum();
        assert_eq!(per_category, catalog.total_weight());
    }

    #[test]
    fn yes_no_yes_scores_full() {
        let catalog = single(Question::yes_no("q", "?", Category::Visual, 10.0));
        let scores = score(&catalog, &[Answer::new("q", "yes")]);
        assert_eq!(scores.overall, Some(100));
        assert_eq!(scores.categories[&Category::Visual], Some(100));
    }

    #[test]
    fn yes_no_is_case_sensitive() {
        let catalog = single(Question::yes_no("q", "?", Category::Visual, 10.0));
        let scores = score(&catalog, &[Answer::new("q", "Yes")]);
        assert_eq!(scores.overall, Some(0));
    }

    #[test]
    fn scale_midpoint() {
        let catalog = single(Question::scale(
            "q",
            "?",
            Category::Cognitive,
            10.0,
            (1.0, 5.0),
            &[],
        ));
        let scores = score(&catalog, &[Answer::new("q", 3.0)]);
        assert_eq!(scores.categories[&Category::Cognitive], Some(50));
        assert_eq!(scores.overall, Some(50));
    }

    #[test]
    fn scale_out_of_range_is_not_clamped() {
        let catalog = single(Question::scale(
            "q",
            "?",
            Category::Cognitive,
            10.0,
            (1.0, 5.0),
            &[],
        ));
        let scores = score(&catalog, &[Answer::new("q", 9.0)]);
        assert_eq!(scores.overall, Some(200));
        let scores = score(&catalog, &[Answer::new("q", 0.0)]);
        assert_eq!(scores.overall, Some(-25));
    }

    #[test]
    fn scale_unreadable_value_is_unavailable() {
        let catalog = Catalog::new(
            "test",
            "Test",
            vec![
                Question::scale("s", "?", Category::Cognitive, 10.0, (1.0, 5.0), &[]),
                Question::yes_no("y", "?", Category::Visual, 10.0),
            ],
        );
        let scores = score(
            &catalog,
            &[Answer::new("s", "very"), Answer::new("y", "yes")],
        );
        assert_eq!(scores.categories[&Category::Cognitive], None);
        assert_eq!(scores.categories[&Category::Visual], Some(100));
        assert_eq!(scores.overall, None);
    }

    #[test]
    fn multiple_choice_third_of_four() {
        let catalog = single(Question::multiple_choice(
            "q",
            "?",
            Category::General,
            8.0,
            &["a", "b", "c", "d"],
        ));
        let scores = score(&catalog, &[Answer::new("q", "c")]);
        assert_eq!(scores.categories[&Category::General], Some(67));
    }

    #[test]
    fn multiple_choice_unmatched_reads_as_first() {
        let catalog = single(Question::multiple_choice(
            "q",
            "?",
            Category::General,
            8.0,
            &["a", "b", "c", "d"],
        ));
        let scores = score(&catalog, &[Answer::new("q", "nope")]);
        assert_eq!(scores.overall, Some(0));
    }

    #[test]
    fn single_option_scores_zero() {
        let q = Question::multiple_choice("q", "?", Category::General, 8.0, &["only"]);
        assert_eq!(answer_points(&q, &"only".into()), 0.0);
    }

    #[test]
    fn unknown_answers_are_ignored() {
        let catalog = single(Question::yes_no("q", "?", Category::Visual, 10.0));
        let scores = score(&catalog, &[Answer::new("other", "yes")]);
        assert_eq!(scores.overall, Some(0));
    }

    #[test]
    fn empty_categories_score_zero() {
        let catalog = single(Question::yes_no("q", "?", Category::Visual, 10.0));
        let scores = score(&catalog, &[Answer::new("q", "yes")]);
        assert_eq!(scores.categories.len(), 5);
        for category in [
            Category::Auditory,
            Category::Motor,
            Category::Cognitive,
            Category::General,
        ] {
            assert_eq!(scores.categories[&category], Some(0));
        }
    }

    #[test]
    fn empty_catalog_scores_zero() {
        let catalog = Catalog::new("empty", "Empty", vec![]);
        let scores = score(&catalog, &[Answer::new("q", "yes")]);
        assert_eq!(scores.overall, Some(0));
    }

    #[test]
    fn all_best_answers_score_full_on_builtin() {
        let catalog = Catalog::builtin();
        let answers: Vec<Answer> = catalog
            .questions
            .iter()
            .map(|q| match &q.kind {
                QuestionKind::YesNo => Answer::new(&q.id, "yes"),
                QuestionKind::Scale { max, .. } => Answer::new(&q.id, *max),
                QuestionKind::MultipleChoice { options } => {
                    Answer::new(&q.id, options[options.len() - 1].as_str())
                }
            })
            .collect();
        let scores = score(&catalog, &answers);
        assert_eq!(scores.overall, Some(100));
        assert!(scores.categories.values().all(|&s| s == Some(100)));
    }

    #[test]
    fn bounds_hold_for_in_domain_answers() {
        let catalog = Catalog::builtin();
        // Alternate yes/no, scale 2, first-but-one option.
        let answers: Vec<Answer> = catalog
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| match &q.kind {
                QuestionKind::YesNo => Answer::new(&q.id, if i % 2 == 0 { "yes" } else { "no" }),
                QuestionKind::Scale { .. } => Answer::new(&q.id, 2.0),
                QuestionKind::MultipleChoice { options } => Answer::new(&q.id, options[1].as_str()),
            })
            .collect();
        let scores = score(&catalog, &answers);
        let overall = scores.overall.unwrap();
        assert!((0..=100).contains(&overall));
        for s in scores.categories.values() {
            assert!((0..=100).contains(&s.unwrap()));
        }
    }

    #[test]
    fn flipping_no_to_yes_never_lowers_category() {
        let catalog = Catalog::builtin();
        let base: Vec<Answer> = catalog
            .questions
            .iter()
            .filter(|q| q.kind == QuestionKind::YesNo)
            .map(|q| Answer::new(&q.id, "no"))
            .collect();
        let before = score(&catalog, &base);

        for (i, answer) in base.iter().enumerate() {
            let mut flipped = base.clone();
            flipped[i] = Answer::new(&answer.question_id, "yes");
            let after = score(&catalog, &flipped);
            let category = catalog.question(&answer.question_id).unwrap().category;
            assert!(after.categories[&category] >= before.categories[&category]);
        }
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_percent(66.5), Some(67));
        assert_eq!(round_percent(-2.5), Some(-2));
        assert_eq!(round_percent(f64::NAN), None);
    }
}
