//! Publication readiness scoring.
//!
//! A pure function over a content snapshot: the further along the pipeline
//! and the more of its publication requirements already in hand, the higher
//! the score. Items that are failing their own stage's gate are pushed below
//! compliant items at the same stage by the missing-requirement penalty.

use serde::Serialize;
use slate_core::model::content::Content;
use slate_core::model::stage::{Requirement, Stage};

/// Score contributed per pipeline stage already reached.
pub const STAGE_WEIGHT: f64 = 10.0;
/// Bonus per populated optional field (title, script, link).
pub const FIELD_BONUS: f64 = 5.0;
/// Bonus for a fully completed final-check list, scaled by the fraction done.
pub const CHECK_BONUS: f64 = 10.0;
/// Penalty per requirement missing at the item's current stage.
pub const MISSING_PENALTY: f64 = 15.0;

/// Remaining-step weight of each missing field (title, script, link).
const FIELD_STEP: f64 = 0.5;
/// Remaining-step weight of each incomplete final check.
const CHECK_STEP: f64 = 0.1;

/// A readiness estimate for one unpublished content item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadinessScore {
    /// Heuristic closeness to publication; higher is closer.
    pub score: f64,
    /// Fractional stages-plus-missing-requirements left, one decimal place.
    pub remaining_steps: f64,
}

/// Score one content snapshot. Deterministic: equal snapshots always yield
/// equal results.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn readiness_score(content: &Content) -> ReadinessScore {
    let stage = content.current_stage.index();

    let mut score = stage as f64 * STAGE_WEIGHT;
    if content.has_title() {
        score += FIELD_BONUS;
    }
    if content.has_script() {
        score += FIELD_BONUS;
    }
    if content.has_link() {
        score += FIELD_BONUS;
    }
    score += CHECK_BONUS * content.completed_check_fraction();

    for requirement in content.current_stage.requirements() {
        if field_requirement_missing(content, *requirement) {
            score -= MISSING_PENALTY;
        }
    }

    let missing_fields = [
        !content.has_title(),
        !content.script_meets_minimum(),
        !content.has_link(),
    ]
    .iter()
    .filter(|missing| **missing)
    .count();

    let remaining = (Stage::Published.index() - stage) as f64
        + FIELD_STEP * missing_fields as f64
        + CHECK_STEP * content.incomplete_check_count() as f64;

    ReadinessScore {
        score,
        remaining_steps: round_tenths(remaining),
    }
}

/// Whether a field requirement of the item's current stage is unmet. Final
/// checks are not a field; their progress is covered by the check bonus.
fn field_requirement_missing(content: &Content, requirement: Requirement) -> bool {
    match requirement {
        Requirement::Title => !content.has_title(),
        Requirement::Script => !content.script_meets_minimum(),
        Requirement::Link => !content.has_link(),
        Requirement::FinalChecks => false,
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::{readiness_score, round_tenths};
    use chrono::Utc;
    use proptest::prelude::*;
    use slate_core::model::content::{Content, FinalCheck};
    use slate_core::model::stage::Stage;
    use std::collections::BTreeSet;

    fn content_at(stage: Stage) -> Content {
        let now = Utc::now();
        Content {
            id: "ct-1".to_string(),
            topic: "rust-error-handling".to_string(),
            category: "video".to_string(),
            current_stage: stage,
            title: None,
            script: None,
            link: None,
            final_checks: Vec::new(),
            publish_after: None,
            publish_before: None,
            morals: Vec::new(),
            flags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn prepared(stage: Stage) -> Content {
        let mut content = content_at(stage);
        content.title = Some("Error handling".to_string());
        content.script = Some("s".repeat(80));
        content.link = Some("https://example.com/v".to_string());
        content
    }

    #[test]
    fn remaining_steps_counts_stages_and_missing_fields() {
        // Stage 8, link the only gap: (11 - 8) + 0.5 = 3.5.
        let mut content = prepared(Stage::PostReview);
        content.link = None;
        let estimate = readiness_score(&content);
        assert!((estimate.remaining_steps - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn remaining_steps_charges_incomplete_checks() {
        let mut content = prepared(Stage::Scheduled);
        content.final_checks = vec![
            FinalCheck {
                id: "fc-1".to_string(),
                text: "script proofread".to_string(),
                completed: true,
            },
            FinalCheck {
                id: "fc-2".to_string(),
                text: "thumbnail ready".to_string(),
                completed: false,
            },
            FinalCheck {
                id: "fc-3".to_string(),
                text: "link verified".to_string(),
                completed: false,
            },
        ];
        // (11 - 10) + 0.1 * 2 = 1.2.
        let estimate = readiness_score(&content);
        assert!((estimate.remaining_steps - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn noncompliant_content_scores_below_compliant_at_same_stage() {
        let compliant = prepared(Stage::Recording);
        let mut failing = prepared(Stage::Recording);
        failing.script = Some("too short".to_string());

        let a = readiness_score(&compliant);
        let b = readiness_score(&failing);
        assert!(a.score > b.score);
    }

    #[test]
    fn check_completion_raises_the_score() {
        let mut none_done = prepared(Stage::Packaging);
        none_done.final_checks = vec![FinalCheck {
            id: "fc-1".to_string(),
            text: "thumbnail ready".to_string(),
            completed: false,
        }];
        let mut all_done = none_done.clone();
        all_done.final_checks[0].completed = true;

        assert!(readiness_score(&all_done).score > readiness_score(&none_done).score);
    }

    #[test]
    fn scoring_is_deterministic() {
        let content = prepared(Stage::Editing);
        assert_eq!(readiness_score(&content), readiness_score(&content));
    }

    #[test]
    fn rounding_is_to_one_decimal() {
        assert!((round_tenths(3.4499) - 3.4).abs() < f64::EPSILON);
        assert!((round_tenths(3.45) - 3.5).abs() < f64::EPSILON);
    }

    proptest! {
        /// For compliant items with identical fields, a later stage always
        /// scores strictly higher and leaves strictly fewer remaining steps.
        #[test]
        fn score_is_monotone_in_stage(earlier in 0_usize..11, later in 0_usize..11) {
            prop_assume!(earlier < later);
            let a = prepared(Stage::from_index(earlier).expect("in range"));
            let b = prepared(Stage::from_index(later).expect("in range"));

            let score_a = readiness_score(&a);
            let score_b = readiness_score(&b);
            prop_assert!(score_b.score > score_a.score);
            prop_assert!(score_b.remaining_steps < score_a.remaining_steps);
        }
    }
}
