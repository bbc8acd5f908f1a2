//! The stage transition gate.
//!
//! A pure predicate over a content snapshot: no persisted transition history,
//! no side effects. Legality is recomputed from scratch on every call from
//! `current_stage` and the stage table.

use super::ValidationResult;
use crate::model::content::Content;
use crate::model::stage::{MIN_SCRIPT_LEN, Requirement, Stage};

/// Check whether `content` may move to `target`.
///
/// Rules are evaluated independently and all violations are reported:
/// backward and skipping moves are rejected (only `current + 1` is a legal
/// target, and no-op moves are rejected too), and every requirement row of
/// the target stage must be satisfied by the snapshot.
#[must_use]
pub fn validate_stage_requirements(content: &Content, target: Stage) -> ValidationResult {
    let mut errors = Vec::new();
    let current = content.current_stage;

    if target.index() < current.index() {
        errors.push("cannot move to a previous stage".to_string());
    } else if target == current {
        errors.push(format!("content is already at the {target} stage"));
    } else if target.index() > current.index() + 1 {
        errors.push("cannot skip stages: content must advance one stage at a time".to_string());
    }

    for requirement in target.requirements() {
        if let Some(message) = requirement_error(content, *requirement) {
            errors.push(message);
        }
    }

    ValidationResult::from_errors(errors)
}

fn requirement_error(content: &Content, requirement: Requirement) -> Option<String> {
    match requirement {
        Requirement::Title if !content.has_title() => Some("title is required".to_string()),
        Requirement::Script if !content.script_meets_minimum() => Some(format!(
            "script of at least {MIN_SCRIPT_LEN} characters is required"
        )),
        Requirement::Link if !content.has_link() => Some("link is required".to_string()),
        Requirement::FinalChecks if !content.final_checks_complete() => {
            Some("all final checks must be completed".to_string())
        }
        _ => None,
    }
}
