//! Dependency reference validation.
//!
//! `publish_after` and `publish_before` are weak references by topic. Two
//! gates live here:
//!
//! - [`validate_dependencies`] is the structural check run on create/update:
//!   referenced topics must exist, the two references must differ, neither
//!   may point at the owning content, and the `publish_after` chain must not
//!   loop back to the owner.
//! - [`validate_publish_dependencies`] is the publication gate: the
//!   `publish_after` target must itself be published before the owner may
//!   reach the terminal stage. `publish_before` is descriptive only and is
//!   never enforced here; the dependent item's own gate covers the symmetric
//!   direction.

use std::collections::HashSet;

use super::ValidationResult;
use crate::error::StoreError;
use crate::model::content::Content;
use crate::store::ContentStore;

/// Structural check for dependency references on create or update.
///
/// All violations are reported together. `own_topic` is `None` on create
/// flows where the topic is not yet fixed.
///
/// # Errors
///
/// Returns an error only if a store lookup fails.
pub fn validate_dependencies<S: ContentStore>(
    store: &S,
    publish_after: Option<&str>,
    publish_before: Option<&str>,
    own_topic: Option<&str>,
) -> Result<ValidationResult, StoreError> {
    let mut errors = Vec::new();

    if let (Some(after), Some(before)) = (publish_after, publish_before)
        && after == before
    {
        errors.push(
            "publish_after and publish_before cannot reference the same content".to_string(),
        );
    }

    if own_topic.is_some() && publish_after == own_topic {
        errors.push("content cannot be published after itself".to_string());
    }
    if own_topic.is_some() && publish_before == own_topic {
        errors.push("content cannot be published before itself".to_string());
    }

    for reference in [publish_after, publish_before].into_iter().flatten() {
        if own_topic == Some(reference) {
            // Already reported as a self-reference above.
            continue;
        }
        if store.get_by_topic(reference)?.is_none() {
            errors.push(format!("referenced topic '{reference}' does not exist"));
        }
    }

    if let (Some(after), Some(own)) = (publish_after, own_topic)
        && after != own
        && let Some(cycle) = find_publish_after_cycle(store, after, own)?
    {
        errors.push(format!(
            "circular publish_after chain: {}",
            cycle.join(" -> ")
        ));
    }

    Ok(ValidationResult::from_errors(errors))
}

/// Walk the `publish_after` chain starting at `from`, looking for a path
/// back to `own`. Returns the ordered topic path closing the cycle, or
/// `None` if the chain terminates without reaching `own`.
fn find_publish_after_cycle<S: ContentStore>(
    store: &S,
    from: &str,
    own: &str,
) -> Result<Option<Vec<String>>, StoreError> {
    let mut path = vec![own.to_string(), from.to_string()];
    let mut visited: HashSet<String> = HashSet::new();
    let mut cursor = from.to_string();

    while visited.insert(cursor.clone()) {
        let Some(next) = store
            .get_by_topic(&cursor)?
            .and_then(|content| content.publish_after)
        else {
            return Ok(None);
        };

        if next == own {
            path.push(own.to_string());
            return Ok(Some(path));
        }
        path.push(next.clone());
        cursor = next;
    }

    // The chain loops among other items without reaching `own`; that cycle
    // was (or will be) reported when those items are validated.
    Ok(None)
}

/// The publication gate: only meaningful when advancing toward the terminal
/// stage. Fails when `publish_after` is unresolved or names content that is
/// not yet published.
///
/// # Errors
///
/// Returns an error only if a store lookup fails.
pub fn validate_publish_dependencies<S: ContentStore>(
    store: &S,
    content: &Content,
) -> Result<ValidationResult, StoreError> {
    let Some(after) = content.publish_after.as_deref() else {
        return Ok(ValidationResult::ok());
    };

    let result = match store.get_by_topic(after)? {
        None => ValidationResult::from_errors(vec![format!(
            "publish_after dependency '{after}' does not exist"
        )]),
        Some(dependency) if !dependency.is_published() => ValidationResult::from_errors(vec![
            format!("cannot publish until '{after}' is published"),
        ]),
        Some(_) => ValidationResult::ok(),
    };

    Ok(result)
}
