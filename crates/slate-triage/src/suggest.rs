//! The suggestion engine: rank unpublished, unblocked content by readiness.
//!
//! Read-heavy and failure-tolerant: any store failure during a batch degrades
//! to an empty result (logged at `warn`) instead of a partial list or an
//! error to the caller. A single unresolved dependency lookup therefore
//! blanks the whole suggestion list; this all-or-nothing policy is
//! deliberate and covered by tests.

use serde::Serialize;
use tracing::warn;

use slate_core::error::StoreError;
use slate_core::model::content::Content;
use slate_core::store::ContentStore;

use crate::score::readiness_score;

/// Default cap on suggestions surfaced per request.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 2;

/// One ranked suggestion. An item present here is by construction
/// unblocked, so `blocked_by` is always empty; the field exists so callers
/// render suggestions and blocked items with one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSuggestion {
    pub content: Content,
    pub score: f64,
    pub remaining_steps: f64,
    pub blocked_by: Vec<String>,
}

/// Summary statistics over the pre-truncation eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SuggestionStats {
    /// Content items not yet published.
    pub candidates: usize,
    /// Unpublished items whose dependency chain permits publication.
    pub ready: usize,
    /// Unpublished items excluded by an unpublished or unresolved
    /// `publish_after` reference.
    pub blocked: usize,
    /// Mean readiness score over the ready set; `0.0` when empty.
    pub average_score: f64,
    /// Number actually surfaced, bounded by the configured maximum.
    pub surfaced: usize,
}

/// Ranks store content by closeness to publication.
#[derive(Debug, Clone)]
pub struct SuggestionEngine<S> {
    store: S,
    max_suggestions: usize,
}

struct Survey {
    candidates: usize,
    blocked: usize,
    /// Ready items, sorted best-first.
    ready: Vec<ContentSuggestion>,
}

impl<S: ContentStore> SuggestionEngine<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_max(store, DEFAULT_MAX_SUGGESTIONS)
    }

    #[must_use]
    pub const fn with_max(store: S, max_suggestions: usize) -> Self {
        Self {
            store,
            max_suggestions,
        }
    }

    /// The ranked suggestion list, truncated to the configured maximum.
    ///
    /// Published items are dropped; items whose `publish_after` is unresolved
    /// or not yet published are excluded as blocked (fail-closed). Store
    /// failure anywhere in the batch yields an empty list.
    #[must_use]
    pub fn publication_suggestions(&self) -> Vec<ContentSuggestion> {
        match self.survey() {
            Ok(survey) => {
                let mut ready = survey.ready;
                ready.truncate(self.max_suggestions);
                ready
            }
            Err(err) => {
                warn!(error = %err, "content store unavailable; returning no suggestions");
                Vec::new()
            }
        }
    }

    /// Summary statistics over the pre-truncation eligible set. Store
    /// failure degrades to zeroed stats.
    #[must_use]
    pub fn suggestion_statistics(&self) -> SuggestionStats {
        match self.survey() {
            Ok(survey) => {
                let ready = survey.ready.len();
                SuggestionStats {
                    candidates: survey.candidates,
                    ready,
                    blocked: survey.blocked,
                    average_score: mean_score(&survey.ready),
                    surfaced: ready.min(self.max_suggestions),
                }
            }
            Err(err) => {
                warn!(error = %err, "content store unavailable; returning zeroed stats");
                SuggestionStats::default()
            }
        }
    }

    fn survey(&self) -> Result<Survey, StoreError> {
        let mut candidates = 0;
        let mut blocked = 0;
        let mut ready = Vec::new();

        for content in self.store.get_all()? {
            if content.is_published() {
                continue;
            }
            candidates += 1;

            if let Some(after) = content.publish_after.as_deref() {
                let dependency_published = self
                    .store
                    .get_by_topic(after)?
                    .is_some_and(|dependency| dependency.is_published());
                if !dependency_published {
                    blocked += 1;
                    continue;
                }
            }

            let estimate = readiness_score(&content);
            ready.push(ContentSuggestion {
                content,
                score: estimate.score,
                remaining_steps: estimate.remaining_steps,
                blocked_by: Vec::new(),
            });
        }

        ready.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.remaining_steps.total_cmp(&b.remaining_steps))
                .then_with(|| a.content.created_at.cmp(&b.content.created_at))
        });

        Ok(Survey {
            candidates,
            blocked,
            ready,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_score(ready: &[ContentSuggestion]) -> f64 {
    if ready.is_empty() {
        return 0.0;
    }
    ready.iter().map(|s| s.score).sum::<f64>() / ready.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{ContentSuggestion, SuggestionEngine};
    use chrono::Utc;
    use slate_core::error::StoreError;
    use slate_core::model::content::{Content, FinalCheck};
    use slate_core::model::stage::Stage;
    use slate_core::store::ContentStore;
    use std::collections::BTreeSet;

    fn content(topic: &str, stage: Stage) -> Content {
        let now = Utc::now();
        Content {
            id: format!("ct-{topic}"),
            topic: topic.to_string(),
            category: "video".to_string(),
            current_stage: stage,
            title: Some("t".to_string()),
            script: Some("s".repeat(80)),
            link: Some("https://example.com/v".to_string()),
            final_checks: Vec::new(),
            publish_after: None,
            publish_before: None,
            morals: Vec::new(),
            flags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Fixed snapshot store for engine tests.
    struct StaticStore(Vec<Content>);

    impl ContentStore for StaticStore {
        fn get_all(&self) -> Result<Vec<Content>, StoreError> {
            Ok(self.0.clone())
        }

        fn get_by_topic(&self, topic: &str) -> Result<Option<Content>, StoreError> {
            Ok(self.0.iter().find(|c| c.topic == topic).cloned())
        }

        fn get_by_id(&self, id: &str) -> Result<Option<Content>, StoreError> {
            Ok(self.0.iter().find(|c| c.id == id).cloned())
        }
    }

    /// Store whose dependency lookups fail while the scan succeeds.
    struct FlakyLookupStore(Vec<Content>);

    impl ContentStore for FlakyLookupStore {
        fn get_all(&self) -> Result<Vec<Content>, StoreError> {
            Ok(self.0.clone())
        }

        fn get_by_topic(&self, _topic: &str) -> Result<Option<Content>, StoreError> {
            Err(StoreError::Backend("lookup timeout".to_string()))
        }

        fn get_by_id(&self, _id: &str) -> Result<Option<Content>, StoreError> {
            Err(StoreError::Backend("lookup timeout".to_string()))
        }
    }

    fn topics(suggestions: &[ContentSuggestion]) -> Vec<&str> {
        suggestions
            .iter()
            .map(|s| s.content.topic.as_str())
            .collect()
    }

    #[test]
    fn later_stage_ranks_first_with_strictly_higher_score() {
        let store = StaticStore(vec![
            content("mid-pipeline", Stage::ScriptReview),
            content("nearly-done", Stage::Packaging),
        ]);
        let suggestions = SuggestionEngine::new(store).publication_suggestions();

        assert_eq!(topics(&suggestions), vec!["nearly-done", "mid-pipeline"]);
        assert!(suggestions[0].score > suggestions[1].score);
        assert!(suggestions.iter().all(|s| s.blocked_by.is_empty()));
    }

    #[test]
    fn published_content_is_never_suggested() {
        let store = StaticStore(vec![
            content("already-out", Stage::Published),
            content("in-flight", Stage::Editing),
        ]);
        let suggestions = SuggestionEngine::new(store).publication_suggestions();
        assert_eq!(topics(&suggestions), vec!["in-flight"]);
    }

    #[test]
    fn unpublished_and_unresolved_dependencies_both_block() {
        let mut waiting = content("waiting", Stage::Scheduled);
        waiting.publish_after = Some("in-flight".to_string());
        let mut dangling = content("dangling", Stage::Scheduled);
        dangling.publish_after = Some("no-such-topic".to_string());
        let mut cleared = content("cleared", Stage::Scheduled);
        cleared.publish_after = Some("already-out".to_string());

        let store = StaticStore(vec![
            content("already-out", Stage::Published),
            content("in-flight", Stage::Editing),
            waiting,
            dangling,
            cleared,
        ]);
        let engine = SuggestionEngine::with_max(store, 10);
        let suggestions = engine.publication_suggestions();

        let listed = topics(&suggestions);
        assert!(listed.contains(&"cleared"));
        assert!(listed.contains(&"in-flight"));
        assert!(!listed.contains(&"waiting"));
        assert!(!listed.contains(&"dangling"));
    }

    #[test]
    fn output_is_bounded_by_the_configured_maximum() {
        let store = StaticStore(
            (0..5)
                .map(|i| {
                    content(
                        &format!("topic-{i}"),
                        Stage::from_index(5 + i).expect("in range"),
                    )
                })
                .collect(),
        );
        assert_eq!(SuggestionEngine::new(store).publication_suggestions().len(), 2);
    }

    #[test]
    fn a_single_failed_lookup_blanks_the_whole_batch() {
        let mut dependent = content("dependent", Stage::Scheduled);
        dependent.publish_after = Some("elsewhere".to_string());
        let store = FlakyLookupStore(vec![content("standalone", Stage::Editing), dependent]);

        let engine = SuggestionEngine::new(store);
        assert!(engine.publication_suggestions().is_empty());
        assert_eq!(engine.suggestion_statistics(), super::SuggestionStats::default());
    }

    #[test]
    fn exact_ties_break_by_creation_time() {
        // Same stage, same fields: scores and remaining steps tie, so the
        // older item wins.
        let mut older = content("older", Stage::Recording);
        older.created_at -= chrono::Duration::hours(1);
        let newer = content("newer", Stage::Recording);

        let store = StaticStore(vec![newer, older]);
        let suggestions = SuggestionEngine::with_max(store, 10).publication_suggestions();
        assert_eq!(topics(&suggestions), vec!["older", "newer"]);
    }

    #[test]
    fn score_ties_break_by_fewer_remaining_steps() {
        // Both score 75: recording with no checks (60 + 15) versus
        // script-review with a fully completed check list (50 + 15 + 10).
        // The recording item has fewer remaining steps and must rank first.
        let closer = content("closer", Stage::Recording);
        let mut checked_off = content("checked-off", Stage::ScriptReview);
        checked_off.final_checks = vec![
            FinalCheck {
                id: "fc-1".to_string(),
                text: "script proofread".to_string(),
                completed: true,
            },
            FinalCheck {
                id: "fc-2".to_string(),
                text: "thumbnail ready".to_string(),
                completed: true,
            },
        ];

        let store = StaticStore(vec![checked_off, closer]);
        let suggestions = SuggestionEngine::with_max(store, 10).publication_suggestions();
        assert_eq!(topics(&suggestions), vec!["closer", "checked-off"]);
        assert!((suggestions[0].score - suggestions[1].score).abs() < f64::EPSILON);
        assert!(suggestions[0].remaining_steps < suggestions[1].remaining_steps);
    }

    #[test]
    fn suggestions_serialize_for_dashboards() {
        let store = StaticStore(vec![content("in-flight", Stage::Editing)]);
        let suggestions = SuggestionEngine::new(store).publication_suggestions();
        let json = serde_json::to_string(&suggestions).expect("serialize");
        assert!(json.contains("\"topic\":\"in-flight\""));
        assert!(json.contains("\"blocked_by\":[]"));
    }

    #[test]
    fn statistics_count_the_pre_truncation_set() {
        let mut blocked = content("blocked", Stage::Scheduled);
        blocked.publish_after = Some("in-flight".to_string());

        let store = StaticStore(vec![
            content("already-out", Stage::Published),
            content("in-flight", Stage::Editing),
            content("outline-only", Stage::Outline),
            content("packaged", Stage::Packaging),
            blocked,
        ]);
        let stats = SuggestionEngine::new(store).suggestion_statistics();

        assert_eq!(stats.candidates, 4);
        assert_eq!(stats.ready, 3);
        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.surfaced, 2);
        assert!(stats.average_score > 0.0);
    }
}
