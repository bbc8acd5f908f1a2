//! In-memory reference store.
//!
//! This is the caller-owned application state value: a plain map of content
//! records plus update functions, with no global state. The rule engine
//! stays independent of it, taking snapshots and returning plain results;
//! this store simply runs those gates before applying a mutation.
//!
//! Reads never fail here. Mutations follow the error policy of the wider
//! system: rejected changes surface as [`StoreError::Rejected`] carrying the
//! full validation result, so the initiating form can display every message.

use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::ProjectConfig;
use crate::error::StoreError;
use crate::model::content::{Content, ContentFlag, FinalCheck, TOPIC_MAX_LEN, TOPIC_MIN_LEN};
use crate::model::stage::Stage;
use crate::store::ContentStore;
use crate::validate::ValidationResult;
use crate::validate::deps::{validate_dependencies, validate_publish_dependencies};
use crate::validate::stage::validate_stage_requirements;

/// Fields supplied when creating content. The store assigns the id, the
/// starting stage, timestamps, and the configured default final checks.
#[derive(Debug, Clone, Default)]
pub struct ContentDraft {
    pub topic: String,
    pub category: String,
    pub title: Option<String>,
    pub script: Option<String>,
    pub link: Option<String>,
    pub publish_after: Option<String>,
    pub publish_before: Option<String>,
    pub morals: Vec<String>,
}

impl ContentDraft {
    #[must_use]
    pub fn new(topic: &str, category: &str) -> Self {
        Self {
            topic: topic.to_string(),
            category: category.to_string(),
            ..Self::default()
        }
    }
}

/// One optional-field edit: leave it alone, clear it, or set it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldEdit<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T: Clone> FieldEdit<T> {
    fn resolve(&self, current: &Option<T>) -> Option<T> {
        match self {
            Self::Keep => current.clone(),
            Self::Clear => None,
            Self::Set(value) => Some(value.clone()),
        }
    }
}

/// A batch of field edits. Every field defaults to `Keep`, so callers name
/// only what they change. The topic is not editable; renaming content
/// identity is out of scope.
#[derive(Debug, Clone, Default)]
pub struct ContentEdit {
    pub category: Option<String>,
    pub title: FieldEdit<String>,
    pub script: FieldEdit<String>,
    pub link: FieldEdit<String>,
    pub publish_after: FieldEdit<String>,
    pub publish_before: FieldEdit<String>,
    pub morals: Option<Vec<String>>,
    pub flags: Option<BTreeSet<ContentFlag>>,
}

/// Map-backed content store keyed by store-assigned id.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, Content>,
    next_id: u64,
    default_checks: Vec<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ProjectConfig::default())
    }

    #[must_use]
    pub fn with_config(config: &ProjectConfig) -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 0,
            default_checks: config.checks.defaults.clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert new content at the start of the pipeline.
    ///
    /// # Errors
    ///
    /// Rejects drafts with an out-of-range topic length, a blank category,
    /// a duplicate topic, or structurally invalid dependency references.
    pub fn create(&mut self, draft: ContentDraft) -> Result<Content, StoreError> {
        let topic = draft.topic.trim().to_string();
        let mut errors = Vec::new();

        let topic_len = topic.chars().count();
        if !(TOPIC_MIN_LEN..=TOPIC_MAX_LEN).contains(&topic_len) {
            errors.push(format!(
                "topic must be between {TOPIC_MIN_LEN} and {TOPIC_MAX_LEN} characters"
            ));
        }
        if draft.category.trim().is_empty() {
            errors.push("category must not be empty".to_string());
        }

        if self.get_by_topic(&topic)?.is_some() {
            return Err(StoreError::DuplicateTopic(topic));
        }

        let structural = validate_dependencies(
            &*self,
            draft.publish_after.as_deref(),
            draft.publish_before.as_deref(),
            Some(&topic),
        )?;
        let verdict = ValidationResult::from_errors(errors).merge(structural);
        if !verdict.is_valid {
            return Err(StoreError::Rejected(verdict));
        }

        self.next_id += 1;
        let now = Utc::now();
        let content = Content {
            id: format!("ct-{}", self.next_id),
            topic,
            category: draft.category.trim().to_string(),
            current_stage: Stage::Pending,
            title: draft.title,
            script: draft.script,
            link: draft.link,
            final_checks: self.default_final_checks(),
            publish_after: draft.publish_after,
            publish_before: draft.publish_before,
            morals: draft.morals,
            flags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %content.id, topic = %content.topic, "created content");
        self.items.insert(content.id.clone(), content.clone());
        Ok(content)
    }

    /// Apply a batch of field edits.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Rejected`] when the edit leaves dependency references
    /// structurally invalid or blanks the category.
    pub fn update_fields(&mut self, id: &str, edit: ContentEdit) -> Result<Content, StoreError> {
        let current = self
            .items
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .clone();

        let mut errors = Vec::new();
        if let Some(category) = &edit.category
            && category.trim().is_empty()
        {
            errors.push("category must not be empty".to_string());
        }

        let publish_after = edit.publish_after.resolve(&current.publish_after);
        let publish_before = edit.publish_before.resolve(&current.publish_before);
        let structural = validate_dependencies(
            &*self,
            publish_after.as_deref(),
            publish_before.as_deref(),
            Some(&current.topic),
        )?;
        let verdict = ValidationResult::from_errors(errors).merge(structural);
        if !verdict.is_valid {
            return Err(StoreError::Rejected(verdict));
        }

        let mut updated = current;
        if let Some(category) = edit.category {
            updated.category = category.trim().to_string();
        }
        updated.title = edit.title.resolve(&updated.title);
        updated.script = edit.script.resolve(&updated.script);
        updated.link = edit.link.resolve(&updated.link);
        updated.publish_after = publish_after;
        updated.publish_before = publish_before;
        if let Some(morals) = edit.morals {
            updated.morals = morals;
        }
        if let Some(flags) = edit.flags {
            updated.flags = flags;
        }
        updated.updated_at = Utc::now();

        self.items.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    /// Toggle one final check.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] when either the content id or the
    /// check id is unknown.
    pub fn set_check(
        &mut self,
        id: &str,
        check_id: &str,
        completed: bool,
    ) -> Result<Content, StoreError> {
        let content = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let check = content
            .final_checks
            .iter_mut()
            .find(|check| check.id == check_id)
            .ok_or_else(|| StoreError::NotFound(format!("{id}/{check_id}")))?;
        check.completed = completed;
        content.updated_at = Utc::now();
        Ok(content.clone())
    }

    /// Advance content to `target`, running the stage gate and, for the
    /// terminal stage, the publication dependency gate.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Rejected`] carrying every violated rule otherwise.
    pub fn advance_stage(&mut self, id: &str, target: Stage) -> Result<Content, StoreError> {
        let current = self
            .items
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .clone();

        let mut verdict = validate_stage_requirements(&current, target);
        if target.is_published() {
            verdict = verdict.merge(validate_publish_dependencies(&*self, &current)?);
        }
        if !verdict.is_valid {
            return Err(StoreError::Rejected(verdict));
        }

        let mut updated = current;
        updated.current_stage = target;
        updated.updated_at = Utc::now();
        debug!(id = %updated.id, stage = %target, "advanced content");

        self.items.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    fn default_final_checks(&self) -> Vec<FinalCheck> {
        self.default_checks
            .iter()
            .enumerate()
            .map(|(i, text)| FinalCheck {
                id: format!("fc-{}", i + 1),
                text: text.clone(),
                completed: false,
            })
            .collect()
    }
}

impl ContentStore for MemoryStore {
    fn get_all(&self) -> Result<Vec<Content>, StoreError> {
        Ok(self.items.values().cloned().collect())
    }

    fn get_by_topic(&self, topic: &str) -> Result<Option<Content>, StoreError> {
        Ok(self
            .items
            .values()
            .find(|content| content.topic == topic)
            .cloned())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Content>, StoreError> {
        Ok(self.items.get(id).cloned())
    }
}
