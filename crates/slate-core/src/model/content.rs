//! The content record and its nested field types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::stage::{MIN_SCRIPT_LEN, Stage};

/// Minimum accepted topic length.
pub const TOPIC_MIN_LEN: usize = 3;
/// Maximum accepted topic length.
pub const TOPIC_MAX_LEN: usize = 100;

/// Suggested category labels. Any non-empty string is accepted; these are
/// offered to callers for pickers and defaults only.
pub const SUGGESTED_CATEGORIES: &[&str] = &["video", "short", "article", "podcast"];

/// A named boolean task that must be completed before publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalCheck {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Post-publication markers. Carried as data only; no validation reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFlag {
    Evergreen,
    NeedsUpdate,
    Retired,
}

impl ContentFlag {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Evergreen => "evergreen",
            Self::NeedsUpdate => "needs-update",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for ContentFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work moving through the pipeline.
///
/// `publish_after` and `publish_before` are weak references by topic:
/// relation plus lookup, never ownership. The store is the only writer;
/// every function in this workspace takes `Content` as a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub topic: String,
    pub category: String,
    pub current_stage: Stage,
    pub title: Option<String>,
    pub script: Option<String>,
    pub link: Option<String>,
    pub final_checks: Vec<FinalCheck>,
    pub publish_after: Option<String>,
    pub publish_before: Option<String>,
    pub morals: Vec<String>,
    pub flags: BTreeSet<ContentFlag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    /// `true` when the title is present and not blank.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// `true` when a script is present at all (any length).
    #[must_use]
    pub fn has_script(&self) -> bool {
        self.script.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// `true` when the script is present and meets [`MIN_SCRIPT_LEN`].
    #[must_use]
    pub fn script_meets_minimum(&self) -> bool {
        self.script
            .as_deref()
            .is_some_and(|s| s.chars().count() >= MIN_SCRIPT_LEN)
    }

    /// `true` when a link is present and not blank.
    #[must_use]
    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    /// `true` when every final check is completed. An empty list counts as
    /// complete.
    #[must_use]
    pub fn final_checks_complete(&self) -> bool {
        self.final_checks.iter().all(|check| check.completed)
    }

    /// Number of final checks still open.
    #[must_use]
    pub fn incomplete_check_count(&self) -> usize {
        self.final_checks
            .iter()
            .filter(|check| !check.completed)
            .count()
    }

    /// Fraction of final checks completed, in `[0, 1]`. An empty list scores
    /// `0.0` (no credit for checks that were never defined).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completed_check_fraction(&self) -> f64 {
        if self.final_checks.is_empty() {
            return 0.0;
        }
        let done = self
            .final_checks
            .iter()
            .filter(|check| check.completed)
            .count();
        done as f64 / self.final_checks.len() as f64
    }

    /// `true` once the content has reached the terminal stage.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.current_stage.is_published()
    }
}
