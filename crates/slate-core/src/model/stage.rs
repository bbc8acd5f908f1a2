//! The fixed 12-stage production pipeline and its gating table.
//!
//! Stages are strictly ordered: content enters at [`Stage::Pending`] and can
//! only move forward one stage at a time until [`Stage::Published`]. Each row
//! of [`STAGE_TABLE`] lists the requirements in force once content sits at
//! (or is advancing into) that stage, so the gating rules in
//! [`crate::validate::stage`] are data-driven rather than scattered across
//! per-field threshold constants.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Minimum script length (in characters) accepted by the script requirement.
pub const MIN_SCRIPT_LEN: usize = 50;

/// The twelve pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Pending,
    Planning,
    Research,
    Outline,
    Scripting,
    ScriptReview,
    Recording,
    Editing,
    PostReview,
    Packaging,
    Scheduled,
    Published,
}

/// A field-level requirement that gates advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A non-blank title.
    Title,
    /// A script of at least [`MIN_SCRIPT_LEN`] characters.
    Script,
    /// A published link.
    Link,
    /// Every final check marked completed.
    FinalChecks,
}

/// One row of the pipeline table: a stage index, its name, and the
/// requirements in force at that stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRow {
    pub stage: Stage,
    pub name: &'static str,
    pub requires: &'static [Requirement],
}

const PRE_TITLE: &[Requirement] = &[];
const TITLED: &[Requirement] = &[Requirement::Title];
const SCRIPTED: &[Requirement] = &[Requirement::Title, Requirement::Script];
const PUBLISHABLE: &[Requirement] = &[
    Requirement::Title,
    Requirement::Script,
    Requirement::Link,
    Requirement::FinalChecks,
];

/// The ordered pipeline table. Index `i` holds the stage with index `i`.
pub const STAGE_TABLE: [StageRow; 12] = [
    StageRow { stage: Stage::Pending, name: "pending", requires: PRE_TITLE },
    StageRow { stage: Stage::Planning, name: "planning", requires: TITLED },
    StageRow { stage: Stage::Research, name: "research", requires: TITLED },
    StageRow { stage: Stage::Outline, name: "outline", requires: TITLED },
    StageRow { stage: Stage::Scripting, name: "scripting", requires: TITLED },
    StageRow { stage: Stage::ScriptReview, name: "script-review", requires: SCRIPTED },
    StageRow { stage: Stage::Recording, name: "recording", requires: SCRIPTED },
    StageRow { stage: Stage::Editing, name: "editing", requires: SCRIPTED },
    StageRow { stage: Stage::PostReview, name: "post-review", requires: SCRIPTED },
    StageRow { stage: Stage::Packaging, name: "packaging", requires: SCRIPTED },
    StageRow { stage: Stage::Scheduled, name: "scheduled", requires: SCRIPTED },
    StageRow { stage: Stage::Published, name: "published", requires: PUBLISHABLE },
];

impl Stage {
    /// The stage's position in the pipeline, `0..=11`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look a stage up by pipeline index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < STAGE_TABLE.len() {
            Some(STAGE_TABLE[index].stage)
        } else {
            None
        }
    }

    /// The stage immediately after this one, or `None` at the terminal stage.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// `true` for the terminal stage.
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }

    /// The requirements in force at this stage.
    #[must_use]
    pub const fn requirements(self) -> &'static [Requirement] {
        STAGE_TABLE[self.index()].requires
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        STAGE_TABLE[self.index()].name
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a stage name from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStageError {
    pub got: String,
}

impl fmt::Display for ParseStageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid stage: '{}'", self.got)
    }
}

impl std::error::Error for ParseStageError {}

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        STAGE_TABLE
            .iter()
            .find(|row| row.name == normalized)
            .map(|row| row.stage)
            .ok_or_else(|| ParseStageError { got: s.to_string() })
    }
}
