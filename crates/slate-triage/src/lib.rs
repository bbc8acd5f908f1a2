#![forbid(unsafe_code)]
//! slate-triage: publication-readiness scoring and suggestion ranking for
//! the slate content pipeline.
//!
//! Consumes content snapshots through the `slate-core` store seam, scores
//! each unpublished item by closeness to publication, filters out items
//! blocked by an unpublished `publish_after` dependency, and surfaces a
//! bounded, sorted suggestion list plus summary statistics.
//!
//! # Conventions
//!
//! - **Errors**: scoring is pure and infallible; the engine converts store
//!   failures into empty/zeroed results rather than propagating them.
//! - **Logging**: `tracing` macros; degradation paths log at `warn`.

pub mod score;
pub mod suggest;

pub use score::{ReadinessScore, readiness_score};
pub use suggest::{
    ContentSuggestion, DEFAULT_MAX_SUGGESTIONS, SuggestionEngine, SuggestionStats,
};
