//! Data model: the content record and the fixed stage pipeline.

pub mod content;
pub mod stage;
