#![forbid(unsafe_code)]
//! slate-core: data model, stage gating, and dependency validation for the
//! slate content pipeline.
//!
//! Content moves through a fixed 12-stage pipeline, one stage at a time,
//! gated by the requirement rows of [`model::stage::STAGE_TABLE`] and by
//! publication-ordering dependencies between items. Every gate takes a
//! [`model::content::Content`] snapshot as a plain value and returns a plain
//! [`validate::ValidationResult`]; stores own all mutation.
//!
//! # Conventions
//!
//! - **Errors**: validation outcomes are values ([`validate::ValidationResult`]);
//!   store and mutation failures are [`error::StoreError`]; `anyhow::Result`
//!   at application-facing edges (config I/O).
//! - **Logging**: `tracing` macros (`debug!`, `warn!`); no subscriber is
//!   installed by this crate.

pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;

pub use config::ProjectConfig;
pub use error::StoreError;
pub use model::content::Content;
pub use model::stage::Stage;
pub use store::ContentStore;
pub use validate::ValidationResult;
