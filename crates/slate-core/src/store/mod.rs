//! The content store seam.
//!
//! The rule engine treats storage as an external collaborator reached through
//! [`ContentStore`]: point lookup by id or topic plus a full scan. Everything
//! returns `Result` so a transport-backed implementation can surface failure;
//! the in-memory reference implementation in [`memory`] never fails on reads.

pub mod memory;

use crate::error::StoreError;
use crate::model::content::Content;

/// Read access to stored content. Writes are owned by the concrete store,
/// which is responsible for serializing them per record.
pub trait ContentStore {
    /// Every content record. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_all(&self) -> Result<Vec<Content>, StoreError>;

    /// Look up a record by its unique topic.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_by_topic(&self, topic: &str) -> Result<Option<Content>, StoreError>;

    /// Look up a record by its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_by_id(&self, id: &str) -> Result<Option<Content>, StoreError>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn get_all(&self) -> Result<Vec<Content>, StoreError> {
        (**self).get_all()
    }

    fn get_by_topic(&self, topic: &str) -> Result<Option<Content>, StoreError> {
        (**self).get_by_topic(topic)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Content>, StoreError> {
        (**self).get_by_id(id)
    }
}
