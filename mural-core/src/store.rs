use async_trait::async_trait;

use crate::{NewPost, PostPatch, PostRecord, Result};

/// Record persistence seam - must be implemented by all record backends.
///
/// Concurrency control is whatever the backend's single-document atomicity
/// provides: field-level merge semantics, last-writer-wins at the document
/// level. There is no version token; two concurrent updates to the same id
/// interleave arbitrarily and the last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record, assigning id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<PostRecord>;

    /// Look a record up by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<PostRecord>>;

    /// Merge the supplied fields into an existing record. Returns the number
    /// of records actually modified: 0 when the id is absent or when every
    /// supplied value already equals the stored one.
    async fn update_fields(&self, id: &str, patch: PostPatch) -> Result<u64>;

    /// Delete a record. Returns whether anything was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// All records, newest first.
    async fn find_all(&self) -> Result<Vec<PostRecord>>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64>;
}
