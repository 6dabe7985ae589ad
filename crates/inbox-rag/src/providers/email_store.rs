//! Document store contract for synced email records

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::EmailRecord;

/// Trait for the email document store.
///
/// Every read is scoped by `owner_id`; an implementation must never return
/// another owner's records. A query that matches nothing succeeds with an
/// empty vector.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Up to `limit` records with `embeddings_generated = false`, in
    /// insertion order
    async fn find_unprocessed(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>>;

    /// Up to `limit` unread records, newest first
    async fn find_unread(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>>;

    /// Up to `limit` records regardless of read state, newest first
    async fn find_recent(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>>;

    /// Resolve ids back to full records, re-scoped by owner. Ids that do
    /// not match are skipped, not errors.
    async fn find_by_ids(&self, owner_id: &str, ids: &[Uuid]) -> Result<Vec<EmailRecord>>;

    /// Set `embeddings_generated = true, processed = true` on every id
    async fn mark_embedded(&self, ids: &[Uuid]) -> Result<()>;

    /// Store name for logging
    fn name(&self) -> &str;
}
