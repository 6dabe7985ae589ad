//! Vector index contract and lazy connection management

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::VectorIndexConfig;
use crate::error::{Error, Result};
use crate::types::EmailRecord;

/// Metadata attached to every indexed document. `doc_id` links the index
/// entry back to the store record; lookups through it must be re-scoped by
/// `owner_id` to prevent cross-tenant leakage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub owner_id: String,
    /// Source type tag
    pub source: String,
    pub message_id: String,
    pub from: String,
    pub subject: String,
    /// RFC 3339 timestamp
    pub date: String,
    /// Store record id
    pub doc_id: String,
}

/// One searchable unit upserted into the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedEmail {
    /// Index entry id (the store record id, which makes upsert idempotent)
    pub id: String,
    /// Text the index embeds and searches
    pub text: String,
    pub metadata: IndexMetadata,
}

impl IndexedEmail {
    /// Build the searchable unit for a record: subject (placeholder when
    /// absent), a blank line, then the preview snippet.
    pub fn from_record(record: &EmailRecord) -> Self {
        let subject = if record.subject.is_empty() {
            "No Subject"
        } else {
            &record.subject
        };

        Self {
            id: record.id.to_string(),
            text: format!("{}\n\n{}", subject, record.snippet),
            metadata: IndexMetadata {
                owner_id: record.owner_id.clone(),
                source: "email".to_string(),
                message_id: record.message_id.clone(),
                from: record.from.email.clone(),
                subject: record.subject.clone(),
                date: record.date.to_rfc3339(),
                doc_id: record.id.to_string(),
            },
        }
    }
}

/// A similarity match with its score
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub document: IndexedEmail,
    /// Higher is more similar
    pub score: f32,
}

/// Trait for the external vector index service
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Upsert a batch of documents into the owner namespace. Idempotent by
    /// document id.
    async fn upsert(&self, documents: &[IndexedEmail]) -> Result<()>;

    /// Nearest neighbors for `query`, bounded to `k`, always filtered to the
    /// requesting owner's namespace, ordered by descending score
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        owner_id: &str,
    ) -> Result<Vec<SearchHit>>;

    /// Index name for logging
    fn name(&self) -> &str;
}

/// Trait for establishing a connection to the index service
#[async_trait]
pub trait IndexDialer: Send + Sync {
    async fn connect(&self, config: &VectorIndexConfig) -> Result<Arc<dyn VectorIndex>>;
}

/// Lazy, cache-forever connection manager for the vector index.
///
/// Owned by the dependency-injection root instead of living in module-level
/// mutable state. Once a handle is established it is reused for the life of
/// the process. Concurrent callers before that point may each dial, but all
/// converge on the first handle written.
pub struct IndexConnector {
    config: VectorIndexConfig,
    dialer: Arc<dyn IndexDialer>,
    handle: RwLock<Option<Arc<dyn VectorIndex>>>,
}

impl IndexConnector {
    pub fn new(config: VectorIndexConfig, dialer: Arc<dyn IndexDialer>) -> Self {
        Self {
            config,
            dialer,
            handle: RwLock::new(None),
        }
    }

    /// Return the cached handle, or establish one.
    ///
    /// Missing credentials fail immediately with a configuration error;
    /// that is fatal and never retried as a timeout would be.
    pub async fn get_or_connect(&self) -> Result<Arc<dyn VectorIndex>> {
        if let Some(handle) = self.handle.read().clone() {
            return Ok(handle);
        }

        if !self.config.is_configured() {
            return Err(Error::config(
                "vector index is not set up: add the API key and index name to the environment",
            ));
        }

        let connected = self.dialer.connect(&self.config).await?;

        // Another caller may have won the race while we were dialing;
        // converge on whichever handle landed first.
        let mut slot = self.handle.write();
        match slot.as_ref() {
            Some(existing) => Ok(Arc::clone(existing)),
            None => {
                tracing::info!("connected to vector index '{}'", connected.name());
                *slot = Some(Arc::clone(&connected));
                Ok(connected)
            }
        }
    }

    /// True once a handle has been established
    pub fn is_ready(&self) -> bool {
        self.handle.read().is_some()
    }
}
