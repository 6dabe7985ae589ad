//! Document ingestion: embed unprocessed emails into the vector index
//!
//! Idempotent and resumable: each batch is upserted and then flagged in the
//! store, so a failure mid-call leaves earlier batches committed and a
//! re-invocation picks up exactly the records still unflagged.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::IngestionConfig;
use crate::error::{Error, Result};
use crate::providers::{EmailStore, IndexConnector, IndexedEmail};
use crate::types::IngestReport;

/// Batches unprocessed emails into the vector index and marks them processed
pub struct IngestionPipeline {
    store: Arc<dyn EmailStore>,
    connector: Arc<IndexConnector>,
    config: IngestionConfig,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn EmailStore>,
        connector: Arc<IndexConnector>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            store,
            connector,
            config,
        }
    }

    /// Embed up to `limit` unprocessed emails for `owner_id`.
    ///
    /// A batch failure aborts the call; batches committed before it stay
    /// committed. There is no per-record retry, the caller re-invokes.
    pub async fn ingest_unprocessed(&self, owner_id: &str, limit: usize) -> Result<IngestReport> {
        tracing::info!("looking for unprocessed emails for owner {owner_id}");

        let unprocessed = self.store.find_unprocessed(owner_id, limit).await?;

        if unprocessed.is_empty() {
            tracing::info!("no new emails to process");
            return Ok(IngestReport {
                processed: 0,
                total_found: 0,
                message: "All emails are already processed".to_string(),
            });
        }

        let total_found = unprocessed.len();
        tracing::info!("found {total_found} emails to process");

        let index = self.connector.get_or_connect().await?;

        let mut processed = 0;
        for (batch_no, batch) in unprocessed.chunks(self.config.batch_size).enumerate() {
            tracing::debug!("processing batch {}", batch_no + 1);

            let documents: Vec<IndexedEmail> =
                batch.iter().map(IndexedEmail::from_record).collect();

            index
                .upsert(&documents)
                .await
                .map_err(|e| Error::Ingestion(e.to_string()))?;

            // Flag only after the upsert landed, so the invariant
            // "flagged implies indexed" holds across crashes.
            let ids: Vec<Uuid> = batch.iter().map(|record| record.id).collect();
            self.store
                .mark_embedded(&ids)
                .await
                .map_err(|e| Error::Ingestion(e.to_string()))?;

            processed += batch.len();
            tracing::debug!("added {} emails to the index", batch.len());
        }

        tracing::info!("successfully processed {processed} emails");
        Ok(IngestReport {
            processed,
            total_found,
            message: format!("Successfully processed {processed} emails"),
        })
    }
}
