//! Relevance resolution: fast-path lookup, semantic search, recency fallback

pub mod signals;

use std::sync::Arc;

use uuid::Uuid;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::{EmailStore, IndexConnector};
use crate::timeout::with_timeout;
use crate::types::RetrievedEmail;

/// Questions matching any of these route to the unread fast path, skipping
/// semantic search entirely.
const UNREAD_KEYWORDS: &[&str] = &["unread", "new emails", "latest emails", "haven't read"];

/// True if the question asks for unread or newly arrived mail
pub fn wants_unread(question: &str) -> bool {
    let question = question.to_lowercase();
    UNREAD_KEYWORDS.iter().any(|kw| question.contains(kw))
}

/// Decides between structured lookup and semantic search and degrades to a
/// recency fallback when the index is empty-handed or unreachable
pub struct RelevanceResolver {
    store: Arc<dyn EmailStore>,
    connector: Arc<IndexConnector>,
    config: RetrievalConfig,
}

impl RelevanceResolver {
    pub fn new(
        store: Arc<dyn EmailStore>,
        connector: Arc<IndexConnector>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            connector,
            config,
        }
    }

    /// Find the emails most relevant to `question`.
    ///
    /// Never fails: any store or index error degrades to a cheaper tier,
    /// and a total failure returns an empty vector.
    pub async fn find_relevant_emails(
        &self,
        owner_id: &str,
        question: &str,
    ) -> Vec<RetrievedEmail> {
        tracing::debug!("searching for: {question:?}");

        if wants_unread(question) {
            tracing::debug!("fast path: unread emails");
            return match self.unread_emails(owner_id).await {
                Ok(emails) => emails,
                Err(e) => {
                    tracing::warn!("unread lookup failed: {e}");
                    Vec::new()
                }
            };
        }

        match self.semantic_search(owner_id, question).await {
            Ok(emails) => emails,
            Err(e) => {
                tracing::warn!("semantic search failed, using recency fallback: {e}");
                self.recent_emails(owner_id).await.unwrap_or_default()
            }
        }
    }

    /// Fast path: most recent unread, newest first
    async fn unread_emails(&self, owner_id: &str) -> Result<Vec<RetrievedEmail>> {
        let records = with_timeout(
            self.store.find_unread(owner_id, self.config.unread_limit),
            self.config.store_budget(),
            "unread query",
        )
        .await?;

        Ok(records.iter().map(RetrievedEmail::from_record).collect())
    }

    /// Fallback tier: most recent regardless of read state
    async fn recent_emails(&self, owner_id: &str) -> Result<Vec<RetrievedEmail>> {
        let records = with_timeout(
            self.store.find_recent(owner_id, self.config.recent_limit),
            self.config.store_budget(),
            "recent query",
        )
        .await?;

        Ok(records.iter().map(RetrievedEmail::from_record).collect())
    }

    /// Semantic tier: connect, search, then resolve hits back to full
    /// records re-scoped by owner. Zero matches fall through to recency.
    async fn semantic_search(
        &self,
        owner_id: &str,
        question: &str,
    ) -> Result<Vec<RetrievedEmail>> {
        let index = with_timeout(
            self.connector.get_or_connect(),
            self.config.connect_budget(),
            "index connect",
        )
        .await?;

        let hits = with_timeout(
            index.similarity_search(question, self.config.semantic_top_k, owner_id),
            self.config.search_budget(),
            "similarity search",
        )
        .await?;

        if hits.is_empty() {
            tracing::debug!("no semantic matches, using recency fallback");
            return self.recent_emails(owner_id).await;
        }

        // Resolve index hits to full store records, preserving the index's
        // similarity ranking and capping at max_sources.
        let ids: Vec<Uuid> = hits
            .iter()
            .filter(|hit| hit.document.metadata.source == "email")
            .filter_map(|hit| Uuid::parse_str(&hit.document.metadata.doc_id).ok())
            .take(self.config.max_sources)
            .collect();

        let records = with_timeout(
            self.store.find_by_ids(owner_id, &ids),
            self.config.store_budget(),
            "record lookup",
        )
        .await?;

        tracing::debug!("found {} relevant emails", records.len());
        Ok(records.iter().map(RetrievedEmail::from_record).collect())
    }
}
