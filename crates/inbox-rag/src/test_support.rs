//! Deterministic in-memory collaborators for tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::VectorIndexConfig;
use crate::error::{Error, Result};
use crate::providers::{
    EmailStore, IndexDialer, IndexedEmail, LlmProvider, SearchHit, VectorIndex,
};
use crate::types::{EmailRecord, Mailbox};

/// Install a test subscriber once so failing tests print structured logs
#[allow(dead_code)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A fresh email record with sensible defaults
pub(crate) fn email(owner_id: &str, message_id: &str, subject: &str, snippet: &str) -> EmailRecord {
    EmailRecord {
        id: Uuid::new_v4(),
        owner_id: owner_id.to_string(),
        message_id: message_id.to_string(),
        thread_id: format!("t-{message_id}"),
        from: Mailbox::new(None, "sender@example.com"),
        to: vec![Mailbox::new(None, "me@example.com")],
        subject: subject.to_string(),
        body: snippet.to_string(),
        snippet: snippet.to_string(),
        date: Utc::now(),
        read: false,
        starred: false,
        important: false,
        embeddings_generated: false,
        processed: false,
    }
}

/// A vector index config with credentials present
pub(crate) fn configured_index() -> VectorIndexConfig {
    VectorIndexConfig {
        api_key: "test-key".to_string(),
        index_name: "emails-test".to_string(),
        host: "http://localhost:0".to_string(),
        namespace: "inboxiq".to_string(),
    }
}

/// In-memory email store; `failing()` makes every call error
#[derive(Default)]
pub(crate) struct InMemoryStore {
    records: Mutex<Vec<EmailRecord>>,
    broken: bool,
}

impl InMemoryStore {
    pub(crate) fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub(crate) fn insert(&self, record: EmailRecord) {
        self.records.lock().push(record);
    }

    pub(crate) fn all(&self, owner_id: &str) -> Vec<EmailRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn check(&self) -> Result<()> {
        if self.broken {
            Err(Error::store("store down"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EmailStore for InMemoryStore {
    async fn find_unprocessed(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|r| r.owner_id == owner_id && !r.embeddings_generated)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_unread(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>> {
        self.check()?;
        let mut unread: Vec<EmailRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| r.owner_id == owner_id && !r.read)
            .cloned()
            .collect();
        unread.sort_by(|a, b| b.date.cmp(&a.date));
        unread.truncate(limit);
        Ok(unread)
    }

    async fn find_recent(&self, owner_id: &str, limit: usize) -> Result<Vec<EmailRecord>> {
        self.check()?;
        let mut recent: Vec<EmailRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn find_by_ids(&self, owner_id: &str, ids: &[Uuid]) -> Result<Vec<EmailRecord>> {
        self.check()?;
        let records = self.records.lock();
        // Preserve the caller's id order (it carries the similarity ranking)
        Ok(ids
            .iter()
            .filter_map(|id| {
                records
                    .iter()
                    .find(|r| r.id == *id && r.owner_id == owner_id)
                    .cloned()
            })
            .collect())
    }

    async fn mark_embedded(&self, ids: &[Uuid]) -> Result<()> {
        self.check()?;
        let mut records = self.records.lock();
        for record in records.iter_mut() {
            if ids.contains(&record.id) {
                record.embeddings_generated = true;
                record.processed = true;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

/// Dialer that always hands out the same index handle
pub(crate) struct StaticDialer {
    index: Arc<dyn VectorIndex>,
}

impl StaticDialer {
    pub(crate) fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl IndexDialer for StaticDialer {
    async fn connect(&self, _config: &VectorIndexConfig) -> Result<Arc<dyn VectorIndex>> {
        Ok(Arc::clone(&self.index))
    }
}

/// Index that records upsert batches and never matches anything
#[derive(Default)]
pub(crate) struct RecordingIndex {
    batches: Mutex<Vec<Vec<IndexedEmail>>>,
}

impl RecordingIndex {
    pub(crate) fn upsert_batches(&self) -> Vec<Vec<IndexedEmail>> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl VectorIndex for RecordingIndex {
    async fn upsert(&self, documents: &[IndexedEmail]) -> Result<()> {
        self.batches.lock().push(documents.to_vec());
        Ok(())
    }

    async fn similarity_search(
        &self,
        _query: &str,
        _k: usize,
        _owner_id: &str,
    ) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Index that succeeds for a fixed number of upserts, then errors
pub(crate) struct FailingIndex {
    successes_left: Mutex<usize>,
}

impl FailingIndex {
    /// Every operation fails
    pub(crate) fn always() -> Self {
        Self::fail_after(0)
    }

    /// The first `n` upserts succeed, everything after fails
    pub(crate) fn fail_after(n: usize) -> Self {
        Self {
            successes_left: Mutex::new(n),
        }
    }
}

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn upsert(&self, _documents: &[IndexedEmail]) -> Result<()> {
        let mut left = self.successes_left.lock();
        if *left > 0 {
            *left -= 1;
            Ok(())
        } else {
            Err(Error::index("upsert rejected"))
        }
    }

    async fn similarity_search(
        &self,
        _query: &str,
        _k: usize,
        _owner_id: &str,
    ) -> Result<Vec<SearchHit>> {
        Err(Error::unavailable("index unreachable"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Index with deterministic token-overlap scoring instead of embeddings
#[derive(Default)]
pub(crate) struct DeterministicIndex {
    documents: Mutex<Vec<IndexedEmail>>,
}

impl DeterministicIndex {
    pub(crate) fn seed(&self, documents: &[IndexedEmail]) {
        let mut stored = self.documents.lock();
        for doc in documents {
            stored.retain(|d| d.id != doc.id);
            stored.push(doc.clone());
        }
    }

    fn score(query: &str, text: &str) -> f32 {
        let text = text.to_lowercase();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        query
            .to_lowercase()
            .split_whitespace()
            .filter(|token| tokens.contains(token))
            .count() as f32
    }
}

#[async_trait]
impl VectorIndex for DeterministicIndex {
    async fn upsert(&self, documents: &[IndexedEmail]) -> Result<()> {
        self.seed(documents);
        Ok(())
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        owner_id: &str,
    ) -> Result<Vec<SearchHit>> {
        let mut hits: Vec<SearchHit> = self
            .documents
            .lock()
            .iter()
            .filter(|doc| doc.metadata.owner_id == owner_id)
            .map(|doc| SearchHit {
                document: doc.clone(),
                score: Self::score(query, &doc.text),
            })
            .filter(|hit| hit.score > 0.0)
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        Ok(hits)
    }

    fn name(&self) -> &str {
        "deterministic"
    }
}

/// LLM that records the last prompt and replies with a fixed script
pub(crate) struct ScriptedLlm {
    reply: String,
    failure: Mutex<Option<Error>>,
    last_prompt: Mutex<String>,
}

impl ScriptedLlm {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            reply: text.to_string(),
            failure: Mutex::new(None),
            last_prompt: Mutex::new(String::new()),
        }
    }

    pub(crate) fn failing(error: Error) -> Self {
        Self {
            reply: String::new(),
            failure: Mutex::new(Some(error)),
            last_prompt: Mutex::new(String::new()),
        }
    }

    pub(crate) fn last_prompt(&self) -> String {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        *self.last_prompt.lock() = prompt.to_string();
        if let Some(error) = self.failure.lock().take() {
            return Err(error);
        }
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// LLM that never completes
pub(crate) struct HangingLlm;

#[async_trait]
impl LlmProvider for HangingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        std::future::pending::<()>().await;
        unreachable!()
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hanging"
    }

    fn model(&self) -> &str {
        "hanging"
    }
}
