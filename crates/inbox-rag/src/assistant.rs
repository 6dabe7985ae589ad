//! Assistant facade wiring the pipeline together
//!
//! This is the dependency-injection root: it owns the vector index
//! connection manager and exposes the three operations the API layer calls.

use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::generation::{AnswerComposer, ReplyDrafter};
use crate::ingestion::IngestionPipeline;
use crate::providers::{
    EmailStore, IndexConnector, IndexDialer, LlmProvider, OllamaClient, PineconeDialer,
};
use crate::retrieval::RelevanceResolver;
use crate::types::{Answer, EmailRecord, IngestReport, ReplyDraft};

/// The email assistant core: ingestion, question answering, reply drafting
#[derive(Clone)]
pub struct EmailAssistant {
    inner: Arc<Inner>,
}

struct Inner {
    config: AssistantConfig,
    ingestion: IngestionPipeline,
    composer: AnswerComposer,
    drafter: ReplyDrafter,
    connector: Arc<IndexConnector>,
}

impl EmailAssistant {
    /// Wire the production collaborators: an Ollama client for embeddings
    /// and generation, and a Pinecone dialer for the vector index.
    pub fn new(config: AssistantConfig, store: Arc<dyn EmailStore>) -> Result<Self> {
        let ollama = Arc::new(OllamaClient::new(&config.llm)?);
        let dialer = Arc::new(PineconeDialer::new(ollama.clone()));
        Self::with_providers(config, store, ollama, dialer)
    }

    /// Wire explicit providers (used by tests and alternative backends)
    pub fn with_providers(
        config: AssistantConfig,
        store: Arc<dyn EmailStore>,
        llm: Arc<dyn LlmProvider>,
        dialer: Arc<dyn IndexDialer>,
    ) -> Result<Self> {
        tracing::info!(
            "initializing email assistant (store: {}, llm: {})",
            store.name(),
            llm.name()
        );

        let connector = Arc::new(IndexConnector::new(config.index.clone(), dialer));

        let ingestion = IngestionPipeline::new(
            Arc::clone(&store),
            Arc::clone(&connector),
            config.ingestion.clone(),
        );

        let resolver = Arc::new(RelevanceResolver::new(
            store,
            Arc::clone(&connector),
            config.retrieval.clone(),
        ));

        let composer = AnswerComposer::new(resolver, Arc::clone(&llm), config.retrieval.clone());
        let drafter = ReplyDrafter::new(llm, config.retrieval.clone());

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                ingestion,
                composer,
                drafter,
                connector,
            }),
        })
    }

    /// Embed up to `limit` unprocessed emails for the owner into the vector
    /// index. Propagates failures; partial progress is retained.
    pub async fn ingest_unprocessed(&self, owner_id: &str, limit: usize) -> Result<IngestReport> {
        self.inner.ingestion.ingest_unprocessed(owner_id, limit).await
    }

    /// Answer a question about the owner's inbox. Never fails; degrades to
    /// a scripted answer with empty sources.
    pub async fn answer_question(&self, owner_id: &str, question: &str) -> Answer {
        self.inner.composer.answer_question(owner_id, question).await
    }

    /// Draft a reply to one email. Propagates generation failures.
    pub async fn draft_reply(
        &self,
        email: &EmailRecord,
        extra_context: Option<&str>,
    ) -> Result<ReplyDraft> {
        self.inner.drafter.draft_reply(email, extra_context).await
    }

    /// Configuration in effect
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// True once the vector index connection has been established
    pub fn index_ready(&self) -> bool {
        self.inner.connector.is_ready()
    }
}
