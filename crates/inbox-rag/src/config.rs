//! Configuration for the email assistant

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main assistant configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// LLM (Ollama) configuration
    pub llm: LlmConfig,
    /// Vector index configuration
    pub index: VectorIndexConfig,
    /// Retrieval budgets and limits
    pub retrieval: RetrievalConfig,
    /// Ingestion configuration
    pub ingestion: IngestionConfig,
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Embedding model name
    pub embed_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens in a generated response
    pub num_predict: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "qwen2.5:1.5b".to_string(),
            embed_model: "all-mpnet-base-v2".to_string(),
            temperature: 0.8,
            num_predict: 200,
            timeout_secs: 15,
        }
    }
}

/// Vector index service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// API key for the index service (empty means unconfigured)
    pub api_key: String,
    /// Index name (empty means unconfigured)
    pub index_name: String,
    /// Index host URL
    pub host: String,
    /// Namespace within the index reserved for this application
    pub namespace: String,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_name: String::new(),
            host: String::new(),
            namespace: "inboxiq".to_string(),
        }
    }
}

impl VectorIndexConfig {
    /// Load credentials from the environment (PINECONE_API_KEY / PINECONE_INDEX / PINECONE_HOST)
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("PINECONE_API_KEY").unwrap_or_default(),
            index_name: std::env::var("PINECONE_INDEX").unwrap_or_default(),
            host: std::env::var("PINECONE_HOST").unwrap_or_default(),
            ..Self::default()
        }
    }

    /// True if the required credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.index_name.is_empty()
    }
}

/// Time budgets and result limits for retrieval and generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Budget for establishing the vector index connection (seconds)
    pub connect_timeout_secs: u64,
    /// Budget for one similarity search (seconds)
    pub search_timeout_secs: u64,
    /// Combined budget for the whole retrieval step (seconds)
    pub retrieval_timeout_secs: u64,
    /// Budget for document store queries (seconds)
    pub store_timeout_secs: u64,
    /// Budget for answer generation (seconds)
    pub answer_timeout_secs: u64,
    /// Budget for reply drafting (seconds)
    pub reply_timeout_secs: u64,
    /// Number of candidates requested from the vector index
    pub semantic_top_k: usize,
    /// Maximum resolved sources returned to the composer
    pub max_sources: usize,
    /// Unread emails returned by the fast path
    pub unread_limit: usize,
    /// Recent emails returned by the fallback tier
    pub recent_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 3,
            search_timeout_secs: 5,
            retrieval_timeout_secs: 6,
            store_timeout_secs: 2,
            answer_timeout_secs: 15,
            reply_timeout_secs: 12,
            semantic_top_k: 5,
            max_sources: 3,
            unread_limit: 3,
            recent_limit: 2,
        }
    }
}

impl RetrievalConfig {
    pub fn connect_budget(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn search_budget(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn retrieval_budget(&self) -> Duration {
        Duration::from_secs(self.retrieval_timeout_secs)
    }

    pub fn store_budget(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn answer_budget(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    pub fn reply_budget(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Records upserted per index call
    pub batch_size: usize,
    /// Default limit on unprocessed records fetched per invocation
    pub default_limit: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            default_limit: 30,
        }
    }
}
