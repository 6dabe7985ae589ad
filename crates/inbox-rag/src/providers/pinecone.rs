//! Pinecone REST client for the vector index service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::VectorIndexConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::vector_index::{IndexDialer, IndexMetadata, IndexedEmail, SearchHit, VectorIndex};

/// Pinecone index handle. Embeds text through the injected provider and
/// talks to the index data plane over REST.
pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    api_key: String,
    index_name: String,
    namespace: String,
    embedder: Arc<dyn EmbeddingProvider>,
}

#[derive(Serialize)]
struct UpsertRequest {
    vectors: Vec<VectorRecord>,
    namespace: String,
}

#[derive(Serialize)]
struct VectorRecord {
    id: String,
    values: Vec<f32>,
    metadata: serde_json::Value,
}

#[derive(Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    filter: serde_json::Value,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
    namespace: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<serde_json::Value>,
}

impl PineconeIndex {
    pub fn new(config: &VectorIndexConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::index(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            index_name: config.index_name.clone(),
            namespace: config.namespace.clone(),
            embedder,
        })
    }

    fn match_to_hit(m: QueryMatch) -> Option<SearchHit> {
        let metadata = m.metadata?;
        let text = metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let parsed: IndexMetadata = serde_json::from_value(metadata).ok()?;

        Some(SearchHit {
            document: IndexedEmail {
                id: m.id,
                text,
                metadata: parsed,
            },
            score: m.score,
        })
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn upsert(&self, documents: &[IndexedEmail]) -> Result<()> {
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let vectors = documents
            .iter()
            .zip(embeddings)
            .map(|(doc, values)| {
                // The searchable text rides along in metadata so query hits
                // can be reconstructed without a second fetch.
                let mut metadata = serde_json::to_value(&doc.metadata)?;
                metadata["text"] = serde_json::Value::String(doc.text.clone());
                Ok(VectorRecord {
                    id: doc.id.clone(),
                    values,
                    metadata,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let request = UpsertRequest {
            vectors,
            namespace: self.namespace.clone(),
        };

        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.host))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index(format!("upsert request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::index(format!(
                "upsert failed: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        owner_id: &str,
    ) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed(query).await?;

        let request = QueryRequest {
            vector,
            top_k: k,
            filter: serde_json::json!({ "owner_id": { "$eq": owner_id } }),
            include_metadata: true,
            namespace: self.namespace.clone(),
        };

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::index(format!("query request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::index(format!(
                "query failed: HTTP {}",
                response.status()
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::index(format!("failed to parse query response: {e}")))?;

        let mut hits: Vec<SearchHit> = parsed
            .matches
            .into_iter()
            .filter_map(Self::match_to_hit)
            // The filter is enforced server-side; re-check here so a
            // misconfigured index can never leak across owners.
            .filter(|hit| hit.document.metadata.owner_id == owner_id)
            .collect();
        hits.truncate(k);

        Ok(hits)
    }

    fn name(&self) -> &str {
        &self.index_name
    }
}

/// Dialer producing Pinecone handles
pub struct PineconeDialer {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl PineconeDialer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl IndexDialer for PineconeDialer {
    async fn connect(&self, config: &VectorIndexConfig) -> Result<Arc<dyn VectorIndex>> {
        let index = PineconeIndex::new(config, Arc::clone(&self.embedder))?;
        Ok(Arc::new(index))
    }
}
