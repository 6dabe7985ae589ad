//! Provider traits and clients for the external collaborators
//!
//! The document store, the vector index service, and the language model are
//! consumed through narrow trait contracts so the pipeline stays agnostic of
//! concrete backends.

pub mod email_store;
pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod pinecone;
pub mod vector_index;

pub use email_store::EmailStore;
pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaClient;
pub use pinecone::{PineconeDialer, PineconeIndex};
pub use vector_index::{IndexConnector, IndexDialer, IndexMetadata, IndexedEmail, SearchHit, VectorIndex};
