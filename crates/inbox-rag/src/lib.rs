//! inbox-rag: retrieval-augmented question answering over a synced email corpus
//!
//! Coordinates three external collaborators - a document store, a vector
//! index, and a language model - under strict per-call time budgets, with
//! multi-level degradation instead of hard failure. The document store is
//! populated by an out-of-scope sync job; this crate decides per question
//! between fast structured lookup and semantic search, assembles a bounded
//! context window, and drives the model to a grounded, source-attributed
//! answer.

pub mod assistant;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod timeout;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use assistant::EmailAssistant;
pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use types::{Answer, EmailRecord, IngestReport, Mailbox, ReplyDraft, RetrievedEmail};
