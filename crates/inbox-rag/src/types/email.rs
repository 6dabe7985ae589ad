//! Email records as owned by the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sender or recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Display name, when the provider supplied one
    pub name: Option<String>,
    /// Address
    pub email: String,
}

impl Mailbox {
    pub fn new(name: Option<&str>, email: &str) -> Self {
        Self {
            name: name.map(|n| n.to_string()),
            email: email.to_string(),
        }
    }

    /// Display name, falling back to the address
    pub fn display(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// One synced email, referenced by the pipeline but owned by the store.
///
/// `embeddings_generated = true` implies a vector index entry exists whose
/// metadata `doc_id` matches `id`. The reverse is not guaranteed: an index
/// entry may exist while the flag update is still in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Store record id
    pub id: Uuid,
    /// Owning user; every query against the store is scoped by this
    pub owner_id: String,
    /// Provider message id
    pub message_id: String,
    /// Provider thread id
    pub thread_id: String,
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
    pub body: String,
    /// Short preview snippet
    pub snippet: String,
    pub date: DateTime<Utc>,
    pub read: bool,
    pub starred: bool,
    pub important: bool,
    /// Set once the record has been upserted into the vector index
    pub embeddings_generated: bool,
    pub processed: bool,
}
