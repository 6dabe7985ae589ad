//! Uniform retrieval results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::EmailRecord;

/// One retrieved email, in the same shape regardless of whether it came
/// from the fast path, semantic search, or the recency fallback. The
/// composer never needs to know which strategy produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedEmail {
    /// Source type tag (always "email" for now)
    #[serde(rename = "type")]
    pub kind: String,
    /// Sender display name or address
    pub from: String,
    pub subject: String,
    pub snippet: String,
    pub date: DateTime<Utc>,
    /// Subject and snippet combined, for downstream consumers
    pub content: String,
}

impl RetrievedEmail {
    /// Map a store record into the uniform shape
    pub fn from_record(record: &EmailRecord) -> Self {
        let subject = if record.subject.is_empty() {
            "No subject".to_string()
        } else {
            record.subject.clone()
        };

        Self {
            kind: "email".to_string(),
            from: record.from.display().to_string(),
            subject,
            snippet: record.snippet.clone(),
            date: record.date,
            content: format!("{}\n{}", record.subject, record.snippet),
        }
    }
}
