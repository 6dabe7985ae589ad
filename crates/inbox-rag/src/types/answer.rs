//! Results returned to the caller

use serde::{Deserialize, Serialize};

use super::retrieval::RetrievedEmail;

/// A generated answer with the emails it was grounded in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text (generated, or scripted when degraded)
    pub answer: String,
    /// Emails supplied to the model as context
    pub sources: Vec<RetrievedEmail>,
    pub found_relevant_emails: bool,
}

impl Answer {
    /// A degraded answer carrying no sources
    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            answer: text.into(),
            sources: Vec::new(),
            found_relevant_emails: false,
        }
    }
}

/// A drafted reply to one email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDraft {
    /// "Re: " + original subject
    pub subject: String,
    /// Generated reply body
    pub body: String,
    /// Recipients (the original sender)
    pub to: Vec<String>,
}

/// Outcome of one ingestion invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Records embedded and flagged during this call
    pub processed: usize,
    /// Unprocessed records found at the start of the call
    pub total_found: usize,
    pub message: String,
}
