//! Prompt templates for answering and reply drafting

use crate::types::{EmailRecord, RetrievedEmail};

/// How much of each snippet the context window shows
const PREVIEW_CHARS: usize = 100;

/// How much of the original body a reply prompt carries
const REPLY_BODY_CHARS: usize = 500;

/// Prompt builder for inbox queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render retrieved emails into the bounded context block
    pub fn build_context(emails: &[RetrievedEmail]) -> String {
        if emails.is_empty() {
            return "No relevant emails found in the inbox.".to_string();
        }

        emails
            .iter()
            .enumerate()
            .map(|(i, email)| {
                let date = email.date.format("%b %-d, %Y");
                let preview: String = email.snippet.chars().take(PREVIEW_CHARS).collect();
                format!(
                    "Email {}: From {} on {}\n   Subject: \"{}\"\n   Preview: {}...",
                    i + 1,
                    email.from,
                    date,
                    email.subject,
                    preview
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the persona prompt for answering a question over the context
    pub fn build_answer_prompt(context: &str, question: &str) -> String {
        format!(
            r#"You are a helpful, friendly AI assistant helping the user manage their emails.
Be casual, warm, and conversational - like a smart friend.

Here's what I found in their inbox:
{context}

They asked: {question}

Give a helpful, friendly response. Keep it casual and to the point.
If you found relevant emails, mention them naturally (like "I saw an email from..." or "Looks like...").
If nothing's relevant, just say so in a friendly way.

Keep your response under 100 words unless more detail is needed.

Your response:"#
        )
    }

    /// Build the prompt for drafting a reply to one email
    pub fn build_reply_prompt(email: &EmailRecord, extra_context: Option<&str>) -> String {
        let body: String = email.body.chars().take(REPLY_BODY_CHARS).collect();
        let extra = match extra_context {
            Some(context) if !context.is_empty() => format!("\nAdditional context: {context}\n"),
            _ => String::new(),
        };

        format!(
            r#"Write a friendly, professional email reply to this:

From: {from}
Subject: {subject}
Message: {body}
{extra}
Write ONLY the email body. Keep it concise, warm, and professional."#,
            from = email.from.display(),
            subject = email.subject,
        )
    }
}
