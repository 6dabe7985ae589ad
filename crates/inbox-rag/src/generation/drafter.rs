//! Reply drafting for a single email
//!
//! Unlike the answer composer this surfaces failures to the caller: a draft
//! with no body is not a usable degraded result.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::LlmProvider;
use crate::timeout::with_timeout;
use crate::types::{EmailRecord, ReplyDraft};

use super::prompt::PromptBuilder;

/// Drafts a reply to one specific email
pub struct ReplyDrafter {
    llm: Arc<dyn LlmProvider>,
    config: RetrievalConfig,
}

impl ReplyDrafter {
    pub fn new(llm: Arc<dyn LlmProvider>, config: RetrievalConfig) -> Self {
        Self { llm, config }
    }

    /// Draft a reply to `email`, optionally steered by `extra_context`.
    ///
    /// The subject is derived mechanically as "Re: " + original subject and
    /// the recipient is the original sender; only the body is generated.
    pub async fn draft_reply(
        &self,
        email: &EmailRecord,
        extra_context: Option<&str>,
    ) -> Result<ReplyDraft> {
        let prompt = PromptBuilder::build_reply_prompt(email, extra_context);

        tracing::debug!("drafting reply to {:?}", email.subject);

        let body = with_timeout(
            self.llm.generate(&prompt),
            self.config.reply_budget(),
            "reply generation",
        )
        .await?;

        Ok(ReplyDraft {
            subject: format!("Re: {}", email.subject),
            body: body.trim().to_string(),
            to: vec![email.from.email.clone()],
        })
    }
}
