//! Answer composition with graceful degradation

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::LlmProvider;
use crate::retrieval::RelevanceResolver;
use crate::timeout::with_timeout;
use crate::types::{Answer, RetrievedEmail};

use super::prompt::PromptBuilder;

/// Degraded answer when any budget expires
pub(crate) const TOO_SLOW: &str =
    "That's taking longer than expected. Can you try asking in a simpler way?";

/// Degraded answer when the model service is unreachable
pub(crate) const UNREACHABLE: &str =
    "I can't reach the AI service right now. Please check that it is running and try again.";

/// Degraded answer for anything else
pub(crate) const GENERIC_FAILURE: &str = "Sorry, something went wrong. Want to try again?";

/// Substitute when the model returns an empty completion
pub(crate) const EMPTY_COMPLETION: &str = "I'm having trouble with that. Can you rephrase?";

/// Drives retrieval and the language model to produce a grounded answer.
/// Infrastructure failures degrade to scripted answers; this type never
/// returns an error to its caller.
pub struct AnswerComposer {
    resolver: Arc<RelevanceResolver>,
    llm: Arc<dyn LlmProvider>,
    config: RetrievalConfig,
}

impl AnswerComposer {
    pub fn new(
        resolver: Arc<RelevanceResolver>,
        llm: Arc<dyn LlmProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            resolver,
            llm,
            config,
        }
    }

    /// Answer `question` from the owner's inbox.
    ///
    /// Always returns an `Answer`; on failure it is a scripted degraded one
    /// with empty sources, worded by failure class.
    pub async fn answer_question(&self, owner_id: &str, question: &str) -> Answer {
        match self.try_answer(owner_id, question).await {
            Ok(answer) => answer,
            Err(e) if e.is_timeout() => {
                tracing::warn!("answer degraded (timeout): {e}");
                Answer::degraded(TOO_SLOW)
            }
            Err(e) if e.is_unavailable() => {
                tracing::warn!("answer degraded (unreachable): {e}");
                Answer::degraded(UNREACHABLE)
            }
            Err(e) => {
                tracing::warn!("answer degraded: {e}");
                Answer::degraded(GENERIC_FAILURE)
            }
        }
    }

    async fn try_answer(&self, owner_id: &str, question: &str) -> Result<Answer> {
        tracing::debug!("user asked: {question:?}");

        let sources: Vec<RetrievedEmail> = with_timeout(
            async { Ok(self.resolver.find_relevant_emails(owner_id, question).await) },
            self.config.retrieval_budget(),
            "retrieval",
        )
        .await?;

        let context = PromptBuilder::build_context(&sources);
        let prompt = PromptBuilder::build_answer_prompt(&context, question);

        let raw = with_timeout(
            self.llm.generate(&prompt),
            self.config.answer_budget(),
            "answer generation",
        )
        .await?;

        let answer = raw.trim();
        let answer = if answer.is_empty() {
            EMPTY_COMPLETION.to_string()
        } else {
            answer.to_string()
        };

        let found_relevant_emails = !sources.is_empty();
        Ok(Answer {
            answer,
            sources,
            found_relevant_emails,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::providers::IndexConnector;
    use crate::test_support::{
        configured_index, email, DeterministicIndex, FailingIndex, HangingLlm, InMemoryStore,
        ScriptedLlm, StaticDialer,
    };
    use std::time::Duration;

    fn composer_with(
        store: Arc<InMemoryStore>,
        index: Arc<dyn crate::providers::VectorIndex>,
        llm: Arc<dyn LlmProvider>,
    ) -> AnswerComposer {
        let config = RetrievalConfig::default();
        let connector = Arc::new(IndexConnector::new(
            configured_index(),
            Arc::new(StaticDialer::new(index)),
        ));
        let resolver = Arc::new(RelevanceResolver::new(store, connector, config.clone()));
        AnswerComposer::new(resolver, llm, config)
    }

    #[tokio::test]
    async fn answers_with_sources_when_everything_works() {
        let store = Arc::new(InMemoryStore::default());
        let index = Arc::new(DeterministicIndex::default());
        let record = email("u1", "m1", "Budget review", "numbers attached");
        index.seed(&[crate::providers::IndexedEmail::from_record(&record)]);
        store.insert(record);

        let llm = Arc::new(ScriptedLlm::replying("I saw an email about the budget."));
        let composer = composer_with(store, index, llm.clone());

        let answer = composer.answer_question("u1", "what about the budget review?").await;

        assert_eq!(answer.answer, "I saw an email about the budget.");
        assert!(answer.found_relevant_emails);
        assert_eq!(answer.sources.len(), 1);
        // The prompt carried the rendered context and the verbatim question
        let prompt = llm.last_prompt();
        assert!(prompt.contains("Budget review"));
        assert!(prompt.contains("what about the budget review?"));
    }

    #[tokio::test]
    async fn empty_inbox_still_produces_an_answer() {
        let store = Arc::new(InMemoryStore::default());
        let llm = Arc::new(ScriptedLlm::replying("Nothing relevant, sorry!"));
        let composer = composer_with(store, Arc::new(DeterministicIndex::default()), llm.clone());

        let answer = composer.answer_question("u1", "anything from legal?").await;

        assert!(!answer.found_relevant_emails);
        assert!(answer.sources.is_empty());
        assert!(llm.last_prompt().contains("No relevant emails found in the inbox."));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_model_degrades_within_the_outer_budget() {
        let store = Arc::new(InMemoryStore::default());
        let composer = composer_with(
            store,
            Arc::new(DeterministicIndex::default()),
            Arc::new(HangingLlm),
        );

        let started = tokio::time::Instant::now();
        let answer = composer.answer_question("u1", "summarize my inbox").await;

        assert_eq!(answer.answer, TOO_SLOW);
        assert!(answer.sources.is_empty());
        assert!(!answer.found_relevant_emails);
        // Nested budgets: retrieval (6s) + generation (15s) bound the call
        assert!(started.elapsed() <= Duration::from_secs(21));
    }

    #[tokio::test]
    async fn unreachable_model_gets_its_own_wording() {
        let store = Arc::new(InMemoryStore::default());
        let composer = composer_with(
            store,
            Arc::new(DeterministicIndex::default()),
            Arc::new(ScriptedLlm::failing(Error::unavailable("connection refused"))),
        );

        let answer = composer.answer_question("u1", "anything new?").await;
        assert_eq!(answer.answer, UNREACHABLE);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn other_failures_get_the_generic_apology() {
        let store = Arc::new(InMemoryStore::default());
        let composer = composer_with(
            store,
            Arc::new(DeterministicIndex::default()),
            Arc::new(ScriptedLlm::failing(Error::llm("HTTP 500"))),
        );

        let answer = composer.answer_question("u1", "anything new?").await;
        assert_eq!(answer.answer, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn blank_completion_becomes_a_clarification_request() {
        let store = Arc::new(InMemoryStore::default());
        let composer = composer_with(
            store,
            Arc::new(DeterministicIndex::default()),
            Arc::new(ScriptedLlm::replying("   \n")),
        );

        let answer = composer.answer_question("u1", "hm?").await;
        assert_eq!(answer.answer, EMPTY_COMPLETION);
    }

    #[tokio::test]
    async fn broken_retrieval_still_yields_a_generated_answer() {
        // Index down and store empty: resolver degrades to empty sources,
        // the model still answers.
        let store = Arc::new(InMemoryStore::default());
        let composer = composer_with(
            store,
            Arc::new(FailingIndex::always()),
            Arc::new(ScriptedLlm::replying("Inbox looks quiet.")),
        );

        let answer = composer.answer_question("u1", "what's going on?").await;
        assert_eq!(answer.answer, "Inbox looks quiet.");
        assert!(!answer.found_relevant_emails);
    }
}
