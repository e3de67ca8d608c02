// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The composed answer pipeline: retrieval plus generation.

use std::sync::Arc;

use mnemo_core::types::CompletionRequest;
use mnemo_core::ProviderAdapter;
use mnemo_memory::ScopedRetriever;
use tracing::warn;

/// Answer returned when the provider call fails. The orchestrator never
/// errors on the generation path.
pub const FALLBACK_ANSWER: &str = "I am having trouble accessing my memory right now.";

/// One immutable snapshot of the queryable assistant.
///
/// Bound to a single index generation; rebuilt and atomically swapped in
/// as a whole, so a reader never observes a half-built pipeline.
pub struct Pipeline {
    retriever: ScopedRetriever,
    provider: Arc<dyn ProviderAdapter>,
    persona: String,
}

impl Pipeline {
    pub fn new(
        retriever: ScopedRetriever,
        provider: Arc<dyn ProviderAdapter>,
        persona: String,
    ) -> Self {
        Self {
            retriever,
            provider,
            persona,
        }
    }

    /// Answer a question with memory context.
    ///
    /// Retrieval failure yields an empty context; generation failure yields
    /// [`FALLBACK_ANSWER`]. Neither aborts the turn.
    pub async fn answer(&self, question: &str, user_name: &str, user_id: Option<&str>) -> String {
        let context = self.retriever.context_for(question, user_id).await;
        let prompt = self.render_prompt(question, user_name, &context);

        match self
            .provider
            .complete(CompletionRequest {
                prompt,
                temperature: None,
                max_output_tokens: None,
            })
            .await
        {
            Ok(response) => response.text,
            Err(e) => {
                warn!(error = %e, "answer generation failed");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    fn render_prompt(&self, question: &str, user_name: &str, context: &str) -> String {
        format!(
            "{persona} You are talking to {user_name}.\n\n\
             Use the following user memory to answer the question.\n\n\
             User Memory:\n{context}\n\n\
             Question:\n{question}\n\n\
             Answer in simple and clear English.",
            persona = self.persona,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failing_provider, recording_provider, retriever_with_docs};
    use mnemo_core::Scope;

    #[tokio::test]
    async fn prompt_includes_persona_context_and_question() {
        let retriever =
            retriever_with_docs(vec![("u1 drinks tea", Scope::User("u1".into()))]).await;
        let (provider, prompts) = recording_provider("The answer.");
        let pipeline = Pipeline::new(retriever, provider, "You are a test assistant.".into());

        let answer = pipeline.answer("What do I drink?", "Ada", Some("u1")).await;
        assert_eq!(answer, "The answer.");

        let sent = prompts.lock().unwrap().pop().unwrap();
        assert!(sent.starts_with("You are a test assistant. You are talking to Ada."));
        assert!(sent.contains("User Memory:\nu1 drinks tea"));
        assert!(sent.contains("Question:\nWhat do I drink?"));
        assert!(sent.ends_with("Answer in simple and clear English."));
    }

    #[tokio::test]
    async fn provider_failure_yields_fallback_answer() {
        let retriever = retriever_with_docs(vec![("fact", Scope::Global)]).await;
        let pipeline = Pipeline::new(retriever, failing_provider(), "Persona.".into());

        let answer = pipeline.answer("anything", "User", Some("u1")).await;
        assert_eq!(answer, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn empty_index_still_answers() {
        // Loader guarantees a placeholder document, so even a "fresh"
        // system produces a prompt with some context.
        let retriever = retriever_with_docs(vec![(
            mnemo_memory::PLACEHOLDER_CONTENT,
            Scope::Global,
        )])
        .await;
        let (provider, prompts) = recording_provider("ok");
        let pipeline = Pipeline::new(retriever, provider, "Persona.".into());

        pipeline.answer("hello", "User", None).await;
        let sent = prompts.lock().unwrap().pop().unwrap();
        assert!(sent.contains(mnemo_memory::PLACEHOLDER_CONTENT));
    }
}
