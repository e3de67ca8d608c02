// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn chat orchestration.
//!
//! Each turn walks a fixed state machine: ensure a session, run the
//! learning and reminder classifiers, answer (or short-circuit with the
//! reminder confirmation), persist both turns, respond. Classifier
//! failures degrade to normal answering; persistence failures propagate.

use std::sync::Arc;

use chrono::Utc;
use mnemo_core::{ChatSession, ChatTurn, MnemoError, Scope, StorageAdapter};
use tracing::{debug, info};

use crate::learning::extract_learning;
use crate::lifecycle::{PipelineCell, RebuildHandle};
use crate::reminder::{ReminderExtractor, ReminderOutcome};

/// Answer returned while the first pipeline build is still in flight.
pub const INITIALIZING_ANSWER: &str =
    "I am initializing my memory system. Please ask me again in about 30 seconds!";

/// Maximum characters of the question used for an auto-created session title.
const SESSION_TITLE_LEN: usize = 30;

/// One incoming chat turn.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub user_id: String,
    pub question: String,
    /// Absent on the first turn of a conversation; a session is created.
    pub session_id: Option<String>,
    /// Display name injected into the answer prompt. Defaults to "User".
    pub user_name: Option<String>,
}

/// The orchestrator's reply for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    /// Whether this turn stored a new memory fact.
    pub learned: bool,
    pub session_id: String,
}

/// Drives the per-turn state machine over storage, classifiers, and the
/// live pipeline snapshot.
pub struct ChatOrchestrator {
    storage: Arc<dyn StorageAdapter>,
    pipelines: Arc<PipelineCell>,
    rebuild: RebuildHandle,
    reminder: ReminderExtractor,
}

impl ChatOrchestrator {
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        pipelines: Arc<PipelineCell>,
        rebuild: RebuildHandle,
        reminder: ReminderExtractor,
    ) -> Self {
        Self {
            storage,
            pipelines,
            rebuild,
            reminder,
        }
    }

    /// Handle one chat turn end to end.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, MnemoError> {
        let session_id = self.ensure_session(&request).await?;

        // Learning and reminder checks both run on every turn; only the
        // control flow below short-circuits.
        let learned = self.check_learning(&request).await?;

        match self.reminder.process(&request.user_id, &request.question).await {
            ReminderOutcome::Scheduled(confirmation) => {
                // A new reminder is part of memory; refresh the index.
                self.rebuild.request();
                self.persist_turns(&session_id, &request, &confirmation)
                    .await?;
                return Ok(ChatReply {
                    answer: confirmation,
                    learned,
                    session_id,
                });
            }
            ReminderOutcome::NoIntent | ReminderOutcome::Failed => {}
        }

        let answer = match self.pipelines.snapshot() {
            Some(pipeline) => {
                let user_name = request.user_name.as_deref().unwrap_or("User");
                pipeline
                    .answer(&request.question, user_name, Some(&request.user_id))
                    .await
            }
            None => {
                debug!("no live pipeline, requesting initial build");
                self.rebuild.request();
                INITIALIZING_ANSWER.to_string()
            }
        };

        self.persist_turns(&session_id, &request, &answer).await?;

        Ok(ChatReply {
            answer,
            learned,
            session_id,
        })
    }

    /// Use the caller's session or create one titled after the question.
    async fn ensure_session(&self, request: &ChatRequest) -> Result<String, MnemoError> {
        if let Some(ref id) = request.session_id {
            return Ok(id.clone());
        }

        let session = ChatSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: request.user_id.clone(),
            title: session_title(&request.question),
            created_at: timestamp(),
        };
        self.storage.create_session(&session).await?;
        debug!(session_id = session.id, "created chat session");
        Ok(session.id)
    }

    /// Run the learning extractor; persist a match and request a rebuild.
    async fn check_learning(&self, request: &ChatRequest) -> Result<bool, MnemoError> {
        let Some(fact) = extract_learning(&request.question) else {
            return Ok(false);
        };

        let scope = Scope::User(request.user_id.clone());
        let record = self.storage.create_memory(&scope, &fact).await?;
        info!(memory_id = record.id, "learned new memory fact");
        self.rebuild.request();
        Ok(true)
    }

    /// Persist the user turn, then the assistant turn, in that order.
    async fn persist_turns(
        &self,
        session_id: &str,
        request: &ChatRequest,
        answer: &str,
    ) -> Result<(), MnemoError> {
        self.storage
            .append_turn(&ChatTurn {
                session_id: session_id.to_string(),
                user_id: request.user_id.clone(),
                role: "user".to_string(),
                content: request.question.clone(),
                created_at: timestamp(),
            })
            .await?;
        self.storage
            .append_turn(&ChatTurn {
                session_id: session_id.to_string(),
                user_id: request.user_id.clone(),
                role: "assistant".to_string(),
                content: answer.to_string(),
                created_at: timestamp(),
            })
            .await
    }
}

fn session_title(question: &str) -> String {
    if question.chars().count() > SESSION_TITLE_LEN {
        let truncated: String = question.chars().take(SESSION_TITLE_LEN).collect();
        format!("{truncated}...")
    } else {
        question.to_string()
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{spawn_rebuild_worker, PipelineBuilder};
    use crate::testing::{flat_embedder, scripted_provider};
    use mnemo_config::model::{ReminderConfig, StorageConfig};
    use mnemo_memory::RetrievalLimits;
    use mnemo_storage::SqliteStorage;
    use std::time::Duration;
    use tempfile::tempdir;

    async fn sqlite_storage(dir: &tempfile::TempDir) -> Arc<dyn StorageAdapter> {
        let db_path = dir.path().join("orchestrator.db");
        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
        });
        storage.initialize().await.unwrap();
        Arc::new(storage)
    }

    /// Orchestrator wired over real SQLite storage, a live rebuild worker,
    /// and a scripted provider shared by answering and extraction.
    async fn orchestrator(
        storage: Arc<dyn StorageAdapter>,
        responses: Vec<Result<String, ()>>,
    ) -> (ChatOrchestrator, Arc<PipelineCell>) {
        let (provider, _) = scripted_provider(responses);
        let cell = Arc::new(PipelineCell::new());
        let handle = spawn_rebuild_worker(
            PipelineBuilder {
                storage: storage.clone(),
                embedder: flat_embedder(),
                provider: provider.clone(),
                persona: "Persona.".into(),
                limits: RetrievalLimits::default(),
                shared_story_path: None,
            },
            cell.clone(),
        );
        let reminder =
            ReminderExtractor::new(provider, storage.clone(), ReminderConfig::default());
        (
            ChatOrchestrator::new(storage, cell.clone(), handle, reminder),
            cell,
        )
    }

    async fn prime_pipeline(orch: &ChatOrchestrator, cell: &PipelineCell) {
        // First turn triggers the initial build; wait for it to land.
        let reply = orch
            .handle(ChatRequest {
                user_id: "warmup".into(),
                question: "hello".into(),
                session_id: None,
                user_name: None,
            })
            .await
            .unwrap();
        assert_eq!(reply.answer, INITIALIZING_ANSWER);
        for _ in 0..100 {
            if cell.snapshot().is_some() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("pipeline never became live");
    }

    fn request(user: &str, question: &str) -> ChatRequest {
        ChatRequest {
            user_id: user.into(),
            question: question.into(),
            session_id: None,
            user_name: None,
        }
    }

    #[test]
    fn session_title_truncates_long_questions() {
        assert_eq!(session_title("short"), "short");
        let long = "a".repeat(40);
        let title = session_title(&long);
        assert_eq!(title.chars().count(), 33);
        assert!(title.ends_with("..."));
    }

    #[tokio::test]
    async fn first_turn_without_pipeline_returns_initializing() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, _) = orchestrator(storage.clone(), vec![Ok("answer".into())]).await;

        let reply = orch.handle(request("u1", "hello there")).await.unwrap();
        assert_eq!(reply.answer, INITIALIZING_ANSWER);
        assert!(!reply.learned);

        // Both turns persisted even for the placeholder answer.
        let history = storage.get_history(&reply.session_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[1].content, INITIALIZING_ANSWER);
    }

    #[tokio::test]
    async fn live_pipeline_answers_and_persists() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(storage.clone(), vec![Ok("Tea, obviously.".into())]).await;
        prime_pipeline(&orch, &cell).await;

        let reply = orch.handle(request("u1", "What do I drink?")).await.unwrap();
        assert_eq!(reply.answer, "Tea, obviously.");

        let history = storage.get_history(&reply.session_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "What do I drink?");
        assert_eq!(history[1].content, "Tea, obviously.");
    }

    #[tokio::test]
    async fn learning_turn_stores_fact_and_reports_learned() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(storage.clone(), vec![Ok("Noted!".into())]).await;
        prime_pipeline(&orch, &cell).await;

        let reply = orch
            .handle(request("u1", "I like green tea"))
            .await
            .unwrap();
        assert!(reply.learned);

        let memories = storage.list_memories().await.unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].content, "I like green tea");
        assert_eq!(memories[0].scope, Scope::User("u1".into()));
    }

    #[tokio::test]
    async fn reminder_turn_short_circuits_answering() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        // Only response: the extraction JSON. Answering would need a second.
        let (orch, cell) = orchestrator(
            storage.clone(),
            vec![Ok(
                "{\"content\": \"call mom\", \"due_date\": \"2099-01-01T00:00:00\"}".into(),
            )],
        )
        .await;
        prime_pipeline(&orch, &cell).await;

        let reply = orch
            .handle(request("u1", "remind me to call mom tomorrow"))
            .await
            .unwrap();
        assert!(reply.answer.starts_with("I've set a reminder: 'call mom'"));

        let reminders = storage.list_reminders("u1").await.unwrap();
        assert_eq!(reminders.len(), 1);

        // The confirmation is persisted as the assistant turn.
        let history = storage.get_history(&reply.session_id).await.unwrap();
        assert_eq!(history[1].content, reply.answer);
    }

    #[tokio::test]
    async fn failed_reminder_extraction_falls_through_to_answering() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(
            storage.clone(),
            vec![Ok("not json at all".into()), Ok("Normal answer.".into())],
        )
        .await;
        prime_pipeline(&orch, &cell).await;

        let reply = orch
            .handle(request("u1", "remind me to do the thing"))
            .await
            .unwrap();
        assert_eq!(reply.answer, "Normal answer.");
        assert!(storage.list_reminders("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn learning_and_reminder_can_both_fire_in_one_turn() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(
            storage.clone(),
            vec![Ok(
                "{\"content\": \"nap\", \"due_date\": \"2099-01-01T00:00:00\"}".into(),
            )],
        )
        .await;
        prime_pipeline(&orch, &cell).await;

        // Starts with a reminder trigger and contains a learning trigger.
        let reply = orch
            .handle(request("u1", "remind me that I like afternoon naps"))
            .await
            .unwrap();
        assert!(reply.learned);
        assert!(reply.answer.starts_with("I've set a reminder"));
        assert_eq!(storage.list_memories().await.unwrap().len(), 1);
        assert_eq!(storage.list_reminders("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn existing_session_id_is_reused() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(storage.clone(), vec![Ok("hi".into())]).await;
        prime_pipeline(&orch, &cell).await;

        let first = orch.handle(request("u1", "first question")).await.unwrap();
        let second = orch
            .handle(ChatRequest {
                session_id: Some(first.session_id.clone()),
                ..request("u1", "second question")
            })
            .await
            .unwrap();

        assert_eq!(first.session_id, second.session_id);
        let history = storage.get_history(&first.session_id).await.unwrap();
        assert_eq!(history.len(), 4);
    }

    #[tokio::test]
    async fn concurrent_learning_turns_both_persist() {
        let dir = tempdir().unwrap();
        let storage = sqlite_storage(&dir).await;
        let (orch, cell) = orchestrator(storage.clone(), vec![Ok("ok".into())]).await;
        prime_pipeline(&orch, &cell).await;
        let orch = Arc::new(orch);

        let a = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.handle(request("u1", "I like coffee")).await })
        };
        let b = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.handle(request("u1", "I like hiking")).await })
        };
        assert!(a.await.unwrap().unwrap().learned);
        assert!(b.await.unwrap().unwrap().learned);

        assert_eq!(storage.list_memories().await.unwrap().len(), 2);
    }
}
