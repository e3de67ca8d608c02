// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mnemo shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline
//! history. Each line is one chat turn through the orchestrator; slash
//! commands expose the session, memory, and reminder surfaces.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use mnemo_chat::{
    spawn_rebuild_worker, ChatOrchestrator, ChatRequest, PipelineBuilder, PipelineCell,
    RebuildHandle, ReminderExtractor,
};
use mnemo_config::MnemoConfig;
use mnemo_core::{EmbeddingAdapter, MnemoError, ProviderAdapter, StorageAdapter};
use mnemo_gemini::GeminiProvider;
use mnemo_memory::{RetrievalLimits, SharedEmbedder};
use mnemo_storage::SqliteStorage;

/// Runs the `mnemo shell` interactive REPL.
///
/// Wires storage, the lazy embedder, the Gemini provider, and the rebuild
/// worker, then loops over user input until `/quit`.
pub async fn run_shell(
    config: MnemoConfig,
    user_id: String,
    user_name: Option<String>,
) -> Result<(), MnemoError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

    let provider: Arc<dyn ProviderAdapter> =
        Arc::new(GeminiProvider::new(&config.gemini).inspect_err(|_| {
            eprintln!(
                "error: Gemini API key required. Set gemini.api_key in config or the GEMINI_API_KEY env var."
            );
        })?);

    // Model loads lazily on the first rebuild, not here.
    let embedder: Arc<dyn EmbeddingAdapter> =
        Arc::new(SharedEmbedder::new(config.memory.model_path.clone()));

    let cell = Arc::new(PipelineCell::new());
    let rebuild = spawn_rebuild_worker(
        PipelineBuilder {
            storage: storage.clone(),
            embedder,
            provider: provider.clone(),
            persona: config.agent.persona.clone(),
            limits: RetrievalLimits {
                user_top_k: config.retrieval.user_top_k,
                global_top_k: config.retrieval.global_top_k,
            },
            shared_story_path: config.memory.shared_story_path.clone(),
        },
        cell.clone(),
    );

    let reminder = ReminderExtractor::new(provider, storage.clone(), config.reminder.clone());
    let orchestrator = ChatOrchestrator::new(storage.clone(), cell, rebuild.clone(), reminder);

    // Warm the index so the first question doesn't hit the
    // initializing placeholder.
    rebuild.request();
    info!(user_id, "shell session starting");

    let mut rl = DefaultEditor::new()
        .map_err(|e| MnemoError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} shell", config.agent.name).bold().green());
    println!("Type {} to exit, {} for commands.\n", "/quit".yellow(), "/help".yellow());

    let prompt = format!("{}> ", config.agent.name.green());
    let mut session_id: Option<String> = None;

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed.starts_with('/') {
                    if let Err(e) =
                        handle_command(storage.as_ref(), &rebuild, &user_id, trimmed).await
                    {
                        eprintln!("{}: {e}", "error".red());
                    }
                    continue;
                }

                match orchestrator
                    .handle(ChatRequest {
                        user_id: user_id.clone(),
                        question: trimmed.to_string(),
                        session_id: session_id.clone(),
                        user_name: user_name.clone(),
                    })
                    .await
                {
                    Ok(reply) => {
                        session_id = Some(reply.session_id);
                        if reply.learned {
                            println!("{}", "(noted)".dimmed());
                        }
                        println!("{}\n", reply.answer);
                    }
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    storage.close().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Dispatch a `/command` line against the storage surfaces.
async fn handle_command(
    storage: &dyn StorageAdapter,
    rebuild: &RebuildHandle,
    user_id: &str,
    line: &str,
) -> Result<(), MnemoError> {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/help" => {
            println!("  /memories              list stored memory facts");
            println!("  /forget <id>           delete a memory fact");
            println!("  /reminders             list your reminders");
            println!("  /done <id>             toggle a reminder complete");
            println!("  /drop <id>             delete a reminder");
            println!("  /sessions              list your chat sessions");
            println!("  /delete-session <id>   delete a session and its history");
            println!("  /quit                  exit");
        }
        "/memories" => {
            let memories = storage.list_memories().await?;
            if memories.is_empty() {
                println!("{}", "no memories yet".dimmed());
            }
            for memory in memories {
                println!("  {} [{}] {}", memory.id.dimmed(), memory.scope, memory.content);
            }
        }
        "/forget" => {
            require_argument(argument, "/forget <id>")?;
            storage.delete_memory(argument).await?;
            rebuild.request();
            println!("{}", "memory deleted".dimmed());
        }
        "/reminders" => {
            let reminders = storage.list_reminders(user_id).await?;
            if reminders.is_empty() {
                println!("{}", "no reminders".dimmed());
            }
            for reminder in reminders {
                let mark = if reminder.completed { "x" } else { " " };
                println!(
                    "  [{mark}] {} {} ({})",
                    reminder.id.dimmed(),
                    reminder.content,
                    reminder.due_date.format("%Y-%m-%d %H:%M")
                );
            }
        }
        "/done" => {
            require_argument(argument, "/done <id>")?;
            storage.toggle_reminder(argument).await?;
            println!("{}", "reminder toggled".dimmed());
        }
        "/drop" => {
            require_argument(argument, "/drop <id>")?;
            storage.delete_reminder(argument).await?;
            println!("{}", "reminder deleted".dimmed());
        }
        "/sessions" => {
            let sessions = storage.list_sessions(user_id).await?;
            if sessions.is_empty() {
                println!("{}", "no sessions".dimmed());
            }
            for session in sessions {
                println!("  {} {}", session.id.dimmed(), session.title);
            }
        }
        "/delete-session" => {
            require_argument(argument, "/delete-session <id>")?;
            storage.delete_session(argument).await?;
            println!("{}", "session deleted".dimmed());
        }
        _ => {
            println!("unknown command {command}; try {}", "/help".yellow());
        }
    }
    Ok(())
}

fn require_argument(argument: &str, usage: &str) -> Result<(), MnemoError> {
    if argument.is_empty() {
        return Err(MnemoError::Internal(format!("usage: {usage}")));
    }
    Ok(())
}
