// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder intent detection and LLM-backed extraction.
//!
//! A message that starts with a reminder phrase goes through a structured
//! extraction call: the model returns JSON with the reminder content and an
//! ISO 8601 due date computed relative to the current UTC time. Every
//! failure mode along the way (LLM error, bad JSON, bad date) collapses to
//! [`ReminderOutcome::Failed`], which the orchestrator treats as "answer
//! normally" rather than an error.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use mnemo_config::model::ReminderConfig;
use mnemo_core::types::CompletionRequest;
use mnemo_core::{MnemoError, ProviderAdapter, StorageAdapter};
use serde::Deserialize;
use tracing::{info, warn};

/// Prefixes that gate the extraction call. Matched against the lowercased
/// message start; "remind" last so the specific phrases log first.
const REMINDER_TRIGGERS: &[&str] = &["remind me", "set a reminder", "add reminder", "remind"];

/// Result of running the reminder classifier on one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// The message is not a reminder request.
    NoIntent,
    /// A reminder was persisted; the string is the confirmation reply.
    Scheduled(String),
    /// Intent was detected but extraction failed; fall through to answering.
    Failed,
}

/// JSON shape the extraction prompt requests from the model.
#[derive(Debug, Deserialize)]
struct ExtractedReminder {
    content: String,
    due_date: String,
}

/// LLM-backed reminder extractor.
pub struct ReminderExtractor {
    provider: Arc<dyn ProviderAdapter>,
    storage: Arc<dyn StorageAdapter>,
    config: ReminderConfig,
}

impl ReminderExtractor {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        storage: Arc<dyn StorageAdapter>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            provider,
            storage,
            config,
        }
    }

    /// Classify and, on intent, extract and persist a reminder.
    pub async fn process(&self, user_id: &str, question: &str) -> ReminderOutcome {
        self.process_at(user_id, question, Utc::now().naive_utc())
            .await
    }

    /// Like [`process`](Self::process) with an injectable clock.
    pub async fn process_at(
        &self,
        user_id: &str,
        question: &str,
        now: NaiveDateTime,
    ) -> ReminderOutcome {
        if !has_reminder_intent(question) {
            return ReminderOutcome::NoIntent;
        }

        info!(question, "detected reminder intent");

        match self.extract_and_store(user_id, question, now).await {
            Ok(confirmation) => ReminderOutcome::Scheduled(confirmation),
            Err(e) => {
                warn!(error = %e, "reminder extraction failed, falling through to chat");
                ReminderOutcome::Failed
            }
        }
    }

    async fn extract_and_store(
        &self,
        user_id: &str,
        question: &str,
        now: NaiveDateTime,
    ) -> Result<String, MnemoError> {
        let prompt = self.render_extraction_prompt(question, now);

        let response = self
            .provider
            .complete(CompletionRequest {
                prompt,
                temperature: Some(self.config.extraction_temperature),
                max_output_tokens: None,
            })
            .await?;

        let cleaned = strip_code_fences(&response.text);
        let extracted: ExtractedReminder =
            serde_json::from_str(&cleaned).map_err(|e| MnemoError::Internal(format!(
                "reminder JSON parse failed: {e}"
            )))?;

        if extracted.content.is_empty() {
            return Err(MnemoError::Internal(
                "reminder extraction returned empty content".into(),
            ));
        }

        let due_date = parse_due_date(&extracted.due_date)?;

        let reminder = self
            .storage
            .create_reminder(user_id, &extracted.content, due_date)
            .await?;

        info!(
            reminder_id = reminder.id,
            due_date = %due_date,
            "reminder scheduled"
        );

        Ok(format!(
            "I've set a reminder: '{}' ({}).",
            extracted.content,
            relative_time(due_date, now)
        ))
    }

    fn render_extraction_prompt(&self, question: &str, now: NaiveDateTime) -> String {
        format!(
            "Extract reminder details from the user request.\n\
             Current Time (UTC): {current_time}\n\
             User Request: \"{question}\"\n\n\
             Return ONLY a valid JSON object with keys:\n\
             - \"content\": (string) what to remind about\n\
             - \"due_date\": (string) ISO 8601 datetime (YYYY-MM-DDTHH:MM:SS) calculated \
             relative to Current Time. If no time is specified, use Current Time plus \
             {offset} minutes.\n\n\
             Example output: {{\"content\": \"buy milk\", \"due_date\": \"2026-08-25T15:00:00\"}}",
            current_time = now.format("%Y-%m-%dT%H:%M:%S"),
            offset = self.config.default_offset_minutes,
        )
    }
}

/// Does the message start with a reminder phrase?
pub fn has_reminder_intent(question: &str) -> bool {
    let lowered = question.trim().to_lowercase();
    REMINDER_TRIGGERS.iter().any(|t| lowered.starts_with(t))
}

/// Strip markdown code fences the model sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the model's due date string into naive UTC.
///
/// Accepts timezone-aware RFC 3339 (converted to UTC, offset dropped) and
/// naive `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds.
fn parse_due_date(text: &str) -> Result<NaiveDateTime, MnemoError> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(text) {
        return Ok(aware.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive);
        }
    }
    Err(MnemoError::Internal(format!(
        "unparseable reminder due date: {text:?}"
    )))
}

/// Human-friendly delta between the due date and now.
fn relative_time(due_date: NaiveDateTime, now: NaiveDateTime) -> String {
    let minutes = (due_date - now).num_minutes();
    if minutes >= 60 {
        format!("in {}h {}m", minutes / 60, minutes % 60)
    } else if minutes > 0 {
        format!("in about {minutes} minutes")
    } else {
        "soon".to_string()
    }
}
