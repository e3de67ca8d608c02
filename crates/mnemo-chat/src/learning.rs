// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Learning intent detection.
//!
//! A fixed trigger vocabulary marks messages that state a durable personal
//! fact. Matching is case-insensitive substring; the stored fact is always
//! the full original sentence, trimmed but otherwise verbatim.

/// Phrases that mark a message as a personal fact worth remembering.
const LEARNING_TRIGGERS: &[&str] = &[
    "i prefer",
    "i like",
    "i don't like",
    "i do not like",
    "i want",
    "i hate",
    "my name is",
    "i am",
];

/// Returns the memory fact to store for this message, if any.
///
/// At most one fact per message: the first matching trigger captures the
/// whole trimmed sentence.
pub fn extract_learning(sentence: &str) -> Option<String> {
    let lowered = sentence.to_lowercase();
    for trigger in LEARNING_TRIGGERS {
        if lowered.contains(trigger) {
            return Some(sentence.trim().to_string());
        }
    }
    None
}
