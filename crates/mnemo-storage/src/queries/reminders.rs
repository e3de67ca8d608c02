// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder CRUD operations.
//!
//! Due dates are naive UTC, stored as `YYYY-MM-DDTHH:MM:SS` text so SQLite
//! string ordering matches chronological ordering.

use chrono::NaiveDateTime;
use mnemo_core::{MnemoError, Reminder};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Storage format for due dates. Second precision.
const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Persist a new reminder and return the stored record.
pub async fn create_reminder(
    db: &Database,
    user_id: &str,
    content: &str,
    due_date: NaiveDateTime,
) -> Result<Reminder, MnemoError> {
    let reminder = Reminder {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        due_date,
        completed: false,
        created_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    };

    let row = reminder.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminders (id, user_id, content, due_date, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5)",
                params![
                    row.id,
                    row.user_id,
                    row.content,
                    row.due_date.format(DUE_DATE_FORMAT).to_string(),
                    row.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(reminder)
}

/// List a user's reminders, soonest due first.
pub async fn list_reminders(db: &Database, user_id: &str) -> Result<Vec<Reminder>, MnemoError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, content, due_date, completed, created_at
                 FROM reminders WHERE user_id = ?1 ORDER BY due_date ASC",
            )?;
            let reminders = stmt
                .query_map(params![user_id], |row| {
                    let due_text: String = row.get(3)?;
                    let due_date = NaiveDateTime::parse_from_str(&due_text, DUE_DATE_FORMAT)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                3,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?;
                    Ok(Reminder {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        content: row.get(2)?,
                        due_date,
                        completed: row.get::<_, i64>(4)? != 0,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(reminders)
        })
        .await
        .map_err(map_tr_err)
}

/// Flip a reminder's completed flag.
pub async fn toggle_reminder(db: &Database, id: &str) -> Result<(), MnemoError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE reminders SET completed = 1 - completed WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a reminder by id.
pub async fn delete_reminder(db: &Database, id: &str) -> Result<(), MnemoError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
