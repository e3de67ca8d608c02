// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory fact CRUD operations.
//!
//! The `user_id` column is nullable: `NULL` marks a global memory visible
//! to every user. Scope conversion happens at the row boundary via
//! [`Scope::from_user_id`].

use mnemo_core::{MemoryRecord, MnemoError, Scope};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Return a snapshot of every memory record across all scopes.
pub async fn list_memories(db: &Database) -> Result<Vec<MemoryRecord>, MnemoError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, content, created_at FROM memories ORDER BY created_at ASC",
            )?;
            let records = stmt
                .query_map([], |row| {
                    let user_id: Option<String> = row.get(1)?;
                    Ok(MemoryRecord {
                        id: row.get(0)?,
                        scope: Scope::from_user_id(user_id),
                        content: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

/// Persist a new memory fact and return the stored record.
pub async fn create_memory(
    db: &Database,
    scope: &Scope,
    content: &str,
) -> Result<MemoryRecord, MnemoError> {
    let record = MemoryRecord {
        id: uuid::Uuid::new_v4().to_string(),
        scope: scope.clone(),
        content: content.to_string(),
        created_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    };

    let row = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO memories (id, user_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    row.id,
                    row.scope.user_id(),
                    row.content,
                    row.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(record)
}

/// Delete a memory by id.
pub async fn delete_memory(db: &Database, id: &str) -> Result<(), MnemoError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM memories WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
