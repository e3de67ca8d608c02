// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session CRUD operations.

use mnemo_core::{ChatSession, MnemoError};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Create a new session.
pub async fn create_session(db: &Database, session: &ChatSession) -> Result<(), MnemoError> {
    let session = session.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (id, user_id, title, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session.id, session.user_id, session.title, session.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a session by id.
pub async fn get_session(db: &Database, id: &str) -> Result<Option<ChatSession>, MnemoError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, created_at FROM sessions WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(ChatSession {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    created_at: row.get(3)?,
                })
            });
            match result {
                Ok(session) => Ok(Some(session)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List a user's sessions, newest first.
pub async fn list_sessions(db: &Database, user_id: &str) -> Result<Vec<ChatSession>, MnemoError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, created_at FROM sessions
                 WHERE user_id = ?1 ORDER BY created_at DESC",
            )?;
            let sessions = stmt
                .query_map(params![user_id], |row| {
                    Ok(ChatSession {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        title: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(sessions)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a session and all of its history rows.
pub async fn delete_session(db: &Database, id: &str) -> Result<(), MnemoError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM chat_history WHERE session_id = ?1", params![id])?;
            tx.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn make_session(id: &str, user: &str) -> ChatSession {
        ChatSession {
            id: id.to_string(),
            user_id: user.to_string(),
            title: "New Chat".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_session_round_trips() {
        let db = Database::open_in_memory().await.unwrap();
        create_session(&db, &make_session("s1", "u1")).await.unwrap();

        let retrieved = get_session(&db, "s1").await.unwrap().unwrap();
        assert_eq!(retrieved.id, "s1");
        assert_eq!(retrieved.user_id, "u1");
        assert_eq!(retrieved.title, "New Chat");
    }

    #[tokio::test]
    async fn get_nonexistent_session_returns_none() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(get_session(&db, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_sessions_is_scoped_to_user() {
        let db = Database::open_in_memory().await.unwrap();
        create_session(&db, &make_session("s1", "u1")).await.unwrap();
        create_session(&db, &make_session("s2", "u2")).await.unwrap();

        let sessions = list_sessions(&db, "u1").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "s1");
    }

    #[tokio::test]
    async fn delete_session_removes_history() {
        let db = Database::open_in_memory().await.unwrap();
        create_session(&db, &make_session("s1", "u1")).await.unwrap();

        let turn = mnemo_core::ChatTurn {
            session_id: "s1".to_string(),
            user_id: "u1".to_string(),
            role: "user".to_string(),
            content: "hello".to_string(),
            created_at: "2026-01-01T00:00:01.000Z".to_string(),
        };
        crate::queries::history::append_turn(&db, &turn).await.unwrap();

        delete_session(&db, "s1").await.unwrap();

        assert!(get_session(&db, "s1").await.unwrap().is_none());
        let history = crate::queries::history::get_history(&db, "s1").await.unwrap();
        assert!(history.is_empty());
    }
}
