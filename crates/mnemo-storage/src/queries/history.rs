// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat history operations. Append-only.

use mnemo_core::{ChatTurn, MnemoError};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Append one turn to a session's history.
pub async fn append_turn(db: &Database, turn: &ChatTurn) -> Result<(), MnemoError> {
    let turn = turn.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_history (session_id, user_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    turn.session_id,
                    turn.user_id,
                    turn.role,
                    turn.content,
                    turn.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Return a session's history in insertion order.
pub async fn get_history(db: &Database, session_id: &str) -> Result<Vec<ChatTurn>, MnemoError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT session_id, user_id, role, content, created_at
                 FROM chat_history WHERE session_id = ?1 ORDER BY id ASC",
            )?;
            let turns = stmt
                .query_map(params![session_id], |row| {
                    Ok(ChatTurn {
                        session_id: row.get(0)?,
                        user_id: row.get(1)?,
                        role: row.get(2)?,
                        content: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(turns)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn make_turn(session: &str, role: &str, content: &str, at: &str) -> ChatTurn {
        ChatTurn {
            session_id: session.to_string(),
            user_id: "u1".to_string(),
            role: role.to_string(),
            content: content.to_string(),
            created_at: at.to_string(),
        }
    }

    #[tokio::test]
    async fn history_preserves_insertion_order() {
        let db = Database::open_in_memory().await.unwrap();
        // Identical timestamps: insertion order must still hold (ordered by rowid).
        let at = "2026-01-01T00:00:00.000Z";
        append_turn(&db, &make_turn("s1", "user", "question", at)).await.unwrap();
        append_turn(&db, &make_turn("s1", "assistant", "answer", at)).await.unwrap();

        let history = get_history(&db, "s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].content, "question");
        assert_eq!(history[1].role, "assistant");
        assert_eq!(history[1].content, "answer");
    }

    #[tokio::test]
    async fn history_is_scoped_to_session() {
        let db = Database::open_in_memory().await.unwrap();
        let at = "2026-01-01T00:00:00.000Z";
        append_turn(&db, &make_turn("s1", "user", "in s1", at)).await.unwrap();
        append_turn(&db, &make_turn("s2", "user", "in s2", at)).await.unwrap();

        let history = get_history(&db, "s1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "in s1");
    }

    #[tokio::test]
    async fn empty_session_has_empty_history() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(get_history(&db, "unknown").await.unwrap().is_empty());
    }
}
