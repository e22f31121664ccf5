use anyhow::{Error, Result};
use tokio_rusqlite::{Connection, params};

use super::models::{NewMessage, Sender};

pub async fn insert_chat_message(db: &Connection, msg: &NewMessage) -> Result<i64, Error> {
    let content = msg.content.clone();
    let role = msg.role.as_str();
    let user_id = msg.user_id.clone();
    let id = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_message (content, role, user_id) VALUES (?, ?, ?)",
                params![content, role, user_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await?;

    Ok(id)
}

/// Most recent messages written for `user_id` in the order they were
/// written. Bot replies are not keyed by user so they are not
/// included.
pub async fn find_user_messages(
    db: &Connection,
    user_id: &str,
    limit: usize,
) -> Result<Vec<NewMessage>, Error> {
    let u_id = user_id.to_owned();
    let messages = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT content, user_id FROM (
                    SELECT id, content, user_id
                    FROM chat_message
                    WHERE user_id = ? AND role = 'user'
                    ORDER BY id DESC
                    LIMIT ?
                ) ORDER BY id ASC
                ",
            )?;
            let rows = stmt
                .query_map(params![u_id, limit as i64], |row| {
                    Ok(NewMessage {
                        content: row.get(0)?,
                        role: Sender::User,
                        user_id: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await?;

    Ok(messages)
}

pub async fn count_chat_messages(db: &Connection) -> Result<i64, Error> {
    let count = db
        .call(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM chat_message", [], |row| row.get(0))?;
            Ok(count)
        })
        .await?;
    Ok(count)
}
