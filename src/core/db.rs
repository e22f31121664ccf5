use anyhow::{Error, Result};
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

/// Open (or create) the sqlite database file in `db_dir`.
pub async fn async_db(db_dir: &str) -> Result<Connection, Error> {
    let path = format!("{}/nova.sqlite", db_dir.trim_end_matches('/'));
    let db = Connection::open(path).await?;
    Ok(db)
}

pub fn initialize_db(conn: &SyncConnection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS chat_message (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            role TEXT NOT NULL CHECK (role IN ('user', 'bot')),
            user_id TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS chat_message_user_id_idx ON chat_message (user_id);
        ",
    )
}
