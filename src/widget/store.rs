use anyhow::{Error, Result};
use async_trait::async_trait;
use tokio_rusqlite::Connection;

use crate::chat::{NewMessage, insert_chat_message};

/// Append-only message log.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, msg: &NewMessage) -> Result<(), Error>;
}

pub struct SqliteMessageStore {
    db: Connection,
}

impl SqliteMessageStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn append(&self, msg: &NewMessage) -> Result<(), Error> {
        if msg.role == crate::chat::Sender::User && msg.user_id.is_none() {
            anyhow::bail!("User messages must have a user_id");
        }
        insert_chat_message(&self.db, msg).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Sender, count_chat_messages};
    use crate::core::db::initialize_db;

    #[tokio::test]
    async fn it_requires_a_user_id_for_user_messages() {
        let db = Connection::open_in_memory().await.unwrap();
        db.call(|conn| {
            initialize_db(conn)?;
            Ok(())
        })
        .await
        .unwrap();
        let store = SqliteMessageStore::new(db.clone());

        let anonymous = NewMessage {
            content: String::from("hi"),
            role: Sender::User,
            user_id: None,
        };
        assert!(store.append(&anonymous).await.is_err());
        store.append(&NewMessage::from_bot("hello")).await.unwrap();

        assert_eq!(count_chat_messages(&db).await.unwrap(), 1);
    }
}
