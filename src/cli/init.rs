use std::fs;

use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::core::db::{async_db, initialize_db};

/// Open the message database, creating the directory and table if
/// they don't exist yet.
pub async fn open_db(db_path: &str) -> Result<Connection, Error> {
    fs::create_dir_all(db_path)?;
    let db = async_db(db_path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    Ok(db)
}

pub async fn run() -> Result<()> {
    let config = AppConfig::default();
    println!("Initializing db at {}...", config.db_path);
    open_db(&config.db_path).await?;
    println!("Finished initializing db");
    Ok(())
}
