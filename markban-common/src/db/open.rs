//! Store open
//!
//! The engine runs against a private working copy of the places
//! database with a single exclusive connection. The store must already
//! exist; this tool never creates or initializes one.

use crate::{Error, Result};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::Path;
use tracing::info;

/// Open an existing places store with a single exclusive connection
///
/// Fails with [`Error::NotFound`] when the file is missing, so the
/// caller can abort before any transaction is opened.
pub async fn open_store(db_path: &Path) -> Result<SqliteConnection> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found at {} (expected a working copy, not the live profile)",
            db_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(false);
    let mut conn = options.connect().await?;

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .await?;

    info!("Opened store: {}", db_path.display());
    Ok(conn)
}
