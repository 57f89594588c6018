//! Status folder provisioning
//!
//! Idempotently ensures a named folder exists directly under a parent.
//! Reruns find the previously created folder instead of duplicating it.

use markban_common::db::models::TYPE_FOLDER;
use markban_common::{guid, time, Result};
use sqlx::SqliteConnection;

/// Return the id of the child folder with this title, creating it if absent
///
/// A created folder gets a fresh collision-checked guid, a position one
/// past the parent's current maximum, and dateAdded = lastModified = now.
/// When several same-titled folders already exist, the lowest id wins,
/// matching the path resolver's tie-break.
pub async fn ensure_folder(
    conn: &mut SqliteConnection,
    parent_id: i64,
    title: &str,
) -> Result<i64> {
    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM moz_bookmarks
         WHERE parent = ? AND title = ? AND type = ?
         ORDER BY id LIMIT 1",
    )
    .bind(parent_id)
    .bind(title)
    .bind(TYPE_FOLDER)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let position = max_position(conn, parent_id).await? + 1;
    let guid = fresh_guid(conn).await?;
    let now = time::now_micros();

    sqlx::query(
        "INSERT INTO moz_bookmarks (type, fk, parent, position, title, dateAdded, lastModified, guid)
         VALUES (?, NULL, ?, ?, ?, ?, ?, ?)",
    )
    .bind(TYPE_FOLDER)
    .bind(parent_id)
    .bind(position)
    .bind(title)
    .bind(now)
    .bind(now)
    .bind(&guid)
    .execute(&mut *conn)
    .await?;

    let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}

/// Maximum position under a parent, -1 when the folder is empty
pub async fn max_position(conn: &mut SqliteConnection, parent_id: i64) -> Result<i64> {
    let max: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position), -1) FROM moz_bookmarks WHERE parent = ?",
    )
    .bind(parent_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(max)
}

/// Generate a guid not yet present in the store, regenerating on collision
async fn fresh_guid(conn: &mut SqliteConnection) -> Result<String> {
    loop {
        let candidate = guid::generate();
        let taken: Option<i64> = sqlx::query_scalar("SELECT 1 FROM moz_bookmarks WHERE guid = ?")
            .bind(&candidate)
            .fetch_optional(&mut *conn)
            .await?;
        if taken.is_none() {
            return Ok(candidate);
        }
    }
}
