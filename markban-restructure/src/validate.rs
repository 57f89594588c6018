//! Store invariant checks and position repair
//!
//! Two read-only checks (global guid uniqueness, per-folder position
//! uniqueness) plus one repair operation that reassigns dense zero-based
//! positions. Guid collisions are never repaired here: duplicate keys
//! cannot be disambiguated safely, so the caller must treat them as a
//! fatal precondition failure.

use markban_common::Result;
use sqlx::SqliteConnection;

/// Guid values occurring more than once, with their occurrence counts
pub async fn duplicate_guids(conn: &mut SqliteConnection) -> Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT guid, COUNT(*) AS cnt FROM moz_bookmarks
         GROUP BY guid HAVING cnt > 1",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Position values occurring more than once under one parent
pub async fn duplicate_positions(
    conn: &mut SqliteConnection,
    parent_id: i64,
) -> Result<Vec<(i64, i64)>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT position, COUNT(*) AS cnt FROM moz_bookmarks
         WHERE parent = ? GROUP BY position HAVING cnt > 1",
    )
    .bind(parent_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Reassign dense zero-based positions to all children of a folder
///
/// Children keep their current relative order. The id tiebreak makes the
/// repair deterministic when positions are duplicated, since SQLite
/// gives no ordering guarantee among equal sort keys.
pub async fn reindex_positions(conn: &mut SqliteConnection, parent_id: i64) -> Result<u64> {
    let ids: Vec<(i64,)> = sqlx::query_as(
        "SELECT id FROM moz_bookmarks WHERE parent = ? ORDER BY position, id",
    )
    .bind(parent_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut updated = 0u64;
    for (new_position, (id,)) in ids.into_iter().enumerate() {
        sqlx::query("UPDATE moz_bookmarks SET position = ? WHERE id = ?")
            .bind(new_position as i64)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        updated += 1;
    }
    Ok(updated)
}
