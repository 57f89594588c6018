//! Folder path resolution
//!
//! Resolves an ordered sequence of folder titles, starting under a known
//! root scope, to the id of the folder it names. Read-only.

use markban_common::db::models::TYPE_FOLDER;
use markban_common::Result;
use sqlx::SqliteConnection;

/// Resolve a folder path to its id
///
/// Each segment must match a child folder of the previously resolved
/// node by exact title. Returns `Ok(None)` as soon as any segment has no
/// matching child folder.
///
/// Known limitation: when several sibling folders share a title, the one
/// with the lowest id is chosen. The store does not forbid duplicate
/// titles, so the walk has to pick deterministically.
pub async fn resolve_path(
    conn: &mut SqliteConnection,
    root_id: i64,
    segments: &[String],
) -> Result<Option<i64>> {
    if segments.is_empty() {
        return Ok(None);
    }

    let mut current_id = root_id;
    for segment in segments {
        let next: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM moz_bookmarks
             WHERE parent = ? AND title = ? AND type = ?
             ORDER BY id LIMIT 1",
        )
        .bind(current_id)
        .bind(segment)
        .bind(TYPE_FOLDER)
        .fetch_optional(&mut *conn)
        .await?;

        match next {
            Some(id) => current_id = id,
            None => return Ok(None),
        }
    }

    Ok(Some(current_id))
}
