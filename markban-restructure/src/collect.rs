//! Entry collection
//!
//! Pulls leaf bookmark entries out of a source folder, joined with their
//! visit statistics from moz_places. Read-only; ordering of the returned
//! collection is unspecified (ranking happens later).

use markban_common::db::models::Entry;
use markban_common::Result;
use sqlx::SqliteConnection;

const ENTRY_COLUMNS: &str = "b.id, b.title, b.parent, b.position, b.guid, b.fk,
       p.url, COALESCE(p.visit_count, 0) AS visit_count,
       p.last_visit_date, b.lastModified AS last_modified";

/// Collect every entry under a folder
///
/// Non-recursive: direct children only. Recursive: every entry whose
/// ancestor chain passes through the folder, found via a recursive CTE
/// over descendant folders. Folder rows are never returned.
pub async fn collect_entries(
    conn: &mut SqliteConnection,
    folder_id: i64,
    recursive: bool,
) -> Result<Vec<Entry>> {
    let entries = if recursive {
        let query = format!(
            "WITH RECURSIVE folder_tree AS (
                 SELECT id FROM moz_bookmarks WHERE id = ?
                 UNION ALL
                 SELECT b.id FROM moz_bookmarks b
                 INNER JOIN folder_tree ft ON b.parent = ft.id
                 WHERE b.type = 2
             )
             SELECT {ENTRY_COLUMNS}
             FROM moz_bookmarks b
             LEFT JOIN moz_places p ON b.fk = p.id
             WHERE b.parent IN (SELECT id FROM folder_tree) AND b.type = 1"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(folder_id)
            .fetch_all(&mut *conn)
            .await?
    } else {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}
             FROM moz_bookmarks b
             LEFT JOIN moz_places p ON b.fk = p.id
             WHERE b.parent = ? AND b.type = 1"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(folder_id)
            .fetch_all(&mut *conn)
            .await?
    };
    Ok(entries)
}
