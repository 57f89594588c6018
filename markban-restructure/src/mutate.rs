//! Tree mutation
//!
//! Reparents and repositions one entry at a time, stamping lastModified.
//! Guid, type and fk are never touched. Atomicity comes from the
//! surrounding transaction, not from this module.

use markban_common::{time, Error, RestructureConfig, Result};
use sqlx::SqliteConnection;

/// Move an entry to a new parent folder and sibling position
///
/// Reserved system rows are refused outright; they may only ever appear
/// as path ancestors.
pub async fn move_entry(
    conn: &mut SqliteConnection,
    config: &RestructureConfig,
    entry_id: i64,
    new_parent: i64,
    new_position: i64,
) -> Result<()> {
    if config.reserved_ids.contains(&entry_id) {
        return Err(Error::InvalidInput(format!(
            "Refusing to move reserved system row {entry_id}"
        )));
    }

    sqlx::query(
        "UPDATE moz_bookmarks
         SET parent = ?, position = ?, lastModified = ?
         WHERE id = ?",
    )
    .bind(new_parent)
    .bind(new_position)
    .bind(time::now_micros())
    .bind(entry_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
