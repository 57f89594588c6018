//! Data models for the places store
//!
//! Rows come back as flat immutable values. The tree's real shape lives
//! in the store; nothing here holds parent/child object references.

use serde::Serialize;
use sqlx::FromRow;

/// `moz_bookmarks.type` discriminant for a leaf bookmark entry
pub const TYPE_BOOKMARK: i64 = 1;
/// `moz_bookmarks.type` discriminant for a folder
pub const TYPE_FOLDER: i64 = 2;

/// One leaf bookmark entry joined with its visit statistics
///
/// `visit_count` defaults to 0 and `last_visit_date` stays `None` when
/// the entry has no matching `moz_places` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: i64,
    pub title: Option<String>,
    pub parent: i64,
    pub position: i64,
    pub guid: String,
    /// Content reference into `moz_places` (always present on well-formed entries)
    pub fk: Option<i64>,
    pub url: Option<String>,
    pub visit_count: i64,
    /// Epoch microseconds; `None` for never-visited entries
    pub last_visit_date: Option<i64>,
    /// Epoch microseconds
    pub last_modified: Option<i64>,
}

impl Entry {
    /// Display title for progress output
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}
