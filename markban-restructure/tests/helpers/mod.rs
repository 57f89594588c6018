//! Shared fixture helpers for the restructure integration tests
//!
//! Builds throwaway places-store copies under /tmp, keyed by process id
//! and a per-test tag so parallel tests never collide.

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique fixture path for one test
pub fn fixture_path(tag: &str) -> PathBuf {
    PathBuf::from(format!(
        "/tmp/markban-test-{}-{}.sqlite",
        tag,
        std::process::id()
    ))
}

/// Create a fresh store with the places schema and the six reserved rows
pub async fn create_store(path: &Path) -> SqliteConnection {
    let _ = std::fs::remove_file(path);

    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("create fixture store");

    sqlx::query(
        "CREATE TABLE moz_bookmarks (
             id INTEGER PRIMARY KEY,
             type INTEGER NOT NULL,
             fk INTEGER,
             parent INTEGER,
             position INTEGER,
             title TEXT,
             dateAdded INTEGER,
             lastModified INTEGER,
             guid TEXT
         )",
    )
    .execute(&mut conn)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE moz_places (
             id INTEGER PRIMARY KEY,
             url TEXT,
             visit_count INTEGER NOT NULL DEFAULT 0,
             last_visit_date INTEGER
         )",
    )
    .execute(&mut conn)
    .await
    .unwrap();

    // Reserved system rows, Firefox-style guids included
    let system = [
        (1, 0, 0, "root", "root________"),
        (2, 1, 0, "menu", "menu________"),
        (3, 1, 1, "toolbar", "toolbar_____"),
        (4, 1, 2, "tags", "tags________"),
        (5, 1, 3, "unfiled", "unfiled_____"),
        (6, 1, 4, "mobile", "mobile______"),
    ];
    for (id, parent, position, title, guid) in system {
        sqlx::query(
            "INSERT INTO moz_bookmarks (id, type, fk, parent, position, title, dateAdded, lastModified, guid)
             VALUES (?, 2, NULL, ?, ?, ?, 0, 0, ?)",
        )
        .bind(id)
        .bind(parent)
        .bind(position)
        .bind(title)
        .bind(guid)
        .execute(&mut conn)
        .await
        .unwrap();
    }

    conn
}

static GUID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Deterministic unique 12-char guid for seeded rows
pub fn test_guid() -> String {
    format!("T{:011}", GUID_SEQ.fetch_add(1, Ordering::Relaxed))
}

/// Next free sibling position under a parent
async fn next_position(conn: &mut SqliteConnection, parent: i64) -> i64 {
    let max: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(position), -1) FROM moz_bookmarks WHERE parent = ?")
            .bind(parent)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    max + 1
}

/// Seed a folder row, appended after the parent's current children
pub async fn add_folder(conn: &mut SqliteConnection, parent: i64, title: &str) -> i64 {
    let position = next_position(conn, parent).await;
    sqlx::query(
        "INSERT INTO moz_bookmarks (type, fk, parent, position, title, dateAdded, lastModified, guid)
         VALUES (2, NULL, ?, ?, ?, 0, 0, ?)",
    )
    .bind(parent)
    .bind(position)
    .bind(title)
    .bind(test_guid())
    .execute(&mut *conn)
    .await
    .unwrap();
    sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&mut *conn)
        .await
        .unwrap()
}

/// Seed a bookmark entry plus its moz_places statistics row
pub async fn add_entry(
    conn: &mut SqliteConnection,
    parent: i64,
    title: &str,
    visit_count: i64,
    last_visit_date: Option<i64>,
    last_modified: i64,
) -> i64 {
    add_entry_with_guid(
        conn,
        parent,
        title,
        visit_count,
        last_visit_date,
        last_modified,
        &test_guid(),
    )
    .await
}

/// Same as [`add_entry`] but with an explicit guid, for collision fixtures
pub async fn add_entry_with_guid(
    conn: &mut SqliteConnection,
    parent: i64,
    title: &str,
    visit_count: i64,
    last_visit_date: Option<i64>,
    last_modified: i64,
    guid: &str,
) -> i64 {
    sqlx::query("INSERT INTO moz_places (url, visit_count, last_visit_date) VALUES (?, ?, ?)")
        .bind(format!("https://example.com/{}", title.replace(' ', "-")))
        .bind(visit_count)
        .bind(last_visit_date)
        .execute(&mut *conn)
        .await
        .unwrap();
    let place_id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&mut *conn)
        .await
        .unwrap();

    let position = next_position(conn, parent).await;
    sqlx::query(
        "INSERT INTO moz_bookmarks (type, fk, parent, position, title, dateAdded, lastModified, guid)
         VALUES (1, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(place_id)
    .bind(parent)
    .bind(position)
    .bind(title)
    .bind(last_modified)
    .bind(guid)
    .execute(&mut *conn)
    .await
    .unwrap();
    sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&mut *conn)
        .await
        .unwrap()
}

pub type BookmarkRow = (
    i64,            // id
    i64,            // type
    Option<i64>,    // fk
    i64,            // parent
    i64,            // position
    Option<String>, // title
    i64,            // dateAdded
    i64,            // lastModified
    String,         // guid
);

pub type PlaceRow = (i64, Option<String>, i64, Option<i64>);

/// Full logical dump of both tables, for before/after comparisons
pub async fn dump_store(conn: &mut SqliteConnection) -> (Vec<BookmarkRow>, Vec<PlaceRow>) {
    let bookmarks: Vec<BookmarkRow> = sqlx::query_as(
        "SELECT id, type, fk, parent, position, title, dateAdded, lastModified, guid
         FROM moz_bookmarks ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await
    .unwrap();
    let places: Vec<PlaceRow> =
        sqlx::query_as("SELECT id, url, visit_count, last_visit_date FROM moz_places ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .unwrap();
    (bookmarks, places)
}

/// Children of a folder as (id, position) pairs in position order
pub async fn children_positions(conn: &mut SqliteConnection, parent: i64) -> Vec<(i64, i64)> {
    sqlx::query_as("SELECT id, position FROM moz_bookmarks WHERE parent = ? ORDER BY position, id")
        .bind(parent)
        .fetch_all(&mut *conn)
        .await
        .unwrap()
}

/// Count of distinct guids vs rows; equal when guids are globally unique
pub async fn guid_cardinality(conn: &mut SqliteConnection) -> (i64, i64) {
    let distinct: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT guid) FROM moz_bookmarks")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM moz_bookmarks")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    (distinct, total)
}

/// Canned confirmation answers for interactive-mode tests
pub struct CannedConfirm {
    pub answer: bool,
    pub asked: usize,
}

impl CannedConfirm {
    pub fn new(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl markban_restructure::Confirm for CannedConfirm {
    fn confirm(&mut self) -> bool {
        self.asked += 1;
        self.answer
    }
}

/// Remove a fixture file, ignoring errors
pub fn cleanup(path: &Path) {
    let _ = std::fs::remove_file(path);
}
