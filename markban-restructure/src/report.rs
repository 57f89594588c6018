//! Post-migration structure report

use crate::collect::collect_entries;
use markban_common::Result;
use sqlx::SqliteConnection;

/// Listing of a folder's entries in position order, one line each
pub async fn folder_report(
    conn: &mut SqliteConnection,
    folder_id: i64,
    folder_title: &str,
) -> Result<Vec<String>> {
    let mut entries = collect_entries(conn, folder_id, false).await?;
    entries.sort_by_key(|e| e.position);

    let mut lines = vec![format!("{} ({} items):", folder_title, entries.len())];
    for entry in &entries {
        let visit_info = if entry.visit_count > 0 {
            format!("visits={}", entry.visit_count)
        } else {
            "unvisited".to_string()
        };
        lines.push(format!(
            "  [{}] {} ({})",
            entry.position,
            truncate(entry.display_title(), 60),
            visit_info
        ));
    }
    Ok(lines)
}

fn truncate(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        title.to_string()
    } else {
        let cut: String = title.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
