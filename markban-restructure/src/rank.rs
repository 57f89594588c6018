//! Recency ranking and WIP partition
//!
//! Pure in-memory stage: sorts a pool of entries by a composite recency
//! key and splits it at the capacity limit. Stable sort, so re-runs on
//! identical data are deterministic.

use markban_common::db::models::Entry;

/// Result of splitting a ranked pool at the capacity limit
#[derive(Debug)]
pub struct Partition {
    /// Highest-ranked entries, at most `limit` of them, in rank order
    pub front: Vec<Entry>,
    /// Everything else, in rank order
    pub remainder: Vec<Entry>,
}

/// Composite descending sort key: most recently visited first, then most
/// recently modified, then most visited. Absent timestamps rank lowest.
fn rank_key(entry: &Entry) -> (i64, i64, i64) {
    (
        entry.last_visit_date.unwrap_or(0),
        entry.last_modified.unwrap_or(0),
        entry.visit_count,
    )
}

/// Rank a pool and split it at the capacity limit
///
/// `front.len() == min(limit, pool size)`. Entries tied on all three
/// keys keep their original relative order. Target positions are each
/// partition's own index order, dense and zero-based.
pub fn rank_and_partition(mut entries: Vec<Entry>, limit: usize) -> Partition {
    // sort_by is stable; comparing b to a sorts descending without
    // disturbing the relative order of equal keys
    entries.sort_by(|a, b| rank_key(b).cmp(&rank_key(a)));

    let remainder = if entries.len() > limit {
        entries.split_off(limit)
    } else {
        Vec::new()
    };

    Partition {
        front: entries,
        remainder,
    }
}
