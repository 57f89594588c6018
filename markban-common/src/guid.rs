//! External identifier (guid) utilities
//!
//! Bookmark rows carry a 12-character alphanumeric guid, distinct from
//! the internal numeric rowid. Callers must collision-check a freshly
//! generated guid against the store and regenerate on collision.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a bookmark guid
pub const GUID_LEN: usize = 12;

/// Generate a 12-character alphanumeric guid candidate
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GUID_LEN)
        .map(char::from)
        .collect()
}
