//! Timestamp utilities
//!
//! The places database stores all timestamps as integer microseconds
//! since the Unix epoch (Firefox convention).

use chrono::Utc;

/// Current instant as epoch microseconds
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}
