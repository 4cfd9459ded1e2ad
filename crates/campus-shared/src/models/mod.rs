//! Data-transfer records mirrored from the school-management REST API.
//!
//! Every record is decoded and checked at the API boundary: identifiers may
//! arrive as strings or integers, timestamps in RFC 3339 or naive ISO-8601,
//! and unknown extra fields are ignored. Records are owned by the server and
//! treated as immutable once received.

mod academics;
mod attendance;
mod fees;
mod people;

pub use academics::*;
pub use attendance::*;
pub use fees::*;
pub use people::*;

use chrono::{DateTime, Utc};

/// Records that screens list newest-first.
pub trait Dated {
    /// The instant the list is ordered by. Records without one sort last.
    fn sort_key(&self) -> Option<DateTime<Utc>>;
}

/// Stable newest-first ordering; undated records keep their relative order
/// at the end of the slice.
pub fn sort_newest_first<T: Dated>(items: &mut [T]) {
    items.sort_by(|a, b| match (a.sort_key(), b.sort_key()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
