//! Roster and id fixtures.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MATCH: AtomicU64 = AtomicU64::new(1);

/// `(id, name)` pairs `p0..pN` / `P0..PN`, in seat order.
pub fn roster(players: usize) -> Vec<(String, String)> {
    (0..players)
        .map(|i| (format!("p{i}"), format!("P{i}")))
        .collect()
}

/// A match id unique within the test process.
pub fn unique_match_id(prefix: &str) -> String {
    format!("{prefix}-{}", NEXT_MATCH.fetch_add(1, Ordering::Relaxed))
}
