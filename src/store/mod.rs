//! Persistence layer. Plain async functions over an injected `SqlitePool`;
//! no global state beyond the decode-failure counter below.

pub mod days;
pub mod labels;
pub mod streaks;
pub mod todos;

use std::sync::atomic::{AtomicU64, Ordering};

// Corrupt embedded JSON degrades to empty data rather than failing the read,
// but the degradation must stay visible: it is counted here and reported by
// the readiness endpoint.
static DECODE_FAILURES: AtomicU64 = AtomicU64::new(0);

pub fn decode_failures() -> u64 {
    DECODE_FAILURES.load(Ordering::Relaxed)
}

pub(crate) fn note_decode_failure(context: &str, err: &serde_json::Error) {
    DECODE_FAILURES.fetch_add(1, Ordering::Relaxed);
    tracing::warn!(context, error = %err, "Persisted JSON failed to decode; treating as empty");
}
