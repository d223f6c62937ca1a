#![allow(missing_docs, dead_code)]

/// One character of every width: 1, 2, 3 and 4 bytes, then ASCII again.
pub const MIXED: &str = "aé€😀z";

/// 1-based byte positions of the characters of [`MIXED`].
pub const MIXED_STARTS: [usize; 5] = [1, 2, 4, 7, 11];

/// Routes the crate's `tracing` output to the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
