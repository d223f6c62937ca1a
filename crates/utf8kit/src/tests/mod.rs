mod arbitrary;

/// Number of quickcheck cases per property.
pub(crate) fn quickcheck_rounds() -> u64 {
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;
    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    tests
}
