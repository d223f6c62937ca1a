//! Relative byte positions.
//!
//! Public positions are 1-based `i64`s. Negative values count back from the
//! end, so `-1` is the last byte. Normalization is arithmetic only; every
//! caller range-checks the result against its own bounds.

use crate::error::Utf8Error;

/// Translates a relative position into an absolute one.
///
/// Non-negative positions pass through unchanged. A negative position `p`
/// resolves to `len + p + 1`, or to `0` ("before the start") when `|p|`
/// exceeds `len`.
///
/// ```rust
/// use utf8kit::normalize;
///
/// assert_eq!(normalize(3, 5), 3);
/// assert_eq!(normalize(-1, 5), 5);
/// assert_eq!(normalize(-5, 5), 1);
/// assert_eq!(normalize(-6, 5), 0);
/// ```
#[must_use]
pub fn normalize(pos: i64, len: usize) -> i64 {
    if pos >= 0 {
        return pos;
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    if pos.unsigned_abs() > len.unsigned_abs() {
        0
    } else {
        len + pos + 1
    }
}

/// Validates a normalized 1-based position against `lo..=hi` and converts it
/// to a 0-based index.
pub(crate) fn checked_index(
    pos: i64,
    lo: i64,
    hi: usize,
    argument: usize,
    reason: &'static str,
) -> Result<usize, Utf8Error> {
    let out = || Utf8Error::out_of_range(argument, reason);
    if pos < lo {
        return Err(out());
    }
    let pos = usize::try_from(pos).map_err(|_| out())?;
    if pos > hi {
        return Err(out());
    }
    Ok(pos.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 4, 0)]
    #[case(1, 4, 1)]
    #[case(9, 4, 9)]
    #[case(-1, 4, 4)]
    #[case(-4, 4, 1)]
    #[case(-5, 4, 0)]
    #[case(i64::MIN, 4, 0)]
    #[case(-1, 0, 0)]
    fn normalizes(#[case] pos: i64, #[case] len: usize, #[case] expected: i64) {
        assert_eq!(normalize(pos, len), expected);
    }

    #[test]
    fn checked_index_reports_argument() {
        assert_eq!(checked_index(1, 1, 3, 2, "x"), Ok(0));
        assert_eq!(checked_index(4, 1, 4, 2, "x"), Ok(3));
        assert_eq!(
            checked_index(0, 1, 4, 2, "x"),
            Err(Utf8Error::out_of_range(2, "x"))
        );
        assert_eq!(
            checked_index(5, 1, 4, 3, "y"),
            Err(Utf8Error::out_of_range(3, "y"))
        );
    }
}
