//! Character-wise navigation over byte positions.

use crate::{
    decode::continuation_at,
    error::Utf8Error,
    position::{checked_index, normalize},
};

/// Finds the byte position where the `n`-th character counting from `start`
/// begins.
///
/// - `n == 0` snaps `start` back to the beginning of the character that
///   contains it.
/// - `n > 0` moves `n - 1` characters forward, so `n == 1` is the character
///   at `start` itself.
/// - `n < 0` moves `|n|` characters backward.
///
/// `start` defaults to `1` for `n >= 0` and to `len + 1` otherwise. Only byte
/// structure is inspected; the characters crossed are not validated.
///
/// Returns `Ok(None)` when the sequence ends before `n` characters were
/// crossed.
///
/// # Errors
///
/// Returns [`Utf8Error::ArgumentOutOfRange`] for argument 3 when `start` is
/// outside `1..=len + 1`, and [`Utf8Error::MalformedSequence`] when `n != 0`
/// and `start` is a continuation byte.
///
/// ```rust
/// use utf8kit::offset;
///
/// let cafe = "café".as_bytes();
/// assert_eq!(offset(cafe, -1, None), Ok(Some(4)));
/// assert_eq!(offset(cafe, 0, Some(5)), Ok(Some(4)));
/// assert!(offset(cafe, -1, Some(5)).is_err()); // byte 5 continues `é`
/// assert_eq!(offset(cafe, 4, None), Ok(Some(4)));
/// assert_eq!(offset(cafe, 6, None), Ok(None));
/// ```
pub fn offset(bytes: &[u8], n: i64, start: Option<i64>) -> Result<Option<usize>, Utf8Error> {
    let len = bytes.len();
    let default_start = if n >= 0 {
        1
    } else {
        i64::try_from(len).map_or(i64::MAX, |len| len + 1)
    };
    let mut at = checked_index(
        normalize(start.unwrap_or(default_start), len),
        1,
        len + 1,
        3,
        "position out of range",
    )?;

    let mut n = n;
    if n == 0 {
        while at > 0 && continuation_at(bytes, at) {
            at -= 1;
        }
        return Ok(Some(at + 1));
    }
    if continuation_at(bytes, at) {
        tracing::debug!(
            position = at + 1,
            "offset requested from inside a character"
        );
        return Err(Utf8Error::malformed_at(at));
    }

    if n < 0 {
        while n < 0 && at > 0 {
            at = previous_start(bytes, at);
            n += 1;
        }
    } else {
        // The character at `start` is the first one.
        n -= 1;
        while n > 0 && at < len {
            at = next_start(bytes, at);
            n -= 1;
        }
    }
    Ok((n == 0).then_some(at + 1))
}

/// Index of the character start after the one at `at`, or `len`.
fn next_start(bytes: &[u8], mut at: usize) -> usize {
    at += 1;
    while continuation_at(bytes, at) {
        at += 1;
    }
    at
}

/// Index of the character start before `at`, stopping at 0.
fn previous_start(bytes: &[u8], mut at: usize) -> usize {
    at -= 1;
    while at > 0 && continuation_at(bytes, at) {
        at -= 1;
    }
    at
}
