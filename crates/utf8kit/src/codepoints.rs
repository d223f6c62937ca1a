//! Scalar extraction over byte ranges.

use alloc::vec::Vec;

use crate::{decode::decode, error::Utf8Error, position::normalize};

/// Decodes every character that starts between byte positions `start`
/// (default `1`) and `end` (default: the normalized `start`), inclusive.
///
/// An empty range (`start > end`) yields an empty vector. A character that
/// starts inside the range may extend past `end`.
///
/// # Errors
///
/// - [`Utf8Error::ArgumentOutOfRange`] when the normalized `start` is below 1
///   (argument 2) or `end` is past the end of `bytes` (argument 3).
/// - [`Utf8Error::Overflow`] when the output cannot be allocated.
/// - [`Utf8Error::MalformedSequence`] when any character in the range fails
///   to decode. No partial output is returned.
///
/// ```rust
/// use utf8kit::codepoints;
///
/// assert_eq!(codepoints(b"hello", Some(1), Some(5)).unwrap(), [104, 101, 108, 108, 111]);
/// assert_eq!(codepoints("café".as_bytes(), Some(-2), None).unwrap(), [0xE9]);
/// assert!(codepoints(b"abc", Some(3), Some(1)).unwrap().is_empty());
/// ```
pub fn codepoints(bytes: &[u8], start: Option<i64>, end: Option<i64>) -> Result<Vec<u32>, Utf8Error> {
    let len = bytes.len();
    let start = normalize(start.unwrap_or(1), len);
    let end = normalize(end.unwrap_or(start), len);
    if start < 1 {
        return Err(Utf8Error::out_of_range(2, "out of range"));
    }
    let end = usize::try_from(end)
        .ok()
        .filter(|&end| end <= len)
        .ok_or(Utf8Error::out_of_range(3, "out of range"))?;
    // `start` is at least 1 here.
    let Ok(start) = usize::try_from(start - 1) else {
        return Err(Utf8Error::out_of_range(2, "out of range"));
    };
    if start >= end {
        return Ok(Vec::new());
    }

    let mut scalars = Vec::new();
    scalars
        .try_reserve_exact(end - start)
        .map_err(|_| Utf8Error::Overflow)?;
    let mut at = start;
    while at < end {
        let Some((scalar, next)) = decode(bytes, at) else {
            tracing::debug!(
                position = at + 1,
                input = %bstr::BStr::new(&bytes[start..end]),
                "malformed sequence in codepoint range"
            );
            return Err(Utf8Error::malformed_at(at));
        };
        scalars.push(scalar);
        at = next;
    }
    Ok(scalars)
}
