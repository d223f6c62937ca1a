//! Character counting over byte ranges.

use crate::{
    decode::decode,
    error::Utf8Error,
    position::{checked_index, normalize},
};

/// Outcome of [`length`].
///
/// Malformed input is an ordinary result here rather than an error, so a
/// caller can probe a buffer and resume after the reported position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Number of characters that start in the range.
    Count(usize),
    /// The range is not well formed; `position` is the 1-based byte position
    /// of the first sequence that failed to decode.
    Invalid {
        /// 1-based byte position of the failure.
        position: usize,
    },
}

impl Length {
    /// The character count, if the range was well formed.
    #[must_use]
    pub const fn count(self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(n),
            Self::Invalid { .. } => None,
        }
    }
}

/// Counts the characters that start between byte positions `start`
/// (default `1`) and `end` (default `-1`), both inclusive.
///
/// # Errors
///
/// Returns [`Utf8Error::ArgumentOutOfRange`] when the normalized `start` is
/// outside `1..=len + 1` (argument 2) or `end` is past `len` (argument 3).
///
/// ```rust
/// use utf8kit::{Length, length};
///
/// assert_eq!(length("café".as_bytes(), None, None), Ok(Length::Count(4)));
/// assert_eq!(length(&[0xE2], None, None), Ok(Length::Invalid { position: 1 }));
/// ```
pub fn length(bytes: &[u8], start: Option<i64>, end: Option<i64>) -> Result<Length, Utf8Error> {
    let len = bytes.len();
    let mut at = checked_index(
        normalize(start.unwrap_or(1), len),
        1,
        len + 1,
        2,
        "initial position out of string",
    )?;
    let end = normalize(end.unwrap_or(-1), len);
    // The exclusive byte bound; `end` is never negative after normalizing.
    let stop = usize::try_from(end)
        .ok()
        .filter(|&end| end <= len)
        .ok_or(Utf8Error::out_of_range(3, "final position out of string"))?;

    let mut count = 0;
    while at < stop {
        let Some((_, next)) = decode(bytes, at) else {
            tracing::trace!(position = at + 1, "length stopped at malformed sequence");
            return Ok(Length::Invalid { position: at + 1 });
        };
        at = next;
        count += 1;
    }
    Ok(Length::Count(count))
}
