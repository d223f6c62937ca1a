//! Forward iteration over `(position, scalar)` pairs.

use core::{fmt, iter::FusedIterator};

use crate::{
    decode::{continuation_at, decode},
    error::Utf8Error,
};

/// One iteration step with the state passed explicitly.
///
/// `last` is the 1-based position returned by the previous step, or `0`
/// before the first one. Returns `None` once the input is exhausted.
///
/// Besides the decoder's own checks, a sequence is rejected when the byte
/// right after it is a continuation byte.
///
/// ```rust
/// use utf8kit::next_code;
///
/// let bytes = "hé".as_bytes();
/// assert_eq!(next_code(bytes, 0), Some(Ok((1, 0x68))));
/// assert_eq!(next_code(bytes, 1), Some(Ok((2, 0xE9))));
/// assert_eq!(next_code(bytes, 2), None);
/// ```
#[must_use]
pub fn next_code(bytes: &[u8], last: usize) -> Option<Result<(usize, u32), Utf8Error>> {
    let len = bytes.len();
    let mut at = last.saturating_sub(1);
    if last > 0 && at < len {
        // Skip the previous lead byte and its continuations.
        at += 1;
        while continuation_at(bytes, at) {
            at += 1;
        }
    }
    if at >= len {
        return None;
    }
    // The skip above steps over stray continuation bytes, so they must be
    // caught here, at the end of the sequence they follow.
    match decode(bytes, at) {
        Some((scalar, next)) if !continuation_at(bytes, next) => Some(Ok((at + 1, scalar))),
        _ => {
            tracing::trace!(position = at + 1, "malformed sequence during iteration");
            Some(Err(Utf8Error::malformed_at(at)))
        }
    }
}

/// Iterates over the characters of `bytes`.
///
/// Yields the 1-based byte position and scalar value of each character, left
/// to right. The first malformed sequence yields an error and ends the
/// iteration.
///
/// ```rust
/// use utf8kit::codes;
///
/// let pairs: Result<Vec<_>, _> = codes("añ€".as_bytes()).collect();
/// assert_eq!(pairs.unwrap(), [(1, 0x61), (2, 0xF1), (4, 0x20AC)]);
/// ```
#[must_use]
pub fn codes(bytes: &[u8]) -> Codes<'_> {
    Codes {
        bytes,
        last: 0,
        done: false,
    }
}

/// Iterator returned by [`codes`].
#[derive(Clone)]
pub struct Codes<'a> {
    bytes: &'a [u8],
    /// 1-based position of the last character yielded, 0 before the first.
    last: usize,
    done: bool,
}

impl Codes<'_> {
    /// The 1-based position of the last character yielded, or 0.
    #[must_use]
    pub fn position(&self) -> usize {
        self.last
    }
}

impl Iterator for Codes<'_> {
    type Item = Result<(usize, u32), Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = next_code(self.bytes, self.last);
        match item {
            Some(Ok((position, _))) => self.last = position,
            Some(Err(_)) | None => self.done = true,
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        (0, Some(self.bytes.len().saturating_sub(self.last)))
    }
}

impl FusedIterator for Codes<'_> {}

impl fmt::Debug for Codes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codes")
            .field("bytes", &bstr::BStr::new(self.bytes))
            .field("last", &self.last)
            .field("done", &self.done)
            .finish()
    }
}
