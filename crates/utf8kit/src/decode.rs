//! Single-sequence UTF-8 decoding.
//!
//! [`decode`] validates one sequence in place: continuation bytes must match
//! `10xxxxxx`, the value must fit in `0..=0x10FFFF`, and it must need every
//! byte it uses (no overlong forms). Surrogate code points are accepted.
//!
//! [`DecodeState`] is the same validation expressed as a byte-at-a-time state
//! machine, for input that arrives in pieces.

/// Largest scalar value accepted by the decoder and encoder.
pub const MAX_SCALAR: u32 = 0x10_FFFF;

/// Largest value that is overlong for a given continuation count. Index 0
/// rejects a lone continuation byte in lead position.
const OVERLONG_LIMITS: [u32; 4] = [0xFF, 0x7F, 0x7FF, 0xFFFF];

/// Returns `true` for bytes of the form `10xxxxxx`.
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Continuation test that treats the end of the slice as a non-continuation.
#[inline]
pub(crate) fn continuation_at(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).copied().is_some_and(is_continuation)
}

/// Decodes the sequence starting at `at`.
///
/// Returns the scalar value and the index just past the sequence, or `None`
/// if the bytes at `at` are not a well-formed sequence (including `at` out
/// of bounds and a sequence cut short by the end of `bytes`).
///
/// ```rust
/// use utf8kit::decode;
///
/// let cafe = "café".as_bytes();
/// assert_eq!(decode(cafe, 3), Some((0xE9, 5)));
/// assert_eq!(decode(cafe, 4), None); // continuation byte
/// assert_eq!(decode(&[0xC0, 0x80], 0), None); // overlong NUL
/// ```
#[must_use]
pub fn decode(bytes: &[u8], at: usize) -> Option<(u32, usize)> {
    let mut lead = u32::from(*bytes.get(at)?);
    if lead < 0x80 {
        return Some((lead, at + 1));
    }

    let mut count = 0;
    let mut scalar = 0;
    while lead & 0x40 != 0 {
        count += 1;
        if count > 3 {
            return None;
        }
        let cont = *bytes.get(at + count)?;
        if !is_continuation(cont) {
            return None;
        }
        scalar = (scalar << 6) | u32::from(cont & 0x3F);
        lead <<= 1;
    }
    scalar |= (lead & 0x7F) << (count * 5);

    if scalar > MAX_SCALAR || scalar <= OVERLONG_LIMITS[count] {
        return None;
    }
    Some((scalar, at + count + 1))
}

/// Byte-at-a-time UTF-8 decoder state.
///
/// [`step`](Self::step) is a pure transition function. `Start`, `Done` and
/// `Invalid` all accept the next byte as the lead of a new sequence, so a
/// caller can resume after either outcome without resetting.
///
/// ```rust
/// use utf8kit::DecodeState;
///
/// let state = [0xE2, 0x82, 0xAC]
///     .into_iter()
///     .fold(DecodeState::Start, DecodeState::step);
/// assert_eq!(state, DecodeState::Done(0x20AC));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// No sequence in progress.
    #[default]
    Start,
    /// Inside a multi-byte sequence.
    NeedCont {
        /// Continuation bytes still expected.
        remaining: u8,
        /// Total continuation bytes of this sequence.
        count: u8,
        /// Bits accumulated so far.
        acc: u32,
    },
    /// A complete sequence decoded to this scalar.
    Done(u32),
    /// The last byte made the sequence malformed.
    Invalid,
}

impl DecodeState {
    /// Feeds one byte.
    #[must_use]
    pub const fn step(self, byte: u8) -> Self {
        match self {
            Self::Start | Self::Done(_) | Self::Invalid => Self::lead(byte),
            Self::NeedCont {
                remaining,
                count,
                acc,
            } => {
                if !is_continuation(byte) {
                    return Self::Invalid;
                }
                let acc = (acc << 6) | (byte & 0x3F) as u32;
                if remaining > 1 {
                    return Self::NeedCont {
                        remaining: remaining - 1,
                        count,
                        acc,
                    };
                }
                if acc > MAX_SCALAR || acc <= OVERLONG_LIMITS[count as usize] {
                    Self::Invalid
                } else {
                    Self::Done(acc)
                }
            }
        }
    }

    const fn lead(byte: u8) -> Self {
        let (count, acc) = match byte {
            0x00..=0x7F => return Self::Done(byte as u32),
            0xC0..=0xDF => (1, byte & 0x1F),
            0xE0..=0xEF => (2, byte & 0x0F),
            0xF0..=0xF7 => (3, byte & 0x07),
            // Continuation bytes and 0xF8..=0xFF never start a sequence.
            _ => return Self::Invalid,
        };
        Self::NeedCont {
            remaining: count,
            count,
            acc: acc as u32,
        }
    }

    /// Returns `true` while a multi-byte sequence is incomplete.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::NeedCont { .. })
    }
}
