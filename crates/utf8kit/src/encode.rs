//! Scalar to UTF-8 encoding.
//!
//! Encoding covers the whole `0..=0x10FFFF` range, surrogates included, so
//! every sequence [`decode`](crate::decode) accepts re-encodes to the same
//! bytes.

use alloc::vec::Vec;

use crate::{decode::MAX_SCALAR, error::Utf8Error};

/// Number of bytes in the UTF-8 encoding of `scalar` (1–4).
#[inline]
#[must_use]
pub const fn encoded_width(scalar: u32) -> usize {
    match scalar {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// Writes the encoding of `scalar` (which must be at most [`MAX_SCALAR`])
/// into `buf`, returning the number of bytes used.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_into(scalar: u32, buf: &mut [u8; 4]) -> usize {
    debug_assert!(scalar <= MAX_SCALAR);
    let width = encoded_width(scalar);
    match width {
        1 => buf[0] = scalar as u8,
        2 => {
            buf[0] = 0xC0 | (scalar >> 6) as u8;
            buf[1] = 0x80 | (scalar & 0x3F) as u8;
        }
        3 => {
            buf[0] = 0xE0 | (scalar >> 12) as u8;
            buf[1] = 0x80 | ((scalar >> 6) & 0x3F) as u8;
            buf[2] = 0x80 | (scalar & 0x3F) as u8;
        }
        _ => {
            buf[0] = 0xF0 | (scalar >> 18) as u8;
            buf[1] = 0x80 | ((scalar >> 12) & 0x3F) as u8;
            buf[2] = 0x80 | ((scalar >> 6) & 0x3F) as u8;
            buf[3] = 0x80 | (scalar & 0x3F) as u8;
        }
    }
    width
}

fn checked_scalar(value: i64, argument: usize) -> Result<u32, Utf8Error> {
    u32::try_from(value)
        .ok()
        .filter(|&scalar| scalar <= MAX_SCALAR)
        .ok_or(Utf8Error::out_of_range(argument, "value out of range"))
}

/// Encodes a single scalar value.
///
/// # Errors
///
/// Returns [`Utf8Error::ArgumentOutOfRange`] for argument 1 when `value` is
/// negative or above [`MAX_SCALAR`].
pub fn encode_one(value: i64) -> Result<Vec<u8>, Utf8Error> {
    let scalar = checked_scalar(value, 1)?;
    let mut buf = [0; 4];
    let width = encode_into(scalar, &mut buf);
    Ok(buf[..width].to_vec())
}

/// Encodes each value in order and concatenates the results.
///
/// # Errors
///
/// Returns [`Utf8Error::ArgumentOutOfRange`] naming the 1-based position of
/// the first value outside `0..=0x10FFFF`.
///
/// ```rust
/// use utf8kit::encode;
///
/// assert_eq!(encode(&[0x63, 0x61, 0x66, 0xE9]).unwrap(), "café".as_bytes());
/// assert!(encode(&[0x41, 0x11_0000]).is_err());
/// ```
pub fn encode(values: &[i64]) -> Result<Vec<u8>, Utf8Error> {
    if let [value] = values {
        return encode_one(*value);
    }
    let mut out = Vec::with_capacity(values.len());
    let mut buf = [0; 4];
    for (i, &value) in values.iter().enumerate() {
        let scalar = checked_scalar(value, i + 1)?;
        let width = encode_into(scalar, &mut buf);
        out.extend_from_slice(&buf[..width]);
    }
    Ok(out)
}
