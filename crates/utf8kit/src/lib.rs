//! Validated UTF-8 decoding, byte-offset navigation and legacy codepage
//! transcoding over raw byte slices.
//!
//! Positions in the public API are 1-based byte positions, and negative
//! positions count back from the end (`-1` is the last byte). Scalar values
//! are `u32`s in `0..=0x10FFFF`; surrogate code points are accepted, overlong
//! encodings are not.
//!
//! ```rust
//! use utf8kit::{Length, codepoints, codes, length, offset};
//!
//! let cafe = "café".as_bytes();
//! assert_eq!(length(cafe, None, None), Ok(Length::Count(4)));
//! assert_eq!(offset(cafe, -1, None), Ok(Some(4)));
//! assert_eq!(codepoints(cafe, Some(4), None).unwrap(), [0xE9]);
//! assert_eq!(codes(cafe).count(), 4);
//! ```

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod codepoints;
mod decode;
mod encode;
mod error;
mod iter;
mod offset;
mod pattern;
mod position;
mod scan;
mod stream;
mod transcode;

#[cfg(test)]
mod tests;

pub use codepoints::codepoints;
pub use decode::{DecodeState, MAX_SCALAR, decode, is_continuation};
pub use encode::{encode, encode_one, encoded_width};
pub use error::Utf8Error;
pub use iter::{Codes, codes, next_code};
pub use offset::offset;
pub use pattern::{CHAR_PATTERN, CHAR_REGEX};
pub use position::normalize;
pub use scan::{Length, length};
pub use stream::{ChunkDecoder, ChunkIter, Decoded, Finished};
#[cfg(feature = "codepages")]
pub use transcode::EncodingRsEncoder;
pub use transcode::{
    CodepageEncoder, LegacyTable, PortableEncoder, Substitution, TranscodeOptions, Transcoder,
    transcode,
};
