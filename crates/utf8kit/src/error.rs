use core::fmt;

use thiserror::Error;

/// Errors reported by the codec, navigation and transcoding functions.
///
/// Argument positions are 1-based and follow the public signatures, with the
/// byte sequence itself counted as argument 1: the start position of
/// [`length`](crate::length) is argument 2, its end position argument 3.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Utf8Error {
    /// A position or scalar value lies outside its valid bounds.
    #[error("bad argument #{argument} ({reason})")]
    ArgumentOutOfRange {
        /// 1-based index of the offending argument.
        argument: usize,
        /// Short description of the violated bound.
        reason: &'static str,
    },
    /// The input is not well-formed UTF-8.
    #[error("invalid UTF-8 code{}", at_byte(.position))]
    MalformedSequence {
        /// 1-based byte position of the failure, when one applies.
        position: Option<usize>,
    },
    /// The requested byte range is too long to materialize.
    #[error("string slice too long")]
    Overflow,
    /// A scalar has no mapping in the target codepage and the substitution
    /// policy is [`Substitution::Fail`](crate::Substitution::Fail).
    #[error("U+{scalar:04X} at byte {position} is not representable in the target codepage")]
    Unmappable {
        /// 1-based byte position of the character in the UTF-8 input.
        position: usize,
        /// The unmappable scalar value.
        scalar: u32,
    },
    /// A transcoding buffer could not be allocated.
    #[error("out of memory while transcoding")]
    Allocation,
}

impl Utf8Error {
    pub(crate) const fn out_of_range(argument: usize, reason: &'static str) -> Self {
        Self::ArgumentOutOfRange { argument, reason }
    }

    /// Malformed input at the 0-based byte index `index`.
    pub(crate) const fn malformed_at(index: usize) -> Self {
        Self::MalformedSequence {
            position: Some(index + 1),
        }
    }
}

fn at_byte(position: &Option<usize>) -> impl fmt::Display {
    struct AtByte(Option<usize>);

    impl fmt::Display for AtByte {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.0 {
                Some(p) => write!(f, " at byte {p}"),
                None => Ok(()),
            }
        }
    }

    AtByte(*position)
}
