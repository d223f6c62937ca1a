//! Incremental decoding of UTF-8 that arrives in chunks.
//!
//! A sequence may be split across any number of [`ChunkDecoder::feed`] calls.
//! Positions are 1-based byte offsets into the concatenation of all chunks.
//!
//! Bytes of a chunk that were not read before its iterator is dropped are
//! kept in an unread ring and read first on the next feed, so dropping an
//! iterator early never loses input.
//!
//! Unlike [`codes`](crate::codes), the decoder recovers from malformed input:
//! each bad sequence yields one error and decoding resumes at the next byte
//! that can start a sequence.

use alloc::collections::VecDeque;
use core::fmt;

use crate::{
    decode::{DecodeState, is_continuation},
    error::Utf8Error,
};

/// Item yielded by the chunked decoder: `(1-based position, scalar)`.
pub type Decoded = Result<(usize, u32), Utf8Error>;

/// Restartable UTF-8 decoder for chunked input.
///
/// ```rust
/// use utf8kit::ChunkDecoder;
///
/// let mut decoder = ChunkDecoder::new();
/// let mut out = Vec::new();
/// for chunk in [&b"h\xC3"[..], &b"\xA9!"[..]] {
///     out.extend(decoder.feed(chunk).map(Result::unwrap));
/// }
/// assert!(decoder.finish().next().is_none());
/// assert_eq!(out, [(1, 0x68), (2, 0xE9), (4, 0x21)]);
/// ```
#[derive(Default, Clone)]
pub struct ChunkDecoder {
    pending: VecDeque<u8>,
    state: DecodeState,
    consumed: usize,
    seq_start: usize,
}

impl ChunkDecoder {
    /// Creates a decoder positioned before the first byte.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and iterates over the characters it completes.
    pub fn feed<'d, 'c>(&'d mut self, chunk: &'c [u8]) -> ChunkIter<'d, 'c> {
        ChunkIter {
            decoder: self,
            chunk,
            at: 0,
        }
    }

    /// Ends the input and iterates over what is left, including an error for
    /// a sequence cut short by the end of input.
    #[must_use]
    pub fn finish(self) -> Finished {
        Finished { decoder: self }
    }

    /// Total bytes read so far, excluding the unread ring.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Bytes carried over from dropped iterators and not yet read.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn unread_len(&self) -> usize {
        self.pending.len()
    }

    fn peek(&self, chunk: &[u8], at: usize) -> Option<u8> {
        self.pending
            .front()
            .copied()
            .or_else(|| chunk.get(at).copied())
    }

    fn advance(&mut self, at: &mut usize) {
        if self.pending.pop_front().is_none() {
            *at += 1;
        }
        self.consumed += 1;
    }

    fn next_scalar(&mut self, chunk: &[u8], at: &mut usize, eof: bool) -> Option<Decoded> {
        loop {
            let Some(byte) = self.peek(chunk, *at) else {
                if eof && self.state.is_pending() {
                    self.state = DecodeState::Start;
                    return Some(Err(Utf8Error::malformed_at(self.seq_start)));
                }
                return None;
            };
            let was_pending = self.state.is_pending();
            if !was_pending {
                self.seq_start = self.consumed;
            }
            self.state = self.state.step(byte);
            match self.state {
                DecodeState::Done(scalar) => {
                    self.advance(at);
                    return Some(Ok((self.seq_start + 1, scalar)));
                }
                DecodeState::Invalid => {
                    // A lead byte that interrupted a sequence starts the next
                    // one, so it is left unread.
                    if !was_pending || is_continuation(byte) {
                        self.advance(at);
                    }
                    tracing::trace!(
                        position = self.seq_start + 1,
                        "malformed sequence in chunked input"
                    );
                    return Some(Err(Utf8Error::malformed_at(self.seq_start)));
                }
                DecodeState::Start | DecodeState::NeedCont { .. } => self.advance(at),
            }
        }
    }
}

impl fmt::Debug for ChunkDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.pending.as_slices();
        f.debug_struct("ChunkDecoder")
            .field("pending", &(bstr::BStr::new(head), bstr::BStr::new(tail)))
            .field("state", &self.state)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`ChunkDecoder::feed`].
pub struct ChunkIter<'d, 'c> {
    decoder: &'d mut ChunkDecoder,
    chunk: &'c [u8],
    at: usize,
}

impl Iterator for ChunkIter<'_, '_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.next_scalar(self.chunk, &mut self.at, false)
    }
}

impl Drop for ChunkIter<'_, '_> {
    fn drop(&mut self) {
        if let Some(tail) = self.chunk.get(self.at..) {
            self.decoder.pending.extend(tail.iter().copied());
        }
    }
}

impl fmt::Debug for ChunkIter<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkIter")
            .field("decoder", &self.decoder)
            .field("unread", &bstr::BStr::new(&self.chunk[self.at.min(self.chunk.len())..]))
            .finish()
    }
}

/// Iterator returned by [`ChunkDecoder::finish`].
#[derive(Debug)]
pub struct Finished {
    decoder: ChunkDecoder,
}

impl Iterator for Finished {
    type Item = Decoded;

    fn next(&mut self) -> Option<Self::Item> {
        let mut at = 0;
        self.decoder.next_scalar(&[], &mut at, true)
    }
}
