//! UTF-8 to legacy codepage transcoding.
//!
//! Conversion goes UTF-8 → scalar values → codepage table. Malformed UTF-8 is
//! replaced by U+FFFD before the table lookup, and characters the table cannot
//! represent are handled by the configured [`Substitution`].
//!
//! Encoding names that no available backend recognizes are not an error: the
//! input comes back unchanged.

#[cfg(feature = "codepages")]
mod codepages;
mod portable;

use alloc::{borrow::Cow, boxed::Box, string::String, vec, vec::Vec};
use core::fmt;

use bstr::ByteSlice;

#[cfg(feature = "codepages")]
pub use codepages::EncodingRsEncoder;
pub use portable::PortableEncoder;

use crate::error::Utf8Error;

/// Target codepages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegacyTable {
    /// Japanese Shift_JIS (Windows-31J).
    Cp932,
    /// Simplified Chinese GBK.
    Cp936,
    /// Korean Unified Hangul Code (EUC-KR).
    Cp949,
    /// Traditional Chinese Big5.
    Cp950,
    /// Western European Windows-1252.
    Cp1252,
    /// ISO-8859-1, mapping `U+0000..=U+00FF` to the byte of the same value.
    Latin1,
    /// 7-bit US-ASCII.
    Ascii,
}

impl LegacyTable {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("cp932", Self::Cp932),
        ("shift_jis", Self::Cp932),
        ("sjis", Self::Cp932),
        ("windows-31j", Self::Cp932),
        ("ms_kanji", Self::Cp932),
        ("cp936", Self::Cp936),
        ("gbk", Self::Cp936),
        ("cp949", Self::Cp949),
        ("euc-kr", Self::Cp949),
        ("cp950", Self::Cp950),
        ("big5", Self::Cp950),
        ("cp1252", Self::Cp1252),
        ("windows-1252", Self::Cp1252),
        ("latin1", Self::Latin1),
        ("iso-8859-1", Self::Latin1),
        ("l1", Self::Latin1),
        ("ascii", Self::Ascii),
        ("us-ascii", Self::Ascii),
    ];

    /// Looks up a table by encoding name, ignoring ASCII case.
    ///
    /// ```rust
    /// use utf8kit::LegacyTable;
    ///
    /// assert_eq!(LegacyTable::from_name("CP932"), Some(LegacyTable::Cp932));
    /// assert_eq!(LegacyTable::from_name("utf8"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, table)| table)
    }

    /// The canonical name, as accepted by [`from_name`](Self::from_name).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cp932 => "cp932",
            Self::Cp936 => "cp936",
            Self::Cp949 => "cp949",
            Self::Cp950 => "cp950",
            Self::Cp1252 => "cp1252",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
        }
    }
}

impl fmt::Display for LegacyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to emit for a character the target table cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Substitution {
    /// Emit this byte instead.
    Byte(u8),
    /// Emit a decimal character reference such as `&#233;`.
    NumericCharRef,
    /// Abort with [`Utf8Error::Unmappable`].
    Fail,
}

impl Default for Substitution {
    /// `?`, the default character of the Windows codepage converters.
    fn default() -> Self {
        Self::Byte(b'?')
    }
}

impl Substitution {
    /// Applies the policy for `scalar`, found at 1-based byte `position` of
    /// the UTF-8 input.
    ///
    /// # Errors
    ///
    /// [`Utf8Error::Unmappable`] under [`Substitution::Fail`], and
    /// [`Utf8Error::Allocation`] when `out` cannot grow.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(self, out: &mut Vec<u8>, scalar: u32, position: usize) -> Result<(), Utf8Error> {
        match self {
            Self::Byte(byte) => {
                reserve(out, 1)?;
                out.push(byte);
            }
            Self::NumericCharRef => {
                // Decimal digits, least significant last.
                let mut digits = [0u8; 10];
                let mut at = digits.len();
                let mut rest = scalar;
                loop {
                    at -= 1;
                    digits[at] = b'0' + (rest % 10) as u8;
                    rest /= 10;
                    if rest == 0 {
                        break;
                    }
                }
                reserve(out, digits.len() - at + 3)?;
                out.extend_from_slice(b"&#");
                out.extend_from_slice(&digits[at..]);
                out.push(b';');
            }
            Self::Fail => return Err(Utf8Error::Unmappable { position, scalar }),
        }
        Ok(())
    }
}

/// Configuration for a [`Transcoder`].
///
/// # Default
///
/// Unmappable characters become `?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscodeOptions {
    /// Policy for characters the target table cannot represent.
    ///
    /// # Default
    ///
    /// `Substitution::Byte(b'?')`
    pub substitution: Substitution,
}

/// A source of codepage tables.
///
/// The transcoder only talks to tables through this trait, so platform or
/// crate specific converters plug in without the codec depending on them.
pub trait CodepageEncoder: fmt::Debug + Send + Sync {
    /// Whether this encoder has a table for `table`.
    fn supports(&self, table: LegacyTable) -> bool;

    /// Encodes `text` with `table`.
    ///
    /// # Errors
    ///
    /// [`Utf8Error::Unmappable`] when `substitution` is
    /// [`Substitution::Fail`] and a character has no mapping, and
    /// [`Utf8Error::Allocation`] when the output cannot be allocated.
    fn encode(
        &self,
        text: &str,
        table: LegacyTable,
        substitution: Substitution,
    ) -> Result<Vec<u8>, Utf8Error>;
}

/// Converts UTF-8 to legacy codepages through a chain of [`CodepageEncoder`]s.
///
/// The first encoder that supports the requested table wins.
#[derive(Debug)]
pub struct Transcoder {
    options: TranscodeOptions,
    encoders: Vec<Box<dyn CodepageEncoder>>,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(TranscodeOptions::default())
    }
}

impl Transcoder {
    /// Creates a transcoder with the built-in encoders: the portable tables
    /// and, with the `codepages` feature, [`EncodingRsEncoder`].
    #[must_use]
    pub fn new(options: TranscodeOptions) -> Self {
        #[cfg_attr(not(feature = "codepages"), allow(unused_mut))]
        let mut encoders: Vec<Box<dyn CodepageEncoder>> = vec![Box::new(PortableEncoder)];
        #[cfg(feature = "codepages")]
        encoders.push(Box::new(EncodingRsEncoder));
        Self { options, encoders }
    }

    /// Creates a transcoder that consults only `encoder`.
    #[must_use]
    pub fn with_encoder(options: TranscodeOptions, encoder: impl CodepageEncoder + 'static) -> Self {
        Self {
            options,
            encoders: vec![Box::new(encoder)],
        }
    }

    /// The options this transcoder applies.
    #[must_use]
    pub fn options(&self) -> &TranscodeOptions {
        &self.options
    }

    /// Resolves `name` to a table some encoder in the chain supports.
    #[must_use]
    pub fn recognize(&self, name: &str) -> Option<LegacyTable> {
        let table = LegacyTable::from_name(name)?;
        self.encoder_for(table).map(|_| table)
    }

    fn encoder_for(&self, table: LegacyTable) -> Option<&dyn CodepageEncoder> {
        self.encoders
            .iter()
            .map(Box::as_ref)
            .find(|encoder| encoder.supports(table))
    }

    /// Converts UTF-8 `bytes` to the codepage called `name`.
    ///
    /// Returns the input unchanged when `name` is not recognized.
    ///
    /// # Errors
    ///
    /// See [`CodepageEncoder::encode`].
    pub fn transcode<'a>(&self, bytes: &'a [u8], name: &str) -> Result<Cow<'a, [u8]>, Utf8Error> {
        let Some(table) = LegacyTable::from_name(name) else {
            tracing::trace!(encoding = name, "unrecognized encoding, passing input through");
            return Ok(Cow::Borrowed(bytes));
        };
        let Some(encoder) = self.encoder_for(table) else {
            tracing::debug!(%table, "no encoder for codepage, passing input through");
            return Ok(Cow::Borrowed(bytes));
        };
        tracing::debug!(
            %table,
            encoder = ?encoder,
            input_len = bytes.len(),
            "transcoding to legacy codepage"
        );
        let text = repair(bytes)?;
        encoder
            .encode(&text, table, self.options.substitution)
            .map(Cow::Owned)
    }
}

/// Converts UTF-8 `bytes` to the codepage called `name` with the default
/// [`Transcoder`].
///
/// ```rust
/// use utf8kit::transcode;
///
/// assert_eq!(transcode(b"caf\xC3\xA9", "latin1").unwrap(), &b"caf\xE9"[..]);
/// assert_eq!(transcode(b"caf\xC3\xA9", "utf8").unwrap(), &b"caf\xC3\xA9"[..]);
/// ```
///
/// # Errors
///
/// See [`CodepageEncoder::encode`].
pub fn transcode<'a>(bytes: &'a [u8], name: &str) -> Result<Cow<'a, [u8]>, Utf8Error> {
    Transcoder::default().transcode(bytes, name)
}

/// Borrows `bytes` as text when well formed, otherwise copies it with each
/// maximal malformed subsequence replaced by U+FFFD.
fn repair(bytes: &[u8]) -> Result<Cow<'_, str>, Utf8Error> {
    if let Ok(text) = core::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }
    let mut text = String::new();
    for chunk in ByteSlice::utf8_chunks(bytes) {
        let needed = chunk.valid().len() + if chunk.invalid().is_empty() { 0 } else { 3 };
        text.try_reserve(needed).map_err(|_| Utf8Error::Allocation)?;
        text.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            text.push(char::REPLACEMENT_CHARACTER);
        }
    }
    Ok(Cow::Owned(text))
}

/// Reserves `additional` bytes in `out`, reporting failure instead of
/// aborting.
pub(crate) fn reserve(out: &mut Vec<u8>, additional: usize) -> Result<(), Utf8Error> {
    out.try_reserve(additional)
        .map_err(|_| Utf8Error::Allocation)
}
