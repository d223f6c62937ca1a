use alloc::vec::Vec;

use encoding_rs::{BIG5, EUC_KR, Encoding, EncoderResult, GBK, SHIFT_JIS, WINDOWS_1252};

use super::{CodepageEncoder, LegacyTable, Substitution, reserve};
use crate::error::Utf8Error;

/// Double-byte and Windows codepages from the WHATWG Encoding Standard tables
/// shipped with `encoding_rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingRsEncoder;

impl EncodingRsEncoder {
    fn encoding(table: LegacyTable) -> Option<&'static Encoding> {
        match table {
            LegacyTable::Cp932 => Some(SHIFT_JIS),
            LegacyTable::Cp936 => Some(GBK),
            LegacyTable::Cp949 => Some(EUC_KR),
            LegacyTable::Cp950 => Some(BIG5),
            LegacyTable::Cp1252 => Some(WINDOWS_1252),
            // The standard folds Latin-1 and ASCII into windows-1252.
            LegacyTable::Latin1 | LegacyTable::Ascii => None,
        }
    }
}

impl CodepageEncoder for EncodingRsEncoder {
    fn supports(&self, table: LegacyTable) -> bool {
        Self::encoding(table).is_some()
    }

    fn encode(
        &self,
        text: &str,
        table: LegacyTable,
        substitution: Substitution,
    ) -> Result<Vec<u8>, Utf8Error> {
        let Some(encoding) = Self::encoding(table) else {
            return Ok(Vec::new());
        };
        let mut encoder = encoding.new_encoder();
        let mut out = Vec::new();
        let mut src = text;
        let mut read_total = 0;
        loop {
            let needed = encoder
                .max_buffer_length_from_utf8_without_replacement(src.len())
                .ok_or(Utf8Error::Overflow)?;
            reserve(&mut out, needed)?;
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
            read_total += read;
            src = &src[read..];
            match result {
                EncoderResult::InputEmpty => return Ok(out),
                EncoderResult::OutputFull => {}
                EncoderResult::Unmappable(ch) => {
                    // `read` already covers the unmappable character.
                    let position = read_total - ch.len_utf8() + 1;
                    substitution.apply(&mut out, u32::from(ch), position)?;
                }
            }
        }
    }
}
