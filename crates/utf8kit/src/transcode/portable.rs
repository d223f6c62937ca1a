use alloc::vec::Vec;

use super::{CodepageEncoder, LegacyTable, Substitution, reserve};
use crate::error::Utf8Error;

/// Built-in single-byte tables that need no external data: Latin-1 and
/// ASCII. Both map a scalar to the byte of the same value up to their limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableEncoder;

impl PortableEncoder {
    fn limit(table: LegacyTable) -> Option<u32> {
        match table {
            LegacyTable::Latin1 => Some(0xFF),
            LegacyTable::Ascii => Some(0x7F),
            _ => None,
        }
    }
}

impl CodepageEncoder for PortableEncoder {
    fn supports(&self, table: LegacyTable) -> bool {
        Self::limit(table).is_some()
    }

    fn encode(
        &self,
        text: &str,
        table: LegacyTable,
        substitution: Substitution,
    ) -> Result<Vec<u8>, Utf8Error> {
        let Some(limit) = Self::limit(table) else {
            // Never chosen for tables it does not support; encode nothing.
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        reserve(&mut out, text.len())?;
        for (at, ch) in text.char_indices() {
            let scalar = u32::from(ch);
            match u8::try_from(scalar) {
                Ok(byte) if scalar <= limit => out.push(byte),
                _ => substitution.apply(&mut out, scalar, at + 1)?,
            }
        }
        Ok(out)
    }
}
