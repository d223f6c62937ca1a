use alloc::vec::Vec;

use quickcheck::{Arbitrary, Gen};

use crate::{MAX_SCALAR, encode::encode_into};

/// A scalar value biased towards the boundaries of each width class.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Scalar(pub u32);

impl Arbitrary for Scalar {
    fn arbitrary(g: &mut Gen) -> Self {
        const EDGES: [u32; 12] = [
            0x00, 0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xD800, 0xDFFF, 0xFFFF, 0x1_0000, 0x10_FFFE,
            MAX_SCALAR,
        ];
        let scalar = match u8::arbitrary(g) % 4 {
            0 => *g.choose(&EDGES).unwrap_or(&0),
            1 => u32::from(u8::arbitrary(g) & 0x7F),
            2 => u32::from(u16::arbitrary(g)),
            _ => u32::arbitrary(g) % (MAX_SCALAR + 1),
        };
        Self(scalar)
    }
}

/// Well-formed input in the decoder's sense: surrogates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WellFormed {
    pub bytes: Vec<u8>,
    pub scalars: Vec<u32>,
}

impl Arbitrary for WellFormed {
    fn arbitrary(g: &mut Gen) -> Self {
        let scalars: Vec<u32> = Vec::<Scalar>::arbitrary(g).into_iter().map(|s| s.0).collect();
        let mut bytes = Vec::new();
        let mut buf = [0; 4];
        for &scalar in &scalars {
            let width = encode_into(scalar, &mut buf);
            bytes.extend_from_slice(&buf[..width]);
        }
        Self { bytes, scalars }
    }
}

/// Ways of breaking one multi-byte sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Mutation {
    /// Drop the last continuation byte.
    Truncate,
    /// Clear the continuation marker of the last byte.
    WrongMarker,
    /// Re-encode with one byte more than needed.
    Overlong,
    /// Encode a value above `MAX_SCALAR` in four bytes.
    AboveMax,
}

/// Well-formed ASCII prefix followed by one broken sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Malformed {
    pub bytes: Vec<u8>,
    /// 0-based index where the broken sequence starts.
    pub at: usize,
    pub mutation: Mutation,
}

impl Arbitrary for Malformed {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut bytes: Vec<u8> = Vec::<u8>::arbitrary(g)
            .into_iter()
            .map(|b| b & 0x7F)
            .collect();
        let at = bytes.len();
        let mutation = *g
            .choose(&[
                Mutation::Truncate,
                Mutation::WrongMarker,
                Mutation::Overlong,
                Mutation::AboveMax,
            ])
            .unwrap_or(&Mutation::Truncate);

        let mut buf = [0; 4];
        match mutation {
            Mutation::Truncate | Mutation::WrongMarker => {
                let scalar = 0x80 + u32::arbitrary(g) % (MAX_SCALAR - 0x7F);
                let width = encode_into(scalar, &mut buf);
                let mut seq = buf[..width].to_vec();
                if mutation == Mutation::Truncate {
                    seq.pop();
                } else if let Some(last) = seq.last_mut() {
                    *last &= 0x3F;
                }
                bytes.extend_from_slice(&seq);
            }
            Mutation::Overlong => {
                // Widen a value to the next class by hand.
                let scalar = u32::arbitrary(g) % 0x800;
                let seq: Vec<u8> = if scalar < 0x80 {
                    alloc::vec![0xC0 | (scalar >> 6) as u8, 0x80 | (scalar & 0x3F) as u8]
                } else {
                    alloc::vec![
                        0xE0,
                        0x80 | (scalar >> 6) as u8,
                        0x80 | (scalar & 0x3F) as u8
                    ]
                };
                bytes.extend_from_slice(&seq);
            }
            Mutation::AboveMax => {
                let scalar = MAX_SCALAR + 1 + u32::arbitrary(g) % (0x1F_FFFF - MAX_SCALAR);
                bytes.extend_from_slice(&[
                    0xF0 | (scalar >> 18) as u8,
                    0x80 | ((scalar >> 12) & 0x3F) as u8,
                    0x80 | ((scalar >> 6) & 0x3F) as u8,
                    0x80 | (scalar & 0x3F) as u8,
                ]);
            }
        }
        Self {
            bytes,
            at,
            mutation,
        }
    }
}
