#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8kit::{ChunkDecoder, DecodeState, Length, codes, decode, length, offset};

#[derive(Debug, Arbitrary)]
struct Input {
    /// Chunk lengths for the streaming decoder, cycled.
    splits: Vec<u8>,
    bytes: Vec<u8>,
}

/// Decodes with the byte-at-a-time machine, restarting after every error.
fn decode_with_machine(bytes: &[u8], at: usize) -> Option<(u32, usize)> {
    let mut state = DecodeState::Start;
    for (i, &byte) in bytes.iter().enumerate().skip(at) {
        state = state.step(byte);
        match state {
            DecodeState::Done(scalar) => return Some((scalar, i + 1)),
            DecodeState::Invalid => return None,
            _ => {}
        }
    }
    None
}

fn check(input: &Input) {
    let bytes = &input.bytes[..];

    for at in 0..bytes.len() {
        assert_eq!(decode(bytes, at), decode_with_machine(bytes, at), "at {at}");
    }

    let items: Vec<_> = codes(bytes).collect();
    let valid = items.iter().all(Result::is_ok);
    match length(bytes, None, None).unwrap() {
        Length::Count(n) => assert!(valid && n == items.len()),
        Length::Invalid { position } => {
            assert!(!valid);
            let Some(Err(err)) = items.last() else {
                panic!("iteration did not end in an error: {items:?}");
            };
            assert!(err.to_string().contains(" at byte "));
            assert!(position <= bytes.len());
        }
    }

    if valid {
        // Every position the iterator yields is reachable by counting.
        for (i, item) in items.iter().enumerate() {
            let (position, _) = item.as_ref().unwrap();
            let n = i64::try_from(i + 1).unwrap();
            assert_eq!(offset(bytes, n, None).unwrap(), Some(*position));
        }

        let mut decoder = ChunkDecoder::new();
        let mut streamed = Vec::new();
        let mut rest = bytes;
        for &split in input.splits.iter().cycle().take(bytes.len()) {
            if rest.is_empty() {
                break;
            }
            let (head, tail) = rest.split_at(usize::from(split).min(rest.len()));
            streamed.extend(decoder.feed(head));
            assert_eq!(decoder.unread_len(), 0);
            rest = tail;
        }
        streamed.extend(decoder.feed(rest));
        streamed.extend(decoder.finish());
        assert_eq!(streamed, items);
    }
}

fuzz_target!(|input: Input| check(&input));
