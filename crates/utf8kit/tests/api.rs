#![expect(missing_docs)]

use rstest::rstest;
use utf8kit::{
    CHAR_REGEX, DecodeState, Length, MAX_SCALAR, Utf8Error, codepoints, codes, decode, encode,
    encode_one, encoded_width, is_continuation, length, next_code, normalize, offset,
};

mod common;

use common::{MIXED, MIXED_STARTS, init_tracing};

#[rstest]
#[case(1, 5, 1)]
#[case(-1, 5, 5)]
#[case(-5, 5, 1)]
#[case(-6, 5, 0)]
#[case(0, 5, 0)]
#[case(9, 5, 9)]
fn positions_normalize_against_length(#[case] pos: i64, #[case] len: usize, #[case] expected: i64) {
    assert_eq!(normalize(pos, len), expected);
}

#[test]
fn mixed_widths_through_every_entry_point() {
    init_tracing();
    let bytes = MIXED.as_bytes();
    let scalars: Vec<u32> = MIXED.chars().map(u32::from).collect();

    assert_eq!(length(bytes, None, None), Ok(Length::Count(5)));
    assert_eq!(codepoints(bytes, Some(1), Some(-1)).unwrap(), scalars);

    let pairs: Vec<(usize, u32)> = codes(bytes).map(Result::unwrap).collect();
    let positions: Vec<usize> = pairs.iter().map(|&(p, _)| p).collect();
    assert_eq!(positions, MIXED_STARTS);

    for (i, &start) in MIXED_STARTS.iter().enumerate() {
        let n = i64::try_from(i + 1).unwrap();
        assert_eq!(offset(bytes, n, None), Ok(Some(start)));
        let width = encoded_width(scalars[i]);
        assert_eq!(decode(bytes, start - 1), Some((scalars[i], start - 1 + width)));
    }

    let values: Vec<i64> = scalars.iter().map(|&s| i64::from(s)).collect();
    assert_eq!(encode(&values).unwrap(), bytes);
}

#[test]
fn stepping_with_explicit_state() {
    let bytes = MIXED.as_bytes();
    let mut last = 0;
    let mut seen = Vec::new();
    while let Some(item) = next_code(bytes, last) {
        let (position, _) = item.unwrap();
        seen.push(position);
        last = position;
    }
    assert_eq!(seen, MIXED_STARTS);
}

#[test]
fn iterator_position_tracks_the_last_character() {
    let mut iter = codes("añ".as_bytes());
    assert_eq!(iter.position(), 0);
    iter.next();
    assert_eq!(iter.position(), 1);
    iter.next();
    assert_eq!(iter.position(), 2);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.position(), 2);
}

#[test]
fn backward_navigation_from_the_end() {
    let bytes = MIXED.as_bytes();
    for (k, &start) in MIXED_STARTS.iter().rev().enumerate() {
        let n = -i64::try_from(k + 1).unwrap();
        assert_eq!(offset(bytes, n, None), Ok(Some(start)));
    }
    assert_eq!(offset(bytes, -6, None), Ok(None));
}

#[rstest]
#[case::inside_euro(5, 4)]
#[case::inside_emoji(10, 7)]
#[case::on_lead(7, 7)]
#[case::end(12, 12)]
fn zero_offset_snaps_to_the_character_start(#[case] start: i64, #[case] expected: usize) {
    assert_eq!(offset(MIXED.as_bytes(), 0, Some(start)), Ok(Some(expected)));
}

#[test]
fn errors_name_their_argument() {
    init_tracing();
    let bytes = b"abc";
    assert_eq!(
        length(bytes, Some(0), None).unwrap_err().to_string(),
        "bad argument #2 (initial position out of string)"
    );
    assert_eq!(
        length(bytes, None, Some(4)).unwrap_err().to_string(),
        "bad argument #3 (final position out of string)"
    );
    assert_eq!(
        codepoints(bytes, Some(1), Some(9)).unwrap_err().to_string(),
        "bad argument #3 (out of range)"
    );
    assert_eq!(
        offset(bytes, 1, Some(5)).unwrap_err().to_string(),
        "bad argument #3 (position out of range)"
    );
    assert_eq!(
        encode_one(-1).unwrap_err().to_string(),
        "bad argument #1 (value out of range)"
    );
    assert_eq!(
        codepoints(b"a\xFF", Some(1), Some(2)).unwrap_err(),
        Utf8Error::MalformedSequence { position: Some(2) }
    );
}

#[test]
fn encoder_covers_the_whole_scalar_range() {
    assert_eq!(
        encode_one(i64::from(MAX_SCALAR)).unwrap(),
        [0xF4, 0x8F, 0xBF, 0xBF]
    );
    assert!(encode_one(i64::from(MAX_SCALAR) + 1).is_err());
    // Surrogates are encoded like any other scalar.
    assert_eq!(encode_one(0xDFFF).unwrap(), [0xED, 0xBF, 0xBF]);
}

#[test]
fn state_machine_matches_slice_decoder() {
    let bytes = MIXED.as_bytes();
    let mut state = DecodeState::default();
    let mut scalars = Vec::new();
    for (i, &byte) in bytes.iter().enumerate() {
        state = state.step(byte);
        // Pending exactly while the next byte continues the sequence.
        let continues = bytes.get(i + 1).is_some_and(|&b| is_continuation(b));
        assert_eq!(state.is_pending(), continues, "byte {i}");
        if let DecodeState::Done(scalar) = state {
            scalars.push(scalar);
        }
    }
    assert_eq!(scalars, MIXED.chars().map(u32::from).collect::<Vec<_>>());
}

#[test]
fn regex_splits_characters() {
    let re = regex::bytes::Regex::new(CHAR_REGEX).unwrap();
    let starts: Vec<usize> = re.find_iter(MIXED.as_bytes()).map(|m| m.start() + 1).collect();
    assert_eq!(starts, MIXED_STARTS);
}
