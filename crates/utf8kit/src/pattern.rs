//! Character boundary patterns.

/// Matches exactly one UTF-8 character, assuming well-formed input: a byte in
/// `0x00..=0x7F` or `0xC2..=0xF4` followed by any number of continuation
/// bytes.
///
/// This is the bracket-class form understood by Lua-style byte pattern
/// matchers, with a literal NUL in the first class.
pub const CHAR_PATTERN: &[u8] = b"[\0-\x7F\xC2-\xF4][\x80-\xBF]*";

/// [`CHAR_PATTERN`] in the syntax of `regex::bytes::Regex`.
///
/// ```rust
/// let re = regex::bytes::Regex::new(utf8kit::CHAR_REGEX).unwrap();
/// let chars: Vec<&[u8]> = re.find_iter("aé😀".as_bytes()).map(|m| m.as_bytes()).collect();
/// assert_eq!(chars, ["a".as_bytes(), "é".as_bytes(), "😀".as_bytes()]);
/// ```
pub const CHAR_REGEX: &str = r"(?s-u:[\x00-\x7F\xC2-\xF4][\x80-\xBF]*)";
