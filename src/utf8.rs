//! Decoding of UTF-8 sequences and classification of the decoded codepoints.

use unicode_general_category::{get_general_category, GeneralCategory};

/// The result of trying to decode one codepoint from the head of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A valid codepoint and the number of bytes it occupies.
    Char(char, usize),
    /// The leading bytes can never form a valid sequence.
    Invalid,
    /// The buffer is a valid prefix of a sequence but ends too early.
    Incomplete,
}

/// Return the length of the sequence that starts with the byte 'lead', or
/// zero if 'lead' can't start a sequence.
pub fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0x80..=0xbf => 0,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        0xf8..=0xff => 0,
    }
}

/// Return True if 'byte' has the form 10xxxxxx.
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Try to decode a single codepoint from the start of 'input'.
/// Overlong forms, surrogates and values above U+10FFFF are invalid.
pub fn decode(input: &[u8]) -> Decoded {
    let Some(&lead) = input.first() else {
        return Decoded::Incomplete;
    };

    let len = sequence_len(lead);
    if len == 0 {
        return Decoded::Invalid;
    }

    if input.len() < len {
        // The sequence is cut short. It is only worth waiting for the rest
        // if what we have so far could still be completed.
        if input[1..].iter().all(|b| is_continuation(*b)) {
            return Decoded::Incomplete;
        }
        return Decoded::Invalid;
    }

    match std::str::from_utf8(&input[..len]) {
        Ok(s) => match s.chars().next() {
            Some(c) => Decoded::Char(c, len),
            None => Decoded::Invalid,
        },
        Err(_) => Decoded::Invalid,
    }
}

/// Return True if 'c' belongs to one of the letter categories
/// (Lu, Ll, Lt, Lm, Lo).
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

#[test]
fn test_sequence_len() {
    assert_eq!(sequence_len(b'a'), 1);
    assert_eq!(sequence_len(0x80), 0);
    assert_eq!(sequence_len(0xc3), 2);
    assert_eq!(sequence_len(0xe6), 3);
    assert_eq!(sequence_len(0xf0), 4);
    assert_eq!(sequence_len(0xff), 0);

    for c in ['a', 'é', '日', '😀'] {
        let mut buf = [0; 4];
        let s = c.encode_utf8(&mut buf);
        assert_eq!(sequence_len(s.as_bytes()[0]), s.len());
    }
}

#[test]
fn test_decode() {
    assert_eq!(decode(b"abc"), Decoded::Char('a', 1));
    assert_eq!(decode("é!".as_bytes()), Decoded::Char('é', 2));
    assert_eq!(decode("😀".as_bytes()), Decoded::Char('😀', 4));
    assert_eq!(decode(&"😀".as_bytes()[..3]), Decoded::Incomplete);
    assert_eq!(decode(&[0xf0]), Decoded::Incomplete);
    assert_eq!(decode(&[]), Decoded::Incomplete);

    // Stray continuation byte and bytes that never appear in UTF-8.
    assert_eq!(decode(&[0x80, b'a']), Decoded::Invalid);
    assert_eq!(decode(&[0xff]), Decoded::Invalid);
    // A short sequence interrupted by an ASCII byte.
    assert_eq!(decode(&[0xe6, b'a']), Decoded::Invalid);
    // Overlong encoding of '/'.
    assert_eq!(decode(&[0xc0, 0xaf]), Decoded::Invalid);
    // Encoded surrogate.
    assert_eq!(decode(&[0xed, 0xa0, 0x80]), Decoded::Invalid);
    // Above U+10FFFF.
    assert_eq!(decode(&[0xf4, 0x90, 0x80, 0x80]), Decoded::Invalid);
}

#[test]
fn test_is_letter() {
    for c in ['a', 'Z', 'é', 'ß', 'ǅ', 'ʰ', '日', 'ش', '𐐷'] {
        assert!(is_letter(c), "{c:?} is a letter");
    }
    for c in [' ', '1', '!', '-', '😀', '\n', '\u{301}', '€', '\u{e000}'] {
        assert!(!is_letter(c), "{c:?} is not a letter");
    }
}
