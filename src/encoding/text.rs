//! # Text Codec Primitives
//!
//! Code-point level helpers used for string-length bookkeeping and for
//! converting between the text encodings a value can hold.
//!
//! ## Encodings
//!
//! | Kind        | Code unit     | Storage                    |
//! |-------------|---------------|----------------------------|
//! | String      | u8 (narrow)   | raw bytes, decoded lossily |
//! | Utf8String  | u8            | validated UTF-8            |
//! | WString     | u16 LE        | `zerocopy` `U16` slice     |
//! | Utf32String | u32 LE        | `zerocopy` `U32` slice     |
//!
//! Wide units are kept as `zerocopy::little_endian` wrappers so a payload can
//! be viewed in place from an unaligned record buffer.
//!
//! ## Invalid Input
//!
//! Nothing in this module fails. Invalid sequences decode to U+FFFD, matching
//! the "silently resolve" policy of the coercion layer.

use bstr::ByteSlice;
use zerocopy::little_endian::{U16, U32};

/// Decodes the first code point of `bytes`, returning it with its byte width.
///
/// An empty slice yields `(0, 0)`. An invalid prefix yields U+FFFD and the
/// number of bytes that make up the invalid sequence.
pub fn decode_char(bytes: &[u8]) -> (u32, usize) {
    if bytes.is_empty() {
        return (0, 0);
    }
    let (ch, width) = bstr::decode_utf8(bytes);
    (ch.unwrap_or(char::REPLACEMENT_CHARACTER) as u32, width)
}

/// Encodes `code_point` as UTF-8 into `out`, returning the bytes written.
///
/// Values that are not Unicode scalar values are written as U+FFFD.
pub fn encode_char(code_point: u32, out: &mut [u8]) -> usize {
    let ch = scalar(code_point);
    debug_assert!(out.len() >= ch.len_utf8(), "encode buffer too small");
    ch.encode_utf8(out).len()
}

/// Counts code points in a UTF-8 buffer. Each invalid sequence counts once.
pub fn char_count(bytes: &[u8]) -> usize {
    bytes.chars().count()
}

/// Bytes needed to store UTF-16 text as UTF-8.
pub fn utf16_utf8_len(units: &[U16]) -> usize {
    char::decode_utf16(units.iter().map(|u| u.get()))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER).len_utf8())
        .sum()
}

/// Bytes needed to store UTF-32 text as UTF-8.
pub fn utf32_utf8_len(units: &[U32]) -> usize {
    units.iter().map(|u| scalar(u.get()).len_utf8()).sum()
}

/// Converts narrow bytes to a string, replacing invalid sequences.
pub fn narrow_to_string(bytes: &[u8]) -> String {
    bytes.to_str_lossy().into_owned()
}

pub fn utf16_to_string(units: &[U16]) -> String {
    let mut out = String::with_capacity(utf16_utf8_len(units));
    out.extend(
        char::decode_utf16(units.iter().map(|u| u.get()))
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
    out
}

pub fn utf32_to_string(units: &[U32]) -> String {
    let mut out = String::with_capacity(utf32_utf8_len(units));
    out.extend(units.iter().map(|u| scalar(u.get())));
    out
}

pub fn str_to_utf16(text: &str) -> Vec<U16> {
    text.encode_utf16().map(U16::new).collect()
}

pub fn str_to_utf32(text: &str) -> Vec<U32> {
    text.chars().map(|c| U32::new(c as u32)).collect()
}

/// Widens narrow bytes to UTF-16, decoding them as UTF-8 with replacement.
pub fn narrow_to_utf16(bytes: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        let (code_point, width) = decode_char(rest);
        let mut units = [0u16; 2];
        out.extend_from_slice(scalar(code_point).encode_utf16(&mut units));
        rest = &rest[width..];
    }
    out
}

fn scalar(code_point: u32) -> char {
    char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_char_reports_width() {
        assert_eq!(decode_char(b"a"), ('a' as u32, 1));
        assert_eq!(decode_char("é!".as_bytes()), ('é' as u32, 2));
        assert_eq!(decode_char("€".as_bytes()), ('€' as u32, 3));
        assert_eq!(decode_char("😀".as_bytes()), (0x1F600, 4));
        assert_eq!(decode_char(b""), (0, 0));
    }

    #[test]
    fn decode_char_replaces_invalid_prefix() {
        let (cp, width) = decode_char(&[0xFF, b'a']);
        assert_eq!(cp, 0xFFFD);
        assert_eq!(width, 1);
    }

    #[test]
    fn encode_char_writes_utf8() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_char('€' as u32, &mut buf), 3);
        assert_eq!(&buf[..3], "€".as_bytes());
        assert_eq!(encode_char(0xD800, &mut buf), 3);
        assert_eq!(&buf[..3], "\u{FFFD}".as_bytes());
    }

    #[test]
    fn char_count_counts_code_points() {
        assert_eq!(char_count(b"hello"), 5);
        assert_eq!(char_count("héllo".as_bytes()), 5);
        assert_eq!(char_count(b""), 0);
    }

    #[test]
    fn wide_conversions_preserve_text() {
        let text = "wide 😀 text";
        let utf16 = str_to_utf16(text);
        assert_eq!(utf16_to_string(&utf16), text);
        assert_eq!(utf16_utf8_len(&utf16), text.len());

        let utf32 = str_to_utf32(text);
        assert_eq!(utf32.len(), text.chars().count());
        assert_eq!(utf32_to_string(&utf32), text);
        assert_eq!(utf32_utf8_len(&utf32), text.len());
    }

    #[test]
    fn narrow_to_utf16_widens_ascii() {
        let wide = narrow_to_utf16(b"abc");
        assert_eq!(wide, vec![b'a' as u16, b'b' as u16, b'c' as u16]);
    }

    #[test]
    fn unpaired_surrogate_is_replaced() {
        let units = [U16::new(0xD800), U16::new(b'x' as u16)];
        assert_eq!(utf16_to_string(&units), "\u{FFFD}x");
    }
}
