//! # Value Encoding
//!
//! Converts between `VariantView` and the value region of a record: the type
//! byte, the optional 4-byte length, the payload and, for terminator-delimited
//! text, one zero code unit.
//!
//! ## Prefix Rule
//!
//! | Kind                | Length prefix                                  |
//! |---------------------|------------------------------------------------|
//! | fixed-size          | never                                          |
//! | Binary              | always                                         |
//! | text kinds          | when `EncodeOptions` asks for it, or when the   |
//! |                     | content holds a zero code unit                 |
//!
//! Decoding is zero-copy: text and binary views borrow the buffer directly.
//! UTF-16 and UTF-32 payloads are viewed through zerocopy's unaligned
//! little-endian integer types, so no alignment is required of the buffer.

use eyre::{ensure, eyre, Result, WrapErr};
use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, IntoBytes};

use super::cursor::RecordHeader;
use crate::config::{LENGTH_PREFIX_BIT, LENGTH_PREFIX_SIZE, TYPE_BYTE_SIZE};
use crate::types::{PrimitiveKind, Value, VariantView};

/// Whether `value` must be written with a length prefix.
pub(crate) fn needs_prefix(value: &VariantView<'_>, prefer_prefix: bool) -> bool {
    match value {
        Value::Binary(_) => true,
        Value::String(b) => prefer_prefix || b.contains(&0),
        Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => {
            prefer_prefix || s.as_bytes().contains(&0)
        }
        Value::WString(w) => prefer_prefix || w.iter().any(|u| u.get() == 0),
        Value::Utf32String(w) => prefer_prefix || w.iter().any(|u| u.get() == 0),
        _ => false,
    }
}

/// Byte length of the encoded value region.
pub(crate) fn encoded_len(value: &VariantView<'_>, prefixed: bool) -> Result<usize> {
    let payload = value.payload_len();
    let kind = value.kind();
    if prefixed {
        ensure!(
            payload <= u32::MAX as usize,
            "{} payload of {} bytes exceeds the 4-byte length prefix",
            kind.name(),
            payload
        );
        return Ok(TYPE_BYTE_SIZE + LENGTH_PREFIX_SIZE + payload);
    }
    let terminator = if kind.is_variable() {
        kind.code_unit_width().unwrap_or(0)
    } else {
        0
    };
    Ok(TYPE_BYTE_SIZE + payload + terminator)
}

/// Writes the value region into `dst`, which must be exactly
/// `encoded_len(value, prefixed)` bytes long.
pub(crate) fn encode_value(value: &VariantView<'_>, prefixed: bool, dst: &mut [u8]) {
    let kind_byte = value.kind() as u8;
    dst[0] = if prefixed {
        kind_byte | LENGTH_PREFIX_BIT
    } else {
        kind_byte
    };

    let mut at = TYPE_BYTE_SIZE;
    let payload_len = value.payload_len();
    if prefixed {
        dst[at..at + LENGTH_PREFIX_SIZE].copy_from_slice(&(payload_len as u32).to_le_bytes());
        at += LENGTH_PREFIX_SIZE;
    }

    write_payload(value, &mut dst[at..at + payload_len]);
    // terminator bytes, if any
    dst[at + payload_len..].fill(0);
}

/// Writes the bare payload. `dst` must be exactly `value.payload_len()` bytes.
pub(crate) fn write_payload(value: &VariantView<'_>, dst: &mut [u8]) {
    debug_assert_eq!(dst.len(), value.payload_len());
    match *value {
        Value::Unknown | Value::Void => {}
        Value::Bool(b) | Value::Bit(b) => dst[0] = b as u8,
        Value::Int8(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Int16(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Int32(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Int64(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::UInt8(v) => dst[0] = v,
        Value::UInt16(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::UInt32(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::UInt64(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Float(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Double(v) => dst.copy_from_slice(&v.to_le_bytes()),
        Value::Pointer(p) => dst.copy_from_slice(&(p as u64).to_le_bytes()),
        Value::Guid(g) => dst.copy_from_slice(&g),
        Value::String(b) | Value::Binary(b) => dst.copy_from_slice(b),
        Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => {
            dst.copy_from_slice(s.as_bytes())
        }
        Value::WString(w) => dst.copy_from_slice(w.as_bytes()),
        Value::Utf32String(w) => dst.copy_from_slice(w.as_bytes()),
    }
}

/// Decodes the value of the record described by `header`, borrowing `buf`.
pub(crate) fn decode_value<'a>(buf: &'a [u8], header: &RecordHeader) -> Result<VariantView<'a>> {
    view_from_payload(header.kind, &buf[header.payload.clone()])
        .wrap_err_with(|| format!("decoding record at offset {}", header.start))
}

/// Builds a view over an already-encoded payload of `kind`.
pub(crate) fn view_from_payload(kind: PrimitiveKind, payload: &[u8]) -> Result<VariantView<'_>> {
    if let Some(size) = kind.fixed_size() {
        ensure!(
            payload.len() == size,
            "{} payload must be {} bytes, found {}",
            kind.name(),
            size,
            payload.len()
        );
    }

    let value = match kind {
        PrimitiveKind::Unknown => Value::Unknown,
        PrimitiveKind::Void => Value::Void,
        PrimitiveKind::Bool => Value::Bool(payload[0] != 0),
        PrimitiveKind::Bit => Value::Bit(payload[0] != 0),
        PrimitiveKind::Int8 => Value::Int8(payload[0] as i8),
        PrimitiveKind::Int16 => Value::Int16(i16::from_le_bytes(array(payload)?)),
        PrimitiveKind::Int32 => Value::Int32(i32::from_le_bytes(array(payload)?)),
        PrimitiveKind::Int64 => Value::Int64(i64::from_le_bytes(array(payload)?)),
        PrimitiveKind::UInt8 => Value::UInt8(payload[0]),
        PrimitiveKind::UInt16 => Value::UInt16(u16::from_le_bytes(array(payload)?)),
        PrimitiveKind::UInt32 => Value::UInt32(u32::from_le_bytes(array(payload)?)),
        PrimitiveKind::UInt64 => Value::UInt64(u64::from_le_bytes(array(payload)?)),
        PrimitiveKind::Float => Value::Float(f32::from_le_bytes(array(payload)?)),
        PrimitiveKind::Double => Value::Double(f64::from_le_bytes(array(payload)?)),
        PrimitiveKind::Pointer => {
            let raw = u64::from_le_bytes(array(payload)?);
            Value::Pointer(
                usize::try_from(raw)
                    .map_err(|_| eyre!("pointer {:#x} does not fit in usize", raw))?,
            )
        }
        PrimitiveKind::Guid => Value::Guid(array(payload)?),
        PrimitiveKind::String => Value::String(payload),
        PrimitiveKind::Binary => Value::Binary(payload),
        PrimitiveKind::Utf8String => Value::Utf8String(utf8(kind, payload)?),
        PrimitiveKind::Json => Value::Json(utf8(kind, payload)?),
        PrimitiveKind::Xml => Value::Xml(utf8(kind, payload)?),
        PrimitiveKind::WString => Value::WString(
            <[U16]>::ref_from_bytes(payload)
                .map_err(|_| eyre!("UTF-16 payload of {} bytes is not whole units", payload.len()))?,
        ),
        PrimitiveKind::Utf32String => Value::Utf32String(
            <[U32]>::ref_from_bytes(payload)
                .map_err(|_| eyre!("UTF-32 payload of {} bytes is not whole units", payload.len()))?,
        ),
    };
    Ok(value)
}

fn array<const N: usize>(payload: &[u8]) -> Result<[u8; N]> {
    payload
        .try_into()
        .map_err(|_| eyre!("expected {} payload bytes, found {}", N, payload.len()))
}

fn utf8(kind: PrimitiveKind, payload: &[u8]) -> Result<&str> {
    std::str::from_utf8(payload).wrap_err_with(|| format!("{} payload is not UTF-8", kind.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variant;

    fn encode(value: &VariantView<'_>, prefer_prefix: bool) -> Vec<u8> {
        let prefixed = needs_prefix(value, prefer_prefix);
        let mut out = vec![0xEE; encoded_len(value, prefixed).unwrap()];
        encode_value(value, prefixed, &mut out);
        out
    }

    #[test]
    fn scalars_are_little_endian() {
        assert_eq!(
            encode(&VariantView::from(0x0102_0304i32), true),
            vec![PrimitiveKind::Int32 as u8, 4, 3, 2, 1]
        );
        assert_eq!(
            encode(&VariantView::from(true), true),
            vec![PrimitiveKind::Bool as u8, 1]
        );
        assert_eq!(encode(&VariantView::void(), true), vec![PrimitiveKind::Void as u8]);
    }

    #[test]
    fn text_prefix_follows_preference() {
        let v = VariantView::from("hi");
        assert_eq!(
            encode(&v, true),
            vec![PrimitiveKind::Utf8String as u8 | LENGTH_PREFIX_BIT, 2, 0, 0, 0, b'h', b'i']
        );
        assert_eq!(
            encode(&v, false),
            vec![PrimitiveKind::Utf8String as u8, b'h', b'i', 0]
        );
    }

    #[test]
    fn binary_and_embedded_zero_force_prefix() {
        assert!(needs_prefix(&VariantView::binary(b"x"), false));
        assert!(needs_prefix(&VariantView::from("a\0b"), false));
        assert!(!needs_prefix(&VariantView::from("ab"), false));
        assert!(!needs_prefix(&VariantView::from(1u8), true));
    }

    #[test]
    fn wide_text_terminates_with_a_full_unit() {
        let owned = Variant::wide_from_str("a");
        let bytes = encode(&owned.as_view(), false);
        assert_eq!(bytes, vec![PrimitiveKind::WString as u8, b'a', 0, 0, 0]);

        let owned = Variant::utf32_from_str("a");
        let bytes = encode(&owned.as_view(), false);
        assert_eq!(bytes.len(), 1 + 4 + 4);
    }

    #[test]
    fn payloads_decode_without_copying() {
        let payload = b"borrowed".to_vec();
        let view = view_from_payload(PrimitiveKind::Utf8String, &payload).unwrap();
        assert_eq!(view.as_str().map(str::as_ptr), Some(payload.as_ptr()));
    }

    #[test]
    fn unaligned_wide_payloads_decode() {
        let bytes = [0u8, b'h', 0, b'i', 0];
        let view = view_from_payload(PrimitiveKind::WString, &bytes[1..]).unwrap();
        assert_eq!(view.get_string(), "hi");
    }

    #[test]
    fn wrong_fixed_size_is_rejected() {
        assert!(view_from_payload(PrimitiveKind::Int32, &[1, 2]).is_err());
        assert!(view_from_payload(PrimitiveKind::Guid, &[0; 15]).is_err());
        assert!(view_from_payload(PrimitiveKind::Json, &[0xFF]).is_err());
        assert!(view_from_payload(PrimitiveKind::Utf32String, &[0; 6]).is_err());
    }

    #[test]
    fn pointer_payload_must_fit_in_usize() {
        let ptr_bytes = 0xdead_beefu64.to_le_bytes();
        let view = view_from_payload(PrimitiveKind::Pointer, &ptr_bytes).unwrap();
        assert!(matches!(view, Value::Pointer(0xdead_beef)));

        let wide_bytes = u64::MAX.to_le_bytes();
        let wide = view_from_payload(PrimitiveKind::Pointer, &wide_bytes);
        assert_eq!(wide.is_ok(), usize::BITS == u64::BITS);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn pointer_above_32_bits_is_rejected() {
        let err = view_from_payload(PrimitiveKind::Pointer, &(1u64 << 40).to_le_bytes()).unwrap_err();
        assert!(format!("{err}").contains("does not fit"));
    }
}
