//! # Owning Values
//!
//! `Variant` is the owning instantiation of `Value`. Every constructor that
//! accepts text or binary copies it into a fresh allocation sized to the
//! content, so a `Variant` never aliases another value or buffer.
//!
//! ```ignore
//! let mut a = Variant::from(3.14);
//! let b = a.clone();
//! a = Variant::from("changed");
//! assert_eq!(b.get_decimal(), 3.14);
//! ```

use std::mem;

use zerocopy::little_endian::{U16, U32};

use super::value::{Borrowed, Owned, Value};
use crate::encoding::text;

pub type Variant = Value<Owned>;

impl Value<Owned> {
    /// Narrow byte text, stored as given.
    pub fn narrow(bytes: &[u8]) -> Self {
        Value::String(Box::from(bytes))
    }

    pub fn wide(units: &[u16]) -> Self {
        Value::WString(units.iter().map(|&u| U16::new(u)).collect())
    }

    pub fn wide_from_str(s: &str) -> Self {
        Value::WString(text::str_to_utf16(s).into_boxed_slice())
    }

    pub fn utf32(units: &[u32]) -> Self {
        Value::Utf32String(units.iter().map(|&u| U32::new(u)).collect())
    }

    pub fn utf32_from_str(s: &str) -> Self {
        Value::Utf32String(text::str_to_utf32(s).into_boxed_slice())
    }

    pub fn binary(bytes: &[u8]) -> Self {
        Value::Binary(Box::from(bytes))
    }

    pub fn json(s: &str) -> Self {
        Value::Json(Box::from(s))
    }

    pub fn xml(s: &str) -> Self {
        Value::Xml(Box::from(s))
    }

    /// Moves the value out, leaving `Unknown` behind.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl From<&str> for Value<Owned> {
    fn from(s: &str) -> Self {
        Value::Utf8String(Box::from(s))
    }
}

impl From<String> for Value<Owned> {
    fn from(s: String) -> Self {
        Value::Utf8String(s.into_boxed_str())
    }
}

impl From<Vec<u8>> for Value<Owned> {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Binary(bytes.into_boxed_slice())
    }
}

impl<'a> From<Value<Borrowed<'a>>> for Value<Owned> {
    fn from(view: Value<Borrowed<'a>>) -> Self {
        view.to_variant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveKind, VariantView};

    #[test]
    fn clone_is_deep() {
        let mut v1 = Variant::from(3.14);
        let v2 = v1.clone();
        v1 = Variant::from("now a string");
        assert_eq!(v2.get_decimal(), 3.14);
        assert_eq!(v2.kind(), PrimitiveKind::Double);
        assert_eq!(v1.get_string(), "now a string");
    }

    #[test]
    fn cloned_text_does_not_share_storage() {
        let a = Variant::from("abc");
        let b = a.clone();
        assert_ne!(
            a.as_str().map(str::as_ptr),
            b.as_str().map(str::as_ptr)
        );
        assert_eq!(a, b);
    }

    #[test]
    fn take_leaves_unknown() {
        let mut src = Variant::from("moved");
        let dst = src.take();
        assert!(src.is_unknown());
        assert_eq!(dst.get_string(), "moved");
    }

    #[test]
    fn text_constructors_pick_kinds() {
        assert_eq!(Variant::narrow(b"x").kind(), PrimitiveKind::String);
        assert_eq!(Variant::from(String::from("x")).kind(), PrimitiveKind::Utf8String);
        assert_eq!(Variant::wide(&[120]).kind(), PrimitiveKind::WString);
        assert_eq!(Variant::utf32(&[120]).kind(), PrimitiveKind::Utf32String);
        assert_eq!(Variant::from(vec![1u8, 2]).kind(), PrimitiveKind::Binary);
        assert_eq!(Variant::xml("<a/>").kind(), PrimitiveKind::Xml);
        assert_eq!(Variant::bit(true).kind(), PrimitiveKind::Bit);
    }

    #[test]
    fn view_shares_source_payload() {
        let source = Variant::from("borrowed text");
        let view = source.as_view();
        assert_eq!(view.get_string(), "borrowed text");
        assert_eq!(view.as_str().map(str::as_ptr), source.as_str().map(str::as_ptr));

        let copy: Variant = VariantView::from("temp").into();
        assert_eq!(copy.get_string(), "temp");
    }
}
