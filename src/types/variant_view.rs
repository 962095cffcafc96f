//! # Borrowing Values
//!
//! `VariantView<'a>` is the borrowing instantiation of `Value`. It is `Copy`,
//! never allocates, and cannot outlive the bytes it points at.

use bumpalo::Bump;
use zerocopy::little_endian::{U16, U32};

use super::value::{Borrowed, Owned, Value};

pub type VariantView<'a> = Value<Borrowed<'a>>;

impl<'a> Copy for Value<Borrowed<'a>> {}

impl<'a> Value<Borrowed<'a>> {
    pub fn narrow(bytes: &'a [u8]) -> Self {
        Value::String(bytes)
    }

    pub fn wide(units: &'a [U16]) -> Self {
        Value::WString(units)
    }

    pub fn utf32(units: &'a [U32]) -> Self {
        Value::Utf32String(units)
    }

    pub fn binary(bytes: &'a [u8]) -> Self {
        Value::Binary(bytes)
    }

    pub fn json(s: &'a str) -> Self {
        Value::Json(s)
    }

    pub fn xml(s: &'a str) -> Self {
        Value::Xml(s)
    }

    /// Copies any borrowed payload into `arena`, rebinding the view to it.
    pub fn clone_to_arena<'b>(&self, arena: &'b Bump) -> Value<Borrowed<'b>> {
        match *self {
            Value::String(b) => Value::String(&*arena.alloc_slice_copy(b)),
            Value::Binary(b) => Value::Binary(&*arena.alloc_slice_copy(b)),
            Value::Utf8String(s) => Value::Utf8String(&*arena.alloc_str(s)),
            Value::Json(s) => Value::Json(&*arena.alloc_str(s)),
            Value::Xml(s) => Value::Xml(&*arena.alloc_str(s)),
            Value::WString(w) => Value::WString(&*arena.alloc_slice_copy(w)),
            Value::Utf32String(w) => Value::Utf32String(&*arena.alloc_slice_copy(w)),
            Value::Unknown => Value::Unknown,
            Value::Bool(b) => Value::Bool(b),
            Value::Int8(v) => Value::Int8(v),
            Value::Int16(v) => Value::Int16(v),
            Value::Int32(v) => Value::Int32(v),
            Value::Int64(v) => Value::Int64(v),
            Value::UInt8(v) => Value::UInt8(v),
            Value::UInt16(v) => Value::UInt16(v),
            Value::UInt32(v) => Value::UInt32(v),
            Value::UInt64(v) => Value::UInt64(v),
            Value::Float(v) => Value::Float(v),
            Value::Double(v) => Value::Double(v),
            Value::Pointer(p) => Value::Pointer(p),
            Value::Guid(g) => Value::Guid(g),
            Value::Void => Value::Void,
            Value::Bit(b) => Value::Bit(b),
        }
    }
}

impl<'a> From<&'a str> for Value<Borrowed<'a>> {
    fn from(s: &'a str) -> Self {
        Value::Utf8String(s)
    }
}

impl<'a> From<&'a String> for Value<Borrowed<'a>> {
    fn from(s: &'a String) -> Self {
        Value::Utf8String(s.as_str())
    }
}

impl<'a> From<&'a Value<Owned>> for Value<Borrowed<'a>> {
    fn from(v: &'a Value<Owned>) -> Self {
        v.as_view()
    }
}
