//! # Tagged Value Representation
//!
//! This module provides `Value<S>`, the tagged union behind both value roles
//! of the crate. The storage parameter `S` decides who owns variable-length
//! payloads:
//!
//! | Alias            | Storage        | Text/binary payload          |
//! |------------------|----------------|------------------------------|
//! | `Variant`        | `Owned`        | `Box<str>`, `Box<[u8]>`, ... |
//! | `VariantView<'a>`| `Borrowed<'a>` | `&'a str`, `&'a [u8]`, ...   |
//!
//! Because both roles are the same enum, every coercion and comparison rule
//! below is implemented exactly once and behaves identically for both.
//!
//! ## Coercion Rules
//!
//! Accessors are total: every kind maps to every accessor.
//!
//! | From \ To      | bool        | integers / decimal       | string                 |
//! |----------------|-------------|--------------------------|------------------------|
//! | Bool, Bit      | itself      | 0 / 1                    | `true` / `false`       |
//! | integers/float | != 0        | `as` casts               | canonical decimal      |
//! | text kinds     | `true`/number | numeric prefix parse   | decoded text           |
//! | Pointer        | != 0        | address `as` casts       | `0x` lowercase hex     |
//! | Guid           | false       | 0                        | 8-4-4-4-12 hex         |
//! | Binary         | false       | 0                        | lowercase hex          |
//! | Unknown, Void  | false       | 0                        | empty                  |
//!
//! ## Comparison Semantics
//!
//! `compare` first requires equal type numbers (`Int32` never equals `Int64`
//! holding the same number), then compares payloads: exact length and bytes
//! for text, binary and guid; bit patterns for floats, so a NaN equals
//! itself and `0.0` differs from `-0.0`.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use zerocopy::little_endian::{U16, U32};

use super::kind::{type_flags, PrimitiveKind, TypeTag};
use crate::encoding::{number, text};

/// Decides how a `Value` holds its variable-length payloads.
pub trait Storage: Clone + fmt::Debug {
    /// True when payloads are heap allocations owned by the value.
    const OWNS: bool;

    type Bytes: Deref<Target = [u8]> + Clone + fmt::Debug;
    type Str: Deref<Target = str> + Clone + fmt::Debug;
    type Wide: Deref<Target = [U16]> + Clone + fmt::Debug;
    type Wide32: Deref<Target = [U32]> + Clone + fmt::Debug;
}

/// Storage for values that own their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owned;

impl Storage for Owned {
    const OWNS: bool = true;

    type Bytes = Box<[u8]>;
    type Str = Box<str>;
    type Wide = Box<[U16]>;
    type Wide32 = Box<[U32]>;
}

/// Storage for values that borrow their payloads for `'a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borrowed<'a>(PhantomData<&'a ()>);

impl<'a> Storage for Borrowed<'a> {
    const OWNS: bool = false;

    type Bytes = &'a [u8];
    type Str = &'a str;
    type Wide = &'a [U16];
    type Wide32 = &'a [U32];
}

/// Tagged value with one variant per `PrimitiveKind`.
#[derive(Debug, Clone)]
pub enum Value<S: Storage> {
    Unknown,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Pointer(usize),
    Guid([u8; 16]),
    /// Narrow (byte) text, decoded lossily as UTF-8 when read as a string.
    String(S::Bytes),
    Utf8String(S::Str),
    /// UTF-16 code units.
    WString(S::Wide),
    /// UTF-32 code units.
    Utf32String(S::Wide32),
    Binary(S::Bytes),
    Json(S::Str),
    Xml(S::Str),
    Void,
    Bit(bool),
}

impl<S: Storage> Default for Value<S> {
    fn default() -> Self {
        Value::Unknown
    }
}

impl<S: Storage> Value<S> {
    pub fn guid(bytes: [u8; 16]) -> Self {
        Value::Guid(bytes)
    }

    pub fn pointer(address: usize) -> Self {
        Value::Pointer(address)
    }

    pub fn bit(set: bool) -> Self {
        Value::Bit(set)
    }

    pub fn void() -> Self {
        Value::Void
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Value::Unknown => PrimitiveKind::Unknown,
            Value::Bool(_) => PrimitiveKind::Bool,
            Value::Int8(_) => PrimitiveKind::Int8,
            Value::Int16(_) => PrimitiveKind::Int16,
            Value::Int32(_) => PrimitiveKind::Int32,
            Value::Int64(_) => PrimitiveKind::Int64,
            Value::UInt8(_) => PrimitiveKind::UInt8,
            Value::UInt16(_) => PrimitiveKind::UInt16,
            Value::UInt32(_) => PrimitiveKind::UInt32,
            Value::UInt64(_) => PrimitiveKind::UInt64,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            Value::Pointer(_) => PrimitiveKind::Pointer,
            Value::Guid(_) => PrimitiveKind::Guid,
            Value::String(_) => PrimitiveKind::String,
            Value::Utf8String(_) => PrimitiveKind::Utf8String,
            Value::WString(_) => PrimitiveKind::WString,
            Value::Utf32String(_) => PrimitiveKind::Utf32String,
            Value::Binary(_) => PrimitiveKind::Binary,
            Value::Json(_) => PrimitiveKind::Json,
            Value::Xml(_) => PrimitiveKind::Xml,
            Value::Void => PrimitiveKind::Void,
            Value::Bit(_) => PrimitiveKind::Bit,
        }
    }

    /// Full type descriptor. Owning values holding a variable-length payload
    /// report `OWNS_ALLOCATION`.
    pub fn type_tag(&self) -> TypeTag {
        let tag = TypeTag::of(self.kind());
        if S::OWNS && self.kind().is_variable() {
            tag.with(type_flags::OWNS_ALLOCATION)
        } else {
            tag
        }
    }

    pub fn type_number(&self) -> u8 {
        self.kind() as u8
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_string(&self) -> bool {
        self.kind().is_text()
    }

    pub fn is_number(&self) -> bool {
        TypeTag::of(self.kind()).is_number()
    }

    /// Resets to `Unknown`, releasing any owned payload.
    pub fn clear(&mut self) {
        *self = Value::Unknown;
    }

    /// Returns the text of UTF-8 kinds without conversion.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw bytes of narrow text and binary kinds.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(b) | Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_guid(&self) -> Option<&[u8; 16]> {
        match self {
            Value::Guid(g) => Some(g),
            _ => None,
        }
    }

    /// Borrows this value as a view over the same payload.
    pub fn as_view(&self) -> Value<Borrowed<'_>> {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int8(v) => Value::Int8(*v),
            Value::Int16(v) => Value::Int16(*v),
            Value::Int32(v) => Value::Int32(*v),
            Value::Int64(v) => Value::Int64(*v),
            Value::UInt8(v) => Value::UInt8(*v),
            Value::UInt16(v) => Value::UInt16(*v),
            Value::UInt32(v) => Value::UInt32(*v),
            Value::UInt64(v) => Value::UInt64(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Double(v) => Value::Double(*v),
            Value::Pointer(p) => Value::Pointer(*p),
            Value::Guid(g) => Value::Guid(*g),
            Value::String(b) => Value::String(&**b),
            Value::Utf8String(s) => Value::Utf8String(&**s),
            Value::WString(w) => Value::WString(&**w),
            Value::Utf32String(w) => Value::Utf32String(&**w),
            Value::Binary(b) => Value::Binary(&**b),
            Value::Json(s) => Value::Json(&**s),
            Value::Xml(s) => Value::Xml(&**s),
            Value::Void => Value::Void,
            Value::Bit(b) => Value::Bit(*b),
        }
    }

    /// Deep-copies this value into an owning `Variant`.
    pub fn to_variant(&self) -> Value<Owned> {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int8(v) => Value::Int8(*v),
            Value::Int16(v) => Value::Int16(*v),
            Value::Int32(v) => Value::Int32(*v),
            Value::Int64(v) => Value::Int64(*v),
            Value::UInt8(v) => Value::UInt8(*v),
            Value::UInt16(v) => Value::UInt16(*v),
            Value::UInt32(v) => Value::UInt32(*v),
            Value::UInt64(v) => Value::UInt64(*v),
            Value::Float(v) => Value::Float(*v),
            Value::Double(v) => Value::Double(*v),
            Value::Pointer(p) => Value::Pointer(*p),
            Value::Guid(g) => Value::Guid(*g),
            Value::String(b) => Value::String(Box::from(&**b)),
            Value::Utf8String(s) => Value::Utf8String(Box::from(&**s)),
            Value::WString(w) => Value::WString(Box::from(&**w)),
            Value::Utf32String(w) => Value::Utf32String(Box::from(&**w)),
            Value::Binary(b) => Value::Binary(Box::from(&**b)),
            Value::Json(s) => Value::Json(Box::from(&**s)),
            Value::Xml(s) => Value::Xml(Box::from(&**s)),
            Value::Void => Value::Void,
            Value::Bit(b) => Value::Bit(*b),
        }
    }

    /// Byte length of the payload as stored in a record, without framing.
    pub fn payload_len(&self) -> usize {
        match self {
            Value::String(b) | Value::Binary(b) => b.len(),
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => s.len(),
            Value::WString(w) => w.len() * 2,
            Value::Utf32String(w) => w.len() * 4,
            // INVARIANT: every other kind is fixed-size
            other => other.kind().fixed_size().unwrap_or(0),
        }
    }

    pub fn get_bool(&self) -> bool {
        match self {
            Value::Bool(b) | Value::Bit(b) => *b,
            Value::Int8(v) => *v != 0,
            Value::Int16(v) => *v != 0,
            Value::Int32(v) => *v != 0,
            Value::Int64(v) => *v != 0,
            Value::UInt8(v) => *v != 0,
            Value::UInt16(v) => *v != 0,
            Value::UInt32(v) => *v != 0,
            Value::UInt64(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::Double(v) => *v != 0.0,
            Value::Pointer(p) => *p != 0,
            Value::String(_)
            | Value::Utf8String(_)
            | Value::WString(_)
            | Value::Utf32String(_)
            | Value::Json(_)
            | Value::Xml(_) => {
                let text = self.text_bytes();
                let trimmed = text.trim_ascii();
                trimmed.eq_ignore_ascii_case(b"true") || number::parse_int(trimmed) != 0
            }
            Value::Guid(_) | Value::Binary(_) | Value::Unknown | Value::Void => false,
        }
    }

    pub fn get_int(&self) -> i32 {
        match self {
            Value::Int8(v) => *v as i32,
            Value::Int16(v) => *v as i32,
            Value::Int32(v) => *v,
            Value::UInt8(v) => *v as i32,
            Value::UInt16(v) => *v as i32,
            Value::UInt32(v) => *v as i32,
            Value::Float(v) => *v as i32,
            Value::Double(v) => *v as i32,
            _ => self.get_int64() as i32,
        }
    }

    pub fn get_uint(&self) -> u32 {
        match self {
            Value::UInt8(v) => *v as u32,
            Value::UInt16(v) => *v as u32,
            Value::UInt32(v) => *v,
            Value::Int8(v) => *v as u32,
            Value::Int16(v) => *v as u32,
            Value::Int32(v) => *v as u32,
            Value::Float(v) => *v as u32,
            Value::Double(v) => *v as u32,
            _ => self.get_uint64() as u32,
        }
    }

    pub fn get_int64(&self) -> i64 {
        match self {
            Value::Bool(b) | Value::Bit(b) => *b as i64,
            Value::Int8(v) => *v as i64,
            Value::Int16(v) => *v as i64,
            Value::Int32(v) => *v as i64,
            Value::Int64(v) => *v,
            Value::UInt8(v) => *v as i64,
            Value::UInt16(v) => *v as i64,
            Value::UInt32(v) => *v as i64,
            Value::UInt64(v) => *v as i64,
            Value::Float(v) => *v as i64,
            Value::Double(v) => *v as i64,
            Value::Pointer(p) => *p as i64,
            Value::String(_)
            | Value::Utf8String(_)
            | Value::WString(_)
            | Value::Utf32String(_)
            | Value::Json(_)
            | Value::Xml(_) => number::parse_int(&self.text_bytes()),
            Value::Guid(_) | Value::Binary(_) | Value::Unknown | Value::Void => 0,
        }
    }

    pub fn get_uint64(&self) -> u64 {
        match self {
            Value::Bool(b) | Value::Bit(b) => *b as u64,
            Value::Int8(v) => *v as u64,
            Value::Int16(v) => *v as u64,
            Value::Int32(v) => *v as u64,
            Value::Int64(v) => *v as u64,
            Value::UInt8(v) => *v as u64,
            Value::UInt16(v) => *v as u64,
            Value::UInt32(v) => *v as u64,
            Value::UInt64(v) => *v,
            Value::Float(v) => *v as u64,
            Value::Double(v) => *v as u64,
            Value::Pointer(p) => *p as u64,
            Value::String(_)
            | Value::Utf8String(_)
            | Value::WString(_)
            | Value::Utf32String(_)
            | Value::Json(_)
            | Value::Xml(_) => number::parse_uint(&self.text_bytes()),
            Value::Guid(_) | Value::Binary(_) | Value::Unknown | Value::Void => 0,
        }
    }

    pub fn get_decimal(&self) -> f64 {
        match self {
            Value::Float(v) => *v as f64,
            Value::Double(v) => *v,
            Value::UInt64(v) => *v as f64,
            Value::Pointer(p) => *p as f64,
            Value::String(_)
            | Value::Utf8String(_)
            | Value::WString(_)
            | Value::Utf32String(_)
            | Value::Json(_)
            | Value::Xml(_) => number::parse_double(&self.text_bytes()),
            _ => self.get_int64() as f64,
        }
    }

    pub fn get_string(&self) -> String {
        match self {
            Value::Unknown | Value::Void => String::new(),
            Value::Bool(b) | Value::Bit(b) => b.to_string(),
            Value::Int8(v) => v.to_string(),
            Value::Int16(v) => v.to_string(),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::UInt8(v) => v.to_string(),
            Value::UInt16(v) => v.to_string(),
            Value::UInt32(v) => v.to_string(),
            Value::UInt64(v) => v.to_string(),
            Value::Float(v) => number::format_float(*v),
            Value::Double(v) => number::format_double(*v),
            Value::Pointer(p) => format!("{:#x}", p),
            Value::Guid(g) => format_guid(g),
            Value::String(b) => text::narrow_to_string(b),
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => s.to_string(),
            Value::WString(w) => text::utf16_to_string(w),
            Value::Utf32String(w) => text::utf32_to_string(w),
            Value::Binary(b) => hex::encode(b),
        }
    }

    /// Returns the value as UTF-16 code units.
    pub fn get_wstring(&self) -> Vec<u16> {
        match self {
            Value::WString(w) => w.iter().map(|u| u.get()).collect(),
            Value::String(b) => text::narrow_to_utf16(b),
            _ => self.get_string().encode_utf16().collect(),
        }
    }

    /// Truthiness: nonzero numbers, true booleans, non-empty text or binary.
    pub fn is_true(&self) -> bool {
        match self {
            Value::String(b) | Value::Binary(b) => !b.is_empty(),
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => !s.is_empty(),
            Value::WString(w) => !w.is_empty(),
            Value::Utf32String(w) => !w.is_empty(),
            Value::Guid(g) => g.iter().any(|&b| b != 0),
            _ => self.get_bool(),
        }
    }

    /// Type-strict equality, usable across owning and borrowing values.
    pub fn compare<T: Storage>(&self, other: &Value<T>) -> bool {
        if self.type_number() != other.type_number() {
            return false;
        }
        match (self, other) {
            (Value::Unknown, Value::Unknown) | (Value::Void, Value::Void) => true,
            (Value::Bool(a), Value::Bool(b)) | (Value::Bit(a), Value::Bit(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::UInt8(a), Value::UInt8(b)) => a == b,
            (Value::UInt16(a), Value::UInt16(b)) => a == b,
            (Value::UInt32(a), Value::UInt32(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::Guid(a), Value::Guid(b)) => a == b,
            (Value::String(a), Value::String(b)) | (Value::Binary(a), Value::Binary(b)) => {
                **a == **b
            }
            (Value::Utf8String(a), Value::Utf8String(b))
            | (Value::Json(a), Value::Json(b))
            | (Value::Xml(a), Value::Xml(b)) => **a == **b,
            (Value::WString(a), Value::WString(b)) => **a == **b,
            (Value::Utf32String(a), Value::Utf32String(b)) => **a == **b,
            _ => {
                debug_assert!(false, "type numbers matched but variants differ");
                false
            }
        }
    }

    /// Text kinds as UTF-8 bytes, converting wide encodings.
    fn text_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Value::String(b) => Cow::Borrowed(&**b),
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => Cow::Borrowed(s.as_bytes()),
            Value::WString(w) => Cow::Owned(text::utf16_to_string(w).into_bytes()),
            Value::Utf32String(w) => Cow::Owned(text::utf32_to_string(w).into_bytes()),
            _ => Cow::Borrowed(&[]),
        }
    }
}

impl<S: Storage, T: Storage> PartialEq<Value<T>> for Value<S> {
    fn eq(&self, other: &Value<T>) -> bool {
        self.compare(other)
    }
}

impl<S: Storage> fmt::Display for Value<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Utf8String(s) | Value::Json(s) | Value::Xml(s) => f.write_str(s),
            other => f.write_str(&other.get_string()),
        }
    }
}

fn format_guid(g: &[u8; 16]) -> String {
    let h = hex::encode(g);
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

mod hex {
    pub fn encode(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

scalar_conversions! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
}
