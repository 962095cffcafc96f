//! # Primitive Kinds and Type Tags
//!
//! This module provides `PrimitiveKind`, the single-byte storage discriminant
//! written into every record, and `TypeTag`, the 32-bit descriptor that adds
//! capability, size-class and control flags on top of it.
//!
//! ## Discriminant Values
//!
//! Discriminants are part of the wire format. They are never renumbered;
//! new kinds are only ever appended.
//!
//! | Kind        | # | Payload                        |
//! |-------------|---|--------------------------------|
//! | Unknown     | 0 | none                           |
//! | Bool        | 1 | 1 byte                         |
//! | Int8..Int64 | 2-5 | 1, 2, 4, 8 bytes LE          |
//! | UInt8..UInt64 | 6-9 | 1, 2, 4, 8 bytes LE        |
//! | Float       | 10 | 4 bytes LE IEEE-754           |
//! | Double      | 11 | 8 bytes LE IEEE-754           |
//! | Pointer     | 12 | 8 bytes LE address            |
//! | Guid        | 13 | 16 bytes                      |
//! | String      | 14 | narrow bytes                  |
//! | Utf8String  | 15 | UTF-8 bytes                   |
//! | WString     | 16 | UTF-16 LE units               |
//! | Utf32String | 17 | UTF-32 LE units               |
//! | Binary      | 18 | raw bytes, always prefixed    |
//! | Json        | 19 | UTF-8 bytes                   |
//! | Xml         | 20 | UTF-8 bytes                   |
//! | Void        | 21 | none                          |
//! | Bit         | 22 | 1 byte                        |
//!
//! ## TypeTag Layout
//!
//! ```text
//! 31        26 25 24 23     16 15         8 7        0
//! +----------+--+--+---------+------------+----------+
//! | reserved |OA|LP| size    | capability | kind     |
//! +----------+--+--+---------+------------+----------+
//! ```
//!
//! `LP` is HAS_LENGTH_PREFIX, `OA` is OWNS_ALLOCATION (owning values only).

use crate::config::MAX_KIND;

/// Storage discriminant of a value or record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveKind {
    #[default]
    Unknown = 0,
    Bool = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    UInt8 = 6,
    UInt16 = 7,
    UInt32 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    Pointer = 12,
    Guid = 13,
    String = 14,
    Utf8String = 15,
    WString = 16,
    Utf32String = 17,
    Binary = 18,
    Json = 19,
    Xml = 20,
    Void = 21,
    Bit = 22,
}

/// Fixed payload sizes indexed by discriminant. `None` marks variable kinds.
const SIZE_TABLE: [Option<usize>; MAX_KIND as usize + 1] = [
    Some(0),  // Unknown
    Some(1),  // Bool
    Some(1),  // Int8
    Some(2),  // Int16
    Some(4),  // Int32
    Some(8),  // Int64
    Some(1),  // UInt8
    Some(2),  // UInt16
    Some(4),  // UInt32
    Some(8),  // UInt64
    Some(4),  // Float
    Some(8),  // Double
    Some(8),  // Pointer
    Some(16), // Guid
    None,     // String
    None,     // Utf8String
    None,     // WString
    None,     // Utf32String
    None,     // Binary
    None,     // Json
    None,     // Xml
    Some(0),  // Void
    Some(1),  // Bit
];

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; MAX_KIND as usize + 1] = [
        PrimitiveKind::Unknown,
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt8,
        PrimitiveKind::UInt16,
        PrimitiveKind::UInt32,
        PrimitiveKind::UInt64,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Pointer,
        PrimitiveKind::Guid,
        PrimitiveKind::String,
        PrimitiveKind::Utf8String,
        PrimitiveKind::WString,
        PrimitiveKind::Utf32String,
        PrimitiveKind::Binary,
        PrimitiveKind::Json,
        PrimitiveKind::Xml,
        PrimitiveKind::Void,
        PrimitiveKind::Bit,
    ];

    /// Returns the fixed payload size, or None for variable-length kinds.
    #[inline]
    pub fn fixed_size(self) -> Option<usize> {
        SIZE_TABLE[self as usize]
    }

    #[inline]
    pub fn is_variable(self) -> bool {
        self.fixed_size().is_none()
    }

    /// Width of one code unit for terminator-delimited kinds.
    ///
    /// Binary has no terminator and reports None, as do fixed kinds.
    pub fn code_unit_width(self) -> Option<usize> {
        match self {
            PrimitiveKind::String
            | PrimitiveKind::Utf8String
            | PrimitiveKind::Json
            | PrimitiveKind::Xml => Some(1),
            PrimitiveKind::WString => Some(2),
            PrimitiveKind::Utf32String => Some(4),
            _ => None,
        }
    }

    /// Returns true for the kinds whose payload is text.
    pub fn is_text(self) -> bool {
        self.code_unit_width().is_some()
    }

    /// Returns true for text kinds whose payload must be valid UTF-8.
    pub fn is_utf8(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Utf8String | PrimitiveKind::Json | PrimitiveKind::Xml
        )
    }

    pub fn type_tag(self) -> TypeTag {
        TypeTag::of(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::UInt8 => "uint8",
            PrimitiveKind::UInt16 => "uint16",
            PrimitiveKind::UInt32 => "uint32",
            PrimitiveKind::UInt64 => "uint64",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Pointer => "pointer",
            PrimitiveKind::Guid => "guid",
            PrimitiveKind::String => "string",
            PrimitiveKind::Utf8String => "utf8string",
            PrimitiveKind::WString => "wstring",
            PrimitiveKind::Utf32String => "utf32string",
            PrimitiveKind::Binary => "binary",
            PrimitiveKind::Json => "json",
            PrimitiveKind::Xml => "xml",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bit => "bit",
        }
    }
}

impl TryFrom<u8> for PrimitiveKind {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match PrimitiveKind::ALL.get(value as usize) {
            Some(kind) => Ok(*kind),
            None => eyre::bail!("invalid PrimitiveKind discriminant: {}", value),
        }
    }
}

/// Flag bits of a `TypeTag` above the kind byte.
pub mod type_flags {
    pub const IS_NUMBER: u32 = 1 << 8;
    pub const IS_INTEGER: u32 = 1 << 9;
    pub const IS_DECIMAL: u32 = 1 << 10;
    pub const IS_SIGNED: u32 = 1 << 11;
    pub const IS_STRING: u32 = 1 << 12;
    pub const IS_DATE: u32 = 1 << 13;
    pub const IS_BINARY: u32 = 1 << 14;
    pub const IS_BOOLEAN: u32 = 1 << 15;

    pub const SIZE_08: u32 = 1 << 16;
    pub const SIZE_16: u32 = 1 << 17;
    pub const SIZE_32: u32 = 1 << 18;
    pub const SIZE_64: u32 = 1 << 19;
    pub const SIZE_128: u32 = 1 << 20;
    pub const SIZE_256: u32 = 1 << 21;
    pub const SIZE_512: u32 = 1 << 22;

    pub const HAS_LENGTH_PREFIX: u32 = 1 << 24;
    pub const OWNS_ALLOCATION: u32 = 1 << 25;

    pub const KIND_MASK: u32 = 0xFF;
    pub const GROUP_MASK: u32 = 0xFF00;
    pub const SIZE_MASK: u32 = 0x7F_0000;
}

/// 32-bit type descriptor: a PrimitiveKind plus group, size and control flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(u32);

impl TypeTag {
    /// Builds the canonical tag of `kind` with its group and size flags.
    pub fn of(kind: PrimitiveKind) -> Self {
        use type_flags::*;
        use PrimitiveKind as K;

        let group = match kind {
            K::Bool | K::Bit => IS_BOOLEAN,
            K::Int8 | K::Int16 | K::Int32 | K::Int64 => IS_NUMBER | IS_INTEGER | IS_SIGNED,
            K::UInt8 | K::UInt16 | K::UInt32 | K::UInt64 => IS_NUMBER | IS_INTEGER,
            K::Float | K::Double => IS_NUMBER | IS_DECIMAL | IS_SIGNED,
            K::String | K::Utf8String | K::WString | K::Utf32String | K::Json | K::Xml => {
                IS_STRING
            }
            K::Guid | K::Binary => IS_BINARY,
            K::Unknown | K::Pointer | K::Void => 0,
        };

        let size = match kind.fixed_size() {
            Some(1) => SIZE_08,
            Some(2) => SIZE_16,
            Some(4) => SIZE_32,
            Some(8) => SIZE_64,
            Some(16) => SIZE_128,
            _ => 0,
        };

        Self(kind as u32 | group | size)
    }

    pub fn from_bits(bits: u32) -> eyre::Result<Self> {
        PrimitiveKind::try_from((bits & type_flags::KIND_MASK) as u8)?;
        Ok(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn kind(self) -> PrimitiveKind {
        // INVARIANT: constructors only accept valid kind bytes
        PrimitiveKind::ALL[(self.0 & type_flags::KIND_MASK) as usize]
    }

    /// The kind byte alone, the value compared for type equality.
    pub fn type_number(self) -> u8 {
        (self.0 & type_flags::KIND_MASK) as u8
    }

    pub fn with(self, flags: u32) -> Self {
        Self(self.0 | flags)
    }

    pub fn has(self, flags: u32) -> bool {
        self.0 & flags == flags
    }

    pub fn is_number(self) -> bool {
        self.has(type_flags::IS_NUMBER)
    }

    pub fn is_integer(self) -> bool {
        self.has(type_flags::IS_INTEGER)
    }

    pub fn is_decimal(self) -> bool {
        self.has(type_flags::IS_DECIMAL)
    }

    pub fn is_signed(self) -> bool {
        self.has(type_flags::IS_SIGNED)
    }

    pub fn is_string(self) -> bool {
        self.has(type_flags::IS_STRING)
    }

    pub fn is_binary(self) -> bool {
        self.has(type_flags::IS_BINARY)
    }

    pub fn is_boolean(self) -> bool {
        self.has(type_flags::IS_BOOLEAN)
    }

    pub fn has_length_prefix(self) -> bool {
        self.has(type_flags::HAS_LENGTH_PREFIX)
    }

    pub fn owns_allocation(self) -> bool {
        self.has(type_flags::OWNS_ALLOCATION)
    }
}

impl From<PrimitiveKind> for TypeTag {
    fn from(kind: PrimitiveKind) -> Self {
        TypeTag::of(kind)
    }
}
