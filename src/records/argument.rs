//! # Record Handles
//!
//! `Argument` is a decoded, read-only record: its name, a zero-copy value and
//! the position it was read from. `ArgumentEdit` holds the buffer mutably and
//! rewrites or removes one record in place. The borrow checker keeps both
//! from outliving, or coexisting with, other mutations of the buffer.

use std::fmt;

use eyre::Result;

use super::arguments::{Arguments, Position};
use super::cursor;
use crate::types::{type_flags, PrimitiveKind, TypeTag, Variant, VariantView};

#[derive(Clone, Copy)]
pub struct Argument<'a> {
    name: Option<&'a str>,
    value: VariantView<'a>,
    position: Position,
    span: usize,
    prefixed: bool,
}

impl<'a> Argument<'a> {
    pub(crate) fn new(
        name: Option<&'a str>,
        value: VariantView<'a>,
        position: Position,
        header: &cursor::RecordHeader,
    ) -> Self {
        Self {
            name,
            value,
            position,
            span: header.span(),
            prefixed: header.prefixed,
        }
    }

    /// Record name, `None` for anonymous records.
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    pub fn value(&self) -> VariantView<'a> {
        self.value
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.value.kind()
    }

    /// Type tag of the record as stored, with `HAS_LENGTH_PREFIX` when the
    /// payload carries an explicit length.
    pub fn type_tag(&self) -> TypeTag {
        let tag = self.value.type_tag();
        if self.prefixed {
            tag.with(type_flags::HAS_LENGTH_PREFIX)
        } else {
            tag
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Total encoded bytes of the record, header included.
    pub fn span(&self) -> usize {
        self.span
    }

    pub fn to_variant(&self) -> Variant {
        self.value.to_variant()
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{}: {:?}", name, self.value),
            None => write!(f, "{:?}", self.value),
        }
    }
}

/// Mutable handle to one record of an `Arguments` buffer.
pub struct ArgumentEdit<'a> {
    args: &'a mut Arguments,
    offset: usize,
}

impl<'a> ArgumentEdit<'a> {
    pub(crate) fn new(args: &'a mut Arguments, offset: usize) -> Self {
        Self { args, offset }
    }

    fn header(&self) -> Result<cursor::RecordHeader> {
        cursor::parse_header(self.args.as_bytes(), self.offset)
    }

    pub fn name(&self) -> Option<&str> {
        let header = self.header().ok()?;
        self.args.trusted_name(&header)
    }

    pub fn value(&self) -> Result<VariantView<'_>> {
        let header = self.header()?;
        Ok(self.args.trusted_value(&header))
    }

    pub fn position(&self) -> Position {
        self.args.position_at(self.offset)
    }

    /// Rewrites the record's value, keeping its name. Returns the record's
    /// position under the buffer's current generation.
    pub fn set_value<'v>(&mut self, value: impl Into<VariantView<'v>>) -> Result<Position> {
        self.args.replace_value(self.offset, value.into())
    }

    pub fn remove(self) -> Result<()> {
        self.args.remove_at(self.offset)
    }
}

impl fmt::Debug for ArgumentEdit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentEdit")
            .field("offset", &self.offset)
            .field("name", &self.name())
            .finish()
    }
}
