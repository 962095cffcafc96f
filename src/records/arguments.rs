//! # Argument Buffer Engine
//!
//! `Arguments` stores an ordered sequence of optionally named, typed records
//! in one contiguous `Vec<u8>`. The vector's length is the logical length of
//! the buffer; its capacity grows by the rule in `config::grown_capacity`.
//!
//! ## Operations
//!
//! | Operation | Cost | Effect on other positions |
//! |-----------|------|---------------------------|
//! | `append` | amortized O(record) | none |
//! | `find` / `count` / `size` | O(n) scan | none |
//! | `set`, same fixed kind | O(n) scan, in-place write | none |
//! | `set`, otherwise | O(n) scan + tail shift | invalidated |
//! | `remove` | tail shift | invalidated |
//! | `clear` | O(1) | invalidated |
//!
//! ## Positions
//!
//! A `Position` is the byte offset of a record plus the identity and
//! generation of the buffer that produced it. Every buffer, clones included,
//! gets a fresh identity. Any operation that moves bytes bumps the generation,
//! and position-taking operations reject stale or foreign positions with an
//! error.
//!
//! ## Usage
//!
//! ```ignore
//! let mut args = Arguments::new();
//! args.append("id", 42)?;
//! args.append("name", "bob")?;
//!
//! let id = args.find("id").expect("present");
//! assert_eq!(args.get_variant(id)?.get_int(), 42);
//! assert_eq!(args.print(), "42, bob");
//! ```

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use eyre::{ensure, Result, WrapErr};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::argument::{Argument, ArgumentEdit};
use super::codec;
use super::cursor::{self, Cursor, RecordHeader};
use crate::config::{grown_capacity, EncodeOptions, MAX_NAME_LEN, NAME_HEADER_SIZE, NAME_MARKER};
use crate::types::{PrimitiveKind, Variant, VariantView};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

fn next_buffer_id() -> u64 {
    NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a record inside one `Arguments` buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    buffer: u64,
    offset: usize,
    generation: u64,
}

impl Position {
    /// Byte offset of the record's first header byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct Arguments {
    buf: Vec<u8>,
    options: EncodeOptions,
    id: u64,
    generation: u64,
}

impl Default for Arguments {
    fn default() -> Self {
        Self::with_options(EncodeOptions::default())
    }
}

impl Clone for Arguments {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            options: self.options,
            id: next_buffer_id(),
            generation: self.generation,
        }
    }
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(EncodeOptions::default().initial_capacity(capacity))
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            buf: Vec::with_capacity(options.capacity()),
            options,
            id: next_buffer_id(),
            generation: 0,
        }
    }

    /// Builds a buffer from name/value pairs, in order.
    pub fn from_pairs<'v, N, V, I>(pairs: I) -> Result<Self>
    where
        N: AsRef<str>,
        V: Into<VariantView<'v>>,
        I: IntoIterator<Item = (N, V)>,
    {
        let mut args = Self::new();
        for (name, value) in pairs {
            args.append(name.as_ref(), value)?;
        }
        Ok(args)
    }

    /// Adopts an externally produced buffer after validating every record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut offset = 0;
        while offset < bytes.len() {
            let header = cursor::parse_header(bytes, offset)
                .and_then(|h| cursor::validate_record(bytes, &h).map(|()| h))
                .inspect_err(|err| {
                    debug!(offset, reason = %err, "rejected argument buffer");
                })
                .wrap_err_with(|| format!("invalid argument buffer at offset {}", offset))?;
            offset = header.end;
        }

        let mut args = Self::with_capacity(grown_capacity(bytes.len()));
        args.buf.extend_from_slice(bytes);
        Ok(args)
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Appends a named record. Names longer than 254 bytes are rejected.
    pub fn append<'v>(&mut self, name: &str, value: impl Into<VariantView<'v>>) -> Result<Position> {
        self.push(Some(name), value.into())
    }

    pub fn append_anonymous<'v>(&mut self, value: impl Into<VariantView<'v>>) -> Result<Position> {
        self.push(None, value.into())
    }

    /// Appends a record from a payload that is already in wire form.
    pub fn append_raw(
        &mut self,
        name: Option<&str>,
        kind: PrimitiveKind,
        payload: &[u8],
    ) -> Result<Position> {
        let value = codec::view_from_payload(kind, payload)
            .wrap_err_with(|| format!("raw {} payload rejected", kind.name()))?;
        self.push(name, value)
    }

    fn push(&mut self, name: Option<&str>, value: VariantView<'_>) -> Result<Position> {
        let name_len = match name {
            Some(name) => {
                ensure!(
                    name.len() <= MAX_NAME_LEN,
                    "argument name of {} bytes exceeds the {} byte limit",
                    name.len(),
                    MAX_NAME_LEN
                );
                NAME_HEADER_SIZE + name.len()
            }
            None => 0,
        };
        let prefixed = codec::needs_prefix(&value, self.options.uses_text_prefix());
        let value_len = codec::encoded_len(&value, prefixed)?;

        let start = self.buf.len();
        self.reserve(name_len + value_len);
        self.buf.resize(start + name_len + value_len, 0);

        if let Some(name) = name {
            self.buf[start] = NAME_MARKER;
            self.buf[start + 1] = name.len() as u8;
            self.buf[start + NAME_HEADER_SIZE..start + name_len].copy_from_slice(name.as_bytes());
        }
        codec::encode_value(&value, prefixed, &mut self.buf[start + name_len..]);

        trace!(offset = start, kind = value.kind().name(), "appended record");
        Ok(self.position_at(start))
    }

    /// Replaces the value of the first record named `name`, appending if no
    /// such record exists.
    pub fn set<'v>(&mut self, name: &str, value: impl Into<VariantView<'v>>) -> Result<Position> {
        let value = value.into();
        match self.find(name) {
            Some(pos) => self.replace_value(pos.offset, value),
            None => self.push(Some(name), value),
        }
    }

    pub(crate) fn replace_value(&mut self, offset: usize, value: VariantView<'_>) -> Result<Position> {
        let header = cursor::parse_header(&self.buf, offset)?;

        if header.kind == value.kind() && !header.kind.is_variable() {
            codec::write_payload(&value, &mut self.buf[header.payload.clone()]);
            return Ok(self.position_at(offset));
        }

        let prefixed = codec::needs_prefix(&value, self.options.uses_text_prefix());
        let new_len = codec::encoded_len(&value, prefixed)?;
        let region = header.value_region();
        let region_start = region.start;
        self.resize_region(region, new_len);
        codec::encode_value(
            &value,
            prefixed,
            &mut self.buf[region_start..region_start + new_len],
        );
        Ok(self.position_at(offset))
    }

    /// Removes the record at `pos`.
    pub fn remove(&mut self, pos: Position) -> Result<()> {
        self.check_position(pos)?;
        self.remove_at(pos.offset)
    }

    pub(crate) fn remove_at(&mut self, offset: usize) -> Result<()> {
        let end = cursor::next(&self.buf, offset)?;
        debug!(offset, span = end - offset, "removing record");
        self.resize_region(offset..end, 0);
        Ok(())
    }

    /// Moves everything after `region` so that it becomes `new_len` bytes
    /// long. Bumps the generation whenever bytes move.
    fn resize_region(&mut self, region: Range<usize>, new_len: usize) {
        let old_len = region.len();
        if new_len == old_len {
            return;
        }

        let tail = region.end..self.buf.len();
        let dest = region.start + new_len;
        if new_len > old_len {
            let grow = new_len - old_len;
            self.reserve(grow);
            self.buf.resize(self.buf.len() + grow, 0);
            self.buf.copy_within(tail, dest);
        } else {
            let shrink = old_len - new_len;
            self.buf.copy_within(tail, dest);
            self.buf.truncate(self.buf.len() - shrink);
        }

        self.generation += 1;
        debug!(
            offset = region.start,
            delta = new_len as isize - old_len as isize,
            generation = self.generation,
            "shifted record tail"
        );
    }

    fn reserve(&mut self, additional: usize) {
        let required = self.buf.len() + additional;
        if required > self.buf.capacity() {
            let target = grown_capacity(required);
            trace!(old = self.buf.capacity(), new = target, "growing argument buffer");
            self.buf.reserve_exact(target - self.buf.len());
        }
    }

    /// First record named `name`.
    pub fn find(&self, name: &str) -> Option<Position> {
        self.headers_named(name)
            .next()
            .map(|h| self.position_at(h.start))
    }

    /// Every record named `name`, in insertion order.
    pub fn find_all(&self, name: &str) -> SmallVec<[Position; 4]> {
        self.headers_named(name)
            .map(|h| self.position_at(h.start))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn count(&self, name: &str) -> usize {
        self.headers_named(name).count()
    }

    /// Number of records.
    pub fn size(&self) -> usize {
        Cursor::new(&self.buf).count()
    }

    /// Zero-copy view of the value named `name`.
    pub fn get(&self, name: &str) -> Option<VariantView<'_>> {
        let header = self.headers_named(name).next()?;
        Some(self.trusted_value(&header))
    }

    pub fn get_argument(&self, pos: Position) -> Result<Argument<'_>> {
        self.check_position(pos)?;
        let header = cursor::parse_header(&self.buf, pos.offset)?;
        let name = match &header.name {
            Some(range) => Some(
                std::str::from_utf8(&self.buf[range.clone()])
                    .wrap_err_with(|| format!("record name at offset {} is not UTF-8", pos.offset))?,
            ),
            None => None,
        };
        let value = codec::decode_value(&self.buf, &header)?;
        Ok(Argument::new(name, value, pos, &header))
    }

    /// Decodes the value at `pos` into an owning `Variant`.
    pub fn get_variant(&self, pos: Position) -> Result<Variant> {
        Ok(self.get_variant_view(pos)?.to_variant())
    }

    pub fn get_variant_view(&self, pos: Position) -> Result<VariantView<'_>> {
        Ok(self.get_argument(pos)?.value())
    }

    pub fn edit(&mut self, pos: Position) -> Result<ArgumentEdit<'_>> {
        self.check_position(pos)?;
        cursor::parse_header(&self.buf, pos.offset)?;
        Ok(ArgumentEdit::new(self, pos.offset))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            args: self,
            cursor: Cursor::new(&self.buf),
        }
    }

    /// Names of the named records, in order. Anonymous records are skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter_map(|arg| arg.name())
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops every record, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.generation += 1;
    }

    /// The records in wire form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub(crate) fn position_at(&self, offset: usize) -> Position {
        Position {
            buffer: self.id,
            offset,
            generation: self.generation,
        }
    }

    fn check_position(&self, pos: Position) -> Result<()> {
        ensure!(
            pos.buffer == self.id,
            "position {} belongs to a different argument buffer",
            pos.offset
        );
        ensure!(
            pos.generation == self.generation,
            "stale position {} from generation {} (buffer is at generation {})",
            pos.offset,
            pos.generation,
            self.generation
        );
        ensure!(
            pos.offset < self.buf.len(),
            "position {} is past the end of a {} byte buffer",
            pos.offset,
            self.buf.len()
        );
        Ok(())
    }

    fn headers_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = RecordHeader> + 's {
        Cursor::new(&self.buf).filter(move |h| match &h.name {
            Some(range) => &self.buf[range.clone()] == name.as_bytes(),
            None => false,
        })
    }

    pub(crate) fn trusted_name(&self, header: &RecordHeader) -> Option<&str> {
        let range = header.name.clone()?;
        match std::str::from_utf8(&self.buf[range]) {
            Ok(name) => Some(name),
            Err(err) => {
                debug_assert!(false, "record name at {} is not UTF-8: {err}", header.start);
                None
            }
        }
    }

    pub(crate) fn trusted_value(&self, header: &RecordHeader) -> VariantView<'_> {
        match codec::decode_value(&self.buf, header) {
            Ok(value) => value,
            Err(err) => {
                debug_assert!(false, "{err:#}");
                VariantView::Unknown
            }
        }
    }
}

impl PartialEq for Arguments {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl Eq for Arguments {}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Records of an `Arguments` buffer in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    args: &'a Arguments,
    cursor: Cursor<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Argument<'a>;

    fn next(&mut self) -> Option<Argument<'a>> {
        let header = self.cursor.next()?;
        Some(Argument::new(
            self.args.trusted_name(&header),
            self.args.trusted_value(&header),
            self.args.position_at(header.start),
            &header,
        ))
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = Argument<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
