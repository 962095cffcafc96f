//! # Record Traversal
//!
//! Every operation on an argument buffer composes on one primitive: given the
//! offset of a record, compute where its value starts and where the next
//! record begins. Nothing else is stored; a record's span is recomputed from
//! its own header bytes.
//!
//! ```text
//! start           type_offset                payload            end
//!   |                  |                        |                 |
//!   v                  v                        v                 v
//!   +------+-----+-----+------+----------------+---------+-------+
//!   | 0xFF | len | name| type | u32 LE length? | payload | term? |
//!   +------+-----+-----+------+----------------+---------+-------+
//! ```
//!
//! `parse_header` is fully bounds-checked and returns an error on malformed
//! bytes. `Cursor` walks buffers that the engine wrote or that already passed
//! `validate_record`, so it treats a parse failure as a broken invariant.

use std::ops::Range;

use eyre::{bail, ensure, Result, WrapErr};
use zerocopy::little_endian::U32;
use zerocopy::FromBytes;

use crate::config::{
    KIND_MASK, LENGTH_PREFIX_BIT, LENGTH_PREFIX_SIZE, NAME_HEADER_SIZE, NAME_MARKER,
    TYPE_BYTE_SIZE,
};
use crate::types::PrimitiveKind;

/// Decoded layout of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub start: usize,
    pub name: Option<Range<usize>>,
    pub type_offset: usize,
    pub kind: PrimitiveKind,
    pub prefixed: bool,
    /// Payload content, excluding any terminator.
    pub payload: Range<usize>,
    /// One past the last byte of the record.
    pub end: usize,
}

impl RecordHeader {
    pub fn span(&self) -> usize {
        self.end - self.start
    }

    /// Type byte, optional prefix, payload and terminator.
    pub fn value_region(&self) -> Range<usize> {
        self.type_offset..self.end
    }
}

/// Returns the offset of the type byte of the record at `offset`.
#[inline]
pub(crate) fn move_to_value(buf: &[u8], offset: usize) -> usize {
    if buf[offset] == NAME_MARKER {
        offset + NAME_HEADER_SIZE + buf[offset + 1] as usize
    } else {
        offset
    }
}

/// Returns the offset of the record following the one at `offset`.
pub(crate) fn next(buf: &[u8], offset: usize) -> Result<usize> {
    parse_header(buf, offset).map(|h| h.end)
}

pub(crate) fn parse_header(buf: &[u8], start: usize) -> Result<RecordHeader> {
    ensure!(
        start < buf.len(),
        "record offset {} is past the end of a {} byte buffer",
        start,
        buf.len()
    );

    let mut name = None;
    if buf[start] == NAME_MARKER {
        ensure!(
            start + NAME_HEADER_SIZE <= buf.len(),
            "truncated name header at offset {}",
            start
        );
        let name_len = buf[start + 1] as usize;
        let name_start = start + NAME_HEADER_SIZE;
        ensure!(
            name_start + name_len <= buf.len(),
            "name of {} bytes at offset {} runs past the buffer",
            name_len,
            start
        );
        name = Some(name_start..name_start + name_len);
    }

    let type_offset = move_to_value(buf, start);
    ensure!(
        type_offset < buf.len(),
        "missing type byte at offset {}",
        type_offset
    );

    let type_byte = buf[type_offset];
    let prefixed = type_byte & LENGTH_PREFIX_BIT != 0;
    let kind = PrimitiveKind::try_from(type_byte & KIND_MASK)
        .wrap_err_with(|| format!("bad type byte {:#04x} at offset {}", type_byte, type_offset))?;

    let mut payload_start = type_offset + TYPE_BYTE_SIZE;
    let (payload, end) = match kind.fixed_size() {
        Some(size) => {
            ensure!(
                !prefixed,
                "fixed-size {} record at offset {} carries a length prefix",
                kind.name(),
                start
            );
            let end = payload_start + size;
            ensure!(
                end <= buf.len(),
                "{} payload at offset {} runs past the buffer",
                kind.name(),
                payload_start
            );
            (payload_start..end, end)
        }
        None if prefixed => {
            let prefix_end = payload_start + LENGTH_PREFIX_SIZE;
            ensure!(
                prefix_end <= buf.len(),
                "truncated length prefix at offset {}",
                payload_start
            );
            let len = read_length(&buf[payload_start..prefix_end])? as usize;
            payload_start = prefix_end;
            let end = payload_start + len;
            ensure!(
                end <= buf.len(),
                "{} byte payload at offset {} runs past the buffer",
                len,
                payload_start
            );
            (payload_start..end, end)
        }
        None => {
            let Some(width) = kind.code_unit_width() else {
                bail!(
                    "{} record at offset {} has no length prefix",
                    kind.name(),
                    start
                );
            };
            let content_end = scan_terminator(buf, payload_start, width).ok_or_else(|| {
                eyre::eyre!(
                    "unterminated {} payload at offset {}",
                    kind.name(),
                    payload_start
                )
            })?;
            (payload_start..content_end, content_end + width)
        }
    };

    Ok(RecordHeader {
        start,
        name,
        type_offset,
        kind,
        prefixed,
        payload,
        end,
    })
}

fn read_length(bytes: &[u8]) -> Result<u32> {
    let len = U32::ref_from_bytes(bytes)
        .map_err(|_| eyre::eyre!("length prefix must be {} bytes", LENGTH_PREFIX_SIZE))?;
    Ok(len.get())
}

/// Offset of the first all-zero code unit of `width` bytes at or after `from`.
fn scan_terminator(buf: &[u8], from: usize, width: usize) -> Option<usize> {
    buf.get(from..)?
        .chunks_exact(width)
        .position(|unit| unit.iter().all(|&b| b == 0))
        .map(|i| from + i * width)
}

/// Checks payload contents that `parse_header` does not look at.
pub(crate) fn validate_record(buf: &[u8], header: &RecordHeader) -> Result<()> {
    if let Some(name) = &header.name {
        std::str::from_utf8(&buf[name.clone()])
            .wrap_err_with(|| format!("record name at offset {} is not UTF-8", header.start))?;
    }

    let payload = &buf[header.payload.clone()];
    if header.kind.is_utf8() {
        std::str::from_utf8(payload).wrap_err_with(|| {
            format!(
                "{} payload at offset {} is not UTF-8",
                header.kind.name(),
                header.payload.start
            )
        })?;
    }
    if let Some(width) = header.kind.code_unit_width() {
        ensure!(
            payload.len() % width == 0,
            "{} payload of {} bytes at offset {} is not a whole number of code units",
            header.kind.name(),
            payload.len(),
            header.payload.start
        );
    }
    Ok(())
}

/// Sequential walk over the records of a trusted buffer.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }
}

impl Iterator for Cursor<'_> {
    type Item = RecordHeader;

    fn next(&mut self) -> Option<RecordHeader> {
        if self.offset >= self.buf.len() {
            return None;
        }
        match parse_header(self.buf, self.offset) {
            Ok(header) => {
                self.offset = header.end;
                Some(header)
            }
            Err(err) => {
                debug_assert!(false, "corrupt argument buffer: {err:#}");
                self.offset = self.buf.len();
                None
            }
        }
    }
}
