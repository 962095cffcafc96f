//! # Self-Describing Argument Records
//!
//! This module provides `Arguments`, a growable byte buffer holding an
//! ordered sequence of typed records, each optionally named. No schema or
//! offset table is stored: every record describes itself, and traversal is a
//! sequential walk from the first byte.
//!
//! ## Record Binary Layout
//!
//! ```text
//! +-----------+-----------+-----------+-----------+-----------+-----------+
//! | Marker    | Name Len  | Name      | Type Byte | Length    | Payload   |
//! | 0xFF      | u8 < 255  | UTF-8     | kind|0x80?| u32 LE?   | [u8; ...] |
//! +-----------+-----------+-----------+-----------+-----------+-----------+
//! |<------ optional name prefix ----->|           |<-opt.---->|
//! ```
//!
//! | Component | Present when | Description |
//! |-----------|--------------|-------------|
//! | **Marker + Name** | record is named | Name length excludes the header |
//! | **Type Byte** | always | `PrimitiveKind`, high bit set when length-prefixed |
//! | **Length** | high bit set | Payload length in bytes |
//! | **Payload** | always | Fixed size per kind, prefixed length, or zero-terminated |
//!
//! ## Module Structure
//!
//! - `cursor`: header decoding and the sequential traversal primitive
//! - `codec`: value encode/decode against the record payload
//! - `arguments`: the buffer engine and `Position`
//! - `argument`: `Argument` and `ArgumentEdit` record handles
//! - `format`: `print`, `print_json`, `print_format`

mod argument;
mod arguments;
mod codec;
mod cursor;
mod format;


pub use argument::{Argument, ArgumentEdit};
pub use arguments::{Arguments, Iter, Position};
