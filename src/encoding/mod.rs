//! # Encoding Module
//!
//! This module provides the leaf codecs the value and record layers build on:
//!
//! - **Text codec**: code-point decode/encode, counting and sizing for UTF-8,
//!   UTF-16 and UTF-32 payloads
//! - **Number codec**: locale-independent parsing of numbers from text and
//!   canonical decimal formatting

pub mod number;
pub mod text;

pub use number::{format_double, format_float, parse_double, parse_int, parse_uint};
pub use text::{char_count, decode_char, encode_char};
