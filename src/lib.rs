//! # argbuf - Self-Describing Binary Argument Buffers
//!
//! argbuf stores named, typed values in one contiguous, growable byte buffer.
//! Records are variable length and self-describing, so the buffer needs no
//! schema and no offset table. This implementation prioritizes:
//!
//! - **Zero-copy reads**: decoded text and binary values borrow the buffer
//! - **One allocation per buffer**: records are appended and shifted in place
//! - **Statically checked aliasing**: views cannot outlive or race a mutation
//!
//! ## Quick Start
//!
//! ```ignore
//! use argbuf::{Arguments, Variant};
//!
//! let mut args = Arguments::new();
//! args.append("id", 42)?;
//! args.append("name", "bob")?;
//!
//! let id = args.find("id").expect("present");
//! let owned: Variant = args.get_variant(id)?;
//! assert_eq!(owned.get_int(), 42);
//!
//! assert_eq!(args.print(), "42, bob");
//! assert_eq!(args.print_json(), "42, \"bob\"");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Arguments (append/find/set/remove)  │
//! ├─────────────────────────────────────┤
//! │  Argument / ArgumentEdit handles     │
//! ├─────────────────────────────────────┤
//! │  Record cursor + value codec         │
//! ├─────────────────────────────────────┤
//! │  Variant (owned) │ VariantView (ref) │
//! ├─────────────────────────────────────┤
//! │  PrimitiveKind / TypeTag tables      │
//! ├─────────────────────────────────────┤
//! │  Text and number codec primitives    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: wire constants, growth rule, `EncodeOptions`
//! - [`encoding`]: UTF-8/16/32 primitives, number parsing and formatting
//! - [`types`]: `PrimitiveKind`, `TypeTag`, `Variant`, `VariantView`
//! - [`records`]: `Arguments` and its record handles

#[macro_use]
mod macros;

pub mod config;
pub mod encoding;
pub mod records;
pub mod types;

pub use config::EncodeOptions;
pub use records::{Argument, ArgumentEdit, Arguments, Position};
pub use types::{PrimitiveKind, TypeTag, Variant, VariantView};
