//! # Value Type System
//!
//! This module defines the primitive kinds a record can carry and the two
//! value roles built on them.
//!
//! ## Module Structure
//!
//! - `kind`: `PrimitiveKind`, `TypeTag`, flag constants and the size table
//! - `value`: generic `Value<S>` with the shared coercion and comparison rules
//! - `variant`: owning `Variant`
//! - `variant_view`: borrowing `VariantView<'a>`
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `PrimitiveKind` | Wire-stable kind discriminant |
//! | `TypeTag` | Kind plus capability, size and control flags |
//! | `Variant` | Owned value, safe to outlive any buffer |
//! | `VariantView<'a>` | Zero-copy value bound to borrowed bytes |
//!
//! ## Usage
//!
//! ```ignore
//! use argbuf::types::{Variant, VariantView};
//!
//! let owned = Variant::from("bob");
//! let view: VariantView<'_> = owned.as_view();
//! assert_eq!(view.get_string(), "bob");
//! ```

mod kind;
mod value;
mod variant;
mod variant_view;

pub use kind::{type_flags, PrimitiveKind, TypeTag};
pub use value::{Borrowed, Owned, Storage, Value};
pub use variant::Variant;
pub use variant_view::VariantView;
