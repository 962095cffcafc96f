//! # Internal Macros
//!
//! Crate-local helpers, visible to later modules through `#[macro_use]` in
//! `lib.rs`. None of them is exported.
//!
//! ## scalar_conversions!
//!
//! Generates `From<scalar>` for every `Value<S>` storage, mapping each Rust
//! primitive onto the variant that carries it.
//!
//! ```ignore
//! scalar_conversions! {
//!     i32 => Int32,
//!     f64 => Double,
//! }
//!
//! // Generates:
//! // impl<S: Storage> From<i32> for Value<S> { fn from(v: i32) -> Self { Value::Int32(v) } }
//! // impl<S: Storage> From<f64> for Value<S> { fn from(v: f64) -> Self { Value::Double(v) } }
//! ```

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<S: $crate::types::Storage> From<$ty> for $crate::types::Value<S> {
                #[inline]
                fn from(v: $ty) -> Self {
                    $crate::types::Value::$variant(v)
                }
            }
        )*
    };
}
