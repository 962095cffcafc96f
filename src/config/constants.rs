//! # Wire Format and Growth Constants
//!
//! This module centralizes every numeric constant of the record format and the
//! buffer growth policy. Constants that depend on each other are co-located and
//! their relationships are enforced with compile-time assertions.
//!
//! ## Dependency Graph
//!
//! ```text
//! NAME_MARKER (0xFF)
//!       │
//!       └─> must never collide with a type byte:
//!           (largest kind | LENGTH_PREFIX_BIT) < NAME_MARKER
//!
//! LENGTH_PREFIX_BIT (0x80)
//!       │
//!       └─> KIND_MASK (0x7F) selects the PrimitiveKind from a type byte
//!
//! MIN_BUFFER_CAPACITY (64)
//!       │
//!       └─> BUFFER_ALIGNMENT (64): every grown capacity is a multiple of it
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `MAX_NAME_LEN < 255` (a name length always fits the one-byte field and
//!    never equals the marker value)
//! 2. `MIN_BUFFER_CAPACITY % BUFFER_ALIGNMENT == 0`
//! 3. `GROWTH_NUMERATOR > GROWTH_DENOMINATOR` (growth always makes progress)

// ============================================================================
// RECORD HEADER LAYOUT
// The byte grammar of one record:
//   [NAME_MARKER len name]? type_byte [u32 length]? payload
// ============================================================================

/// First byte of a named record. Anonymous records start with their type byte.
pub const NAME_MARKER: u8 = 0xFF;

/// Bytes taken by the marker and the name length before the name itself.
pub const NAME_HEADER_SIZE: usize = 2;

/// Longest name a record can carry, in bytes.
pub const MAX_NAME_LEN: usize = 254;

/// Set in the type byte when a 4-byte little-endian payload length follows.
pub const LENGTH_PREFIX_BIT: u8 = 0x80;

/// Selects the PrimitiveKind from a type byte.
pub const KIND_MASK: u8 = !LENGTH_PREFIX_BIT;

/// Size of the explicit payload length.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of the type byte.
pub const TYPE_BYTE_SIZE: usize = 1;

/// Largest PrimitiveKind discriminant currently assigned.
pub const MAX_KIND: u8 = 22;

const _: () = assert!(MAX_NAME_LEN < 255, "name length must fit in one byte");

const _: () = assert!(
    (MAX_KIND | LENGTH_PREFIX_BIT) < NAME_MARKER,
    "type bytes must never collide with NAME_MARKER"
);

const _: () = assert!(MAX_KIND & LENGTH_PREFIX_BIT == 0, "kinds must fit under KIND_MASK");

// ============================================================================
// BUFFER GROWTH POLICY
// capacity = round_up(max(MIN_BUFFER_CAPACITY, requested * 3 / 2), ALIGNMENT)
// ============================================================================

/// Smallest capacity an arguments buffer grows to.
pub const MIN_BUFFER_CAPACITY: usize = 64;

/// Every grown capacity is rounded up to a multiple of this.
pub const BUFFER_ALIGNMENT: usize = 64;

/// Growth factor numerator (1.5x).
pub const GROWTH_NUMERATOR: usize = 3;

/// Growth factor denominator (1.5x).
pub const GROWTH_DENOMINATOR: usize = 2;

const _: () = assert!(
    MIN_BUFFER_CAPACITY % BUFFER_ALIGNMENT == 0,
    "MIN_BUFFER_CAPACITY must be aligned"
);

const _: () = assert!(
    BUFFER_ALIGNMENT.is_power_of_two(),
    "BUFFER_ALIGNMENT must be a power of two for mask rounding"
);

const _: () = assert!(
    GROWTH_NUMERATOR > GROWTH_DENOMINATOR,
    "growth factor must be greater than one"
);

/// Computes the capacity a buffer grows to when `requested` bytes are needed.
pub const fn grown_capacity(requested: usize) -> usize {
    let scaled = requested.saturating_mul(GROWTH_NUMERATOR) / GROWTH_DENOMINATOR;
    let target = if scaled > MIN_BUFFER_CAPACITY {
        scaled
    } else {
        MIN_BUFFER_CAPACITY
    };
    (target + BUFFER_ALIGNMENT - 1) & !(BUFFER_ALIGNMENT - 1)
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// Separator placed between values by `Arguments::print`.
pub const PRINT_SEPARATOR: &str = ", ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grown_capacity_has_floor() {
        assert_eq!(grown_capacity(0), 64);
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(42), 64);
    }

    #[test]
    fn grown_capacity_scales_and_aligns() {
        assert_eq!(grown_capacity(64), 128);
        assert_eq!(grown_capacity(100), 192);
        assert_eq!(grown_capacity(1000), 1536);
        assert_eq!(grown_capacity(1001) % BUFFER_ALIGNMENT, 0);
    }
}
