//! # Encoding Options
//!
//! `EncodeOptions` controls how an `Arguments` buffer writes new records. It
//! follows the builder pattern: start from `EncodeOptions::default()` and
//! chain setters.
//!
//! | Option                | Default | Description                                   |
//! |-----------------------|---------|-----------------------------------------------|
//! | length_prefixed_text  | true    | Text records carry an explicit u32 length     |
//! | initial_capacity      | 0       | Bytes reserved up front                       |
//!
//! With `length_prefixed_text(false)` text records are terminator-delimited.
//! Binary payloads and text containing a zero code unit are always written
//! with a length prefix, since a terminator cannot delimit them.
//!
//! ```ignore
//! let options = EncodeOptions::default()
//!     .length_prefixed_text(false)
//!     .initial_capacity(256);
//! let args = Arguments::with_options(options);
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    length_prefixed_text: bool,
    initial_capacity: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            length_prefixed_text: true,
            initial_capacity: 0,
        }
    }
}

impl EncodeOptions {
    pub fn length_prefixed_text(mut self, enabled: bool) -> Self {
        self.length_prefixed_text = enabled;
        self
    }

    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    pub fn uses_text_prefix(&self) -> bool {
        self.length_prefixed_text
    }

    pub fn capacity(&self) -> usize {
        self.initial_capacity
    }
}
