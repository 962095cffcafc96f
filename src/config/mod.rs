//! # Configuration Module
//!
//! This module centralizes the wire-format and buffer-growth constants of
//! argbuf together with the runtime [`EncodeOptions`] that control how new
//! records are written.
//!
//! ## Module Organization
//!
//! - [`constants`]: Numeric wire/growth values with dependency documentation
//! - [`options`]: `EncodeOptions` builder for per-buffer encoding policy

pub mod constants;
pub mod options;

pub use constants::*;
pub use options::EncodeOptions;
