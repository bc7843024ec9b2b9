//! Low-level source primitives for the Kestrel tokenizer.
//!
//! This crate has no `kestrel_*` dependencies. It provides:
//! - [`Position`] / [`SourceLocation`]: line/column value types
//! - [`get_line_info`] / [`LineOffsetTable`]: offset to position lookup
//! - [`whitespace`]: line-terminator and whitespace classification
//! - [`utf8`]: a byte cursor advancer that steps one code point at a time
//!
//! Everything here is a pure function of an immutable byte buffer.

pub mod location;
pub mod utf8;
pub mod whitespace;

pub use location::{get_line_info, LineOffsetTable, Position, SourceLocation};
pub use whitespace::{
    contains_new_line, is_new_line, is_whitespace, line_break_len, line_end, next_line_break,
};
