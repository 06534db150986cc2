//! json-canon-util - leaf helpers for the json-canon serializer.
//!
//! Nothing in here knows about the value model. Each module covers one piece
//! of the canonical text format:
//!
//! - [`strings`]: JSON string quoting with `JSON.stringify` escapes
//! - [`number`]: ECMAScript `Number::toString` rendering of `f64`
//! - [`sort`]: stable insertion sort that tolerates inconsistent comparators

pub mod number;
pub mod sort;
pub mod strings;

// Re-exports for convenience
pub use number::{number_to_string, write_number};
pub use sort::insertion_sort_by;
pub use strings::{quote, quote_into};
