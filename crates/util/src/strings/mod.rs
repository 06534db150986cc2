//! String utilities.
//!
//! Quoting and escaping for JSON string literals and object keys.

mod escape;

pub use escape::{quote, quote_into};
