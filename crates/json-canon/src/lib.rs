//! json-canon - deterministic, byte-stable JSON serialization.
//!
//! Logically equal values always render to the same bytes, whatever order
//! their object keys were inserted in, so the output can be hashed.
//! Strings and numbers are rendered as `JSON.stringify` renders them. Object
//! keys are sorted in byte order unless a sorter is supplied. A replacer may
//! drop or rewrite properties based on their key path.
//!
//! # Example
//!
//! ```
//! use json_canon::{canonicalize_to_string, digest, CanonicalOptions, Value};
//! use serde_json::json;
//!
//! let a = Value::from(json!({"b": [1, 2.5], "a": null}));
//! let b = Value::from(json!({"a": null, "b": [1, 2.5]}));
//! let options = CanonicalOptions::default();
//!
//! assert_eq!(canonicalize_to_string(&a, &options).unwrap(), r#"{"a":null,"b":[1,2.5]}"#);
//! assert_eq!(
//!     digest(&a, "sha256", &options).unwrap(),
//!     digest(&b, "sha256", &options).unwrap(),
//! );
//! ```

pub mod canonicalize;
pub mod date;
pub mod digest;
pub mod error;
pub mod indent;
pub mod options;
pub mod value;

pub use canonicalize::{
    canonicalize, canonicalize_into, canonicalize_json, canonicalize_to_string, Sink,
};
pub use date::to_iso_string;
pub use digest::{digest, digest_with, Algorithm, DigestBytes};
pub use error::{Error, Result};
pub use indent::Indent;
pub use options::{
    default_sorter, CanonicalOptions, Property, Replacement, Replacer, Scope, Sorter,
};
pub use value::{Object, Value};
