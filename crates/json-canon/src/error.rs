//! Error type shared by the canonicalizer and the digest adapter.

use thiserror::Error;

/// Everything that can go wrong in this crate. All variants are caller
/// errors: there is nothing to retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node has no canonical rendering. Today this means a non-finite
    /// number (`NaN`, `Infinity`, `-Infinity`).
    #[error("unsupported value type {kind} at key path '{key_path}'")]
    UnsupportedValueType {
        kind: &'static str,
        key_path: String,
    },
    /// The requested hash primitive is not known.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// A textual indent setting could not be parsed.
    #[error("invalid indent: {0}")]
    InvalidIndent(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
