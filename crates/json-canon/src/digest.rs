//! Digest adapter: canonical text streamed into a named hash primitive.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::digest::DynDigest;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::canonicalize::{canonicalize_into, Sink};
use crate::error::{Error, Result};
use crate::options::CanonicalOptions;
use crate::value::Value;

/// Hash primitives available to [`digest`], named the way Node's `crypto`
/// module names them: MD5, SHA-1, SHA-2 and SHA-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha1", alias = "sha-1")]
    Sha1,
    #[serde(rename = "sha224", alias = "sha-224")]
    Sha224,
    #[serde(rename = "sha256", alias = "sha-256")]
    Sha256,
    #[serde(rename = "sha384", alias = "sha-384")]
    Sha384,
    #[serde(rename = "sha512", alias = "sha-512")]
    Sha512,
    #[serde(rename = "sha512-224")]
    Sha512_224,
    #[serde(rename = "sha512-256")]
    Sha512_256,
    #[serde(rename = "sha3-224")]
    Sha3_224,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-384")]
    Sha3_384,
    #[serde(rename = "sha3-512")]
    Sha3_512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha512_224 => "sha512-224",
            Algorithm::Sha512_256 => "sha512-256",
            Algorithm::Sha3_224 => "sha3-224",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_512 => "sha3-512",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 | Algorithm::Sha512_224 | Algorithm::Sha3_224 => 28,
            Algorithm::Sha256 | Algorithm::Sha512_256 | Algorithm::Sha3_256 => 32,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 48,
            Algorithm::Sha512 | Algorithm::Sha3_512 => 64,
        }
    }

    fn hasher(self) -> Box<dyn DynDigest> {
        match self {
            Algorithm::Md5 => Box::new(Md5::default()),
            Algorithm::Sha1 => Box::new(Sha1::default()),
            Algorithm::Sha224 => Box::new(Sha224::default()),
            Algorithm::Sha256 => Box::new(Sha256::default()),
            Algorithm::Sha384 => Box::new(Sha384::default()),
            Algorithm::Sha512 => Box::new(Sha512::default()),
            Algorithm::Sha512_224 => Box::new(Sha512_224::default()),
            Algorithm::Sha512_256 => Box::new(Sha512_256::default()),
            Algorithm::Sha3_224 => Box::new(Sha3_224::default()),
            Algorithm::Sha3_256 => Box::new(Sha3_256::default()),
            Algorithm::Sha3_384 => Box::new(Sha3_384::default()),
            Algorithm::Sha3_512 => Box::new(Sha3_512::default()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; also accepts the dashed spellings (`sha-256`, `sha-1`).
impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            "sha224" | "sha-224" => Ok(Algorithm::Sha224),
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            "sha384" | "sha-384" => Ok(Algorithm::Sha384),
            "sha512" | "sha-512" => Ok(Algorithm::Sha512),
            "sha512-224" | "sha-512/224" => Ok(Algorithm::Sha512_224),
            "sha512-256" | "sha-512/256" => Ok(Algorithm::Sha512_256),
            "sha3-224" => Ok(Algorithm::Sha3_224),
            "sha3-256" => Ok(Algorithm::Sha3_256),
            "sha3-384" => Ok(Algorithm::Sha3_384),
            "sha3-512" => Ok(Algorithm::Sha3_512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

/// Finalized digest bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigestBytes(Box<[u8]>);

impl DigestBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }

    /// Lowercase hexadecimal.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for DigestBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for DigestBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

struct HashSink(Box<dyn DynDigest>);

impl Sink for HashSink {
    fn write_str(&mut self, s: &str) {
        self.0.update(s.as_bytes());
    }
}

/// Digest of the canonical form of `value` under the hash named `algorithm`.
///
/// The name is resolved before anything is hashed; an unknown name fails
/// with [`Error::UnsupportedAlgorithm`].
///
/// # Example
///
/// ```
/// use json_canon::{digest, CanonicalOptions, Object, Value};
///
/// let value = Value::from(Object::new().with("a", 1));
/// let hash = digest(&value, "sha256", &CanonicalOptions::default()).unwrap();
/// assert_eq!(hash.len(), 32);
/// assert!(digest(&value, "whirlpool", &CanonicalOptions::default()).is_err());
/// ```
pub fn digest(
    value: &Value,
    algorithm: &str,
    options: &CanonicalOptions<'_>,
) -> Result<DigestBytes> {
    let algorithm = algorithm.parse::<Algorithm>().inspect_err(|err| {
        tracing::debug!(error = %err, "digest rejected");
    })?;
    digest_with(value, algorithm, options)
}

/// [`digest`] with an already-resolved algorithm.
pub fn digest_with(
    value: &Value,
    algorithm: Algorithm,
    options: &CanonicalOptions<'_>,
) -> Result<DigestBytes> {
    tracing::debug!(%algorithm, "digest started");
    let mut sink = HashSink(algorithm.hasher());
    // On error the partially-fed hash state is dropped with `sink`.
    canonicalize_into(value, options, &mut sink)?;
    let bytes = sink.0.finalize();
    tracing::debug!(%algorithm, len = bytes.len(), "digest finished");
    Ok(DigestBytes(bytes))
}
