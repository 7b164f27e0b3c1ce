use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Supported digest algorithms for chain hashing.
///
/// The set is closed: dispatch is a `match` on this enum, and unknown
/// algorithm names fail parsing instead of falling back to a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 (the chainseal default).
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, in preference order.
    pub const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Lowercase wire name (`sha256`, `sha384`, `sha512`).
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `data` using this algorithm.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            HashAlgorithm::Sha384 => hex::encode(Sha384::digest(data)),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }

    /// Lowercase hex digest of `prefix || data`.
    ///
    /// Used for domain-separated hashing so digests from different contexts
    /// can never collide.
    pub fn digest_hex_prefixed(&self, prefix: &[u8], data: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(prefix);
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
            HashAlgorithm::Sha384 => {
                let mut hasher = Sha384::new();
                hasher.update(prefix);
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
            HashAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(prefix);
                hasher.update(data);
                hex::encode(hasher.finalize())
            }
        }
    }

    /// Length in characters of a hex digest produced by this algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha384 => 96,
            HashAlgorithm::Sha512 => 128,
        }
    }

    /// Checks whether `value` is a well-formed lowercase hex digest of this
    /// algorithm's width.
    pub fn is_valid_digest(&self, value: &str) -> bool {
        let re = Regex::new(r"^[0-9a-f]+$").expect("invalid regex");
        value.len() == self.hex_len() && re.is_match(value)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(ValidationError::UnsupportedAlgorithm {
                value: other.to_string(),
            }),
        }
    }
}

/// SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    HashAlgorithm::Sha256.digest_hex(data)
}

/// SHA-384 hex digest of `data`.
pub fn sha384_hex(data: &[u8]) -> String {
    HashAlgorithm::Sha384.digest_hex(data)
}

/// SHA-512 hex digest of `data`.
pub fn sha512_hex(data: &[u8]) -> String {
    HashAlgorithm::Sha512.digest_hex(data)
}
