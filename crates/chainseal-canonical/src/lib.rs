//! Canonical hashing primitives for chainseal audit chains.
//!
//! Everything that participates in hashing lives in this crate: the closed
//! set of supported digest algorithms, deterministic JSON canonicalization,
//! and the validated identifier newtypes shared across the workspace.
//! Consumers hash canonical bytes only; no digest is ever computed over
//! serializer-dependent output.
//!
#![deny(missing_docs)]

/// Canonical JSON serialization for deterministic hashing.
pub mod canonical;
/// Digest algorithm primitives.
pub mod digest;
/// Validated identifier newtypes.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonical::{canonical_bytes, stringify_numbers, to_canonical_json, CanonicalError};
pub use digest::{sha256_hex, sha384_hex, sha512_hex, HashAlgorithm};
pub use identifiers::TenantId;
pub use validation::ValidationError;
