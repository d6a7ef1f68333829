//! Cache key derivation
//!
//! Hashes the canonical rendering of every statement, in order, and turns
//! the digest into a filesystem-safe entry name. Same description = same
//! cache entry.

use crate::description::Description;
use crate::error::{PropnetError, PropnetResult};
use base64::Engine;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use tracing::debug;

/// File name prefix of every cache entry
pub const ENTRY_PREFIX: &str = "propnet_";

/// File extension of every cache entry
pub const ENTRY_EXTENSION: &str = "net";

/// Digest algorithm used for keys when none is configured
pub const DEFAULT_DIGEST: &str = "sha256";

/// Identity of a cache entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: Vec<u8>,
    encoded: String,
}

impl CacheKey {
    /// Raw digest bytes
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Digest as lowercase hex, for display
    pub fn digest_hex(&self) -> String {
        hex::encode(&self.digest)
    }

    /// Filesystem-safe encoding of the digest
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Name of the entry file inside the cache directory
    pub fn file_name(&self) -> String {
        format!("{}{}.{}", ENTRY_PREFIX, self.encoded, ENTRY_EXTENSION)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Derives cache keys with a named digest algorithm
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    algorithm: String,
}

impl KeyDeriver {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Compute the key for `description`
    ///
    /// Fails only when the configured algorithm is not available.
    pub fn derive(&self, description: &Description) -> PropnetResult<CacheKey> {
        let digest = match self.algorithm.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => digest_statements::<Sha256>(description),
            "sha512" | "sha-512" => digest_statements::<Sha512>(description),
            other => return Err(PropnetError::DigestUnavailable(other.to_string())),
        };

        let encoded = encode_filesystem_safe(&digest);
        debug!(
            "Derived cache key {} from {} statements",
            encoded,
            description.len()
        );
        Ok(CacheKey { digest, encoded })
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_DIGEST)
    }
}

/// Statement terminator; parsed atoms never contain whitespace
const STATEMENT_SEPARATOR: &[u8] = b"\n";

fn digest_statements<D: Digest>(description: &Description) -> Vec<u8> {
    let mut hasher = D::new();
    for statement in description.canonical_strings() {
        hasher.update(statement.as_bytes());
        hasher.update(STATEMENT_SEPARATOR);
    }
    hasher.finalize().to_vec()
}

/// Standard base64 with `=`, `/` and `+` swapped for path-safe characters
fn encode_filesystem_safe(digest: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD
        .encode(digest)
        .replace('=', "0")
        .replace('/', "_")
        .replace('+', ".")
}
