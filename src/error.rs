//! Error types for propnet-cache
//!
//! All modules use `PropnetResult<T>` as their return type. The cache
//! variants (`DigestUnavailable`, `Io`, `Decode`, `DescriptionMismatch`)
//! never escape `PropNetCache::load`/`save`; they are degraded to a miss.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for propnet-cache operations
pub type PropnetResult<T> = Result<T, PropnetError>;

/// All errors that can occur in propnet-cache
#[derive(Error, Debug)]
pub enum PropnetError {
    // Cache errors
    #[error("Digest algorithm not available: {0}")]
    DigestUnavailable(String),

    #[error("Failed to decode cache entry {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Cached description does not match: {reason}")]
    DescriptionMismatch { reason: String },

    // Description errors
    #[error("Failed to parse description at line {line}: {reason}")]
    DescriptionParse { line: usize, reason: String },

    // Network errors
    #[error("Invalid network: {0}")]
    NetworkInvalid(String),

    #[error("Network builder failed: {0}")]
    Build(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl PropnetError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a decode error for a cache entry
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DigestUnavailable(_) => Some("Set cache.digest to sha256 or sha512"),
            Self::ConfigInvalid { .. } => Some("Run: propnet-cache config init --force"),
            Self::Decode { .. } => Some("Run: propnet-cache clear to drop unreadable entries"),
            Self::DescriptionParse { .. } => {
                Some("Descriptions are s-expressions, one statement per top-level form")
            }
            _ => None,
        }
    }
}
