//! Configuration schema for propnet-cache
//!
//! Configuration is stored at `~/.config/propnet-cache/config.toml`

use crate::cache::codec::DEFAULT_COMPRESSION_LEVEL;
use crate::cache::key::DEFAULT_DIGEST;
use crate::cache::normalize::BufferPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache storage settings
    pub cache: CacheConfig,

    /// Load-time network repair settings
    pub normalize: NormalizeConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the propnet cache (default: true)
    pub enabled: bool,

    /// Cache directory (default: platform cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Digest algorithm for cache keys: "sha256" or "sha512"
    pub digest: String,

    /// Gzip level for new entries, 0-9
    pub compression_level: u32,
}

impl CacheConfig {
    /// Directory entries live in, falling back to the platform cache dir
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_cache_dir)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            digest: DEFAULT_DIGEST.to_string(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

/// Network repair configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Which gate-to-gate edges get a pass-through proposition
    pub buffer_policy: BufferPolicy,
}

/// Platform cache directory for propnet entries
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("propnet-cache")
}
