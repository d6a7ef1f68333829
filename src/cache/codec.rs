//! On-disk format of cache entries
//!
//! Each entry is a gzip stream holding two JSON documents back to back:
//! the description the network was built from, then the network itself.
//! Writes are not atomic; a torn write decodes as corrupt and is a miss.

use crate::cache::key::{CacheKey, ENTRY_EXTENSION, ENTRY_PREFIX};
use crate::description::Description;
use crate::error::{PropnetError, PropnetResult};
use crate::network::Network;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default gzip level for new entries
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// A decoded (description, network) pair
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub description: Description,
    pub network: Network,
}

/// A cache file found in the cache directory
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Reads and writes cache entries inside one directory
#[derive(Debug, Clone)]
pub struct StorageCodec {
    dir: PathBuf,
    compression: Compression,
}

impl StorageCodec {
    /// Create a codec for `dir`; levels above 9 are clamped
    pub fn new(dir: impl Into<PathBuf>, compression_level: u32) -> Self {
        Self {
            dir: dir.into(),
            compression: Compression::new(compression_level.min(9)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `key`
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Write `description` and `network` as the entry for `key`
    pub fn write(
        &self,
        key: &CacheKey,
        description: &Description,
        network: &Network,
    ) -> PropnetResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            PropnetError::io(format!("creating cache directory {}", self.dir.display()), e)
        })?;

        let path = self.entry_path(key);
        let context = || format!("writing cache entry {}", path.display());

        let file = File::create(&path).map_err(|e| PropnetError::io(context(), e))?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), self.compression);

        serde_json::to_writer(&mut encoder, description)
            .map_err(|e| PropnetError::io(context(), e.into()))?;
        encoder
            .write_all(b"\n")
            .map_err(|e| PropnetError::io(context(), e))?;
        serde_json::to_writer(&mut encoder, network)
            .map_err(|e| PropnetError::io(context(), e.into()))?;

        encoder
            .finish()
            .and_then(|mut writer| writer.flush())
            .map_err(|e| PropnetError::io(context(), e))?;

        debug!("Wrote cache entry {}", path.display());
        Ok(())
    }

    /// Read the entry for `key`
    ///
    /// A missing entry is `Ok(None)`. Anything that cannot be decoded into a
    /// consistent (description, network) pair is a `Decode` error.
    pub fn read(&self, key: &CacheKey) -> PropnetResult<Option<StoredEntry>> {
        let path = self.entry_path(key);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No cache entry at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(PropnetError::io(
                    format!("opening cache entry {}", path.display()),
                    e,
                ))
            }
        };

        let decoder = GzDecoder::new(BufReader::new(file));
        let mut de = serde_json::Deserializer::from_reader(decoder);

        let description = Description::deserialize(&mut de)
            .map_err(|e| PropnetError::decode(&path, format!("description: {}", e)))?;
        let network = Network::deserialize(&mut de)
            .map_err(|e| PropnetError::decode(&path, format!("network: {}", e)))?;
        de.end()
            .map_err(|e| PropnetError::decode(&path, format!("trailing data: {}", e)))?;

        network
            .validate()
            .map_err(|e| PropnetError::decode(&path, e))?;

        debug!(
            "Decoded cache entry {} ({} statements, {} components)",
            path.display(),
            description.len(),
            network.len()
        );
        Ok(Some(StoredEntry {
            description,
            network,
        }))
    }

    /// List cache entry files, sorted by name
    pub fn entries(&self) -> PropnetResult<Vec<CacheEntry>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PropnetError::io("reading cache directory", e)),
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|e| PropnetError::io("reading cache entry", e))?;
            let name = item.file_name().to_string_lossy().into_owned();
            if !is_entry_name(&name) {
                continue;
            }
            let metadata = item
                .metadata()
                .map_err(|e| PropnetError::io(format!("reading metadata of {}", name), e))?;
            if !metadata.is_file() {
                continue;
            }
            entries.push(CacheEntry {
                name,
                path: item.path(),
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Delete every cache entry file, returning how many were removed
    pub fn clear(&self) -> PropnetResult<usize> {
        let entries = self.entries()?;
        for entry in &entries {
            fs::remove_file(&entry.path).map_err(|e| {
                PropnetError::io(format!("removing cache entry {}", entry.path.display()), e)
            })?;
        }
        Ok(entries.len())
    }
}

fn is_entry_name(name: &str) -> bool {
    name.starts_with(ENTRY_PREFIX)
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == ENTRY_EXTENSION)
}
