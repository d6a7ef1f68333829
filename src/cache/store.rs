//! The cache facade
//!
//! `PropNetCache` is the only entry point callers need. It never fails:
//! every digest, I/O, decode or mismatch problem degrades to a miss on load
//! and to a logged, ignored failure on save.

use crate::cache::codec::{CacheEntry, StorageCodec, DEFAULT_COMPRESSION_LEVEL};
use crate::cache::key::{CacheKey, KeyDeriver};
use crate::cache::normalize::{BufferPolicy, GraphNormalizer};
use crate::config::Config;
use crate::description::Description;
use crate::error::{PropnetError, PropnetResult};
use crate::network::Network;
use crate::symbol::{Interner, SymbolPool};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Compiles a description into a network when the cache misses
pub trait NetworkBuilder {
    fn build(&self, description: &Description) -> PropnetResult<Network>;
}

impl<F> NetworkBuilder for F
where
    F: Fn(&Description) -> PropnetResult<Network>,
{
    fn build(&self, description: &Description) -> PropnetResult<Network> {
        self(description)
    }
}

/// Why a lookup did not produce a network
#[derive(Debug)]
pub enum MissReason {
    /// Caching is turned off in the configuration
    Disabled,
    /// No key could be derived
    Digest(PropnetError),
    /// No entry exists for the key
    NotFound,
    /// The entry exists but could not be read or decoded
    Unreadable(PropnetError),
    /// The entry was written for a different description
    Mismatch(PropnetError),
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("cache disabled"),
            Self::Digest(e) | Self::Unreadable(e) | Self::Mismatch(e) => write!(f, "{}", e),
            Self::NotFound => f.write_str("no cache entry"),
        }
    }
}

/// Outcome of a cache lookup
#[derive(Debug)]
pub enum CacheLookup {
    Hit(Network),
    Miss(MissReason),
}

impl CacheLookup {
    pub fn into_network(self) -> Option<Network> {
        match self {
            Self::Hit(network) => Some(network),
            Self::Miss(_) => None,
        }
    }
}

/// Content-addressed cache of compiled networks
pub struct PropNetCache {
    codec: StorageCodec,
    deriver: KeyDeriver,
    pool: Arc<dyn Interner>,
    policy: BufferPolicy,
    enabled: bool,
}

impl PropNetCache {
    /// Cache in `dir` with default settings and the given symbol pool
    pub fn new(dir: impl Into<PathBuf>, pool: Arc<dyn Interner>) -> Self {
        Self {
            codec: StorageCodec::new(dir, DEFAULT_COMPRESSION_LEVEL),
            deriver: KeyDeriver::default(),
            pool,
            policy: BufferPolicy::default(),
            enabled: true,
        }
    }

    /// Cache configured from `config`, sharing the process-wide pool
    ///
    /// `dir_override` wins over the configured directory.
    pub fn from_config(config: &Config, dir_override: Option<&Path>) -> Self {
        let dir = dir_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.cache.resolved_dir());
        Self::new(dir, SymbolPool::global())
            .with_digest(config.cache.digest.clone())
            .with_compression_level(config.cache.compression_level)
            .with_buffer_policy(config.normalize.buffer_policy)
            .with_enabled(config.cache.enabled)
    }

    pub fn with_digest(mut self, algorithm: impl Into<String>) -> Self {
        self.deriver = KeyDeriver::new(algorithm);
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.codec = StorageCodec::new(self.codec.dir().to_path_buf(), level);
        self
    }

    pub fn with_buffer_policy(mut self, policy: BufferPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        self.codec.dir()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Key of the entry for `description`
    pub fn key(&self, description: &Description) -> PropnetResult<CacheKey> {
        self.deriver.derive(description)
    }

    /// Path of the entry for `description`
    pub fn entry_path(&self, description: &Description) -> PropnetResult<PathBuf> {
        Ok(self.codec.entry_path(&self.key(description)?))
    }

    /// Load the network for `description`, if a valid entry exists
    pub fn load(&self, description: &Description) -> Option<Network> {
        self.lookup(description).into_network()
    }

    /// Load the network for `description`, reporting why it missed
    pub fn lookup(&self, description: &Description) -> CacheLookup {
        if !self.enabled {
            debug!("Propnet cache disabled, skipping lookup");
            return CacheLookup::Miss(MissReason::Disabled);
        }

        let key = match self.key(description) {
            Ok(key) => key,
            Err(e) => {
                warn!("Cannot derive propnet cache key: {}", e);
                return CacheLookup::Miss(MissReason::Digest(e));
            }
        };

        let stored = match self.codec.read(&key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                info!("Could not find propnet in cache");
                return CacheLookup::Miss(MissReason::NotFound);
            }
            Err(e) => {
                warn!("Failed to read propnet cache entry: {}", e);
                return CacheLookup::Miss(MissReason::Unreadable(e));
            }
        };

        if let Err(e) = description.verify_matches(&stored.description) {
            warn!("Ignoring propnet cache entry {}: {}", key, e);
            return CacheLookup::Miss(MissReason::Mismatch(e));
        }

        info!("Loaded propnet from cache entry {}", key);
        let network = GraphNormalizer::new(&*self.pool)
            .with_policy(self.policy)
            .normalize(stored.network);
        CacheLookup::Hit(network)
    }

    /// Store `network` for `description`, ignoring any failure
    pub fn save(&self, description: &Description, network: &Network) {
        if let Err(e) = self.try_save(description, network) {
            warn!("Failed to save propnet to cache: {}", e);
        }
    }

    /// Store `network` for `description`, reporting failures
    ///
    /// The network is written as given; repair happens on load.
    pub fn try_save(&self, description: &Description, network: &Network) -> PropnetResult<()> {
        if !self.enabled {
            debug!("Propnet cache disabled, not saving");
            return Ok(());
        }

        let key = self.key(description)?;
        self.codec.write(&key, description, network)?;
        info!(
            "Saved propnet ({} components) to cache entry {}",
            network.len(),
            key
        );
        Ok(())
    }

    /// Load from cache, or build with `builder` and save the result
    ///
    /// A freshly built network is returned as built, without normalization.
    pub fn load_or_build(
        &self,
        description: &Description,
        builder: &dyn NetworkBuilder,
    ) -> PropnetResult<Network> {
        match self.lookup(description) {
            CacheLookup::Hit(network) => Ok(network),
            CacheLookup::Miss(reason) => {
                debug!("Building propnet after cache miss ({})", reason);
                let network = builder.build(description)?;
                self.save(description, &network);
                Ok(network)
            }
        }
    }

    /// Cache entry files currently on disk
    pub fn entries(&self) -> PropnetResult<Vec<CacheEntry>> {
        self.codec.entries()
    }

    /// Delete every cache entry file
    ///
    /// Only for explicit user requests; lookups never delete entries.
    pub fn clear(&self) -> PropnetResult<usize> {
        let removed = self.codec.clear()?;
        info!("Removed {} propnet cache entries", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::normalize::fan_out_violations;
    use crate::network::{Component, Role, ANONYMOUS_NAME};
    use crate::symbol::Symbol;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn description() -> Description {
        "(role p1) (role p2) (<= (legal p1 noop))".parse().unwrap()
    }

    /// One AND gate feeding two OR gates directly
    fn network() -> Network {
        let mut net = Network::new(vec![
            Role::new(Symbol::new("p1")),
            Role::new(Symbol::new("p2")),
        ]);
        let a = net.add_component(Component::proposition("(true (control p1))"));
        let b = net.add_component(Component::proposition("(does p1 noop)"));
        let and = net.add_component(Component::And);
        let or1 = net.add_component(Component::Or);
        let or2 = net.add_component(Component::Or);
        let legal = net.add_component(Component::proposition("(legal p1 noop)"));
        let goal = net.add_component(Component::proposition("(goal p1 100)"));
        net.connect(a, and);
        net.connect(b, and);
        net.connect(and, or1);
        net.connect(and, or2);
        net.connect(or1, legal);
        net.connect(or2, goal);
        net
    }

    fn cache(temp: &TempDir) -> PropNetCache {
        PropNetCache::new(temp.path().join("propnets"), Arc::new(SymbolPool::new()))
    }

    #[test]
    fn save_then_load_inserts_buffer() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        cache.save(&description(), &network());

        let loaded = cache.load(&description()).expect("cache hit");

        let and = loaded
            .components()
            .find(|(_, c)| **c == Component::And)
            .map(|(id, _)| id)
            .unwrap();
        let outputs = loaded.outputs(and);
        assert_eq!(outputs.len(), 1);
        let buffer = outputs[0];
        assert_eq!(
            loaded.component(buffer).and_then(Component::name).map(|n| n.as_str()),
            Some(ANONYMOUS_NAME)
        );
        let fed: Vec<_> = loaded
            .outputs(buffer)
            .into_iter()
            .map(|id| loaded.component(id).unwrap().clone())
            .collect();
        assert_eq!(fed, vec![Component::Or, Component::Or]);
        assert!(fan_out_violations(&loaded, BufferPolicy::FanOut).is_empty());
    }

    #[test]
    fn save_writes_network_unnormalized() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let net = network();
        cache.save(&description(), &net);

        let key = cache.key(&description()).unwrap();
        let stored = cache.codec.read(&key).unwrap().unwrap();
        assert_eq!(stored.network.edges(), net.edges());
        assert_eq!(stored.network.len(), net.len());
    }

    #[test]
    fn roundtrip_matches_direct_normalization() {
        let temp = TempDir::new().unwrap();
        let pool = Arc::new(SymbolPool::new());
        let cache = PropNetCache::new(temp.path(), pool.clone());
        cache.save(&description(), &network());

        let loaded = cache.load(&description()).unwrap();
        let direct = GraphNormalizer::new(&*pool).normalize(network());

        assert_eq!(loaded.edges(), direct.edges());
        assert_eq!(loaded.len(), direct.len());
    }

    #[test]
    fn loaded_names_come_from_the_pool() {
        let temp = TempDir::new().unwrap();
        let pool = Arc::new(SymbolPool::new());
        let cache = PropNetCache::new(temp.path(), pool.clone());
        cache.save(&description(), &network());

        let loaded = cache.load(&description()).unwrap();

        for (_, name) in loaded.propositions() {
            assert!(name.ptr_eq(&pool.intern(name)));
        }
        assert!(loaded.roles()[1].name().ptr_eq(&pool.intern("p2")));
    }

    #[test]
    fn missing_entry_is_miss_without_writing() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);

        let lookup = cache.lookup(&description());

        assert!(matches!(lookup, CacheLookup::Miss(MissReason::NotFound)));
        assert!(!cache.dir().exists());
    }

    #[test]
    fn shorter_description_is_mismatch() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let stored = description();
        let key = cache.key(&stored).unwrap();
        // Plant the entry under the key of a different description
        let requested: Description = "(role p1) (role p2)".parse().unwrap();
        let requested_key = cache.key(&requested).unwrap();
        cache.codec.write(&key, &stored, &network()).unwrap();
        fs::rename(
            cache.codec.entry_path(&key),
            cache.codec.entry_path(&requested_key),
        )
        .unwrap();

        let lookup = cache.lookup(&requested);

        match lookup {
            CacheLookup::Miss(MissReason::Mismatch(e)) => {
                assert!(e.to_string().contains("length mismatch"))
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn split_and_joined_atoms_keep_separate_entries() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let split: Description = "a b".parse().unwrap();
        let joined: Description = "ab".parse().unwrap();

        cache.save(&split, &network());
        cache.save(&joined, &network());

        assert_eq!(cache.entries().unwrap().len(), 2);
        assert!(cache.load(&split).is_some());
        assert!(cache.load(&joined).is_some());
    }

    #[test]
    fn differing_statement_is_mismatch() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let requested: Description = "(role p1) (role p2) (<= (legal p2 noop))".parse().unwrap();
        let key = cache.key(&requested).unwrap();
        cache.codec.write(&key, &description(), &network()).unwrap();

        assert!(matches!(
            cache.lookup(&requested),
            CacheLookup::Miss(MissReason::Mismatch(_))
        ));
        assert!(cache.load(&requested).is_none());
    }

    #[test]
    fn truncated_entry_is_miss_and_kept() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        cache.save(&description(), &network());
        let path = cache.entry_path(&description()).unwrap();
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let lookup = cache.lookup(&description());

        assert!(matches!(
            lookup,
            CacheLookup::Miss(MissReason::Unreadable(PropnetError::Decode { .. }))
        ));
        assert!(path.exists());
    }

    #[test]
    fn unknown_digest_misses_and_skips_save() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp).with_digest("whirlpool");

        cache.save(&description(), &network());

        assert!(!cache.dir().exists());
        assert!(matches!(
            cache.lookup(&description()),
            CacheLookup::Miss(MissReason::Digest(_))
        ));
    }

    #[test]
    fn unwritable_dir_is_ignored_on_save() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let cache = PropNetCache::new(blocker.join("cache"), Arc::new(SymbolPool::new()));

        cache.save(&description(), &network());
        assert!(cache.try_save(&description(), &network()).is_err());
        assert!(cache.load(&description()).is_none());
    }

    #[test]
    fn disabled_cache_never_hits_or_writes() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp).with_enabled(false);

        cache.save(&description(), &network());

        assert!(!cache.dir().exists());
        assert!(matches!(
            cache.lookup(&description()),
            CacheLookup::Miss(MissReason::Disabled)
        ));
    }

    #[test]
    fn load_or_build_builds_once() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let calls = Cell::new(0);
        let builder = |_: &Description| -> PropnetResult<Network> {
            calls.set(calls.get() + 1);
            Ok(network())
        };

        let built = cache.load_or_build(&description(), &builder).unwrap();
        let loaded = cache.load_or_build(&description(), &builder).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(built.edges(), network().edges());
        assert_eq!(loaded.len(), built.len() + 1);
    }

    #[test]
    fn builder_errors_propagate() {
        let temp = TempDir::new().unwrap();
        let cache = cache(&temp);
        let builder =
            |_: &Description| -> PropnetResult<Network> { Err(PropnetError::Build("boom".into())) };

        let err = cache.load_or_build(&description(), &builder).unwrap_err();
        assert!(matches!(err, PropnetError::Build(_)));
        assert!(cache.entries().unwrap().is_empty());
    }

    #[test]
    fn from_config_uses_override_dir() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.digest = "sha512".to_string();

        let cache = PropNetCache::from_config(&config, Some(temp.path()));

        assert_eq!(cache.dir(), temp.path());
        assert_eq!(cache.key(&description()).unwrap().digest().len(), 64);
    }
}
