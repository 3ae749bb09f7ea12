//! In-process cache store

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use wayfare_types::cache_adapter::{CacheAdapter, CacheValue};

use crate::prelude::*;

/// Process-local cache store.
///
/// `unbounded()` keeps entries until they are forgotten. `bounded(n)` evicts the
/// least recently used entry once `n` entries are held; the settings service
/// sees an evicted entry as an ordinary miss.
#[derive(Clone)]
pub struct MemoryCache {
	cache: Arc<parking_lot::RwLock<LruCache<String, CacheValue>>>,
}

impl MemoryCache {
	pub fn unbounded() -> Self {
		Self { cache: Arc::new(parking_lot::RwLock::new(LruCache::unbounded())) }
	}

	pub fn bounded(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { cache: Arc::new(parking_lot::RwLock::new(LruCache::new(capacity))) }
	}

	pub fn len(&self) -> usize {
		self.cache.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.read().is_empty()
	}

	/// Check presence without touching recency
	pub fn contains(&self, key: &str) -> bool {
		self.cache.read().contains(key)
	}

	/// Drop every entry
	pub fn flush(&self) {
		self.cache.write().clear();
	}
}

impl Default for MemoryCache {
	fn default() -> Self {
		Self::unbounded()
	}
}

impl std::fmt::Debug for MemoryCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryCache")
			.field("len", &self.len())
			.field("cap", &self.cache.read().cap())
			.finish()
	}
}

#[async_trait]
impl CacheAdapter for MemoryCache {
	async fn get(&self, key: &str) -> WfResult<Option<CacheValue>> {
		// LruCache::get updates recency, so it needs the write lock
		let mut cache = self.cache.write();
		Ok(cache.get(key).cloned())
	}

	async fn put_forever(&self, key: &str, value: CacheValue) -> WfResult<()> {
		let mut cache = self.cache.write();
		cache.put(key.to_string(), value);
		Ok(())
	}

	async fn forget(&self, key: &str) -> WfResult<bool> {
		let mut cache = self.cache.write();
		Ok(cache.pop(key).is_some())
	}
}


// vim: ts=4
