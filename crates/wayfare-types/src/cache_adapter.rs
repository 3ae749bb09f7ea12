//! Cache store interface
//!
//! Entries are keyed by opaque strings and live until explicitly forgotten.
//! Implementations may evict on their own; callers treat eviction as a miss.

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;

use crate::prelude::*;
use crate::setting::{GroupedSettings, SettingValue, SettingsMap};

/// Value kinds stored in the settings cache
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
	Setting(SettingValue),
	Group(SettingsMap),
	All(GroupedSettings),
}

/// Conversion between a typed value and its cache representation
pub trait Cacheable: Clone + Send {
	fn from_cache(value: CacheValue) -> Option<Self>;
	fn into_cache(self) -> CacheValue;
}

impl Cacheable for SettingValue {
	fn from_cache(value: CacheValue) -> Option<Self> {
		match value {
			CacheValue::Setting(v) => Some(v),
			_ => None,
		}
	}
	fn into_cache(self) -> CacheValue {
		CacheValue::Setting(self)
	}
}

impl Cacheable for SettingsMap {
	fn from_cache(value: CacheValue) -> Option<Self> {
		match value {
			CacheValue::Group(v) => Some(v),
			_ => None,
		}
	}
	fn into_cache(self) -> CacheValue {
		CacheValue::Group(self)
	}
}

impl Cacheable for GroupedSettings {
	fn from_cache(value: CacheValue) -> Option<Self> {
		match value {
			CacheValue::All(v) => Some(v),
			_ => None,
		}
	}
	fn into_cache(self) -> CacheValue {
		CacheValue::All(self)
	}
}

#[async_trait]
pub trait CacheAdapter: Debug + Send + Sync {
	async fn get(&self, key: &str) -> WfResult<Option<CacheValue>>;

	/// Store without expiry
	async fn put_forever(&self, key: &str, value: CacheValue) -> WfResult<()>;

	/// Remove an entry. Returns whether it was present.
	async fn forget(&self, key: &str) -> WfResult<bool>;
}

/// Return the cached value for `key`, or compute it and cache it forever.
///
/// An entry of the wrong kind (e.g. two key patterns mapping to the same
/// string) is treated as a miss and overwritten.
pub async fn remember_forever<T, F, Fut>(
	cache: &dyn CacheAdapter,
	key: &str,
	compute: F,
) -> WfResult<T>
where
	T: Cacheable,
	F: FnOnce() -> Fut,
	Fut: Future<Output = WfResult<T>>,
{
	if let Some(cached) = cache.get(key).await? {
		if let Some(value) = T::from_cache(cached) {
			debug!("Cache hit: {}", key);
			return Ok(value);
		}
		warn!("Cache entry '{}' holds another value kind, recomputing", key);
	}

	debug!("Cache miss: {}", key);
	let value = compute().await?;
	cache.put_forever(key, value.clone().into_cache()).await?;
	Ok(value)
}

// vim: ts=4
