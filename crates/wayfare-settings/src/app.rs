//! App builder - configures logging and wires the settings service

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use wayfare_types::cache_adapter::CacheAdapter;
use wayfare_types::settings_adapter::SettingsAdapter;

use crate::cache::MemoryCache;
use crate::defaults::{self, SettingsRegistry};
use crate::prelude::*;
use crate::service::SettingsService;

pub const ENV_CACHE_CAPACITY: &str = "WAYFARE_SETTINGS_CACHE_CAPACITY";
pub const ENV_SEED_DEFAULTS: &str = "WAYFARE_SETTINGS_SEED";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsOpts {
	/// Capacity of the built-in memory cache. `None` keeps entries forever.
	pub cache_capacity: Option<usize>,
	/// Write catalog defaults missing from the backing store on build
	pub seed_defaults: bool,
}

impl SettingsOpts {
	/// Read options from `WAYFARE_SETTINGS_*` environment variables
	pub fn from_env() -> WfResult<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WfResult<Self> {
		let cache_capacity = match lookup(ENV_CACHE_CAPACITY) {
			Some(v) if !v.trim().is_empty() => match v.trim().parse::<usize>() {
				Ok(capacity) if capacity > 0 => Some(capacity),
				_ => {
					return Err(Error::ConfigError(format!(
						"{} must be a positive number, got '{}'",
						ENV_CACHE_CAPACITY, v
					)));
				}
			},
			_ => None,
		};
		let seed_defaults = match lookup(ENV_SEED_DEFAULTS).as_deref().map(str::trim) {
			None | Some("" | "0" | "false") => false,
			Some("1" | "true") => true,
			Some(v) => {
				return Err(Error::ConfigError(format!(
					"{} must be true or false, got '{}'",
					ENV_SEED_DEFAULTS, v
				)));
			}
		};

		Ok(Self { cache_capacity, seed_defaults })
	}
}

/// Install the `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Does nothing when the host already installed one.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

pub struct SettingsAppBuilder {
	opts: SettingsOpts,
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	cache_adapter: Option<Arc<dyn CacheAdapter>>,
	registry: Option<SettingsRegistry>,
}

impl SettingsAppBuilder {
	pub fn new() -> Self {
		init_logging();
		SettingsAppBuilder {
			opts: SettingsOpts::default(),
			settings_adapter: None,
			cache_adapter: None,
			registry: None,
		}
	}

	// Opts
	pub fn opts(&mut self, opts: SettingsOpts) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn cache_capacity(&mut self, capacity: usize) -> &mut Self {
		self.opts.cache_capacity = Some(capacity);
		self
	}
	pub fn seed_defaults(&mut self, seed: bool) -> &mut Self {
		self.opts.seed_defaults = seed;
		self
	}
	pub fn registry(&mut self, registry: SettingsRegistry) -> &mut Self {
		self.registry = Some(registry);
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.settings_adapter = Some(settings_adapter);
		self
	}
	pub fn cache_adapter(&mut self, cache_adapter: Arc<dyn CacheAdapter>) -> &mut Self {
		self.cache_adapter = Some(cache_adapter);
		self
	}

	pub async fn build(&mut self) -> WfResult<SettingsService> {
		let Some(settings_adapter) = self.settings_adapter.take() else {
			return Err(Error::ConfigError("No settings adapter configured".into()));
		};
		let cache_adapter = match self.cache_adapter.take() {
			Some(cache) => cache,
			None => match self.opts.cache_capacity {
				Some(0) => {
					return Err(Error::ConfigError("Cache capacity must be positive".into()));
				}
				Some(capacity) => Arc::new(MemoryCache::bounded(capacity)) as Arc<dyn CacheAdapter>,
				None => Arc::new(MemoryCache::unbounded()),
			},
		};
		let registry = match self.registry.take() {
			Some(registry) => registry,
			None => defaults::default_registry()?,
		};
		info!("Settings registry holds {} definitions", registry.len());

		let service = SettingsService::new(settings_adapter, cache_adapter, Arc::new(registry));
		if self.opts.seed_defaults {
			service.seed_defaults().await?;
		}
		Ok(service)
	}
}

impl Default for SettingsAppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
		move |name| vars.get(name).cloned()
	}

	#[test]
	fn test_opts_default_when_unset() {
		let opts = SettingsOpts::from_lookup(lookup(&[])).unwrap();
		assert_eq!(opts, SettingsOpts::default());
	}

	#[test]
	fn test_opts_from_env_values() {
		let opts = SettingsOpts::from_lookup(lookup(&[
			(ENV_CACHE_CAPACITY, "500"),
			(ENV_SEED_DEFAULTS, "true"),
		]))
		.unwrap();
		assert_eq!(opts.cache_capacity, Some(500));
		assert!(opts.seed_defaults);
	}

	#[test]
	fn test_opts_reject_garbage() {
		let res = SettingsOpts::from_lookup(lookup(&[(ENV_CACHE_CAPACITY, "lots")]));
		assert!(matches!(res, Err(Error::ConfigError(_))));

		let res = SettingsOpts::from_lookup(lookup(&[(ENV_SEED_DEFAULTS, "maybe")]));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_opts_reject_zero_capacity() {
		let res = SettingsOpts::from_lookup(lookup(&[(ENV_CACHE_CAPACITY, "0")]));
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_opts_deserialize() {
		let opts: SettingsOpts =
			serde_json::from_str(r#"{"cacheCapacity": 64, "seedDefaults": true}"#).unwrap();
		assert_eq!(opts, SettingsOpts { cache_capacity: Some(64), seed_defaults: true });
	}

	#[tokio::test]
	async fn test_build_requires_settings_adapter() {
		let res = SettingsAppBuilder::new().build().await;
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
