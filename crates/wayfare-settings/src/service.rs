//! Settings service: cache-aside access to the settings table
//!
//! Reads consult the cache first and fall back to the backing store, caching
//! the resolved value with no expiry. Writes go to the backing store and then
//! drop the affected cache entries; the next read recomputes them.

use std::sync::Arc;
use tracing::{info, warn};

use wayfare_types::cache_adapter::{CacheAdapter, remember_forever};
use wayfare_types::setting::{GroupedSettings, Setting, SettingValue, SettingsMap};
use wayfare_types::settings_adapter::SettingsAdapter;

use crate::defaults::{self, SettingsRegistry};
use crate::key::{SettingKey, all_cache_key, group_cache_key};
use crate::prelude::*;

pub struct SettingsService {
	adapter: Arc<dyn SettingsAdapter>,
	cache: Arc<dyn CacheAdapter>,
	registry: Arc<SettingsRegistry>,
}

impl SettingsService {
	pub fn new(
		adapter: Arc<dyn SettingsAdapter>,
		cache: Arc<dyn CacheAdapter>,
		registry: Arc<SettingsRegistry>,
	) -> Self {
		Self { adapter, cache, registry }
	}

	/// Get a setting, or `default` when no row exists.
	///
	/// The resolved value (the default included) is cached until the next
	/// `set` of the same key.
	pub async fn get(&self, name: &str, default: impl Into<SettingValue>) -> WfResult<SettingValue> {
		let key = SettingKey::parse(name);
		let cache_key = key.cache_key();
		let default = default.into();
		let adapter = &self.adapter;

		remember_forever(self.cache.as_ref(), &cache_key, move || async move {
			match adapter.read_setting(&key.group, &key.key).await? {
				Some(setting) => setting.decoded(),
				None => Ok(default),
			}
		})
		.await
	}

	/// Create or overwrite a setting. The stored type tag follows the value variant.
	pub async fn set(&self, name: &str, value: impl Into<SettingValue>) -> WfResult<Setting> {
		let key = SettingKey::parse(name);
		let value = value.into();

		let setting = self
			.adapter
			.upsert_setting(&key.group, &key.key, &value.encode(), value.setting_type())
			.await?;

		self.cache.forget(&key.cache_key()).await?;
		self.forget_views(&key.group).await?;

		info!("Setting '{}' updated ({})", key, setting.typ);
		Ok(setting)
	}

	/// Update several keys of one group at once
	pub async fn set_many<I, K, V>(&self, group: &str, entries: I) -> WfResult<Vec<Setting>>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<SettingValue>,
	{
		let mut saved = Vec::new();
		let mut failed = None;
		for (key, value) in entries {
			let key = SettingKey::new(group, key);
			let value = value.into();
			let res = self
				.adapter
				.upsert_setting(&key.group, &key.key, &value.encode(), value.setting_type())
				.await;
			match res {
				Ok(setting) => saved.push(setting),
				Err(err) => {
					failed = Some(err);
					break;
				}
			}
			if let Err(err) = self.cache.forget(&key.cache_key()).await {
				failed = Some(err);
				break;
			}
		}

		// Rows written before a failure are persisted, so their views go stale too
		if !saved.is_empty() {
			self.forget_views(group).await?;
		}
		if let Some(err) = failed {
			warn!("Bulk update of group '{}' stopped after {} settings", group, saved.len());
			return Err(err);
		}

		info!("Updated {} settings in group '{}'", saved.len(), group);
		Ok(saved)
	}

	/// All settings of one group, by key
	pub async fn group(&self, group: &str) -> WfResult<SettingsMap> {
		let adapter = &self.adapter;
		remember_forever(self.cache.as_ref(), &group_cache_key(group), move || async move {
			let mut settings = SettingsMap::new();
			for setting in adapter.list_group(group).await? {
				let value = setting.decoded()?;
				settings.insert(setting.key, value);
			}
			Ok::<_, Error>(settings)
		})
		.await
	}

	/// All settings, by group then key
	pub async fn all(&self) -> WfResult<GroupedSettings> {
		let adapter = &self.adapter;
		remember_forever(self.cache.as_ref(), all_cache_key(), move || async move {
			let mut grouped = GroupedSettings::new();
			for setting in adapter.list_settings().await? {
				let value = setting.decoded()?;
				grouped.entry(setting.group).or_default().insert(setting.key, value);
			}
			Ok::<_, Error>(grouped)
		})
		.await
	}

	/// Drop the all-groups view and every group view.
	///
	/// Single-key entries stay cached until their own `set`.
	pub async fn clear_cache(&self) -> WfResult<()> {
		self.cache.forget(all_cache_key()).await?;

		let groups = self.adapter.list_groups().await?;
		for group in &groups {
			self.cache.forget(&group_cache_key(group)).await?;
		}

		info!("Settings cache cleared ({} groups)", groups.len());
		Ok(())
	}

	/// Write catalog defaults that have no row yet. Returns the number written.
	pub async fn seed_defaults(&self) -> WfResult<usize> {
		let mut created = 0;
		for def in self.registry.list() {
			let inserted = self
				.adapter
				.insert_setting_if_absent(
					&def.key.group,
					&def.key.key,
					&def.default.encode(),
					def.default.setting_type(),
				)
				.await?;
			if inserted.is_none() {
				continue;
			}
			self.cache.forget(&def.key.cache_key()).await?;
			self.forget_views(&def.key.group).await?;
			created += 1;
		}

		if created > 0 {
			info!("Seeded {} default settings", created);
		}
		Ok(created)
	}

	async fn forget_views(&self, group: &str) -> WfResult<()> {
		self.cache.forget(&group_cache_key(group)).await?;
		self.cache.forget(all_cache_key()).await?;
		Ok(())
	}

	// Typed getters
	//***************
	pub async fn get_string(&self, name: &str, default: &str) -> WfResult<String> {
		match self.get(name, default).await? {
			SettingValue::Text(s) => Ok(s),
			v => Err(mismatch(name, "a string", &v)),
		}
	}

	pub async fn get_bool(&self, name: &str, default: bool) -> WfResult<bool> {
		match self.get(name, default).await? {
			SettingValue::Bool(b) => Ok(b),
			v => Err(mismatch(name, "a boolean", &v)),
		}
	}

	pub async fn get_int(&self, name: &str, default: i64) -> WfResult<i64> {
		match self.get(name, default).await? {
			SettingValue::Int(i) => Ok(i),
			v => Err(mismatch(name, "an integer", &v)),
		}
	}

	pub async fn get_float(&self, name: &str, default: f64) -> WfResult<f64> {
		let value = self.get(name, default).await?;
		value.as_float().ok_or_else(|| mismatch(name, "a number", &value))
	}

	// Convenience accessors
	//***********************
	pub async fn site_name(&self) -> WfResult<String> {
		let default = self.catalog_text(defaults::SITE_NAME, defaults::DEFAULT_SITE_NAME);
		self.get_string(defaults::SITE_NAME, &default).await
	}

	pub async fn site_email(&self) -> WfResult<String> {
		let default = self.catalog_text(defaults::SITE_EMAIL, defaults::DEFAULT_SITE_EMAIL);
		self.get_string(defaults::SITE_EMAIL, &default).await
	}

	pub async fn currency(&self) -> WfResult<String> {
		let default = self.catalog_text(defaults::CURRENCY, defaults::DEFAULT_CURRENCY);
		self.get_string(defaults::CURRENCY, &default).await
	}

	pub async fn currency_symbol(&self) -> WfResult<String> {
		let default = self.catalog_text(defaults::CURRENCY_SYMBOL, defaults::DEFAULT_CURRENCY_SYMBOL);
		self.get_string(defaults::CURRENCY_SYMBOL, &default).await
	}

	pub async fn maintenance_mode(&self) -> WfResult<bool> {
		let default = self
			.registry
			.default_of(defaults::MAINTENANCE_MODE)
			.and_then(SettingValue::as_bool)
			.unwrap_or(defaults::DEFAULT_MAINTENANCE_MODE);
		self.get_bool(defaults::MAINTENANCE_MODE, default).await
	}

	/// Catalog default of a text setting, or `fallback` when the registry lacks it
	fn catalog_text(&self, name: &str, fallback: &str) -> String {
		self.registry
			.default_of(name)
			.and_then(SettingValue::as_str)
			.unwrap_or(fallback)
			.to_string()
	}

	/// Get reference to registry (for listing known settings)
	pub fn registry(&self) -> &Arc<SettingsRegistry> {
		&self.registry
	}
}

impl std::fmt::Debug for SettingsService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsService")
			.field("adapter", &self.adapter)
			.field("cache", &self.cache)
			.field("registry", &self.registry.len())
			.finish()
	}
}

fn mismatch(name: &str, expected: &str, value: &SettingValue) -> Error {
	Error::ValidationError(format!(
		"Setting '{}' is not {}, got {}",
		name,
		expected,
		value.type_name()
	))
}

// vim: ts=4
