//! In-memory backing store that counts queries

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use wayfare_settings::{MemoryCache, SettingsRegistry, SettingsService, defaults};
use wayfare_types::prelude::*;
use wayfare_types::setting::{Setting, SettingType};
use wayfare_types::settings_adapter::SettingsAdapter;

#[derive(Debug, Default)]
pub struct CountingAdapter {
	rows: Mutex<BTreeMap<(String, String), Setting>>,
	reads: AtomicUsize,
	writes: AtomicUsize,
	fail: AtomicBool,
	write_limit: Mutex<Option<usize>>,
}

impl CountingAdapter {
	/// Number of read queries (single, group, all, groups) served so far
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	/// Make every following query fail like an unreachable database
	pub fn set_failing(&self, fail: bool) {
		self.fail.store(fail, Ordering::SeqCst);
	}

	/// Let the next `limit` writes through, then fail every write
	pub fn fail_writes_after(&self, limit: usize) {
		*self.write_limit.lock() = Some(self.writes() + limit);
	}

	/// Put a raw row in place, bypassing the service
	pub fn insert_raw(&self, group: &str, key: &str, value: &str, typ: SettingType) {
		self.rows.lock().insert(
			(group.to_string(), key.to_string()),
			Setting {
				group: group.to_string(),
				key: key.to_string(),
				value: value.to_string(),
				typ,
				updated_at: Timestamp(0),
			},
		);
	}

	fn read_query(&self) -> WfResult<()> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(Error::DbError);
		}
		self.reads.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}

	fn check_write(&self) -> WfResult<()> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(Error::DbError);
		}
		let limit = *self.write_limit.lock();
		if limit.is_some_and(|limit| self.writes() >= limit) {
			return Err(Error::DbError);
		}
		Ok(())
	}
}

#[async_trait]
impl SettingsAdapter for CountingAdapter {
	async fn read_setting(&self, group: &str, key: &str) -> WfResult<Option<Setting>> {
		self.read_query()?;
		Ok(self.rows.lock().get(&(group.to_string(), key.to_string())).cloned())
	}

	async fn list_group(&self, group: &str) -> WfResult<Vec<Setting>> {
		self.read_query()?;
		Ok(self.rows.lock().values().filter(|s| s.group == group).cloned().collect())
	}

	async fn list_settings(&self) -> WfResult<Vec<Setting>> {
		self.read_query()?;
		Ok(self.rows.lock().values().cloned().collect())
	}

	async fn list_groups(&self) -> WfResult<Vec<String>> {
		self.read_query()?;
		let mut groups: Vec<String> = self.rows.lock().keys().map(|(g, _)| g.clone()).collect();
		groups.dedup();
		Ok(groups)
	}

	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Setting> {
		self.check_write()?;
		self.writes.fetch_add(1, Ordering::SeqCst);
		let setting = Setting {
			group: group.to_string(),
			key: key.to_string(),
			value: value.to_string(),
			typ,
			updated_at: now(),
		};
		self.rows.lock().insert((group.to_string(), key.to_string()), setting.clone());
		Ok(setting)
	}

	async fn insert_setting_if_absent(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Option<Setting>> {
		self.check_write()?;
		let mut rows = self.rows.lock();
		let std::collections::btree_map::Entry::Vacant(entry) =
			rows.entry((group.to_string(), key.to_string()))
		else {
			return Ok(None);
		};
		let setting = Setting {
			group: group.to_string(),
			key: key.to_string(),
			value: value.to_string(),
			typ,
			updated_at: now(),
		};
		entry.insert(setting.clone());
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(Some(setting))
	}
}

pub struct Fixture {
	pub service: SettingsService,
	pub adapter: Arc<CountingAdapter>,
	pub cache: MemoryCache,
}

pub fn create_test_service() -> Fixture {
	let adapter = Arc::new(CountingAdapter::default());
	let cache = MemoryCache::unbounded();
	let registry: SettingsRegistry =
		defaults::default_registry().expect("Failed to build default registry");
	let service =
		SettingsService::new(adapter.clone(), Arc::new(cache.clone()), Arc::new(registry));

	Fixture { service, adapter, cache }
}

// vim: ts=4
