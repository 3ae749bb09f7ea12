//! Backing store interface for settings rows

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::setting::{Setting, SettingType};

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Read the row for an exact `(group, key)` pair
	async fn read_setting(&self, group: &str, key: &str) -> WfResult<Option<Setting>>;

	/// List every row of one group
	async fn list_group(&self, group: &str) -> WfResult<Vec<Setting>>;

	/// List every row
	async fn list_settings(&self) -> WfResult<Vec<Setting>>;

	/// List the distinct groups that have at least one row
	async fn list_groups(&self) -> WfResult<Vec<String>>;

	/// Create or overwrite the row for `(group, key)` and return it as persisted
	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Setting>;

	/// Create the row for `(group, key)` unless one exists already.
	///
	/// Returns the new row, or `None` when an existing row was left untouched.
	async fn insert_setting_if_absent(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Option<Setting>>;
}

// vim: ts=4
