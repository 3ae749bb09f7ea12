//! SQLite-backed settings adapter for Wayfare.
//!
//! Stores the settings table in a single SQLite database file in WAL mode.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod schema;
mod setting;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use wayfare_types::prelude::*;
use wayfare_types::setting::{Setting, SettingType};
use wayfare_types::settings_adapter::SettingsAdapter;

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	/// Open (or create) the database file at `path` and ensure the schema exists
	pub async fn new(path: impl AsRef<Path>) -> WfResult<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("Settings database opened at {}", path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn read_setting(&self, group: &str, key: &str) -> WfResult<Option<Setting>> {
		setting::read(&self.db, group, key).await
	}

	async fn list_group(&self, group: &str) -> WfResult<Vec<Setting>> {
		setting::list_group(&self.db, group).await
	}

	async fn list_settings(&self) -> WfResult<Vec<Setting>> {
		setting::list(&self.db).await
	}

	async fn list_groups(&self) -> WfResult<Vec<String>> {
		setting::list_groups(&self.db).await
	}

	async fn upsert_setting(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Setting> {
		setting::upsert(&self.db, group, key, value, typ).await
	}

	async fn insert_setting_if_absent(
		&self,
		group: &str,
		key: &str,
		value: &str,
		typ: SettingType,
	) -> WfResult<Option<Setting>> {
		setting::insert_if_absent(&self.db, group, key, value, typ).await
	}
}

// vim: ts=4
