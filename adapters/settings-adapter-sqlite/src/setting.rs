//! Settings table access
//!
//! One row per `(group, key)`; values are stored as text next to their type tag.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use wayfare_types::prelude::*;
use wayfare_types::setting::{Setting, SettingType};

const COLUMNS: &str = "\"group\", key, value, type, updated_at";

fn from_row(row: &SqliteRow) -> Result<Setting, sqlx::Error> {
	let value: Option<String> = row.try_get("value")?;
	let typ: String = row.try_get("type")?;
	Ok(Setting {
		group: row.try_get("group")?,
		key: row.try_get("key")?,
		value: value.unwrap_or_default(),
		typ: SettingType::from_tag(&typ),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

fn collect(rows: &[SqliteRow]) -> WfResult<Vec<Setting>> {
	rows.iter()
		.map(from_row)
		.collect::<Result<Vec<_>, _>>()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// Read a single setting
pub(crate) async fn read(db: &SqlitePool, group: &str, key: &str) -> WfResult<Option<Setting>> {
	let row = sqlx::query(&format!("SELECT {} FROM settings WHERE \"group\" = ? AND key = ?", COLUMNS))
		.bind(group)
		.bind(key)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	row.as_ref()
		.map(from_row)
		.transpose()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// List the settings of one group
pub(crate) async fn list_group(db: &SqlitePool, group: &str) -> WfResult<Vec<Setting>> {
	let rows = sqlx::query(&format!("SELECT {} FROM settings WHERE \"group\" = ? ORDER BY key", COLUMNS))
		.bind(group)
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	collect(&rows)
}

/// List every setting
pub(crate) async fn list(db: &SqlitePool) -> WfResult<Vec<Setting>> {
	let rows = sqlx::query(&format!("SELECT {} FROM settings ORDER BY \"group\", key", COLUMNS))
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	collect(&rows)
}

/// List distinct group names
pub(crate) async fn list_groups(db: &SqlitePool) -> WfResult<Vec<String>> {
	let rows = sqlx::query("SELECT DISTINCT \"group\" FROM settings ORDER BY \"group\"")
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	rows.iter()
		.map(|row| row.try_get::<String, _>("group"))
		.collect::<Result<Vec<_>, _>>()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// Update or create a setting
pub(crate) async fn upsert(
	db: &SqlitePool,
	group: &str,
	key: &str,
	value: &str,
	typ: SettingType,
) -> WfResult<Setting> {
	let row = sqlx::query(&format!(
		"INSERT INTO settings (\"group\", key, value, type, updated_at) VALUES (?, ?, ?, ?, ?)
		ON CONFLICT(\"group\", key) DO UPDATE SET
			value = excluded.value, type = excluded.type, updated_at = excluded.updated_at
		RETURNING {}",
		COLUMNS
	))
	.bind(group)
	.bind(key)
	.bind(value)
	.bind(typ.as_str())
	.bind(now().0)
	.fetch_one(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	from_row(&row).inspect_err(|err| warn!("DB: {:#?}", err)).map_err(|_| Error::DbError)
}

/// Create a setting only if the row does not exist yet
pub(crate) async fn insert_if_absent(
	db: &SqlitePool,
	group: &str,
	key: &str,
	value: &str,
	typ: SettingType,
) -> WfResult<Option<Setting>> {
	let row = sqlx::query(&format!(
		"INSERT INTO settings (\"group\", key, value, type, updated_at) VALUES (?, ?, ?, ?, ?)
		ON CONFLICT(\"group\", key) DO NOTHING
		RETURNING {}",
		COLUMNS
	))
	.bind(group)
	.bind(key)
	.bind(value)
	.bind(typ.as_str())
	.bind(now().0)
	.fetch_optional(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	row.as_ref()
		.map(from_row)
		.transpose()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

// vim: ts=4
