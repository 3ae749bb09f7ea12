//! Settings adapter tests
//!
//! Exercises the settings table directly and through the settings service

use std::sync::Arc;
use tempfile::TempDir;

use wayfare_settings::{MemoryCache, SettingsAppBuilder, SettingsService};
use wayfare_settings_adapter_sqlite::SettingsAdapterSqlite;
use wayfare_types::error::Error;
use wayfare_types::setting::{SettingType, SettingValue};
use wayfare_types::settings_adapter::SettingsAdapter;

async fn create_test_adapter() -> (SettingsAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

async fn create_test_service() -> (SettingsService, Arc<SettingsAdapterSqlite>, TempDir) {
	let (adapter, temp_dir) = create_test_adapter().await;
	let adapter = Arc::new(adapter);
	let service = SettingsAppBuilder::new()
		.settings_adapter(adapter.clone())
		.cache_adapter(Arc::new(MemoryCache::unbounded()))
		.build()
		.await
		.expect("Failed to build settings service");

	(service, adapter, temp_dir)
}

#[tokio::test]
async fn test_read_missing_setting() {
	let (adapter, _temp) = create_test_adapter().await;

	let result = adapter.read_setting("general", "site_name").await.expect("Should query");
	assert!(result.is_none());
}

#[tokio::test]
async fn test_upsert_creates_then_overwrites() {
	let (adapter, _temp) = create_test_adapter().await;

	let created = adapter
		.upsert_setting("general", "site_name", "Acme", SettingType::String)
		.await
		.expect("Should create setting");
	assert_eq!(created.group, "general");
	assert_eq!(created.key, "site_name");
	assert_eq!(created.value, "Acme");

	let updated = adapter
		.upsert_setting("general", "site_name", "7", SettingType::Integer)
		.await
		.expect("Should update setting");
	assert_eq!(updated.value, "7");
	assert_eq!(updated.typ, SettingType::Integer);

	// Still exactly one row for the pair
	let rows = adapter.list_group("general").await.expect("Should list group");
	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].value, "7");
}

#[tokio::test]
async fn test_insert_if_absent_keeps_existing_row() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.upsert_setting("general", "currency", "EUR", SettingType::String)
		.await
		.expect("Should upsert");

	let skipped = adapter
		.insert_setting_if_absent("general", "currency", "USD", SettingType::String)
		.await
		.expect("Should insert");
	assert!(skipped.is_none());

	let created = adapter
		.insert_setting_if_absent("general", "currency_symbol", "$", SettingType::String)
		.await
		.expect("Should insert")
		.expect("Row should be created");
	assert_eq!(created.value, "$");

	let currency = adapter.read_setting("general", "currency").await.unwrap().unwrap();
	assert_eq!(currency.value, "EUR");
}

#[tokio::test]
async fn test_list_by_group_and_groups() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.upsert_setting("seo", "meta_title", "T", SettingType::String).await.unwrap();
	adapter.upsert_setting("seo", "meta_keywords", "K", SettingType::String).await.unwrap();
	adapter.upsert_setting("payment", "tax_rate", "7.5", SettingType::Float).await.unwrap();

	let seo = adapter.list_group("seo").await.unwrap();
	let keys: Vec<&str> = seo.iter().map(|s| s.key.as_str()).collect();
	assert_eq!(keys, vec!["meta_keywords", "meta_title"]);

	assert_eq!(adapter.list_settings().await.unwrap().len(), 3);
	assert_eq!(adapter.list_groups().await.unwrap(), vec!["payment".to_string(), "seo".to_string()]);
}

#[tokio::test]
async fn test_reopen_keeps_rows() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("data").join("settings.db");

	{
		let adapter = SettingsAdapterSqlite::new(&path).await.unwrap();
		adapter.upsert_setting("general", "currency", "EUR", SettingType::String).await.unwrap();
	}

	let adapter = SettingsAdapterSqlite::new(&path).await.unwrap();
	let setting = adapter.read_setting("general", "currency").await.unwrap().unwrap();
	assert_eq!(setting.value, "EUR");
}

#[tokio::test]
async fn test_service_round_trip_through_sqlite() {
	let (service, _adapter, _temp) = create_test_service().await;

	let values = [
		SettingValue::Bool(true),
		SettingValue::Int(42),
		SettingValue::Float(2.75),
		SettingValue::list(["a", "b"]),
		SettingValue::from("hello"),
	];
	for (i, value) in values.into_iter().enumerate() {
		let name = format!("general.x{}", i);
		service.set(&name, value.clone()).await.unwrap();
		assert_eq!(service.get(&name, "unused").await.unwrap(), value);
	}
}

#[tokio::test]
async fn test_service_group_and_all_through_sqlite() {
	let (service, _adapter, _temp) = create_test_service().await;

	service.set("seo.meta_title", "T").await.unwrap();
	service.set("seo.meta_keywords", "K").await.unwrap();
	service.set("site_name", "Acme").await.unwrap();

	let seo = service.group("seo").await.unwrap();
	assert_eq!(seo.len(), 2);
	assert_eq!(seo["meta_title"], SettingValue::from("T"));

	let all = service.all().await.unwrap();
	assert_eq!(all.len(), 2);
	assert_eq!(all["general"]["site_name"], SettingValue::from("Acme"));
}

#[tokio::test]
async fn test_service_reports_malformed_row() {
	let (service, adapter, _temp) = create_test_service().await;

	adapter.upsert_setting("payment", "tax_rate", "ten", SettingType::Float).await.unwrap();

	let res = service.get("payment.tax_rate", 0.0).await;
	assert!(matches!(res, Err(Error::DecodeError(_))));
	assert!(matches!(service.group("payment").await, Err(Error::DecodeError(_))));
}

#[tokio::test]
async fn test_seed_defaults_fills_only_missing_rows() {
	let (service, adapter, _temp) = create_test_service().await;

	service.set("general.currency", "EUR").await.unwrap();
	let created = service.seed_defaults().await.unwrap();
	assert_eq!(created, service.registry().len() - 1);

	assert_eq!(service.currency().await.unwrap(), "EUR");
	assert_eq!(service.currency_symbol().await.unwrap(), "$");

	// A second run has nothing left to do
	assert_eq!(service.seed_defaults().await.unwrap(), 0);
	let rows = adapter.list_settings().await.unwrap();
	assert_eq!(rows.len(), service.registry().len());
}

// vim: ts=4
