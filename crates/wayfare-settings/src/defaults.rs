//! Catalog of known settings and their defaults
//!
//! The catalog feeds first-run seeding and the fallback values of the
//! convenience accessors. Settings not listed here can still be read and
//! written freely.

use std::collections::BTreeMap;
use tracing::debug;

use wayfare_types::setting::SettingValue;

use crate::key::SettingKey;
use crate::prelude::*;

pub const SITE_NAME: &str = "general.site_name";
pub const SITE_EMAIL: &str = "general.site_email";
pub const CURRENCY: &str = "general.currency";
pub const CURRENCY_SYMBOL: &str = "general.currency_symbol";
pub const MAINTENANCE_MODE: &str = "general.maintenance_mode";

pub const DEFAULT_SITE_NAME: &str = "Travel Agency";
pub const DEFAULT_SITE_EMAIL: &str = "info@travelagency.com";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_MAINTENANCE_MODE: bool = false;

/// Metadata and default of one known setting
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDefinition {
	pub key: SettingKey,
	pub description: String,
	pub default: SettingValue,
}

impl SettingDefinition {
	pub fn builder(key: &str) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

pub struct SettingDefinitionBuilder {
	key: SettingKey,
	description: Option<String>,
	default: Option<SettingValue>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: &str) -> Self {
		Self { key: SettingKey::parse(key), description: None, default: None }
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn default(mut self, value: impl Into<SettingValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn build(self) -> WfResult<SettingDefinition> {
		let description = self.description.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' needs a description", self.key))
		})?;
		let default = self.default.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' needs a default value", self.key))
		})?;

		Ok(SettingDefinition { key: self.key, description, default })
	}
}

/// Known settings, ordered by group then key
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
	definitions: BTreeMap<SettingKey, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, def: SettingDefinition) -> WfResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Look up a definition by dotted or bare name
	pub fn get(&self, name: &str) -> Option<&SettingDefinition> {
		self.definitions.get(&SettingKey::parse(name))
	}

	/// Default of a known setting
	pub fn default_of(&self, name: &str) -> Option<&SettingValue> {
		self.get(name).map(|def| &def.default)
	}

	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Built-in catalog of the booking site
pub fn register_settings(registry: &mut SettingsRegistry) -> WfResult<()> {
	let defs = [
		// General
		SettingDefinition::builder(SITE_NAME)
			.description("Public name of the agency")
			.default(DEFAULT_SITE_NAME),
		SettingDefinition::builder(SITE_EMAIL)
			.description("Contact e-mail shown on the site")
			.default(DEFAULT_SITE_EMAIL),
		SettingDefinition::builder(CURRENCY)
			.description("ISO code of the booking currency")
			.default(DEFAULT_CURRENCY),
		SettingDefinition::builder(CURRENCY_SYMBOL)
			.description("Symbol printed next to prices")
			.default(DEFAULT_CURRENCY_SYMBOL),
		SettingDefinition::builder(MAINTENANCE_MODE)
			.description("Show the maintenance page to visitors")
			.default(DEFAULT_MAINTENANCE_MODE),
		// Site
		SettingDefinition::builder("site.phone")
			.description("Contact phone number")
			.default(""),
		SettingDefinition::builder("site.address")
			.description("Office address")
			.default(""),
		SettingDefinition::builder("site.items_per_page")
			.description("Packages listed per page")
			.default(12_i64),
		// SEO
		SettingDefinition::builder("seo.meta_title")
			.description("Default page title")
			.default("Travel Agency"),
		SettingDefinition::builder("seo.meta_description")
			.description("Default meta description")
			.default(""),
		SettingDefinition::builder("seo.meta_keywords")
			.description("Default meta keywords")
			.default(""),
		// Payment
		SettingDefinition::builder("payment.tax_rate")
			.description("Tax percentage added at checkout")
			.default(0.0),
		SettingDefinition::builder("payment.deposit_percentage")
			.description("Share of the total charged when booking")
			.default(100_i64),
		SettingDefinition::builder("payment.methods")
			.description("Enabled payment methods")
			.default(SettingValue::list(["card", "bank_transfer"])),
		// Social
		SettingDefinition::builder("social.facebook")
			.description("Facebook page URL")
			.default(""),
		SettingDefinition::builder("social.instagram")
			.description("Instagram profile URL")
			.default(""),
		SettingDefinition::builder("social.twitter")
			.description("Twitter profile URL")
			.default(""),
		// Email
		SettingDefinition::builder("email.from_name")
			.description("Sender name of outgoing mail")
			.default("Travel Agency"),
		SettingDefinition::builder("email.booking_notifications")
			.description("Notify the office about new bookings")
			.default(true),
	];

	for def in defs {
		registry.register(def.build()?)?;
	}

	Ok(())
}

/// Registry holding the built-in catalog
pub fn default_registry() -> WfResult<SettingsRegistry> {
	let mut registry = SettingsRegistry::new();
	register_settings(&mut registry)?;
	Ok(registry)
}


// vim: ts=4
