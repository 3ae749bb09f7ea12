//! Setting key resolution and cache key layout

use std::fmt;

/// Group used for keys given without a dot
pub const DEFAULT_GROUP: &str = "general";

const CACHE_PREFIX: &str = "settings";
const CACHE_ALL: &str = "settings.all";

/// A resolved `(group, key)` pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingKey {
	pub group: String,
	pub key: String,
}

impl SettingKey {
	pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
		Self { group: group.into(), key: key.into() }
	}

	/// Split on the first dot only; a bare key belongs to `general`.
	///
	/// - `"seo.meta_title"` → `("seo", "meta_title")`
	/// - `"social.links.facebook"` → `("social", "links.facebook")`
	/// - `"site_name"` → `("general", "site_name")`
	pub fn parse(name: &str) -> Self {
		match name.split_once('.') {
			Some((group, key)) => Self::new(group, key),
			None => Self::new(DEFAULT_GROUP, name),
		}
	}

	pub fn cache_key(&self) -> String {
		format!("{}.{}.{}", CACHE_PREFIX, self.group, self.key)
	}
}

impl fmt::Display for SettingKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.group, self.key)
	}
}

impl From<&str> for SettingKey {
	fn from(name: &str) -> Self {
		Self::parse(name)
	}
}

/// Cache key of a whole group
pub fn group_cache_key(group: &str) -> String {
	format!("{}.group.{}", CACHE_PREFIX, group)
}

/// Cache key of the all-groups view
pub fn all_cache_key() -> &'static str {
	CACHE_ALL
}


// vim: ts=4
