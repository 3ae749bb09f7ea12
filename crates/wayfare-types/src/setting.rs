//! Setting values, type tags and the persisted setting record
//!
//! A setting is stored as text plus a type tag. `SettingValue` is the decoded,
//! runtime-typed form; the tag written on update is chosen by the variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::prelude::*;

/// Decoded settings of one group, by key
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// Decoded settings of every group, by group then key
pub type GroupedSettings = BTreeMap<String, SettingsMap>;

/// Type tag stored next to the setting text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
	Boolean,
	Integer,
	Float,
	/// Structured list or mapping, stored as JSON
	Array,
	String,
}

impl SettingType {
	pub fn as_str(self) -> &'static str {
		match self {
			SettingType::Boolean => "boolean",
			SettingType::Integer => "integer",
			SettingType::Float => "float",
			SettingType::Array => "array",
			SettingType::String => "string",
		}
	}

	/// Parse a stored tag. Unknown tags fall back to `String`.
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"boolean" => SettingType::Boolean,
			"integer" => SettingType::Integer,
			"float" => SettingType::Float,
			"array" => SettingType::Array,
			_ => SettingType::String,
		}
	}

	/// Decode stored text according to this tag
	pub fn decode(self, raw: &str) -> WfResult<SettingValue> {
		match self {
			SettingType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
				"true" | "1" | "yes" | "on" => Ok(SettingValue::Bool(true)),
				"false" | "0" | "no" | "off" | "" => Ok(SettingValue::Bool(false)),
				_ => Err(Error::DecodeError(format!("invalid boolean literal '{}'", raw))),
			},
			SettingType::Integer => raw
				.trim()
				.parse::<i64>()
				.map(SettingValue::Int)
				.map_err(|err| Error::DecodeError(format!("invalid integer '{}': {}", raw, err))),
			SettingType::Float => raw
				.trim()
				.parse::<f64>()
				.map(SettingValue::Float)
				.map_err(|err| Error::DecodeError(format!("invalid float '{}': {}", raw, err))),
			SettingType::Array => match serde_json::from_str::<serde_json::Value>(raw)? {
				serde_json::Value::Array(items) => Ok(SettingValue::List(items)),
				serde_json::Value::Object(map) => Ok(SettingValue::Map(map)),
				other => Err(Error::DecodeError(format!(
					"array setting holds a scalar JSON value: {}",
					other
				))),
			},
			SettingType::String => Ok(SettingValue::Text(raw.to_string())),
		}
	}
}

impl fmt::Display for SettingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Runtime-typed setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	Text(String),
	List(Vec<serde_json::Value>),
	Map(serde_json::Map<String, serde_json::Value>),
}

impl SettingValue {
	/// Build a list value from anything convertible to JSON
	pub fn list<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<serde_json::Value>,
	{
		SettingValue::List(items.into_iter().map(Into::into).collect())
	}

	/// Tag persisted for this value. `Float(3.0)` stays `float`.
	pub fn setting_type(&self) -> SettingType {
		match self {
			SettingValue::Bool(_) => SettingType::Boolean,
			SettingValue::Int(_) => SettingType::Integer,
			SettingValue::Float(_) => SettingType::Float,
			SettingValue::List(_) | SettingValue::Map(_) => SettingType::Array,
			SettingValue::Text(_) => SettingType::String,
		}
	}

	/// Text representation written to the backing store
	pub fn encode(&self) -> String {
		match self {
			SettingValue::Bool(b) => b.to_string(),
			SettingValue::Int(i) => i.to_string(),
			SettingValue::Float(f) => f.to_string(),
			SettingValue::Text(s) => s.clone(),
			SettingValue::List(items) => serde_json::Value::Array(items.clone()).to_string(),
			SettingValue::Map(map) => serde_json::Value::Object(map.clone()).to_string(),
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::Int(_) => "int",
			SettingValue::Float(_) => "float",
			SettingValue::Text(_) => "string",
			SettingValue::List(_) => "list",
			SettingValue::Map(_) => "map",
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::Text(s) => Some(s.as_str()),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Integers widen to floats here
	#[allow(clippy::cast_precision_loss)]
	pub fn as_float(&self) -> Option<f64> {
		match self {
			SettingValue::Float(f) => Some(*f),
			SettingValue::Int(i) => Some(*i as f64),
			_ => None,
		}
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<i64> for SettingValue {
	fn from(value: i64) -> Self {
		SettingValue::Int(value)
	}
}

impl From<i32> for SettingValue {
	fn from(value: i32) -> Self {
		SettingValue::Int(i64::from(value))
	}
}

impl From<f64> for SettingValue {
	fn from(value: f64) -> Self {
		SettingValue::Float(value)
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::Text(value.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(value: String) -> Self {
		SettingValue::Text(value)
	}
}

impl From<Vec<serde_json::Value>> for SettingValue {
	fn from(value: Vec<serde_json::Value>) -> Self {
		SettingValue::List(value)
	}
}

impl From<serde_json::Map<String, serde_json::Value>> for SettingValue {
	fn from(value: serde_json::Map<String, serde_json::Value>) -> Self {
		SettingValue::Map(value)
	}
}

/// Persisted setting row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
	pub group: String,
	pub key: String,
	/// Stored text, decoded through `typ`
	pub value: String,
	#[serde(rename = "type")]
	pub typ: SettingType,
	#[serde(rename = "updatedAt")]
	pub updated_at: Timestamp,
}

impl Setting {
	/// Decode the stored text, naming the row on failure
	pub fn decoded(&self) -> WfResult<SettingValue> {
		self.typ.decode(&self.value).map_err(|err| match err {
			Error::DecodeError(msg) => Error::DecodeError(format!(
				"setting '{}.{}' ({}): {}",
				self.group, self.key, self.typ, msg
			)),
			err => err,
		})
	}
}


// vim: ts=4
