//! Error type shared by the settings service and its adapters

use std::fmt;

pub type WfResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	DbError,
	/// Cache store failure (connection lost, backend error)
	CacheError(String),
	/// Stored text does not decode according to its type tag
	DecodeError(String),
	ValidationError(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::DbError => write!(f, "database error"),
			Error::CacheError(msg) => write!(f, "cache error: {}", msg),
			Error::DecodeError(msg) => write!(f, "decode error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::DecodeError(err.to_string())
	}
}


// vim: ts=4
