//! Site settings store for the Wayfare platform.
//!
//! Settings live in a two-level namespace (`<group>.<key>`, bare keys belong
//! to `general`) backed by a [`SettingsAdapter`] and fronted by a
//! [`CacheAdapter`] whose entries never expire on their own.
//!
//! # Architecture
//!
//! - **Key** (`key.rs`): key resolution and cache key layout
//! - **Cache** (`cache.rs`): in-process cache store
//! - **Defaults** (`defaults.rs`): catalog of known settings
//! - **Service** (`service.rs`): cache-aside reads, writes and invalidation
//! - **App** (`app.rs`): options, logging setup and wiring
//!
//! [`SettingsAdapter`]: wayfare_types::settings_adapter::SettingsAdapter
//! [`CacheAdapter`]: wayfare_types::cache_adapter::CacheAdapter

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cache;
pub mod defaults;
pub mod key;
pub mod prelude;
pub mod service;

pub use app::{SettingsAppBuilder, SettingsOpts};
pub use cache::MemoryCache;
pub use defaults::{SettingDefinition, SettingsRegistry};
pub use key::SettingKey;
pub use service::SettingsService;
pub use wayfare_types::setting::{GroupedSettings, Setting, SettingType, SettingValue, SettingsMap};

// vim: ts=4
