//! Shared types, adapter traits, and core utilities for the Wayfare platform.
//!
//! This crate contains the foundational types that are shared between the
//! settings service and all adapter implementations. Keeping them in a
//! separate crate lets adapter crates compile without pulling in the service.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod cache_adapter;
pub mod error;
pub mod prelude;
pub mod setting;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
