//! Core types for toolhub.
//!
//! This module provides foundational types used throughout the crate:
//! - **IDs**: Strongly-typed identifiers (SubscriberId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for storage, tracking, and dispatch

mod config;
mod errors;
mod ids;

pub use config::{
    Config, DispatchConfig, Locale, ObservabilityConfig, StorageBackend, StorageConfig,
    TrackingConfig,
};
pub use errors::{Error, Result};
pub use ids::SubscriberId;
