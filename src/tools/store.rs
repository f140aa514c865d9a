//! Recent and favorite tool collections.
//!
//! Both collections are JSON arrays of [`ToolRecord`] persisted under fixed
//! keys. Reads never fail: an absent key, corrupt JSON, or an unavailable
//! backend all read as an empty collection. Writes that the backend refuses
//! are logged and the computed collection is still returned.

use std::sync::{Arc, Mutex, MutexGuard};

use super::clock::{Clock, SystemClock};
use super::record::{ToolInput, ToolRecord};
use super::relative::relative_label;
use crate::storage::KeyValueStore;
use crate::types::{Locale, TrackingConfig};

/// Storage key of the recent collection (newest first).
pub const RECENT_TOOLS_KEY: &str = "recentTools";

/// Storage key of the favorite collection (insertion order).
pub const FAVORITE_TOOLS_KEY: &str = "favoriteTools";

/// Default cap on the recent collection.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Owner of the `recentTools` and `favoriteTools` keys.
///
/// Cloning is cheap and clones share the same backend and write lock.
#[derive(Debug, Clone)]
pub struct ToolStore {
    storage: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles across clones.
    write_lock: Arc<Mutex<()>>,
    clock: Arc<dyn Clock>,
    recent_limit: usize,
    locale: Locale,
}

impl ToolStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
            clock: Arc::new(SystemClock),
            recent_limit: DEFAULT_RECENT_LIMIT,
            locale: Locale::default(),
        }
    }

    pub fn from_config(storage: Arc<dyn KeyValueStore>, config: &TrackingConfig) -> Self {
        Self::new(storage)
            .with_recent_limit(config.recent_limit)
            .with_locale(config.locale)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Current time from the store's clock, in ms since epoch.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Recently accessed tools, newest first.
    pub fn get_recent(&self) -> Vec<ToolRecord> {
        self.load(RECENT_TOOLS_KEY)
    }

    /// Favorited tools in the order they were added.
    pub fn get_favorites(&self) -> Vec<ToolRecord> {
        self.load(FAVORITE_TOOLS_KEY)
    }

    /// Whether a favorite named `name` exists.
    pub fn is_favorite(&self, name: &str) -> bool {
        self.get_favorites().iter().any(|t| t.name == name)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Move (or insert) `input` to the front of the recent collection with a
    /// fresh timestamp, evicting past the recent limit.
    pub fn record_access(&self, input: &ToolInput) -> Vec<ToolRecord> {
        let _guard = self.lock_writes();
        let tool = input.to_record(self.clock.now_ms());

        let mut recent: Vec<ToolRecord> = self
            .get_recent()
            .into_iter()
            .filter(|t| t.name != tool.name)
            .collect();
        recent.insert(0, tool);
        recent.truncate(self.recent_limit);

        self.save(RECENT_TOOLS_KEY, &recent);

        tracing::debug!(
            tool = %input.name,
            recent = recent.len(),
            "Recorded tool access"
        );

        recent
    }

    /// Remove `input` from favorites if present, otherwise append it.
    pub fn toggle_favorite(&self, input: &ToolInput) -> Vec<ToolRecord> {
        let _guard = self.lock_writes();
        let mut favorites = self.get_favorites();

        match favorites.iter().position(|t| t.name == input.name) {
            Some(index) => {
                favorites.remove(index);
                tracing::debug!(tool = %input.name, "Removed favorite");
            }
            None => {
                favorites.push(input.to_record(self.clock.now_ms()));
                tracing::debug!(tool = %input.name, "Added favorite");
            }
        }

        self.save(FAVORITE_TOOLS_KEY, &favorites);
        favorites
    }

    /// Drop the whole recent collection. Favorites are untouched.
    pub fn clear_recent(&self) {
        let _guard = self.lock_writes();
        if let Err(e) = self.storage.remove(RECENT_TOOLS_KEY) {
            tracing::warn!(error = %e, "Failed to clear recent tools");
        }
    }

    /// Relative-age label for a past `timestamp` (ms since epoch).
    pub fn format_relative_time(&self, timestamp: i64) -> String {
        relative_label(self.clock.now_ms() - timestamp, self.locale)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self, key: &str) -> Vec<ToolRecord> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage unavailable, treating as empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Corrupt tool collection, treating as empty");
            Vec::new()
        })
    }

    fn save(&self, key: &str, records: &[ToolRecord]) {
        let result = serde_json::to_string(records)
            .map_err(crate::types::Error::from)
            .and_then(|raw| self.storage.set(key, &raw));

        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to persist tool collection");
        }
    }
}
