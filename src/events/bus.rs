//! In-process publish/subscribe bus keyed by event name.
//!
//! Created once at startup and shared via `Arc`. Every subscriber gets its own
//! unbounded channel; publishing fans out to all subscribers of the event
//! name and never blocks on a slow consumer.

use crate::types::{Result, SubscriberId};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

// =============================================================================
// Message Types
// =============================================================================

/// A published event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub payload: Vec<u8>, // JSON-encoded
    pub timestamp_ms: i64,
    pub source: String, // Component that published the event
}

impl Event {
    /// Build an event with a JSON-encoded payload stamped with the current time.
    pub fn new<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
        source: impl Into<String>,
    ) -> Result<Self> {
        Self::at(event_type, payload, source, Utc::now().timestamp_millis())
    }

    /// Build an event stamped with `timestamp_ms` (ms since epoch).
    pub fn at<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
        source: impl Into<String>,
        timestamp_ms: i64,
    ) -> Result<Self> {
        Ok(Self {
            event_type: event_type.into(),
            payload: serde_json::to_vec(payload)?,
            timestamp_ms,
            source: source.into(),
        })
    }

    /// Decode the JSON payload.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

// =============================================================================
// Subscriber Management
// =============================================================================

#[derive(Debug)]
struct Subscriber {
    id: SubscriberId,
    tx: mpsc::UnboundedSender<Event>,
}

/// Subscription receipt for managing subscriptions.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: SubscriberId,
    pub event_types: Vec<String>,
}

/// Statistics about bus usage.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BusStats {
    pub events_published: u64,
    pub events_delivered: u64,
    pub active_subscribers: usize,
}

// =============================================================================
// EventBus
// =============================================================================

/// Process-wide event bus.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    /// event_type -> subscribers
    subscribers: Arc<RwLock<HashMap<String, Vec<Subscriber>>>>,

    stats: Arc<RwLock<BusStats>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to every subscriber of its type.
    ///
    /// Returns how many subscribers it was delivered to. Subscribers whose
    /// receiver was dropped are pruned here.
    pub async fn publish(&self, event: Event) -> usize {
        let mut subscribers = self.subscribers.write().await;

        let mut delivered = 0;
        if let Some(subs) = subscribers.get_mut(&event.event_type) {
            subs.retain(|s| {
                let open = s.tx.send(event.clone()).is_ok();
                if open {
                    delivered += 1;
                }
                open
            });
        }

        let mut stats = self.stats.write().await;
        stats.events_published += 1;
        stats.events_delivered += delivered as u64;
        stats.active_subscribers = subscribers.values().map(|v| v.len()).sum();

        tracing::debug!(
            event_type = %event.event_type,
            source = %event.source,
            delivered,
            "Published event"
        );

        delivered
    }

    /// Subscribe to one or more event types.
    ///
    /// All matching events arrive on the returned receiver in publish order.
    pub async fn subscribe(
        &self,
        event_types: &[&str],
    ) -> (Subscription, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SubscriberId::new();

        let mut subscribers = self.subscribers.write().await;
        for event_type in event_types {
            subscribers
                .entry(event_type.to_string())
                .or_default()
                .push(Subscriber {
                    id: id.clone(),
                    tx: tx.clone(),
                });
        }

        let mut stats = self.stats.write().await;
        stats.active_subscribers = subscribers.values().map(|v| v.len()).sum();

        tracing::debug!(subscriber = %id, ?event_types, "Subscriber registered");

        (
            Subscription {
                id,
                event_types: event_types.iter().map(|t| t.to_string()).collect(),
            },
            rx,
        )
    }

    /// Remove a subscription from every event type it registered for.
    pub async fn unsubscribe(&self, subscription: &Subscription) {
        let mut subscribers = self.subscribers.write().await;

        for event_type in &subscription.event_types {
            if let Some(subs) = subscribers.get_mut(event_type) {
                subs.retain(|s| s.id != subscription.id);
            }
        }

        let mut stats = self.stats.write().await;
        stats.active_subscribers = subscribers.values().map(|v| v.len()).sum();

        tracing::debug!(subscriber = %subscription.id, "Unsubscribed");
    }

    /// Get current bus statistics.
    pub async fn get_stats(&self) -> BusStats {
        self.stats.read().await.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
