//! # Toolhub Core - Tool Tracking and Link Dispatch
//!
//! Client-side helpers for the Toolhub portal:
//! - Recent tool history (newest first, capped, unique by name)
//! - Favorite tools (insertion order, toggle on/off)
//! - Relative-time labels for history panels
//! - Link dispatch: unavailable notice, in-app hot tool navigation, external open
//! - Process-wide event bus for `tool-accessed` / `navigate-to-hot-tool`
//!
//! ## Architecture
//!
//! ```text
//!   UI code ──open()──▶ LinkDispatcher ──publish──▶ EventBus ──▶ subscribers
//!                          │      │
//!            record_access │      │ open / alert / origin
//!                          ▼      ▼
//!                     ToolStore  BrowsingContext (host port)
//!                          │
//!                          ▼
//!                   KeyValueStore (storage port: memory | file)
//! ```
//!
//! `ToolStore` never calls back into `LinkDispatcher`.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod events;
pub mod links;
pub mod storage;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
