//! Event infrastructure — process-wide pub/sub for UI collaborators.
//!
//! Link dispatch announces navigation and tool access here; panels such as a
//! recent-tools sidebar subscribe by event name.

pub mod bus;
pub mod payloads;

pub use bus::{BusStats, Event, EventBus, Subscription};
pub use payloads::{HotToolNavigation, NAVIGATE_TO_HOT_TOOL, TOOL_ACCESSED};
