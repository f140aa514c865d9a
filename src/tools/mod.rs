//! Tool tracking — recent history, favorites, relative-time labels.
//!
//! [`ToolStore`] is the only writer of the `recentTools` and `favoriteTools`
//! storage keys. It has no knowledge of link dispatch.

pub mod clock;
pub mod record;
pub mod relative;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use record::{ToolInput, ToolRecord};
pub use relative::relative_label;
pub use store::{ToolStore, DEFAULT_RECENT_LIMIT, FAVORITE_TOOLS_KEY, RECENT_TOOLS_KEY};
