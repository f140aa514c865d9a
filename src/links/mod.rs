//! Link dispatch and the host browsing-context port.

pub mod dispatcher;
pub mod host;

pub use dispatcher::{
    unavailable_notice, AccessTask, DispatchAction, DispatchOutcome, LinkDispatcher,
};
pub use host::{BrowsingContext, SystemBrowser};
