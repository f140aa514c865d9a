//! Host browsing-context port.

use crate::types::{Error, Result};
use std::process::{Command, Stdio};

/// What link dispatch needs from the host environment.
#[cfg_attr(test, mockall::automock)]
pub trait BrowsingContext: Send + Sync {
    /// Show a blocking, user-visible notice.
    fn alert(&self, message: &str);

    /// Open `url` in the browsing context named `target`.
    fn open(&self, url: &str, target: &str) -> Result<()>;

    /// Origin (scheme://host[:port]) used to absolutize root-relative URLs.
    fn origin(&self) -> String;
}

/// Opens URLs with the platform's default handler.
///
/// Target names have no meaning outside a browser; every open lands in a new
/// window or tab chosen by the handler.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    origin: String,
}

impl SystemBrowser {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    fn opener(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl BrowsingContext for SystemBrowser {
    fn alert(&self, message: &str) {
        tracing::warn!(message, "User notice");
        eprintln!("{}", message);
    }

    fn open(&self, url: &str, target: &str) -> Result<()> {
        // The platform handler cannot resolve paths without an origin
        if url.starts_with('/') {
            return Err(Error::open(format!("relative URL without origin: {}", url)));
        }

        tracing::debug!(url, target, "Launching platform URL handler");
        Self::opener(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| Error::open(format!("{}: {}", url, e)))
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}
