//! Link dispatch — unavailable notice, hot tool navigation, external open.
//!
//! Decision order for [`LinkDispatcher::open`]:
//!   empty/blank url        → notice, nothing else
//!   tool supplied          → spawn access recording (+ `tool-accessed`)
//!   `/hot-tools/...`       → `navigate-to-hot-tool { toolId }` (last segment, may be empty)
//!   anything else          → host open, one retry with an absolute URL

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::host::BrowsingContext;
use crate::events::{Event, EventBus, HotToolNavigation, NAVIGATE_TO_HOT_TOOL, TOOL_ACCESSED};
use crate::tools::{ToolInput, ToolRecord, ToolStore};
use crate::types::{DispatchConfig, Error, Locale, Result};

const EVENT_SOURCE: &str = "link-dispatcher";

/// Notice shown for links that are not configured yet.
pub fn unavailable_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Not yet available",
        Locale::Chinese => "暂未开发",
    }
}

/// What `open` did with the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    /// URL was empty; the notice was shown.
    Unavailable,
    /// In-app hot tool view; navigation event published.
    HotTool { tool_id: String },
    /// Host opened the URL on the first attempt.
    Opened { url: String, target: String },
    /// First attempt failed; the absolute-URL retry succeeded.
    Recovered { url: String, target: String },
    /// Both attempts failed. Logged, not raised.
    Failed { url: String, error: String },
}

/// Background access recording started by `open`.
#[derive(Debug)]
pub struct AccessTask {
    handle: JoinHandle<Result<Vec<ToolRecord>>>,
}

impl AccessTask {
    /// Wait until the access is recorded and `tool-accessed` is published.
    ///
    /// Returns the updated recent collection.
    pub async fn wait(self) -> Result<Vec<ToolRecord>> {
        self.handle
            .await
            .map_err(|e| Error::internal(format!("access recording task failed: {}", e)))?
    }
}

/// Result of a single `open` call.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub action: DispatchAction,
    /// Present when a tool accompanied a non-empty URL.
    pub access: Option<AccessTask>,
}

/// Opens links on behalf of UI code and records tool access.
#[derive(Clone)]
pub struct LinkDispatcher {
    store: ToolStore,
    bus: EventBus,
    host: Arc<dyn BrowsingContext>,
    config: DispatchConfig,
    locale: Locale,
}

impl fmt::Debug for LinkDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkDispatcher")
            .field("store", &self.store)
            .field("bus", &self.bus)
            .field("config", &self.config)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl LinkDispatcher {
    pub fn new(store: ToolStore, bus: EventBus, host: Arc<dyn BrowsingContext>) -> Self {
        Self {
            store,
            bus,
            host,
            config: DispatchConfig::default(),
            locale: Locale::default(),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Dispatch `url`.
    ///
    /// `target` defaults to the configured target (`_blank`). The returned
    /// outcome may carry an [`AccessTask`]; callers that need the recent
    /// collection updated must wait on it, the dispatch itself never does.
    pub async fn open(
        &self,
        url: &str,
        target: Option<&str>,
        tool: Option<ToolInput>,
    ) -> DispatchOutcome {
        if url.trim().is_empty() {
            tracing::debug!("Empty link, showing unavailable notice");
            self.host.alert(unavailable_notice(self.locale));
            return DispatchOutcome {
                action: DispatchAction::Unavailable,
                access: None,
            };
        }

        let access = tool.map(|tool| self.spawn_access(tool));

        let action = match self.hot_tool_id(url) {
            Some(tool_id) => self.navigate_to_hot_tool(tool_id).await,
            None => {
                let target = target.unwrap_or(&self.config.default_target);
                self.open_external(url, target)
            }
        };

        DispatchOutcome { action, access }
    }

    /// Trailing path segment of a hot tool link, if `url` is one.
    ///
    /// The prefix alone decides: `/hot-tools/` yields an empty id.
    pub fn hot_tool_id(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(self.config.hot_tool_prefix.as_str())?;
        let segment = rest.rsplit('/').next().unwrap_or(rest);
        Some(segment.to_string())
    }

    /// Absolute form of `url` for the open retry.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.host.origin().trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }

    fn spawn_access(&self, tool: ToolInput) -> AccessTask {
        let store = self.store.clone();
        let bus = self.bus.clone();

        let handle = tokio::spawn(async move {
            // Storage backends may do blocking file I/O
            let recorder = store.clone();
            let input = tool.clone();
            let recent = tokio::task::spawn_blocking(move || recorder.record_access(&input))
                .await
                .map_err(|e| Error::internal(format!("recording tool access failed: {}", e)))?;

            match Event::at(TOOL_ACCESSED, &tool, EVENT_SOURCE, store.now_ms()) {
                Ok(event) => {
                    bus.publish(event).await;
                }
                Err(e) => {
                    tracing::warn!(tool = %tool.name, error = %e, "Failed to encode tool-accessed")
                }
            }

            Ok(recent)
        });

        AccessTask { handle }
    }

    async fn navigate_to_hot_tool(&self, tool_id: String) -> DispatchAction {
        let payload = HotToolNavigation {
            tool_id: tool_id.clone(),
        };

        match Event::at(NAVIGATE_TO_HOT_TOOL, &payload, EVENT_SOURCE, self.store.now_ms()) {
            Ok(event) => {
                self.bus.publish(event).await;
            }
            Err(e) => {
                tracing::warn!(%tool_id, error = %e, "Failed to encode navigate-to-hot-tool")
            }
        }

        tracing::debug!(%tool_id, "Navigated to hot tool");
        DispatchAction::HotTool { tool_id }
    }

    fn open_external(&self, url: &str, target: &str) -> DispatchAction {
        let first = match self.host.open(url, target) {
            Ok(()) => {
                return DispatchAction::Opened {
                    url: url.to_string(),
                    target: target.to_string(),
                }
            }
            Err(e) => e,
        };

        tracing::warn!(url, target, error = %first, "Open failed, retrying with absolute URL");

        let full_url = self.absolute_url(url);
        match self.host.open(&full_url, target) {
            Ok(()) => DispatchAction::Recovered {
                url: full_url,
                target: target.to_string(),
            },
            Err(e) => {
                tracing::error!(url = %full_url, target, error = %e, "Open retry failed");
                DispatchAction::Failed {
                    url: full_url,
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::host::MockBrowsingContext;
    use crate::storage::MemoryStore;
    use crate::tools::ManualClock;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn dispatcher(host: MockBrowsingContext) -> (LinkDispatcher, ToolStore, EventBus) {
        let store = ToolStore::new(Arc::new(MemoryStore::new()))
            .with_clock(Arc::new(ManualClock::new(1_700_000_000_000)));
        let bus = EventBus::new();
        let dispatcher = LinkDispatcher::new(store.clone(), bus.clone(), Arc::new(host));
        (dispatcher, store, bus)
    }

    fn tool(name: &str, url: &str) -> ToolInput {
        ToolInput::new(name, "icon", "hot", url)
    }

    // =========================================================================
    // Empty links
    // =========================================================================

    #[tokio::test]
    async fn test_empty_and_blank_urls_show_notice_only() {
        let mut host = MockBrowsingContext::new();
        host.expect_alert()
            .with(eq("Not yet available"))
            .times(2)
            .return_const(());
        host.expect_open().never();

        let (dispatcher, store, bus) = dispatcher(host);
        let (_sub, mut rx) = bus.subscribe(&[TOOL_ACCESSED, NAVIGATE_TO_HOT_TOOL]).await;

        for url in ["", "   "] {
            let outcome = dispatcher
                .open(url, None, Some(tool("Predictive Maintenance", url)))
                .await;
            assert_eq!(outcome.action, DispatchAction::Unavailable);
            assert!(outcome.access.is_none());
        }

        assert!(rx.try_recv().is_err());
        assert!(store.get_recent().is_empty());
    }

    #[tokio::test]
    async fn test_notice_follows_locale() {
        let mut host = MockBrowsingContext::new();
        host.expect_alert().with(eq("暂未开发")).times(1).return_const(());

        let (dispatcher, _, _) = dispatcher(host);
        let dispatcher = dispatcher.with_locale(Locale::Chinese);
        dispatcher.open("", None, None).await;
    }

    // =========================================================================
    // Hot tools
    // =========================================================================

    #[tokio::test]
    async fn test_hot_tool_publishes_navigation_without_opening() {
        let mut host = MockBrowsingContext::new();
        host.expect_open().never();
        host.expect_alert().never();

        let (dispatcher, _, bus) = dispatcher(host);
        let (_sub, mut rx) = bus.subscribe(&[NAVIGATE_TO_HOT_TOOL]).await;

        let outcome = dispatcher
            .open("/hot-tools/sentiment-analysis", None, None)
            .await;

        assert_eq!(
            outcome.action,
            DispatchAction::HotTool {
                tool_id: "sentiment-analysis".to_string()
            }
        );

        let event = rx.recv().await.unwrap();
        let payload: HotToolNavigation = event.decode().unwrap();
        assert_eq!(payload.tool_id, "sentiment-analysis");
        assert_eq!(event.timestamp_ms, 1_700_000_000_000);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_bare_hot_tool_prefix_navigates_with_empty_id() {
        let mut host = MockBrowsingContext::new();
        host.expect_open().never();
        host.expect_alert().never();

        let (dispatcher, _, bus) = dispatcher(host);
        let (_sub, mut rx) = bus.subscribe(&[NAVIGATE_TO_HOT_TOOL]).await;

        let outcome = dispatcher.open("/hot-tools/", None, None).await;
        assert_eq!(
            outcome.action,
            DispatchAction::HotTool {
                tool_id: String::new()
            }
        );

        let event = rx.recv().await.unwrap();
        let payload: HotToolNavigation = event.decode().unwrap();
        assert_eq!(payload.tool_id, "");
    }

    #[test]
    fn test_hot_tool_id_extraction() {
        let (dispatcher, _, _) = dispatcher(MockBrowsingContext::new());

        assert_eq!(
            dispatcher.hot_tool_id("/hot-tools/code-completion").unwrap().as_str(),
            "code-completion"
        );
        assert_eq!(
            dispatcher.hot_tool_id("/hot-tools/group/speech-to-text").unwrap().as_str(),
            "speech-to-text"
        );
        assert_eq!(dispatcher.hot_tool_id("/hot-tools/").as_deref(), Some(""));
        assert!(dispatcher.hot_tool_id("/ai-products").is_none());
        assert!(dispatcher.hot_tool_id("https://example.com/hot-tools/x").is_none());
    }

    #[tokio::test]
    async fn test_hot_tool_with_record_emits_both_events() {
        let mut host = MockBrowsingContext::new();
        host.expect_open().never();

        let (dispatcher, store, bus) = dispatcher(host);
        let (_sub, mut rx) = bus.subscribe(&[TOOL_ACCESSED]).await;

        let input = tool("Contract Review", "/hot-tools/contract-review");
        let outcome = dispatcher
            .open(&input.url, None, Some(input.clone()))
            .await;

        let recent = outcome.access.unwrap().wait().await.unwrap();
        assert_eq!(recent[0].name, "Contract Review");
        assert_eq!(store.get_recent(), recent);

        let event = rx.recv().await.unwrap();
        let payload: ToolInput = event.decode().unwrap();
        assert_eq!(payload, input);
        assert_eq!(event.timestamp_ms, 1_700_000_000_000);
    }

    // =========================================================================
    // External links
    // =========================================================================

    #[tokio::test]
    async fn test_external_open_uses_default_target() {
        let mut host = MockBrowsingContext::new();
        host.expect_open()
            .with(eq("https://example.com/llm"), eq("_blank"))
            .times(1)
            .returning(|_, _| Ok(()));

        let (dispatcher, _, _) = dispatcher(host);
        let outcome = dispatcher.open("https://example.com/llm", None, None).await;

        assert_eq!(
            outcome.action,
            DispatchAction::Opened {
                url: "https://example.com/llm".to_string(),
                target: "_blank".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_root_relative_url_recovers_with_origin() {
        let mut seq = Sequence::new();
        let mut host = MockBrowsingContext::new();
        host.expect_open()
            .with(eq("/guides/data-cleaning.pdf"), eq("_self"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::open("blocked")));
        host.expect_origin()
            .return_const("https://portal.example.com".to_string());
        host.expect_open()
            .with(eq("https://portal.example.com/guides/data-cleaning.pdf"), eq("_self"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let (dispatcher, _, _) = dispatcher(host);
        let outcome = dispatcher
            .open("/guides/data-cleaning.pdf", Some("_self"), None)
            .await;

        assert_eq!(
            outcome.action,
            DispatchAction::Recovered {
                url: "https://portal.example.com/guides/data-cleaning.pdf".to_string(),
                target: "_self".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_second_failure_is_reported_not_raised() {
        let mut host = MockBrowsingContext::new();
        host.expect_open()
            .times(2)
            .returning(|_, _| Err(Error::open("popup blocked")));

        let (dispatcher, _, _) = dispatcher(host);
        let outcome = dispatcher.open("https://example.com/a", None, None).await;

        match outcome.action {
            DispatchAction::Failed { url, error } => {
                assert_eq!(url, "https://example.com/a");
                assert!(error.contains("popup blocked"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_external_open_records_access() {
        let mut host = MockBrowsingContext::new();
        host.expect_open().returning(|_, _| Ok(()));

        let (dispatcher, store, _) = dispatcher(host);
        let outcome = dispatcher
            .open(
                "https://example.com/code",
                None,
                Some(tool("Code LLM", "https://example.com/code")),
            )
            .await;

        outcome.access.unwrap().wait().await.unwrap();
        assert_eq!(store.get_recent()[0].name, "Code LLM");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_opens_record_every_tool() {
        let mut host = MockBrowsingContext::new();
        host.expect_open().times(8).returning(|_, _| Ok(()));

        let (dispatcher, store, _) = dispatcher(host);

        let opens: Vec<_> = (0..8)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    let url = format!("https://example.com/tool-{}", i);
                    let input = tool(&format!("tool-{}", i), &url);
                    dispatcher.open(&url, None, Some(input)).await
                })
            })
            .collect();

        for open in opens {
            let outcome = open.await.unwrap();
            outcome.access.unwrap().wait().await.unwrap();
        }

        let mut names: Vec<String> = store.get_recent().into_iter().map(|r| r.name).collect();
        names.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("tool-{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_absolute_url() {
        let mut host = MockBrowsingContext::new();
        host.expect_origin()
            .return_const("http://localhost:5173/".to_string());

        let (dispatcher, _, _) = dispatcher(host);
        assert_eq!(
            dispatcher.absolute_url("/workflow"),
            "http://localhost:5173/workflow"
        );
        assert_eq!(
            dispatcher.absolute_url("https://example.com"),
            "https://example.com"
        );
    }
}
