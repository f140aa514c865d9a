//! Event names and payloads published by link dispatch.

use serde::{Deserialize, Serialize};

/// Published after a tool access has been recorded. Payload: [`crate::tools::ToolInput`].
pub const TOOL_ACCESSED: &str = "tool-accessed";

/// Published when a hot tool link is opened. Payload: [`HotToolNavigation`].
pub const NAVIGATE_TO_HOT_TOOL: &str = "navigate-to-hot-tool";

/// Payload of [`NAVIGATE_TO_HOT_TOOL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotToolNavigation {
    pub tool_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_payload_uses_tool_id_key() {
        let payload = HotToolNavigation {
            tool_id: "sentiment-analysis".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"toolId":"sentiment-analysis"}"#
        );
    }
}
