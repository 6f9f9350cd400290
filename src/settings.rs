//! Workflow settings shown on the editor's start node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parse::{ProxyLocation, WorkflowResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSettings {
    pub persist_browser_session: bool,
    pub proxy_location: Option<ProxyLocation>,
    pub webhook_callback_url: Option<String>,
    pub model: Option<Value>,
    pub max_screenshot_scrolls: Option<u32>,
    /// Headers as a JSON object string with sorted keys, or `None` when the
    /// workflow has none.
    pub extra_http_headers: Option<String>,
}

/// Copy the editor-relevant settings out of a workflow resource.
pub fn extract_settings(workflow: &WorkflowResource) -> WorkflowSettings {
    let extra_http_headers = workflow
        .extra_http_headers
        .as_ref()
        .and_then(|headers| serde_json::to_string(headers).ok());

    WorkflowSettings {
        persist_browser_session: workflow.persist_browser_session,
        proxy_location: workflow.proxy_location.clone(),
        webhook_callback_url: workflow.webhook_callback_url.clone(),
        model: workflow.model.clone(),
        max_screenshot_scrolls: workflow.max_screenshot_scrolls,
        extra_http_headers,
    }
}
