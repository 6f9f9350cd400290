//! Rust types mirroring the workflow resource served by the workflows API.
//!
//! These types are the serde target for the workflow JSON the editor loads.
//! Field names stay snake_case, as on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parameter::WorkflowParameter;

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResource {
    pub workflow_permanent_id: String,
    pub title: String,
    #[serde(default)]
    pub persist_browser_session: bool,
    pub proxy_location: Option<ProxyLocation>,
    pub webhook_callback_url: Option<String>,
    /// Model selection object, passed through untouched.
    pub model: Option<Value>,
    pub max_screenshot_scrolls: Option<u32>,
    pub extra_http_headers: Option<BTreeMap<String, String>>,
    pub workflow_definition: WorkflowDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub blocks: Vec<WorkflowBlock>,
    #[serde(default)]
    pub parameters: Vec<WorkflowParameter>,
}

/// Entry of the global (template) workflow list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalWorkflow {
    pub workflow_permanent_id: String,
    pub title: Option<String>,
}

// =============================================================================
// PROXY LOCATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyLocation {
    /// A named pool such as `"RESIDENTIAL"` or `"NONE"`.
    Named(String),
    Geo(GeoTarget),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoTarget {
    pub country: String,
    pub subdivision: Option<String>,
    pub city: Option<String>,
}

// =============================================================================
// BLOCKS
// =============================================================================

pub const FOR_LOOP_BLOCK: &str = "for_loop";

/// A workflow block. Only the fields the editor graph needs are typed; the
/// rest of the block configuration is carried in `config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowBlock {
    pub label: String,
    pub block_type: String,
    /// Body of a `for_loop` block. Empty for every other block type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loop_blocks: Vec<WorkflowBlock>,
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl WorkflowBlock {
    pub fn is_loop(&self) -> bool {
        self.block_type == FOR_LOOP_BLOCK
    }
}
