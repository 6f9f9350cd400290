//! Editor options.

use serde::{Deserialize, Serialize};

/// What the classifier does with a parameter whose type tag it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownParameterPolicy {
    /// Drop the parameter and log a warning.
    #[default]
    Lenient,
    /// Report a `C001` error for every such parameter.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    pub unknown_parameters: UnknownParameterPolicy,
    /// Narrows the canvas and shows the debug panel.
    pub debug_mode: bool,
}

impl EditorOptions {
    /// Parse options from JSON. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(EditorOptions::default());
        }
        serde_json::from_str(json)
    }
}
