//! WASM entry points for browser use.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::EditorOptions;
use crate::error::EditorError;
use crate::host::{assemble_view, EditorView, Fetch};

/// Build the full editor model from a workflow JSON and the global list JSON.
/// Returns a JSON object with either `view` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn build_editor_model(
    workflow_json: &str,
    global_workflows_json: &str,
    workflow_permanent_id: &str,
    options_json: &str,
) -> JsValue {
    let result = build_editor_model_inner(
        workflow_json,
        global_workflows_json,
        workflow_permanent_id,
        options_json,
    );
    to_js(&result)
}

fn build_editor_model_inner(
    workflow_json: &str,
    global_workflows_json: &str,
    workflow_permanent_id: &str,
    options_json: &str,
) -> BuildResult {
    let options = match parse_options(options_json) {
        Ok(o) => o,
        Err(errors) => return BuildResult::Errors { errors },
    };

    let workflow = match crate::parse::parse_workflow(workflow_json) {
        Ok(w) => w,
        Err(errors) => return BuildResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    };

    let globals = match crate::parse::parse_global_workflows(global_workflows_json) {
        Ok(g) => g,
        Err(errors) => return BuildResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    };

    match assemble_view(
        &Fetch::Done(Some(workflow)),
        &Fetch::Done(Some(globals)),
        workflow_permanent_id,
        &options,
    ) {
        Ok(view) => BuildResult::Success { view },
        Err(errors) => BuildResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

/// Classify the parameters of a workflow JSON.
/// Returns a JSON object with either `parameters` or `errors`.
#[wasm_bindgen]
pub fn classify_workflow_parameters(workflow_json: &str, options_json: &str) -> JsValue {
    let result = classify_workflow_parameters_inner(workflow_json, options_json);
    to_js(&result)
}

fn classify_workflow_parameters_inner(workflow_json: &str, options_json: &str) -> ClassifyResult {
    let options = match parse_options(options_json) {
        Ok(o) => o,
        Err(errors) => return ClassifyResult::Errors { errors },
    };

    let workflow = match crate::parse::parse_workflow(workflow_json) {
        Ok(w) => w,
        Err(errors) => return ClassifyResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    };

    match crate::classify::initial_parameters(&workflow, options.unknown_parameters) {
        Ok(parameters) => ClassifyResult::Success { parameters },
        Err(errors) => ClassifyResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

/// Extract the start-node settings of a workflow JSON.
/// Returns the settings object, or `null` when the JSON does not parse.
#[wasm_bindgen]
pub fn extract_workflow_settings(workflow_json: &str) -> JsValue {
    let Ok(workflow) = crate::parse::parse_workflow(workflow_json) else {
        return JsValue::NULL;
    };
    let settings = crate::settings::extract_settings(&workflow);
    to_js(&settings)
}

/// JSON maps (block config, default values, model) must reach JS as plain
/// objects, not `Map`s.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn parse_options(options_json: &str) -> Result<EditorOptions, Vec<ErrorDto>> {
    EditorOptions::from_json(options_json).map_err(|e| {
        vec![ErrorDto::from(EditorError::parse(
            "P003",
            format!("Failed to parse editor options: {}", e),
        ))]
    })
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    parameter_key: Option<String>,
}

impl From<EditorError> for ErrorDto {
    fn from(e: EditorError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            parameter_key: e.parameter_key,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum BuildResult {
    #[serde(rename = "success")]
    Success { view: EditorView },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum ClassifyResult {
    #[serde(rename = "success")]
    Success {
        parameters: Vec<crate::classify::EditorParameter>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const WORKFLOW: &str = r#"{
        "workflow_permanent_id": "wpid_shop",
        "title": "Shop",
        "workflow_definition": {
            "blocks": [{ "label": "open", "block_type": "navigation", "url": "https://shop.example" }],
            "parameters": [
                {
                    "parameter_type": "workflow",
                    "key": "filters",
                    "workflow_parameter_type": "json",
                    "default_value": { "color": "red" }
                },
                { "parameter_type": "azure_vault_credential", "key": "az" }
            ]
        }
    }"#;

    fn envelope<T: Serialize>(result: &T) -> Value {
        serde_json::to_value(result).unwrap()
    }

    #[test]
    fn build_success_envelope_carries_view() {
        let out = envelope(&build_editor_model_inner(WORKFLOW, "[]", "wpid_shop", ""));
        assert_eq!(out["status"], "success");
        assert_eq!(out["view"]["status"], "ready");
        assert_eq!(out["view"]["elements"]["nodes"][1]["data"]["config"]["url"], "https://shop.example");
    }

    #[test]
    fn bad_options_are_p003() {
        let out = envelope(&build_editor_model_inner(WORKFLOW, "[]", "wpid_shop", "{not json"));
        assert_eq!(out["status"], "errors");
        assert_eq!(out["errors"][0]["code"], "P003");
        assert_eq!(out["errors"][0]["phase"], "Parse");
        assert_eq!(out["errors"][0]["parameterKey"], Value::Null);

        let out = envelope(&classify_workflow_parameters_inner(WORKFLOW, "true"));
        assert_eq!(out["errors"][0]["code"], "P003");
    }

    #[test]
    fn bad_global_list_is_reported() {
        let out = envelope(&build_editor_model_inner(WORKFLOW, "{}", "wpid_shop", ""));
        assert_eq!(out["status"], "errors");
        assert_eq!(out["errors"][0]["code"], "P001");
    }

    #[test]
    fn classify_envelope_follows_policy() {
        let out = envelope(&classify_workflow_parameters_inner(WORKFLOW, ""));
        assert_eq!(out["status"], "success");
        assert_eq!(
            out["parameters"],
            json!([{
                "parameterType": "workflow",
                "key": "filters",
                "dataType": "json",
                "defaultValue": { "color": "red" }
            }])
        );

        let out = envelope(&classify_workflow_parameters_inner(
            WORKFLOW,
            r#"{ "unknownParameters": "strict" }"#,
        ));
        assert_eq!(out["status"], "errors");
        assert_eq!(out["errors"][0]["code"], "C001");
        assert_eq!(out["errors"][0]["phase"], "Classify");
        assert_eq!(out["errors"][0]["parameterKey"], "az");
    }
}
