//! Parse phase: workflow JSON → Rust types.

pub mod parameter;
pub mod types;

pub use parameter::*;
pub use types::*;

use serde_json::Value;

use crate::error::EditorError;

/// Deserialize a workflow resource JSON string.
///
/// Parameters are decoded one record at a time so that every bad record is
/// reported, with its key. A known parameter kind with missing or mistyped
/// fields is `P002`; any other decoding failure is `P001`.
pub fn parse_workflow(json: &str) -> Result<WorkflowResource, Vec<EditorError>> {
    let mut raw: Value = serde_json::from_str(json).map_err(|e| vec![invalid_workflow(e)])?;

    let raw_parameters = match raw.pointer_mut("/workflow_definition/parameters") {
        Some(Value::Array(items)) => std::mem::take(items),
        _ => Vec::new(),
    };
    let mut workflow: WorkflowResource =
        serde_json::from_value(raw).map_err(|e| vec![invalid_workflow(e)])?;

    let mut errors = Vec::new();
    for raw_parameter in raw_parameters {
        match WorkflowParameter::from_raw(raw_parameter) {
            Ok(parameter) => workflow.workflow_definition.parameters.push(parameter),
            Err(e) => errors.push(invalid_parameter(e)),
        }
    }

    if errors.is_empty() {
        Ok(workflow)
    } else {
        Err(errors)
    }
}

/// Deserialize the global workflow list.
pub fn parse_global_workflows(json: &str) -> Result<Vec<GlobalWorkflow>, Vec<EditorError>> {
    serde_json::from_str::<Vec<GlobalWorkflow>>(json).map_err(|e| {
        vec![EditorError::parse(
            "P001",
            format!("Failed to parse global workflow list: {}", e),
        )]
    })
}

fn invalid_workflow(e: serde_json::Error) -> EditorError {
    EditorError::parse("P001", format!("Failed to parse workflow JSON: {}", e))
}

fn invalid_parameter(e: ParameterDecodeError) -> EditorError {
    let code = match &e {
        ParameterDecodeError::MissingTag { .. } => "P001",
        ParameterDecodeError::Invalid { .. } => "P002",
    };
    EditorError {
        parameter_key: e.key().map(str::to_string),
        ..EditorError::parse(code, format!("Failed to parse workflow JSON: {}", e))
    }
}
