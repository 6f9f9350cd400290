//! Classification phase: workflow parameters → editor parameter descriptors.
//!
//! Pure and order-preserving. Context back-references are copied as-is and
//! never checked against the rest of the list.

pub mod types;

pub use types::*;

use serde_json::Value;

use crate::config::UnknownParameterPolicy;
use crate::error::EditorError;
use crate::parse::{WorkflowParameter, WorkflowParameterValueType, WorkflowResource};

/// Whether a parameter has a place in the editor's parameter panel.
///
/// Block outputs and AWS secrets are managed elsewhere. Unrecognized kinds
/// pass so that the unknown-parameter policy decides their fate.
pub fn is_displayed_in_editor(parameter: &WorkflowParameter) -> bool {
    match parameter {
        WorkflowParameter::Workflow(_)
        | WorkflowParameter::Context(_)
        | WorkflowParameter::Secret(_)
        | WorkflowParameter::CreditCard(_)
        | WorkflowParameter::Credential(_)
        | WorkflowParameter::OnePassword(_)
        | WorkflowParameter::LoginCredential(_)
        | WorkflowParameter::Unrecognized(_) => true,
        WorkflowParameter::Output(_) | WorkflowParameter::AwsSecret(_) => false,
    }
}

/// Map a single parameter to its editor descriptor.
///
/// Returns `Ok(None)` for parameters that have no descriptor.
pub fn classify_parameter(
    parameter: &WorkflowParameter,
    policy: UnknownParameterPolicy,
) -> Result<Option<EditorParameter>, EditorError> {
    let descriptor = match parameter {
        WorkflowParameter::Workflow(p) => {
            if p.workflow_parameter_type == WorkflowParameterValueType::CredentialId {
                EditorParameter::Credential(CredentialState {
                    key: p.key.clone(),
                    source: CredentialSource::Stored {
                        credential_id: value_as_string(&p.default_value),
                    },
                    description: p.description.clone(),
                })
            } else {
                EditorParameter::Workflow(WorkflowValueState {
                    key: p.key.clone(),
                    data_type: p.workflow_parameter_type.clone(),
                    default_value: p.default_value.clone(),
                    description: p.description.clone(),
                })
            }
        }
        WorkflowParameter::Context(p) => EditorParameter::Context(ContextState {
            key: p.key.clone(),
            source_parameter_key: p.source.key.clone(),
            description: p.description.clone(),
        }),
        WorkflowParameter::Secret(p) => EditorParameter::Secret(SecretState {
            key: p.key.clone(),
            collection_id: p.bitwarden_collection_id.clone(),
            identity_key: p.bitwarden_identity_key.clone(),
            identity_fields: p.bitwarden_identity_fields.clone(),
            description: p.description.clone(),
        }),
        WorkflowParameter::CreditCard(p) => EditorParameter::CreditCardData(CreditCardState {
            key: p.key.clone(),
            collection_id: p.bitwarden_collection_id.clone(),
            item_id: p.bitwarden_item_id.clone(),
            description: p.description.clone(),
        }),
        WorkflowParameter::Credential(p) => EditorParameter::Credential(CredentialState {
            key: p.key.clone(),
            source: CredentialSource::Stored {
                credential_id: p.credential_id.clone(),
            },
            description: p.description.clone(),
        }),
        WorkflowParameter::OnePassword(p) => EditorParameter::OnePassword(OnePasswordState {
            key: p.key.clone(),
            vault_id: p.vault_id.clone(),
            item_id: p.item_id.clone(),
            description: p.description.clone(),
        }),
        WorkflowParameter::LoginCredential(p) => EditorParameter::Credential(CredentialState {
            key: p.key.clone(),
            source: CredentialSource::Vault {
                collection_id: p.bitwarden_collection_id.clone(),
                item_id: p.bitwarden_item_id.clone(),
                url_parameter_key: p.url_parameter_key.clone(),
            },
            description: p.description.clone(),
        }),
        WorkflowParameter::Output(_) | WorkflowParameter::AwsSecret(_) => return Ok(None),
        WorkflowParameter::Unrecognized(p) => {
            let key = p.key.clone();
            return match policy {
                UnknownParameterPolicy::Lenient => {
                    log::warn!(
                        "dropping parameter '{}' with unrecognized type '{}'",
                        key.as_deref().unwrap_or("<no key>"),
                        p.parameter_type
                    );
                    Ok(None)
                }
                UnknownParameterPolicy::Strict => Err(EditorError::classify(
                    "C001",
                    format!("Unrecognized parameter type '{}'", p.parameter_type),
                    key,
                )),
            };
        }
    };

    Ok(Some(descriptor))
}

/// Filter `parameters` by `is_displayed`, then classify the rest in order.
///
/// Under the strict policy every unrecognized parameter is reported; under the
/// lenient policy this never fails.
pub fn classify_parameters<F>(
    parameters: &[WorkflowParameter],
    is_displayed: F,
    policy: UnknownParameterPolicy,
) -> Result<Vec<EditorParameter>, Vec<EditorError>>
where
    F: Fn(&WorkflowParameter) -> bool,
{
    let mut descriptors = Vec::new();
    let mut errors = Vec::new();

    for parameter in parameters.iter().filter(|p| is_displayed(*p)) {
        match classify_parameter(parameter, policy) {
            Ok(Some(descriptor)) => descriptors.push(descriptor),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    log::debug!(
        "classified {} of {} workflow parameters",
        descriptors.len(),
        parameters.len()
    );
    Ok(descriptors)
}

/// The editor's initial parameter state for a loaded workflow.
pub fn initial_parameters(
    workflow: &WorkflowResource,
    policy: UnknownParameterPolicy,
) -> Result<Vec<EditorParameter>, Vec<EditorError>> {
    classify_parameters(
        &workflow.workflow_definition.parameters,
        is_displayed_in_editor,
        policy,
    )
}

/// Read a default value as a credential id. `null` becomes the empty string.
fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{OutputParameter, UnrecognizedParameter, WorkflowValueParameter};
    use serde_json::json;

    fn workflow_param(key: &str, ty: WorkflowParameterValueType, default: Value) -> WorkflowParameter {
        WorkflowParameter::Workflow(WorkflowValueParameter {
            key: key.into(),
            description: None,
            workflow_parameter_type: ty,
            default_value: default,
        })
    }

    #[test]
    fn credential_id_value_type_becomes_credential() {
        let p = workflow_param("login", WorkflowParameterValueType::CredentialId, json!("cred_9"));
        let descriptor = classify_parameter(&p, UnknownParameterPolicy::Lenient)
            .unwrap()
            .unwrap();
        assert_eq!(
            descriptor,
            EditorParameter::Credential(CredentialState {
                key: "login".into(),
                source: CredentialSource::Stored {
                    credential_id: "cred_9".into()
                },
                description: None,
            })
        );
    }

    #[test]
    fn null_credential_default_reads_as_empty() {
        let p = workflow_param("login", WorkflowParameterValueType::CredentialId, Value::Null);
        let Some(EditorParameter::Credential(state)) =
            classify_parameter(&p, UnknownParameterPolicy::Lenient).unwrap()
        else {
            panic!("expected credential descriptor");
        };
        assert_eq!(
            state.source,
            CredentialSource::Stored {
                credential_id: String::new()
            }
        );
    }

    #[test]
    fn other_value_types_keep_default_untouched() {
        let p = workflow_param("retries", WorkflowParameterValueType::Integer, json!(3));
        let Some(EditorParameter::Workflow(state)) =
            classify_parameter(&p, UnknownParameterPolicy::Lenient).unwrap()
        else {
            panic!("expected workflow descriptor");
        };
        assert_eq!(state.data_type, WorkflowParameterValueType::Integer);
        assert_eq!(state.default_value, json!(3));
    }

    #[test]
    fn output_parameters_have_no_descriptor() {
        let p = WorkflowParameter::Output(OutputParameter {
            key: "block_1_output".into(),
            description: None,
            output_parameter_id: None,
        });
        assert!(!is_displayed_in_editor(&p));
        assert_eq!(classify_parameter(&p, UnknownParameterPolicy::Strict), Ok(None));
    }

    #[test]
    fn unrecognized_depends_on_policy() {
        let p = WorkflowParameter::Unrecognized(UnrecognizedParameter {
            parameter_type: "azure_vault_credential".into(),
            key: Some("az".into()),
            raw: json!({}),
        });
        assert!(is_displayed_in_editor(&p));
        assert_eq!(classify_parameter(&p, UnknownParameterPolicy::Lenient), Ok(None));

        let err = classify_parameter(&p, UnknownParameterPolicy::Strict).unwrap_err();
        assert_eq!(err.code, "C001");
        assert_eq!(err.parameter_key.as_deref(), Some("az"));
    }

    #[test]
    fn strict_collects_every_unrecognized_parameter() {
        let unknown = |key: &str| {
            WorkflowParameter::Unrecognized(UnrecognizedParameter {
                parameter_type: "mystery".into(),
                key: Some(key.into()),
                raw: json!({}),
            })
        };
        let params = vec![
            unknown("a"),
            workflow_param("b", WorkflowParameterValueType::String, json!("x")),
            unknown("c"),
        ];
        let errors =
            classify_parameters(&params, is_displayed_in_editor, UnknownParameterPolicy::Strict)
                .unwrap_err();
        let keys: Vec<_> = errors.iter().filter_map(|e| e.parameter_key.as_deref()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn custom_predicate_is_honoured() {
        let params = vec![
            workflow_param("keep", WorkflowParameterValueType::String, json!("")),
            workflow_param("hide", WorkflowParameterValueType::String, json!("")),
        ];
        let out = classify_parameters(
            &params,
            |p| p.key() != "hide",
            UnknownParameterPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key(), "keep");
    }
}
