//! Editor-facing parameter descriptors.
//!
//! These are the shapes the node editor keeps in its parameter state, so they
//! serialize camelCase and are tagged on `parameterType`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parse::WorkflowParameterValueType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parameterType")]
pub enum EditorParameter {
    #[serde(rename = "credential")]
    Credential(CredentialState),
    #[serde(rename = "workflow")]
    Workflow(WorkflowValueState),
    #[serde(rename = "context")]
    Context(ContextState),
    #[serde(rename = "secret")]
    Secret(SecretState),
    #[serde(rename = "creditCardData")]
    CreditCardData(CreditCardState),
    #[serde(rename = "onepassword")]
    OnePassword(OnePasswordState),
}

impl EditorParameter {
    pub fn key(&self) -> &str {
        match self {
            EditorParameter::Credential(p) => &p.key,
            EditorParameter::Workflow(p) => &p.key,
            EditorParameter::Context(p) => &p.key,
            EditorParameter::Secret(p) => &p.key,
            EditorParameter::CreditCardData(p) => &p.key,
            EditorParameter::OnePassword(p) => &p.key,
        }
    }

    pub fn parameter_type(&self) -> &'static str {
        match self {
            EditorParameter::Credential(_) => "credential",
            EditorParameter::Workflow(_) => "workflow",
            EditorParameter::Context(_) => "context",
            EditorParameter::Secret(_) => "secret",
            EditorParameter::CreditCardData(_) => "creditCardData",
            EditorParameter::OnePassword(_) => "onepassword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialState {
    pub key: String,
    #[serde(flatten)]
    pub source: CredentialSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a credential descriptor gets its secret from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialSource {
    Stored {
        #[serde(rename = "credentialId")]
        credential_id: String,
    },
    /// Bitwarden login item, optionally scoped by a URL parameter.
    Vault {
        #[serde(rename = "collectionId")]
        collection_id: Option<String>,
        #[serde(rename = "itemId")]
        item_id: Option<String>,
        #[serde(rename = "urlParameterKey")]
        url_parameter_key: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowValueState {
    pub key: String,
    pub data_type: WorkflowParameterValueType,
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextState {
    pub key: String,
    pub source_parameter_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretState {
    pub key: String,
    pub collection_id: String,
    pub identity_key: String,
    pub identity_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardState {
    pub key: String,
    pub collection_id: String,
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnePasswordState {
    pub key: String,
    pub vault_id: String,
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
