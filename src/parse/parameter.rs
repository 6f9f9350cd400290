//! The workflow parameter union as the server sends it.
//!
//! Parameters are discriminated by `parameter_type`. Known tags decode strictly;
//! an unknown tag is kept as [`WorkflowParameter::Unrecognized`] together with
//! the raw record so the classifier can decide what to do with it.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// VALUE TYPES
// =============================================================================

/// Declared value type of a workflow-scoped parameter.
///
/// Types this crate does not know are kept as [`WorkflowParameterValueType::Other`]
/// and passed through to the editor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkflowParameterValueType {
    String,
    Integer,
    Float,
    Boolean,
    Json,
    FileUrl,
    CredentialId,
    Other(String),
}

impl WorkflowParameterValueType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowParameterValueType::String => "string",
            WorkflowParameterValueType::Integer => "integer",
            WorkflowParameterValueType::Float => "float",
            WorkflowParameterValueType::Boolean => "boolean",
            WorkflowParameterValueType::Json => "json",
            WorkflowParameterValueType::FileUrl => "file_url",
            WorkflowParameterValueType::CredentialId => "credential_id",
            WorkflowParameterValueType::Other(name) => name,
        }
    }
}

impl From<String> for WorkflowParameterValueType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => WorkflowParameterValueType::String,
            "integer" => WorkflowParameterValueType::Integer,
            "float" => WorkflowParameterValueType::Float,
            "boolean" => WorkflowParameterValueType::Boolean,
            "json" => WorkflowParameterValueType::Json,
            "file_url" => WorkflowParameterValueType::FileUrl,
            "credential_id" => WorkflowParameterValueType::CredentialId,
            _ => WorkflowParameterValueType::Other(name),
        }
    }
}

impl From<WorkflowParameterValueType> for String {
    fn from(value_type: WorkflowParameterValueType) -> Self {
        match value_type {
            WorkflowParameterValueType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

// =============================================================================
// PARAMETER TAGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Workflow,
    Context,
    BitwardenSensitiveInformation,
    BitwardenCreditCardData,
    Credential,
    OnePassword,
    BitwardenLoginCredential,
    Output,
    AwsSecret,
}

impl ParameterType {
    pub const ALL: [ParameterType; 9] = [
        ParameterType::Workflow,
        ParameterType::Context,
        ParameterType::BitwardenSensitiveInformation,
        ParameterType::BitwardenCreditCardData,
        ParameterType::Credential,
        ParameterType::OnePassword,
        ParameterType::BitwardenLoginCredential,
        ParameterType::Output,
        ParameterType::AwsSecret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Workflow => "workflow",
            ParameterType::Context => "context",
            ParameterType::BitwardenSensitiveInformation => "bitwarden_sensitive_information",
            ParameterType::BitwardenCreditCardData => "bitwarden_credit_card_data",
            ParameterType::Credential => "credential",
            ParameterType::OnePassword => "onepassword",
            ParameterType::BitwardenLoginCredential => "bitwarden_login_credential",
            ParameterType::Output => "output",
            ParameterType::AwsSecret => "aws_secret",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ParameterType> {
        ParameterType::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

// =============================================================================
// PARAMETER UNION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "parameter_type")]
pub enum WorkflowParameter {
    #[serde(rename = "workflow")]
    Workflow(WorkflowValueParameter),
    #[serde(rename = "context")]
    Context(ContextParameter),
    #[serde(rename = "bitwarden_sensitive_information")]
    Secret(SecretParameter),
    #[serde(rename = "bitwarden_credit_card_data")]
    CreditCard(CreditCardParameter),
    #[serde(rename = "credential")]
    Credential(CredentialParameter),
    #[serde(rename = "onepassword")]
    OnePassword(OnePasswordParameter),
    #[serde(rename = "bitwarden_login_credential")]
    LoginCredential(LoginCredentialParameter),
    #[serde(rename = "output")]
    Output(OutputParameter),
    #[serde(rename = "aws_secret")]
    AwsSecret(AwsSecretParameter),
    #[serde(untagged)]
    Unrecognized(UnrecognizedParameter),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowValueParameter {
    pub key: String,
    pub description: Option<String>,
    pub workflow_parameter_type: WorkflowParameterValueType,
    #[serde(default)]
    pub default_value: Value,
}

/// Back-reference to the parameter a context parameter reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSource {
    pub key: String,
    pub parameter_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextParameter {
    pub key: String,
    pub description: Option<String>,
    pub source: ContextSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretParameter {
    pub key: String,
    pub description: Option<String>,
    pub bitwarden_collection_id: String,
    pub bitwarden_identity_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bitwarden_identity_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardParameter {
    pub key: String,
    pub description: Option<String>,
    pub bitwarden_collection_id: String,
    pub bitwarden_item_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialParameter {
    pub key: String,
    pub description: Option<String>,
    pub credential_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnePasswordParameter {
    pub key: String,
    pub description: Option<String>,
    pub vault_id: String,
    pub item_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentialParameter {
    pub key: String,
    pub description: Option<String>,
    pub bitwarden_collection_id: Option<String>,
    pub bitwarden_item_id: Option<String>,
    pub url_parameter_key: Option<String>,
}

/// A block's output slot. Never shown in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputParameter {
    pub key: String,
    pub description: Option<String>,
    pub output_parameter_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsSecretParameter {
    pub key: String,
    pub description: Option<String>,
    pub aws_key: String,
}

/// A parameter whose tag this crate does not know. Serializes back to `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedParameter {
    pub parameter_type: String,
    pub key: Option<String>,
    pub raw: Value,
}

impl Serialize for UnrecognizedParameter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Why a raw parameter record could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum ParameterDecodeError {
    #[error("parameter record has no 'parameter_type'")]
    MissingTag { key: Option<String> },
    #[error("invalid '{tag}' parameter: {source}")]
    Invalid {
        tag: String,
        key: Option<String>,
        #[source]
        source: serde_json::Error,
    },
}

impl ParameterDecodeError {
    /// Key of the offending record, when it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ParameterDecodeError::MissingTag { key } => key.as_deref(),
            ParameterDecodeError::Invalid { key, .. } => key.as_deref(),
        }
    }
}

impl WorkflowParameter {
    /// Decode one raw parameter record. The tag is read first: a known tag
    /// decodes strictly, an unknown one keeps the raw record.
    pub fn from_raw(raw: Value) -> Result<Self, ParameterDecodeError> {
        let key = raw.get("key").and_then(Value::as_str).map(str::to_string);
        let Some(tag) = raw.get("parameter_type").and_then(Value::as_str) else {
            return Err(ParameterDecodeError::MissingTag { key });
        };
        let tag = tag.to_string();

        let Some(kind) = ParameterType::from_tag(&tag) else {
            return Ok(WorkflowParameter::Unrecognized(UnrecognizedParameter {
                parameter_type: tag,
                key,
                raw,
            }));
        };

        decode_known(kind, raw).map_err(|source| ParameterDecodeError::Invalid { tag, key, source })
    }
}

impl<'de> Deserialize<'de> for WorkflowParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        WorkflowParameter::from_raw(raw).map_err(de::Error::custom)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn decode_known(kind: ParameterType, raw: Value) -> Result<WorkflowParameter, serde_json::Error> {
    let parameter = match kind {
        ParameterType::Workflow => WorkflowParameter::Workflow(serde_json::from_value(raw)?),
        ParameterType::Context => WorkflowParameter::Context(serde_json::from_value(raw)?),
        ParameterType::BitwardenSensitiveInformation => {
            WorkflowParameter::Secret(serde_json::from_value(raw)?)
        }
        ParameterType::BitwardenCreditCardData => {
            WorkflowParameter::CreditCard(serde_json::from_value(raw)?)
        }
        ParameterType::Credential => WorkflowParameter::Credential(serde_json::from_value(raw)?),
        ParameterType::OnePassword => WorkflowParameter::OnePassword(serde_json::from_value(raw)?),
        ParameterType::BitwardenLoginCredential => {
            WorkflowParameter::LoginCredential(serde_json::from_value(raw)?)
        }
        ParameterType::Output => WorkflowParameter::Output(serde_json::from_value(raw)?),
        ParameterType::AwsSecret => WorkflowParameter::AwsSecret(serde_json::from_value(raw)?),
    };
    Ok(parameter)
}

impl WorkflowParameter {
    /// The parameter's key. Unrecognized records without a `key` yield `""`.
    pub fn key(&self) -> &str {
        match self {
            WorkflowParameter::Workflow(p) => &p.key,
            WorkflowParameter::Context(p) => &p.key,
            WorkflowParameter::Secret(p) => &p.key,
            WorkflowParameter::CreditCard(p) => &p.key,
            WorkflowParameter::Credential(p) => &p.key,
            WorkflowParameter::OnePassword(p) => &p.key,
            WorkflowParameter::LoginCredential(p) => &p.key,
            WorkflowParameter::Output(p) => &p.key,
            WorkflowParameter::AwsSecret(p) => &p.key,
            WorkflowParameter::Unrecognized(p) => p.key.as_deref().unwrap_or(""),
        }
    }

    /// The wire tag, e.g. `"bitwarden_login_credential"`.
    pub fn parameter_type(&self) -> &str {
        match self {
            WorkflowParameter::Workflow(_) => ParameterType::Workflow.as_str(),
            WorkflowParameter::Context(_) => ParameterType::Context.as_str(),
            WorkflowParameter::Secret(_) => ParameterType::BitwardenSensitiveInformation.as_str(),
            WorkflowParameter::CreditCard(_) => ParameterType::BitwardenCreditCardData.as_str(),
            WorkflowParameter::Credential(_) => ParameterType::Credential.as_str(),
            WorkflowParameter::OnePassword(_) => ParameterType::OnePassword.as_str(),
            WorkflowParameter::LoginCredential(_) => ParameterType::BitwardenLoginCredential.as_str(),
            WorkflowParameter::Output(_) => ParameterType::Output.as_str(),
            WorkflowParameter::AwsSecret(_) => ParameterType::AwsSecret.as_str(),
            WorkflowParameter::Unrecognized(p) => &p.parameter_type,
        }
    }
}
