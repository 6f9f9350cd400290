#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use workflow_editor::error::EditorError;
use workflow_editor::host::WorkflowSource;
use workflow_editor::parse::*;

// =============================================================================
// Fixtures
// =============================================================================

pub fn checkout_workflow() -> WorkflowResource {
    parse_workflow(include_str!("../fixtures/checkout_workflow.json"))
        .expect("checkout fixture should parse")
}

pub fn global_workflows() -> Vec<GlobalWorkflow> {
    parse_global_workflows(include_str!("../fixtures/global_workflows.json"))
        .expect("global list fixture should parse")
}

pub fn minimal_workflow(permanent_id: &str) -> WorkflowResource {
    WorkflowResource {
        workflow_permanent_id: permanent_id.into(),
        title: "Minimal".into(),
        persist_browser_session: false,
        proxy_location: None,
        webhook_callback_url: None,
        model: None,
        max_screenshot_scrolls: None,
        extra_http_headers: None,
        workflow_definition: WorkflowDefinition::default(),
    }
}

pub fn global(permanent_id: &str) -> GlobalWorkflow {
    GlobalWorkflow {
        workflow_permanent_id: permanent_id.into(),
        title: None,
    }
}

// =============================================================================
// Parameter builders
// =============================================================================

pub fn workflow_param(key: &str, ty: WorkflowParameterValueType, default: Value) -> WorkflowParameter {
    WorkflowParameter::Workflow(WorkflowValueParameter {
        key: key.into(),
        description: None,
        workflow_parameter_type: ty,
        default_value: default,
    })
}

pub fn credential_param(key: &str, credential_id: &str) -> WorkflowParameter {
    WorkflowParameter::Credential(CredentialParameter {
        key: key.into(),
        description: None,
        credential_id: credential_id.into(),
    })
}

pub fn context_param(key: &str, source_key: &str) -> WorkflowParameter {
    WorkflowParameter::Context(ContextParameter {
        key: key.into(),
        description: None,
        source: ContextSource {
            key: source_key.into(),
            parameter_type: None,
        },
    })
}

pub fn output_param(key: &str) -> WorkflowParameter {
    WorkflowParameter::Output(OutputParameter {
        key: key.into(),
        description: None,
        output_parameter_id: None,
    })
}

pub fn unknown_param(key: &str, tag: &str) -> WorkflowParameter {
    WorkflowParameter::Unrecognized(UnrecognizedParameter {
        parameter_type: tag.into(),
        key: Some(key.into()),
        raw: serde_json::json!({ "parameter_type": tag, "key": key }),
    })
}

// =============================================================================
// Workflow sources
// =============================================================================

/// Answers immediately with canned data, or with an error when asked to fail.
pub struct StaticSource {
    pub workflow: Option<WorkflowResource>,
    pub globals: Vec<GlobalWorkflow>,
    pub fail_workflow: bool,
    pub fail_globals: bool,
}

impl StaticSource {
    pub fn new(workflow: Option<WorkflowResource>, globals: Vec<GlobalWorkflow>) -> Self {
        StaticSource {
            workflow,
            globals,
            fail_workflow: false,
            fail_globals: false,
        }
    }
}

#[async_trait]
impl WorkflowSource for StaticSource {
    async fn get_workflow(&self, permanent_id: &str) -> Result<Option<WorkflowResource>, EditorError> {
        if self.fail_workflow {
            return Err(EditorError::load("F001", "workflow request failed"));
        }
        Ok(self
            .workflow
            .clone()
            .filter(|w| w.workflow_permanent_id == permanent_id))
    }

    async fn get_global_workflows(&self) -> Result<Vec<GlobalWorkflow>, EditorError> {
        if self.fail_globals {
            return Err(EditorError::load("F002", "global workflow request failed"));
        }
        Ok(self.globals.clone())
    }
}

/// The workflow fetch only finishes after the global fetch has started, so a
/// host that awaited them one after the other would never complete.
pub struct RendezvousSource {
    workflow: WorkflowResource,
    tx: Mutex<Option<oneshot::Sender<()>>>,
    rx: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RendezvousSource {
    pub fn new(workflow: WorkflowResource) -> Self {
        let (tx, rx) = oneshot::channel();
        RendezvousSource {
            workflow,
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
        }
    }
}

#[async_trait]
impl WorkflowSource for RendezvousSource {
    async fn get_workflow(&self, _permanent_id: &str) -> Result<Option<WorkflowResource>, EditorError> {
        let rx = self.rx.lock().unwrap().take();
        if let Some(rx) = rx {
            let _ = rx.await;
        }
        Ok(Some(self.workflow.clone()))
    }

    async fn get_global_workflows(&self) -> Result<Vec<GlobalWorkflow>, EditorError> {
        let tx = self.tx.lock().unwrap().take();
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
        Ok(vec![])
    }
}

/// Never answers.
pub struct PendingSource;

#[async_trait]
impl WorkflowSource for PendingSource {
    async fn get_workflow(&self, _permanent_id: &str) -> Result<Option<WorkflowResource>, EditorError> {
        futures::future::pending().await
    }

    async fn get_global_workflows(&self) -> Result<Vec<GlobalWorkflow>, EditorError> {
        futures::future::pending().await
    }
}
