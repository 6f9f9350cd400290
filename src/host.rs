//! Editor host: fetch a workflow and the global list, then assemble the view.
//!
//! Both fetches run concurrently. Content waits until both are done. A load
//! can be cancelled through a `futures` abort handle.

use async_trait::async_trait;
use futures::future::{self, AbortRegistration, Abortable, Aborted};
use serde::Serialize;

use crate::classify::{initial_parameters, EditorParameter};
use crate::config::EditorOptions;
use crate::elements::{build_elements, validate_elements, GraphElements};
use crate::error::{EditorError, LoadError};
use crate::parse::{GlobalWorkflow, WorkflowResource};
use crate::session::{EditorSession, UiStateStore};
use crate::settings::{extract_settings, WorkflowSettings};

/// Where the host gets its data from. Fetch failures are the source's to
/// report; the host only sees them as missing data.
#[async_trait]
pub trait WorkflowSource: Send + Sync {
    async fn get_workflow(&self, permanent_id: &str) -> Result<Option<WorkflowResource>, EditorError>;
    async fn get_global_workflows(&self) -> Result<Vec<GlobalWorkflow>, EditorError>;
}

/// State of one fetch as the host observes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Done(Option<T>),
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasWidth {
    Full,
    /// Leaves room for the debug panel.
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorLayout {
    pub canvas: CanvasWidth,
    pub debug_panel: bool,
}

impl EditorLayout {
    pub fn for_debug_mode(debug_mode: bool) -> Self {
        EditorLayout {
            canvas: if debug_mode { CanvasWidth::Narrow } else { CanvasWidth::Full },
            debug_panel: debug_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorModel {
    pub title: String,
    pub read_only: bool,
    pub settings: WorkflowSettings,
    pub elements: GraphElements,
    pub parameters: Vec<EditorParameter>,
    pub layout: EditorLayout,
    pub workflow: WorkflowResource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EditorView {
    /// Placeholder while either fetch is in flight.
    Loading,
    /// Nothing to render: the workflow does not exist.
    Empty,
    Ready(EditorModel),
}

/// Whether `permanent_id` belongs to the global (template) set.
pub fn is_global_workflow(globals: &[GlobalWorkflow], permanent_id: &str) -> bool {
    globals
        .iter()
        .any(|g| g.workflow_permanent_id == permanent_id)
}

/// Assemble the editor view from the two fetch states.
pub fn assemble_view(
    workflow: &Fetch<WorkflowResource>,
    globals: &Fetch<Vec<GlobalWorkflow>>,
    permanent_id: &str,
    options: &EditorOptions,
) -> Result<EditorView, Vec<EditorError>> {
    let (Fetch::Done(workflow), Fetch::Done(globals)) = (workflow, globals) else {
        return Ok(EditorView::Loading);
    };
    let Some(workflow) = workflow else {
        return Ok(EditorView::Empty);
    };

    let read_only = globals
        .as_deref()
        .is_some_and(|list| is_global_workflow(list, permanent_id));

    let settings = extract_settings(workflow);
    let elements = build_elements(&workflow.workflow_definition.blocks, &settings, read_only);
    for problem in validate_elements(&elements) {
        log::warn!("workflow '{}': {}", permanent_id, problem);
    }
    let parameters = initial_parameters(workflow, options.unknown_parameters)?;

    Ok(EditorView::Ready(EditorModel {
        title: workflow.title.clone(),
        read_only,
        settings,
        elements,
        parameters,
        layout: EditorLayout::for_debug_mode(options.debug_mode),
        workflow: workflow.clone(),
    }))
}

pub struct EditorHost<S> {
    source: S,
    options: EditorOptions,
    session: EditorSession,
}

impl<S: WorkflowSource> EditorHost<S> {
    pub fn new(source: S, options: EditorOptions) -> Self {
        EditorHost {
            source,
            options,
            session: EditorSession::new(),
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Start the editor session against the application's UI state.
    ///
    /// Resets the sidebar and unsaved-changes flags on the first call and
    /// picks up the current debug mode on every call.
    pub fn open<U: UiStateStore + ?Sized>(&mut self, store: &mut U) -> bool {
        self.options.debug_mode = store.is_debug_mode();
        self.session.initialize(store)
    }

    /// What to render before [`EditorHost::load`] resolves.
    pub fn initial_view(&self) -> EditorView {
        EditorView::Loading
    }

    pub async fn load(&self, permanent_id: &str) -> Result<EditorView, LoadError> {
        let (workflow, globals) = future::join(
            self.source.get_workflow(permanent_id),
            self.source.get_global_workflows(),
        )
        .await;

        let workflow = workflow.unwrap_or_else(|e| {
            log::warn!("failed to fetch workflow '{}': {}", permanent_id, e);
            None
        });
        let globals = globals.unwrap_or_else(|e| {
            log::warn!("failed to fetch global workflows: {}", e);
            Vec::new()
        });

        let view = assemble_view(
            &Fetch::Done(workflow),
            &Fetch::Done(Some(globals)),
            permanent_id,
            &self.options,
        )
        .map_err(LoadError::Classify)?;

        log::debug!(
            "loaded editor for '{}': {}",
            permanent_id,
            match &view {
                EditorView::Loading => "loading",
                EditorView::Empty => "empty",
                EditorView::Ready(_) => "ready",
            }
        );
        Ok(view)
    }

    /// [`EditorHost::load`] that stops when the paired `AbortHandle` fires.
    pub async fn load_cancellable(
        &self,
        permanent_id: &str,
        registration: AbortRegistration,
    ) -> Result<EditorView, LoadError> {
        match Abortable::new(self.load(permanent_id), registration).await {
            Ok(result) => result,
            Err(Aborted) => {
                log::debug!("editor load for '{}' cancelled", permanent_id);
                Err(LoadError::Cancelled)
            }
        }
    }
}
