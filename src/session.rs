//! Editor UI state and the one-shot session initialization.
//!
//! The editor does not reach into global stores. Whoever hosts it hands over a
//! [`UiStateStore`], and [`EditorSession::initialize`] is called explicitly
//! when the editor opens.

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorUiState {
    pub sidebar_collapsed: bool,
    pub has_changes: bool,
    pub debug_mode: bool,
}

pub trait UiStateStore {
    fn set_sidebar_collapsed(&mut self, collapsed: bool);
    fn set_has_changes(&mut self, has_changes: bool);
    fn is_debug_mode(&self) -> bool;
}

impl UiStateStore for EditorUiState {
    fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    fn set_has_changes(&mut self, has_changes: bool) {
        self.has_changes = has_changes;
    }

    fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }
}

/// Cloneable handle to UI state shared with the rest of the application.
#[derive(Debug, Clone, Default)]
pub struct SharedUiState {
    inner: Arc<Mutex<EditorUiState>>,
}

impl SharedUiState {
    pub fn new(state: EditorUiState) -> Self {
        SharedUiState {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> EditorUiState {
        *self.lock()
    }

    pub fn set_debug_mode(&self, debug_mode: bool) {
        self.lock().debug_mode = debug_mode;
    }

    // A poisoned lock still holds plain flags, so keep using them.
    fn lock(&self) -> MutexGuard<'_, EditorUiState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UiStateStore for SharedUiState {
    fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.lock().sidebar_collapsed = collapsed;
    }

    fn set_has_changes(&mut self, has_changes: bool) {
        self.lock().has_changes = has_changes;
    }

    fn is_debug_mode(&self) -> bool {
        self.lock().debug_mode
    }
}

/// Lifetime of one opened editor.
#[derive(Debug, Default)]
pub struct EditorSession {
    initialized: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession::default()
    }

    /// Collapse the sidebar and clear the unsaved-changes flag.
    ///
    /// Only the first call per session touches the store; it returns `true`.
    pub fn initialize<S: UiStateStore + ?Sized>(&mut self, store: &mut S) -> bool {
        if self.initialized {
            return false;
        }
        store.set_sidebar_collapsed(true);
        store.set_has_changes(false);
        self.initialized = true;
        log::debug!("editor session initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
