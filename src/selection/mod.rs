//! Which application and which node the user has selected, and how gestures
//! turn into store mutations.
//!
//! The node selection can never outlive its application: every application
//! change clears it, and it may only point at a node the store holds.

mod keyboard;

pub use keyboard::{Focus, Key};

use crate::store::GraphStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoAppSelected,
    AppSelectedNoNode {
        app_id: String,
    },
    AppSelectedNodeSelected {
        app_id: String,
        node_id: String,
    },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_app_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::NoAppSelected => None,
            SelectionState::AppSelectedNoNode { app_id }
            | SelectionState::AppSelectedNodeSelected { app_id, .. } => Some(app_id.as_str()),
        }
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::AppSelectedNodeSelected { node_id, .. } => Some(node_id.as_str()),
            _ => None,
        }
    }

    /// Select an application (or none). Always drops the node selection.
    pub fn select_application(&mut self, app_id: Option<&str>) {
        self.state = match app_id {
            Some(id) => SelectionState::AppSelectedNoNode {
                app_id: id.to_string(),
            },
            None => SelectionState::NoAppSelected,
        };
    }

    /// Select a node of the current graph. No-op without an application or
    /// when the store does not hold `node_id`.
    pub fn select_node(&mut self, node_id: &str, store: &GraphStore) -> bool {
        let Some(app_id) = self.selected_app_id().map(str::to_string) else {
            tracing::debug!(node_id, "node selection ignored: no application selected");
            return false;
        };
        if !store.contains_node(node_id) {
            tracing::debug!(node_id, "node selection ignored: unknown node");
            return false;
        }
        self.state = SelectionState::AppSelectedNodeSelected {
            app_id,
            node_id: node_id.to_string(),
        };
        true
    }

    pub fn clear_node_selection(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SelectionState::AppSelectedNodeSelected { app_id, .. } => {
                self.state = SelectionState::AppSelectedNoNode { app_id };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Delete the selected node from the store and clear the selection, even
    /// if the store had already lost the node. Returns the deleted node id.
    pub fn delete_selected_node(&mut self, store: &mut GraphStore) -> Option<String> {
        let node_id = self.selected_node_id()?.to_string();
        store.delete_node(&node_id);
        self.clear_node_selection();
        Some(node_id)
    }

    /// Keyboard deletion. Suppressed while a text control has focus.
    pub fn handle_key(&mut self, key: Key, focus: Focus, store: &mut GraphStore) -> Option<String> {
        if !key.is_delete() || focus.is_text_entry() {
            return None;
        }
        self.delete_selected_node(store)
    }

    /// Drop a node selection the store no longer backs.
    pub fn reconcile(&mut self, store: &GraphStore) -> bool {
        let vanished = self
            .selected_node_id()
            .is_some_and(|node_id| !store.contains_node(node_id));
        vanished && self.clear_node_selection()
    }
}
