//! Side panel logic for a single node.
//!
//! Node data is always read from the store at the moment it is shown. The
//! only thing held here is the text of an in-progress label edit.

use crate::model::{NodeDataPatch, NodeStatus};
use crate::store::GraphStore;
use serde::Serialize;

/// Read-only view of one node as the inspector shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInspectorView {
    pub id: String,
    pub label: String,
    pub status: NodeStatus,
    pub cpu: f64,
    pub memory: f64,
    pub requests: u64,
    /// `requests` with thousands separators, e.g. `1,250`.
    pub requests_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub node_id: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct NodeInspector {
    edit: Option<EditBuffer>,
}

impl NodeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inspect(store: &GraphStore, node_id: &str) -> Option<NodeInspectorView> {
        let node = store.node(node_id)?;
        Some(NodeInspectorView {
            id: node.id.clone(),
            label: node.data.label.clone(),
            status: node.data.status,
            cpu: node.data.cpu,
            memory: node.data.memory,
            requests: node.data.requests,
            requests_display: group_thousands(node.data.requests),
        })
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Start editing the node's label. Fails if the node is not in the store.
    pub fn begin_edit(&mut self, store: &GraphStore, node_id: &str) -> bool {
        let Some(node) = store.node(node_id) else {
            return false;
        };
        self.edit = Some(EditBuffer {
            node_id: node_id.to_string(),
            text: node.data.label.clone(),
        });
        true
    }

    /// Replace the text of the current edit. Ignored when not editing.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.edit.as_mut() {
            edit.text = text.into();
        }
    }

    /// Write `new_label` to the node. A label that is blank after trimming
    /// cancels the edit instead. The edit buffer is released either way.
    pub fn commit_edit(&mut self, store: &mut GraphStore, node_id: &str, new_label: &str) -> bool {
        if self.edit.as_ref().is_some_and(|e| e.node_id == node_id) {
            self.edit = None;
        }

        let trimmed = new_label.trim();
        if trimmed.is_empty() {
            tracing::debug!(node_id, "blank label discarded");
            return false;
        }
        store.update_node_data(node_id, &NodeDataPatch::label(trimmed))
    }

    /// Commit whatever the buffer currently holds.
    pub fn commit_buffer(&mut self, store: &mut GraphStore) -> bool {
        match self.edit.clone() {
            Some(EditBuffer { node_id, text }) => self.commit_edit(store, &node_id, &text),
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Closing the panel drops any uncommitted edit.
    pub fn close(&mut self) {
        self.edit = None;
    }

    /// Drop an edit whose node is not the selected one or no longer exists.
    pub fn retain_for(&mut self, selected: Option<&str>, store: &GraphStore) {
        let keep = self
            .edit
            .as_ref()
            .is_some_and(|e| Some(e.node_id.as_str()) == selected && store.contains_node(&e.node_id));
        if !keep {
            self.edit = None;
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
