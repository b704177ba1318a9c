mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::editor::{EditorStatus, GraphEditor};
use crate::inspector::NodeInspectorView;
use crate::model::{Application, GraphEdge, GraphNode};
use crate::selection::SelectionState;
use crate::sync::GraphSource;
use std::io::Write;

/// Everything a canvas render needs, borrowed from the editor.
#[derive(Debug, Clone)]
pub struct GraphReport<'a> {
    pub selection: &'a SelectionState,
    pub status: EditorStatus,
    pub nodes: &'a [GraphNode],
    pub edges: &'a [GraphEdge],
}

impl<'a> GraphReport<'a> {
    pub fn from_editor<S: GraphSource>(editor: &'a GraphEditor<S>) -> Self {
        Self {
            selection: editor.selection(),
            status: editor.status(),
            nodes: editor.store().nodes(),
            edges: editor.store().edges(),
        }
    }

    pub fn app_id(&self) -> Option<&'a str> {
        match self.selection {
            SelectionState::NoAppSelected => None,
            SelectionState::AppSelectedNoNode { app_id }
            | SelectionState::AppSelectedNodeSelected { app_id, .. } => Some(app_id.as_str()),
        }
    }

    pub fn selected_node_id(&self) -> Option<&'a str> {
        match self.selection {
            SelectionState::AppSelectedNodeSelected { node_id, .. } => Some(node_id.as_str()),
            _ => None,
        }
    }
}

pub trait OutputFormatter {
    fn applications<W: Write>(&self, apps: &[Application], writer: &mut W) -> std::io::Result<()>;

    fn graph<W: Write>(&self, report: &GraphReport<'_>, writer: &mut W) -> std::io::Result<()>;

    fn inspector<W: Write>(&self, view: &NodeInspectorView, writer: &mut W) -> std::io::Result<()>;
}
