use crate::editor::EditorStatus;
use crate::inspector::NodeInspectorView;
use crate::model::{Application, GraphEdge, GraphNode};
use crate::output::{GraphReport, OutputFormatter};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Default)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonGraph<'a> {
    app_id: Option<&'a str>,
    selected_node_id: Option<&'a str>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
}

fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonOutput {
    fn applications<W: Write>(&self, apps: &[Application], writer: &mut W) -> std::io::Result<()> {
        write_json(apps, writer)
    }

    fn graph<W: Write>(&self, report: &GraphReport<'_>, writer: &mut W) -> std::io::Result<()> {
        let (status, error) = match &report.status {
            EditorStatus::NoApplication => ("no-application", None),
            EditorStatus::Loading => ("loading", None),
            EditorStatus::Error(message) => ("error", Some(message.as_str())),
            EditorStatus::Ready => ("ready", None),
        };

        write_json(
            &JsonGraph {
                app_id: report.app_id(),
                selected_node_id: report.selected_node_id(),
                status,
                error,
                nodes: report.nodes,
                edges: report.edges,
            },
            writer,
        )
    }

    fn inspector<W: Write>(&self, view: &NodeInspectorView, writer: &mut W) -> std::io::Result<()> {
        write_json(view, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionState;

    #[test]
    fn test_graph_json_shape() {
        let selection = SelectionState::AppSelectedNoNode {
            app_id: "auth".to_string(),
        };
        let report = GraphReport {
            selection: &selection,
            status: EditorStatus::Ready,
            nodes: &[],
            edges: &[],
        };

        let mut buf = Vec::new();
        JsonOutput::new().graph(&report, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["app_id"], "auth");
        assert_eq!(value["status"], "ready");
        assert!(value["selected_node_id"].is_null());
        assert!(value.get("error").is_none());
        assert_eq!(value["nodes"], serde_json::json!([]));
    }
}
