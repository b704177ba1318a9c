use crate::editor::EditorStatus;
use crate::inspector::NodeInspectorView;
use crate::model::Application;
use crate::output::{GraphReport, OutputFormatter};
use std::collections::HashMap;
use std::io::Write;

#[derive(Debug, Default)]
pub struct MarkdownOutput;

impl MarkdownOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for MarkdownOutput {
    fn applications<W: Write>(&self, apps: &[Application], writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Applications\n")?;
        if apps.is_empty() {
            writeln!(writer, "_No applications available._")?;
            return Ok(());
        }
        for app in apps {
            if app.description.is_empty() {
                writeln!(writer, "- `{}` **{}**", app.id, app.name)?;
            } else {
                writeln!(writer, "- `{}` **{}**: {}", app.id, app.name, app.description)?;
            }
        }
        Ok(())
    }

    fn graph<W: Write>(&self, report: &GraphReport<'_>, writer: &mut W) -> std::io::Result<()> {
        let Some(app_id) = report.app_id() else {
            writeln!(writer, "_Select an app to view its graph._")?;
            return Ok(());
        };

        writeln!(writer, "# Graph: {}\n", app_id)?;
        match &report.status {
            EditorStatus::Loading => {
                writeln!(writer, "_Loading graph..._")?;
                return Ok(());
            }
            EditorStatus::Error(message) => {
                writeln!(writer, "**Failed to load graph:** {}\n", message)?;
                if report.nodes.is_empty() {
                    return Ok(());
                }
                writeln!(writer, "_Showing last loaded graph._\n")?;
            }
            EditorStatus::NoApplication | EditorStatus::Ready => {}
        }

        writeln!(writer, "## Services ({})\n", report.nodes.len())?;
        if report.nodes.is_empty() {
            writeln!(writer, "_No services._\n")?;
        } else {
            writeln!(writer, "| | Id | Label | Status | CPU | Memory | Requests | Position |")?;
            writeln!(writer, "|---|---|---|---|---|---|---|---|")?;
            let selected = report.selected_node_id();
            for node in report.nodes {
                let marker = if Some(node.id.as_str()) == selected { "▶" } else { "" };
                writeln!(
                    writer,
                    "| {} | `{}` | {} | {} | {:.0}% | {:.0}% | {} | ({:.0}, {:.0}) |",
                    marker,
                    node.id,
                    table_cell(&node.data.label),
                    node.data.status,
                    node.data.cpu,
                    node.data.memory,
                    node.data.requests,
                    node.position.x,
                    node.position.y,
                )?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "## Connections ({})\n", report.edges.len())?;
        if report.edges.is_empty() {
            writeln!(writer, "_No connections._")?;
        } else {
            let labels: HashMap<&str, &str> = report
                .nodes
                .iter()
                .map(|n| (n.id.as_str(), n.data.label.as_str()))
                .collect();
            for edge in report.edges {
                writeln!(
                    writer,
                    "- `{}`: {} → {}",
                    edge.id,
                    labels.get(edge.source.as_str()).unwrap_or(&edge.source.as_str()),
                    labels.get(edge.target.as_str()).unwrap_or(&edge.target.as_str()),
                )?;
            }
        }
        Ok(())
    }

    fn inspector<W: Write>(&self, view: &NodeInspectorView, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "## Service Details\n")?;
        writeln!(writer, "- **Name**: {}", view.label)?;
        writeln!(writer, "- **Node ID**: `{}`", view.id)?;
        writeln!(writer, "- **Status**: {}", view.status)?;
        writeln!(writer, "- **CPU**: {:.0}%", view.cpu)?;
        writeln!(writer, "- **Memory**: {:.0}%", view.memory)?;
        writeln!(writer, "- **Requests**: {}", view.requests_display)
    }
}

/// Labels are free text; keep them inside one table cell.
fn table_cell(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphEdge, GraphNode, NodeData, NodeStatus, Position};
    use crate::selection::SelectionState;

    fn render(report: &GraphReport<'_>) -> String {
        let mut buf = Vec::new();
        MarkdownOutput::new().graph(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_graph_lists_nodes_and_named_edges() {
        let nodes = vec![
            GraphNode::new("n1", Position::new(100.0, 100.0), NodeData::new("API Gateway", NodeStatus::Healthy, 45.0, 62.0, 1250)),
            GraphNode::new("n2", Position::new(400.0, 100.0), NodeData::new("Database", NodeStatus::Down, 30.0, 78.0, 850)),
        ];
        let edges = vec![GraphEdge::new("e1", "n1", "n2")];
        let selection = SelectionState::AppSelectedNodeSelected {
            app_id: "prod-api".to_string(),
            node_id: "n2".to_string(),
        };
        let out = render(&GraphReport {
            selection: &selection,
            status: EditorStatus::Ready,
            nodes: &nodes,
            edges: &edges,
        });

        assert!(out.contains("# Graph: prod-api"));
        assert!(out.contains("| ▶ | `n2` | Database | down |"));
        assert!(out.contains("- `e1`: API Gateway → Database"));
    }

    #[test]
    fn test_label_cannot_break_the_table() {
        let nodes = vec![GraphNode::new(
            "n1",
            Position::default(),
            NodeData::new("Edge | Proxy\nv2", NodeStatus::Healthy, 0.0, 0.0, 0),
        )];
        let selection = SelectionState::AppSelectedNoNode {
            app_id: "prod-api".to_string(),
        };
        let out = render(&GraphReport {
            selection: &selection,
            status: EditorStatus::Ready,
            nodes: &nodes,
            edges: &[],
        });

        assert!(out.contains("| `n1` | Edge \\| Proxy v2 | healthy |"));
        let row = out.lines().find(|l| l.contains("`n1`")).unwrap();
        let header = out.lines().find(|l| l.contains("| Id |")).unwrap();
        let cell_borders = row.matches('|').count() - row.matches("\\|").count();
        assert_eq!(cell_borders, header.matches('|').count());
    }

    #[test]
    fn test_no_application_prompt() {
        let selection = SelectionState::NoAppSelected;
        let out = render(&GraphReport {
            selection: &selection,
            status: EditorStatus::NoApplication,
            nodes: &[],
            edges: &[],
        });
        assert!(out.contains("Select an app"));
    }

    #[test]
    fn test_application_list() {
        let apps = vec![Application::new("auth", "Auth Service", "Authentication system")];
        let mut buf = Vec::new();
        MarkdownOutput::new().applications(&apps, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("- `auth` **Auth Service**: Authentication system"));
    }
}
