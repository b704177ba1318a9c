use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_LABEL: &str = "Service";
const NEW_SERVICE_LABEL: &str = "New Service";

/// A service node on the canvas.
///
/// Nodes are always fully populated: payloads with missing fields are
/// completed with defaults while decoding, so nothing downstream has to
/// guess at absent data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodePayload")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Service,
            position,
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Service,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Healthy,
    Degraded,
    Down,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeStatus::Healthy => "healthy",
            NodeStatus::Degraded => "degraded",
            NodeStatus::Down => "down",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Ok(NodeStatus::Healthy),
            "degraded" => Ok(NodeStatus::Degraded),
            "down" => Ok(NodeStatus::Down),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Display name, health and metrics of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeDataPayload")]
pub struct NodeData {
    pub label: String,
    pub status: NodeStatus,
    /// Percentage in [0, 100].
    pub cpu: f64,
    /// Percentage in [0, 100].
    pub memory: f64,
    pub requests: u64,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            status: NodeStatus::Healthy,
            cpu: 0.0,
            memory: 0.0,
            requests: 0,
        }
    }
}

impl NodeData {
    pub fn new(label: impl Into<String>, status: NodeStatus, cpu: f64, memory: f64, requests: u64) -> Self {
        Self {
            label: label.into(),
            status,
            cpu: percent(cpu),
            memory: percent(memory),
            requests,
        }
    }

    /// Data for a node created from the canvas "add" action.
    pub fn new_service() -> Self {
        Self {
            label: NEW_SERVICE_LABEL.to_string(),
            ..Self::default()
        }
    }
}

/// A typed partial update of [`NodeData`]. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDataPatch {
    pub label: Option<String>,
    pub status: Option<NodeStatus>,
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub requests: Option<u64>,
}

impl NodeDataPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn status(status: NodeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_cpu(mut self, cpu: f64) -> Self {
        self.cpu = Some(cpu);
        self
    }

    pub fn with_memory(mut self, memory: f64) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_requests(mut self, requests: u64) -> Self {
        self.requests = Some(requests);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.status.is_none()
            && self.cpu.is_none()
            && self.memory.is_none()
            && self.requests.is_none()
    }

    /// Apply field by field. Returns whether `data` changed.
    ///
    /// Labels are trimmed and a blank label is ignored; percentages are clamped.
    pub fn apply(&self, data: &mut NodeData) -> bool {
        let before = data.clone();

        if let Some(label) = &self.label {
            let trimmed = label.trim();
            if !trimmed.is_empty() {
                data.label = trimmed.to_string();
            }
        }
        if let Some(status) = self.status {
            data.status = status;
        }
        if let Some(cpu) = self.cpu {
            data.cpu = percent(cpu);
        }
        if let Some(memory) = self.memory {
            data.memory = percent(memory);
        }
        if let Some(requests) = self.requests {
            data.requests = requests;
        }

        *data != before
    }
}

fn percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Lenient wire shape of a node.
#[derive(Deserialize)]
struct NodePayload {
    id: String,
    #[serde(rename = "type", default)]
    _kind: Option<String>,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    data: Option<NodeData>,
}

impl From<NodePayload> for GraphNode {
    fn from(raw: NodePayload) -> Self {
        GraphNode::new(
            raw.id,
            raw.position.unwrap_or_default(),
            raw.data.unwrap_or_default(),
        )
    }
}

#[derive(Deserialize)]
struct NodeDataPayload {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    cpu: Option<f64>,
    #[serde(default)]
    memory: Option<f64>,
    #[serde(default)]
    requests: Option<f64>,
}

impl From<NodeDataPayload> for NodeData {
    fn from(raw: NodeDataPayload) -> Self {
        let label = raw
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());

        NodeData {
            label,
            status: raw
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            cpu: percent(raw.cpu.unwrap_or(0.0)),
            memory: percent(raw.memory.unwrap_or(0.0)),
            requests: count(raw.requests.unwrap_or(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_is_fully_populated() {
        let node: GraphNode = serde_json::from_str(r#"{"id": "n1", "data": {"cpu": 180}}"#).unwrap();

        assert_eq!(node.kind, NodeKind::Service);
        assert_eq!(node.position, Position::default());
        assert_eq!(node.data.label, "Service");
        assert_eq!(node.data.status, NodeStatus::Healthy);
        assert_eq!(node.data.cpu, 100.0);
        assert_eq!(node.data.requests, 0);
    }

    #[test]
    fn test_unknown_status_falls_back_to_healthy() {
        let data: NodeData = serde_json::from_str(r#"{"label": "Cache", "status": "melting"}"#).unwrap();
        assert_eq!(data.status, NodeStatus::Healthy);
        assert_eq!(data.label, "Cache");
    }

    #[test]
    fn test_serialized_node_uses_type_field() {
        let node = GraphNode::new("n1", Position::new(1.0, 2.0), NodeData::new_service());
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "service");
        assert_eq!(json["data"]["label"], "New Service");
        assert_eq!(json["data"]["status"], "healthy");
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut data = NodeData::new("API Gateway", NodeStatus::Healthy, 45.0, 62.0, 1250);
        let patch = NodeDataPatch::status(NodeStatus::Degraded).with_cpu(-5.0);

        assert!(patch.apply(&mut data));
        assert_eq!(data.label, "API Gateway");
        assert_eq!(data.status, NodeStatus::Degraded);
        assert_eq!(data.cpu, 0.0);
        assert_eq!(data.memory, 62.0);
        assert_eq!(data.requests, 1250);
    }

    #[test]
    fn test_blank_label_patch_is_ignored() {
        let mut data = NodeData::new_service();
        assert!(!NodeDataPatch::label("   ").apply(&mut data));
        assert_eq!(data.label, "New Service");
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("Down".parse::<NodeStatus>().unwrap(), NodeStatus::Down);
        assert!("sideways".parse::<NodeStatus>().is_err());
    }
}
