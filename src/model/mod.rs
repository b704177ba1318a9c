mod application;
mod edge;
mod node;
mod snapshot;

pub use application::Application;
pub use edge::{Connection, GraphEdge};
pub use node::{GraphNode, NodeData, NodeDataPatch, NodeKind, NodeStatus, Position};
pub use snapshot::GraphSnapshot;
