//! Canonical in-memory graph for the selected application.
//!
//! The store is passive: it knows nothing about selection or rendering. Every
//! mutation either leaves the graph consistent (no edge points at a missing
//! node) or does nothing at all. Missing ids are not errors here, since
//! delete-then-update races are routine in an interactive editor.

mod ids;
mod notify;
mod placement;

pub use ids::NodeIdGenerator;
pub use notify::{StoreChange, SubscriptionId};
pub use placement::Placement;

use crate::model::{Connection, GraphEdge, GraphNode, GraphSnapshot, NodeData, NodeDataPatch, Position};
use notify::Listeners;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    ids: NodeIdGenerator,
    placement: Placement,
    listeners: Listeners,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(placement: Placement) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    pub fn edge(&self, edge_id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Rendering-ready copy of the current graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.edges.clone())
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Swap in a fetched snapshot wholesale.
    ///
    /// Repeated node ids keep their first occurrence. Edges that reference
    /// nodes absent from the snapshot, or repeat an edge id, are dropped.
    pub fn replace_graph(&mut self, snapshot: GraphSnapshot) {
        let mut seen = HashSet::new();
        let nodes: Vec<GraphNode> = snapshot
            .nodes
            .into_iter()
            .filter(|n| {
                let fresh = seen.insert(n.id.clone());
                if !fresh {
                    tracing::warn!(node_id = %n.id, "dropping duplicate node from snapshot");
                }
                fresh
            })
            .collect();

        let mut edge_ids = HashSet::new();
        let edges: Vec<GraphEdge> = snapshot
            .edges
            .into_iter()
            .filter(|e| {
                let dangling = !seen.contains(&e.source) || !seen.contains(&e.target);
                if dangling {
                    tracing::warn!(edge_id = %e.id, source = %e.source, target = %e.target, "dropping dangling edge from snapshot");
                    return false;
                }
                edge_ids.insert(e.id.clone())
            })
            .collect();

        self.nodes = nodes;
        self.edges = edges;
        tracing::debug!(nodes = self.nodes.len(), edges = self.edges.len(), "graph replaced");
        self.listeners.emit(&StoreChange::Replaced);
    }

    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.nodes.clear();
        self.edges.clear();
        self.listeners.emit(&StoreChange::Cleared);
    }

    /// Insert a node with a fresh id at the next free default position.
    pub fn add_node(&mut self, data: NodeData) -> String {
        let nodes = &self.nodes;
        let id = self.ids.next(|candidate| nodes.iter().any(|n| n.id == candidate));
        let position = self.placement.next(&self.nodes);

        self.nodes.push(GraphNode::new(id.clone(), position, data));
        tracing::trace!(node_id = %id, x = position.x, y = position.y, "node added");
        self.listeners.emit(&StoreChange::NodeAdded(id.clone()));
        id
    }

    /// Merge `patch` into the node's data. Returns false if the node is gone
    /// or nothing changed.
    pub fn update_node_data(&mut self, node_id: &str, patch: &NodeDataPatch) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            tracing::debug!(node_id, "update on missing node ignored");
            return false;
        };
        if !patch.apply(&mut node.data) {
            return false;
        }
        self.listeners.emit(&StoreChange::NodeUpdated(node_id.to_string()));
        true
    }

    pub fn update_node_position(&mut self, node_id: &str, position: Position) -> bool {
        if !position.x.is_finite() || !position.y.is_finite() {
            return false;
        }
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            tracing::debug!(node_id, "move of missing node ignored");
            return false;
        };
        if node.position == position {
            return false;
        }
        node.position = position;
        self.listeners.emit(&StoreChange::NodeMoved(node_id.to_string()));
        true
    }

    /// Remove a node together with every edge touching it, as one change.
    pub fn delete_node(&mut self, node_id: &str) -> Option<GraphNode> {
        let index = self.nodes.iter().position(|n| n.id == node_id)?;
        let node = self.nodes.remove(index);

        let mut removed_edges = Vec::new();
        self.edges.retain(|e| {
            if e.touches(node_id) {
                removed_edges.push(e.id.clone());
                false
            } else {
                true
            }
        });

        tracing::trace!(node_id, removed_edges = removed_edges.len(), "node deleted");
        self.listeners.emit(&StoreChange::NodeDeleted {
            node_id: node_id.to_string(),
            removed_edges,
        });
        Some(node)
    }

    /// Connect two existing, distinct nodes. Returns the new edge id, or
    /// `None` if an endpoint is missing, the edge would be a self-loop, or
    /// the same directed connection already exists.
    pub fn add_edge(&mut self, connection: &Connection) -> Option<String> {
        let Connection { source, target } = connection;
        if source == target || !self.contains_node(source) || !self.contains_node(target) {
            tracing::debug!(%source, %target, "connection rejected");
            return None;
        }
        if self.edges.iter().any(|e| &e.source == source && &e.target == target) {
            return None;
        }

        let edges = &self.edges;
        let id = ids::edge_id(source, target, |candidate| edges.iter().any(|e| e.id == candidate));
        self.edges.push(GraphEdge::new(id.clone(), source.clone(), target.clone()));
        self.listeners.emit(&StoreChange::EdgeAdded(id.clone()));
        Some(id)
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> bool {
        let Some(index) = self.edges.iter().position(|e| e.id == edge_id) else {
            return false;
        };
        self.edges.remove(index);
        self.listeners.emit(&StoreChange::EdgeDeleted(edge_id.to_string()));
        true
    }
}
