//! Property tests: arbitrary gesture sequences never leave the store inconsistent.

use flowmap::{Connection, GraphStore, NodeData, NodeDataPatch, Position};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Delete(usize),
    Connect(usize, usize),
    ConnectMissing(usize),
    Disconnect(usize),
    Move(usize, f64, f64),
    SetCpu(usize, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => any::<usize>().prop_map(Op::Delete),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Connect(a, b)),
        1 => any::<usize>().prop_map(Op::ConnectMissing),
        1 => any::<usize>().prop_map(Op::Disconnect),
        1 => (any::<usize>(), -500.0..500.0f64, -500.0..500.0f64).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        1 => (any::<usize>(), -50.0..150.0f64).prop_map(|(i, cpu)| Op::SetCpu(i, cpu)),
    ]
}

fn pick_node(store: &GraphStore, index: usize) -> Option<String> {
    let nodes = store.nodes();
    (!nodes.is_empty()).then(|| nodes[index % nodes.len()].id.clone())
}

fn assert_consistent(store: &GraphStore) {
    let node_ids: HashSet<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids.len(), store.nodes().len(), "duplicate node ids");

    let edge_ids: HashSet<&str> = store.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids.len(), store.edges().len(), "duplicate edge ids");

    for edge in store.edges() {
        assert!(node_ids.contains(edge.source.as_str()), "dangling source in {}", edge.id);
        assert!(node_ids.contains(edge.target.as_str()), "dangling target in {}", edge.id);
    }

    for node in store.nodes() {
        assert!((0.0..=100.0).contains(&node.data.cpu));
        assert!((0.0..=100.0).contains(&node.data.memory));
    }
}

proptest! {
    #[test]
    fn gestures_keep_the_graph_consistent(ops in prop::collection::vec(op(), 1..60)) {
        let mut store = GraphStore::new();
        let mut issued = HashSet::new();
        let mut deleted = HashSet::new();

        for op in ops {
            match op {
                Op::Add => {
                    let id = store.add_node(NodeData::new_service());
                    prop_assert!(issued.insert(id.clone()), "id {} issued twice", id);
                }
                Op::Delete(i) => {
                    if let Some(id) = pick_node(&store, i) {
                        prop_assert!(store.delete_node(&id).is_some());
                        prop_assert!(store.edges().iter().all(|e| !e.touches(&id)));
                        deleted.insert(id);
                    }
                }
                Op::Connect(a, b) => {
                    if let (Some(source), Some(target)) = (pick_node(&store, a), pick_node(&store, b)) {
                        let before = store.edges().len();
                        let added = store.add_edge(&Connection::new(source.as_str(), target.as_str()));
                        if source == target {
                            prop_assert!(added.is_none());
                        }
                        let expected = before + usize::from(added.is_some());
                        prop_assert_eq!(store.edges().len(), expected);
                    }
                }
                Op::ConnectMissing(a) => {
                    let before = store.snapshot();
                    if let Some(source) = pick_node(&store, a) {
                        prop_assert!(store.add_edge(&Connection::new(source.as_str(), "node-missing")).is_none());
                        prop_assert!(store.add_edge(&Connection::new("node-missing", source.as_str())).is_none());
                    }
                    prop_assert_eq!(store.snapshot(), before);
                }
                Op::Disconnect(i) => {
                    let edges = store.edges();
                    if !edges.is_empty() {
                        let id = edges[i % edges.len()].id.clone();
                        prop_assert!(store.delete_edge(&id));
                        prop_assert!(store.edge(&id).is_none());
                    }
                }
                Op::Move(i, x, y) => {
                    if let Some(id) = pick_node(&store, i) {
                        store.update_node_position(&id, Position::new(x, y));
                    }
                }
                Op::SetCpu(i, cpu) => {
                    if let Some(id) = pick_node(&store, i) {
                        store.update_node_data(&id, &NodeDataPatch::default().with_cpu(cpu));
                    }
                }
            }

            assert_consistent(&store);
            for id in &deleted {
                prop_assert!(!store.contains_node(id));
            }
        }
    }

    #[test]
    fn updates_to_deleted_nodes_are_ignored(label in "[A-Za-z ]{1,20}") {
        let mut store = GraphStore::new();
        let id = store.add_node(NodeData::new_service());
        store.delete_node(&id);

        let patch = NodeDataPatch::label(label);
        prop_assert!(!store.update_node_data(&id, &patch));
        prop_assert!(!store.update_node_position(&id, Position::new(1.0, 2.0)));
        prop_assert!(store.is_empty());
    }
}
