//! Selection and synchronization scenarios with fetches completing out of order.

use flowmap::fixtures::Catalog;
use flowmap::{
    Application, EditorStatus, FetchError, GraphEditor, GraphSnapshot, GraphSource, LoadState, SyncOutcome,
};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use tokio::sync::oneshot;

type Gate = oneshot::Receiver<Result<(), u16>>;

/// Serves the built-in catalog, but each fetch for an app with a queued gate
/// waits until the test opens it (or fails it with a status code).
struct GatedSource {
    catalog: Catalog,
    gates: Mutex<HashMap<String, VecDeque<Gate>>>,
}

impl GatedSource {
    fn new() -> Self {
        Self {
            catalog: Catalog::builtin().unwrap(),
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, app_id: &str) -> oneshot::Sender<Result<(), u16>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(app_id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }
}

impl GraphSource for GatedSource {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, FetchError>> + Send {
        let apps = self.catalog.applications().to_vec();
        async move { Ok(apps) }
    }

    fn fetch_graph(&self, app_id: &str) -> impl Future<Output = Result<GraphSnapshot, FetchError>> + Send {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(app_id)
            .and_then(|queue| queue.pop_front());
        let graph = self.catalog.graph(app_id);
        async move {
            if let Some(gate) = gate {
                match gate.await {
                    Ok(Ok(())) => {}
                    Ok(Err(status)) => return Err(FetchError::Status(status)),
                    Err(_) => return Err(FetchError::Status(499)),
                }
            }
            Ok(graph)
        }
    }
}

fn node_ids<S: GraphSource>(editor: &GraphEditor<S>) -> Vec<String> {
    editor.store().nodes().iter().map(|n| n.id.clone()).collect()
}

#[tokio::test]
async fn test_late_response_for_previous_app_is_discarded() {
    let source = GatedSource::new();
    let open_a = source.gate("prod-api");
    let open_b = source.gate("auth");
    let mut editor = GraphEditor::new(source);

    editor.select_application(Some("prod-api"));
    editor.select_application(Some("auth"));
    assert_eq!(editor.status(), EditorStatus::Loading);

    open_b.send(Ok(())).unwrap();
    let first = editor.next_outcome().await.unwrap();
    assert!(matches!(first, SyncOutcome::Applied { ref app_id, .. } if app_id == "auth"));

    open_a.send(Ok(())).unwrap();
    let second = editor.next_outcome().await.unwrap();
    assert_eq!(second, SyncOutcome::Stale { app_id: "prod-api".to_string() });

    assert_eq!(node_ids(&editor), vec!["node-auth1"]);
    assert_eq!(editor.status(), EditorStatus::Ready);
    assert!(editor.next_outcome().await.is_none());
}

#[tokio::test]
async fn test_stale_response_arriving_first_is_still_discarded() {
    let source = GatedSource::new();
    let open_a = source.gate("prod-api");
    let open_b = source.gate("auth");
    let mut editor = GraphEditor::new(source);

    editor.select_application(Some("prod-api"));
    editor.select_application(Some("auth"));

    open_a.send(Ok(())).unwrap();
    assert!(matches!(editor.next_outcome().await, Some(SyncOutcome::Stale { .. })));
    assert!(editor.store().is_empty());
    assert_eq!(editor.status(), EditorStatus::Loading);

    open_b.send(Ok(())).unwrap();
    editor.settle().await;
    assert_eq!(node_ids(&editor), vec!["node-auth1"]);
}

#[tokio::test]
async fn test_deselecting_app_clears_everything() {
    let source = GatedSource::new();
    let mut editor = GraphEditor::new(source);
    editor.select_application(Some("prod-api"));
    editor.settle().await;
    assert!(editor.click_node("node-1"));

    let reopen = editor.source().gate("prod-api");
    editor.refresh();
    editor.select_application(None);

    assert_eq!(editor.selected_node_id(), None);
    assert_eq!(editor.status(), EditorStatus::NoApplication);
    assert!(editor.store().is_empty());

    reopen.send(Ok(())).unwrap();
    editor.settle().await;
    assert!(editor.store().is_empty());
    assert_eq!(editor.selected_node_id(), None);
}

#[tokio::test]
async fn test_failed_refresh_keeps_rendered_graph_until_retry() {
    let source = GatedSource::new();
    let mut editor = GraphEditor::new(source);
    editor.select_application(Some("analytics"));
    editor.settle().await;
    assert_eq!(editor.store().nodes().len(), 2);

    let fail = editor.source().gate("analytics");
    assert!(editor.refresh());
    fail.send(Err(503)).unwrap();
    editor.settle().await;

    assert!(matches!(editor.status(), EditorStatus::Error(_)));
    assert!(matches!(editor.load_state(), LoadState::Error(_)));
    assert_eq!(editor.store().nodes().len(), 2);

    assert!(editor.refresh());
    editor.settle().await;
    assert_eq!(editor.status(), EditorStatus::Ready);
}

#[tokio::test]
async fn test_failed_first_load_leaves_store_empty() {
    let source = GatedSource::new();
    let fail = source.gate("auth");
    let mut editor = GraphEditor::new(source);

    editor.select_application(Some("auth"));
    fail.send(Err(500)).unwrap();
    let outcome = editor.next_outcome().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Failed { .. }));
    assert!(editor.store().is_empty());
    assert!(matches!(editor.status(), EditorStatus::Error(_)));
}

#[tokio::test]
async fn test_editing_while_fetch_pending() {
    let source = GatedSource::new();
    let mut editor = GraphEditor::new(source);
    editor.select_application(Some("prod-api"));
    editor.settle().await;

    let hold = editor.source().gate("prod-api");
    editor.refresh();

    assert!(editor.click_node("node-3"));
    assert!(editor.rename_selected("Redis"));
    assert_eq!(editor.inspect_selected().unwrap().label, "Redis");

    hold.send(Ok(())).unwrap();
    editor.settle().await;

    // The refreshed snapshot replaces local edits wholesale; the node still exists.
    assert_eq!(editor.selected_node_id(), Some("node-3"));
    assert_eq!(editor.inspect_selected().unwrap().label, "Cache Layer");
}

#[tokio::test]
async fn test_poll_outcomes_applies_only_arrived_results() {
    let source = GatedSource::new();
    let hold = source.gate("auth");
    let mut editor = GraphEditor::new(source);

    editor.select_application(Some("auth"));
    tokio::task::yield_now().await;
    assert!(editor.poll_outcomes().is_empty());
    assert_eq!(editor.in_flight(), 1);

    hold.send(Ok(())).unwrap();
    editor.settle().await;
    assert_eq!(editor.in_flight(), 0);
    assert_eq!(node_ids(&editor), vec!["node-auth1"]);
}
