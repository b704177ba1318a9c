//! The editing session a presentation layer talks to.
//!
//! `GraphEditor` owns the store, the selection, the synchronizer and the
//! inspector. Gestures are plain method calls. Graph fetches run as tokio
//! tasks, but their results are only applied when the owner drains them with
//! [`GraphEditor::next_outcome`], [`GraphEditor::settle`] or
//! [`GraphEditor::poll_outcomes`], so every store write happens on the
//! owner's side.

use crate::inspector::{NodeInspector, NodeInspectorView};
use crate::model::{Connection, GraphSnapshot, NodeData, NodeDataPatch, Position};
use crate::selection::{Focus, Key, SelectionController, SelectionState};
use crate::store::{GraphStore, Placement, StoreChange, SubscriptionId};
use crate::sync::{FetchError, FetchTicket, GraphSource, LoadState, SyncOutcome, Synchronizer};
use std::sync::Arc;
use tokio::sync::mpsc;

/// What the canvas should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStatus {
    NoApplication,
    Loading,
    Error(String),
    Ready,
}

struct FetchResult {
    ticket: FetchTicket,
    result: Result<GraphSnapshot, FetchError>,
}

pub struct GraphEditor<S: GraphSource> {
    source: Arc<S>,
    store: GraphStore,
    selection: SelectionController,
    sync: Synchronizer,
    inspector: NodeInspector,
    results_tx: mpsc::UnboundedSender<FetchResult>,
    results_rx: mpsc::UnboundedReceiver<FetchResult>,
    in_flight: usize,
}

impl<S: GraphSource> GraphEditor<S> {
    pub fn new(source: S) -> Self {
        Self::with_placement(source, Placement::default())
    }

    pub fn with_placement(source: S, placement: Placement) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            store: GraphStore::with_placement(placement),
            selection: SelectionController::new(),
            sync: Synchronizer::new(),
            inspector: NodeInspector::new(),
            results_tx,
            results_rx,
            in_flight: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Listen to store changes. The store itself stays private so every
    /// mutation goes through a gesture that keeps selection consistent.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn selected_app_id(&self) -> Option<&str> {
        self.selection.selected_app_id()
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        self.selection.selected_node_id()
    }

    pub fn load_state(&self) -> &LoadState {
        self.sync.state()
    }

    pub fn status(&self) -> EditorStatus {
        if self.selection.selected_app_id().is_none() {
            return EditorStatus::NoApplication;
        }
        match self.sync.state() {
            LoadState::Loading => EditorStatus::Loading,
            LoadState::Error(message) => EditorStatus::Error(message.clone()),
            LoadState::Idle | LoadState::Ready => EditorStatus::Ready,
        }
    }

    /// Number of spawned fetches whose results have not been drained yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // Application selection and synchronization

    /// Select an application (or none) and start fetching its graph.
    ///
    /// Must be called inside a tokio runtime when `app_id` is `Some`.
    pub fn select_application(&mut self, app_id: Option<&str>) {
        self.selection.select_application(app_id);
        self.inspector.close();
        if let Some(ticket) = self.sync.on_app_selected(app_id, &mut self.store) {
            self.dispatch(ticket);
        }
    }

    /// Re-fetch the selected application. No-op without one.
    pub fn refresh(&mut self) -> bool {
        match self.sync.refresh(self.selection.selected_app_id()) {
            Some(ticket) => {
                self.dispatch(ticket);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = source.fetch_graph(&ticket.app_id).await;
            // The receiver lives as long as the editor; a dropped editor has
            // no use for the result.
            let _ = tx.send(FetchResult { ticket, result });
        });
    }

    fn apply(&mut self, FetchResult { ticket, result }: FetchResult) -> SyncOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = self.sync.complete(&ticket, result, &mut self.store);
        if matches!(outcome, SyncOutcome::Applied { .. }) {
            self.selection.reconcile(&self.store);
            self.inspector
                .retain_for(self.selection.selected_node_id(), &self.store);
        }
        outcome
    }

    /// Wait for the next fetch to finish and apply it. `None` when nothing
    /// is in flight.
    pub async fn next_outcome(&mut self) -> Option<SyncOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let result = self.results_rx.recv().await?;
        Some(self.apply(result))
    }

    /// Drain every outstanding fetch. A fetch that never completes keeps
    /// this waiting, the same way the canvas would stay in `Loading`.
    pub async fn settle(&mut self) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_outcome().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Apply whatever has already arrived, without waiting.
    pub fn poll_outcomes(&mut self) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(result) = self.results_rx.try_recv() {
            outcomes.push(self.apply(result));
        }
        outcomes
    }

    // Canvas gestures

    pub fn click_node(&mut self, node_id: &str) -> bool {
        let selected = self.selection.select_node(node_id, &self.store);
        if selected {
            self.inspector.retain_for(Some(node_id), &self.store);
        }
        selected
    }

    pub fn click_pane(&mut self) -> bool {
        self.inspector.close();
        self.selection.clear_node_selection()
    }

    /// Add a fresh service node. Requires a selected application.
    pub fn add_node(&mut self) -> Option<String> {
        self.selection.selected_app_id()?;
        Some(self.store.add_node(NodeData::new_service()))
    }

    pub fn connect(&mut self, connection: &Connection) -> Option<String> {
        self.store.add_edge(connection)
    }

    pub fn disconnect(&mut self, edge_id: &str) -> bool {
        self.store.delete_edge(edge_id)
    }

    pub fn drag_node(&mut self, node_id: &str, position: Position) -> bool {
        self.store.update_node_position(node_id, position)
    }

    pub fn update_node(&mut self, node_id: &str, patch: &NodeDataPatch) -> bool {
        self.store.update_node_data(node_id, patch)
    }

    pub fn delete_selected_node(&mut self) -> Option<String> {
        self.inspector.close();
        self.selection.delete_selected_node(&mut self.store)
    }

    pub fn key_down(&mut self, key: Key, focus: Focus) -> Option<String> {
        let deleted = self.selection.handle_key(key, focus, &mut self.store);
        if deleted.is_some() {
            self.inspector.close();
        }
        deleted
    }

    // Inspector

    pub fn inspector(&self) -> &NodeInspector {
        &self.inspector
    }

    /// View of the selected node, read from the store now.
    pub fn inspect_selected(&self) -> Option<NodeInspectorView> {
        let node_id = self.selection.selected_node_id()?;
        NodeInspector::inspect(&self.store, node_id)
    }

    pub fn begin_edit(&mut self) -> bool {
        match self.selection.selected_node_id() {
            Some(node_id) => self.inspector.begin_edit(&self.store, node_id),
            None => false,
        }
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        self.inspector.set_buffer(text);
    }

    pub fn commit_edit(&mut self) -> bool {
        self.inspector.commit_buffer(&mut self.store)
    }

    /// Commit `label` for the selected node in one step.
    pub fn rename_selected(&mut self, label: &str) -> bool {
        let Some(node_id) = self.selection.selected_node_id().map(str::to_string) else {
            return false;
        };
        self.inspector.commit_edit(&mut self.store, &node_id, label)
    }

    pub fn cancel_edit(&mut self) {
        self.inspector.cancel_edit();
    }
}
