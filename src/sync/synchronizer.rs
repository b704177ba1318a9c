//! Keeps the store in step with the latest fetch for the selected application.
//!
//! Fetches are never aborted. Each request gets a ticket with a generation
//! number, and only the most recently issued ticket may write to the store;
//! anything older is discarded when it arrives.

use super::source::FetchError;
use crate::model::GraphSnapshot;
use crate::store::GraphStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub app_id: String,
    pub generation: u64,
}

/// What happened when a fetch result came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied {
        app_id: String,
        nodes: usize,
        edges: usize,
    },
    Stale {
        app_id: String,
    },
    Failed {
        app_id: String,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct Synchronizer {
    generation: u64,
    pending: Option<FetchTicket>,
    loaded_app: Option<String>,
    state: LoadState,
}

impl Synchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn pending(&self) -> Option<&FetchTicket> {
        self.pending.as_ref()
    }

    /// Application whose graph the store currently holds.
    pub fn loaded_app(&self) -> Option<&str> {
        self.loaded_app.as_deref()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }

    /// React to a new application selection.
    ///
    /// Switching to a different application empties the store right away.
    /// Re-selecting the loaded one keeps its graph until the new fetch lands.
    /// `None` empties the store and invalidates any outstanding fetch.
    pub fn on_app_selected(&mut self, app_id: Option<&str>, store: &mut GraphStore) -> Option<FetchTicket> {
        self.generation += 1;
        match app_id {
            None => {
                self.pending = None;
                self.loaded_app = None;
                self.state = LoadState::Idle;
                store.clear();
                None
            }
            Some(id) => {
                if self.loaded_app.as_deref() != Some(id) {
                    self.loaded_app = None;
                    store.clear();
                }
                Some(self.issue(id))
            }
        }
    }

    /// Fetch the selected application again, keeping the current graph.
    pub fn refresh(&mut self, app_id: Option<&str>) -> Option<FetchTicket> {
        let id = app_id?;
        self.generation += 1;
        Some(self.issue(id))
    }

    fn issue(&mut self, app_id: &str) -> FetchTicket {
        let ticket = FetchTicket {
            app_id: app_id.to_string(),
            generation: self.generation,
        };
        tracing::debug!(app_id, generation = self.generation, "fetch issued");
        self.pending = Some(ticket.clone());
        self.state = LoadState::Loading;
        ticket
    }

    /// Apply a fetch result if its ticket is still the current one.
    ///
    /// A failure leaves the store untouched.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<GraphSnapshot, FetchError>,
        store: &mut GraphStore,
    ) -> SyncOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(app_id = %ticket.app_id, generation = ticket.generation, "stale fetch result discarded");
            return SyncOutcome::Stale {
                app_id: ticket.app_id.clone(),
            };
        }
        self.pending = None;

        match result {
            Ok(snapshot) => {
                store.replace_graph(snapshot);
                self.loaded_app = Some(ticket.app_id.clone());
                self.state = LoadState::Ready;
                tracing::info!(
                    app_id = %ticket.app_id,
                    nodes = store.nodes().len(),
                    edges = store.edges().len(),
                    "graph loaded"
                );
                SyncOutcome::Applied {
                    app_id: ticket.app_id.clone(),
                    nodes: store.nodes().len(),
                    edges: store.edges().len(),
                }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(app_id = %ticket.app_id, error = %message, "graph fetch failed");
                self.state = LoadState::Error(message.clone());
                SyncOutcome::Failed {
                    app_id: ticket.app_id.clone(),
                    message,
                }
            }
        }
    }
}
