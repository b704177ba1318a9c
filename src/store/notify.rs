/// What a store mutation did. Listeners see each change once, after the
/// store is already consistent again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Replaced,
    Cleared,
    NodeAdded(String),
    NodeUpdated(String),
    NodeMoved(String),
    NodeDeleted {
        node_id: String,
        removed_edges: Vec<String>,
    },
    EdgeAdded(String),
    EdgeDeleted(String),
}

/// Handle returned by `GraphStore::subscribe`; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange) + Send>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, change: &StoreChange) {
        for (_, listener) in self.entries.iter_mut() {
            listener(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
