pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod editor;
pub mod fixtures;
pub mod inspector;
pub mod logging;
pub mod model;
pub mod output;
pub mod selection;
pub mod server;
pub mod store;
pub mod style;
pub mod sync;

pub use api::{FlowmapError, editor_from_config, list_applications, load_into, open_application};
pub use cli::Cli;
pub use commands::{cmd_apps, cmd_edit, cmd_graph, cmd_init, cmd_serve};
pub use config::Config;
pub use editor::{EditorStatus, GraphEditor};
pub use inspector::{NodeInspector, NodeInspectorView};
pub use model::{Application, Connection, GraphEdge, GraphNode, GraphSnapshot, NodeData, NodeDataPatch, NodeStatus, Position};
pub use selection::{Focus, Key, SelectionController, SelectionState};
pub use store::{GraphStore, StoreChange, SubscriptionId};
pub use sync::{FetchError, GraphSource, HttpGraphSource, LoadState, StaticSource, SyncOutcome, Synchronizer};
