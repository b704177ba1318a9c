//! Library entry points.
//!
//! These wrap the editor for callers that want a loaded graph in one call
//! and a `Result` instead of CLI exit codes.
//!
//! # Example
//!
//! ```no_run
//! use flowmap::{StaticSource, fixtures::Catalog, open_application};
//!
//! # async fn demo() -> Result<(), flowmap::FlowmapError> {
//! let source = StaticSource::new(Catalog::builtin()?);
//! let editor = open_application(source, "prod-api").await?;
//! println!("{} services", editor.store().nodes().len());
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, ConfigError};
use crate::editor::{EditorStatus, GraphEditor};
use crate::model::Application;
use crate::sync::{FetchError, GraphSource, HttpGraphSource};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowmapError {
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Directory listing failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The graph of an application could not be loaded.
    #[error("Failed to load graph for {app_id}: {message}")]
    Load { app_id: String, message: String },

    /// Embedded data could not be decoded.
    #[error("Invalid data: {0}")]
    Data(#[from] serde_json::Error),
}

pub async fn list_applications<S: GraphSource>(source: &S) -> Result<Vec<Application>, FlowmapError> {
    Ok(source.list_applications().await?)
}

/// Create an editor, select `app_id` and wait until its graph is loaded.
pub async fn open_application<S: GraphSource>(source: S, app_id: &str) -> Result<GraphEditor<S>, FlowmapError> {
    let mut editor = GraphEditor::new(source);
    load_into(&mut editor, app_id).await?;
    Ok(editor)
}

/// Select `app_id` on an existing editor and wait for the result.
pub async fn load_into<S: GraphSource>(editor: &mut GraphEditor<S>, app_id: &str) -> Result<(), FlowmapError> {
    editor.select_application(Some(app_id));
    editor.settle().await;
    match editor.status() {
        EditorStatus::Error(message) => Err(FlowmapError::Load {
            app_id: app_id.to_string(),
            message,
        }),
        _ => Ok(()),
    }
}

/// An editor talking to the service named in `config`.
pub fn editor_from_config(config: &Config) -> GraphEditor<HttpGraphSource> {
    GraphEditor::with_placement(
        HttpGraphSource::new(config.service.base_url.clone()),
        config.canvas.placement(),
    )
}
