use crate::fixtures::Catalog;
use crate::model::{Application, GraphSnapshot};
use std::future::Future;
use thiserror::Error;

/// Why a directory listing or graph fetch did not produce data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service responded with status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid application id: {0:?}")]
    InvalidAppId(String),

    #[error("invalid service url: {0}")]
    InvalidBaseUrl(String),
}

/// The application directory and graph fetch collaborators.
pub trait GraphSource: Send + Sync + 'static {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, FetchError>> + Send;

    fn fetch_graph(&self, app_id: &str) -> impl Future<Output = Result<GraphSnapshot, FetchError>> + Send;
}

/// In-process source backed by a [`Catalog`]; no network involved.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    catalog: Catalog,
}

impl StaticSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl GraphSource for StaticSource {
    fn list_applications(&self) -> impl Future<Output = Result<Vec<Application>, FetchError>> + Send {
        let apps = self.catalog.applications().to_vec();
        async move { Ok(apps) }
    }

    fn fetch_graph(&self, app_id: &str) -> impl Future<Output = Result<GraphSnapshot, FetchError>> + Send {
        let graph = self.catalog.graph(app_id);
        async move { Ok(graph) }
    }
}
