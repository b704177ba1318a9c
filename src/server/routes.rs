use crate::fixtures::Catalog;
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for handlers
pub struct ServerState {
    pub catalog: Catalog,
}

pub fn router(catalog: Catalog) -> Router {
    let state = Arc::new(ServerState { catalog });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/api/apps", get(apps_handler))
        .route("/api/apps/{id}/graph", get(graph_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind `127.0.0.1:{port}` and serve until the process is stopped.
pub async fn serve(catalog: Catalog, port: u16) -> Result<(), std::io::Error> {
    let addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    serve_on(listener, catalog).await
}

/// Serve on an already bound listener.
pub async fn serve_on(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, apps = catalog.applications().len(), "graph service listening");
    }
    axum::serve(listener, router(catalog)).await
}

async fn apps_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.catalog.applications().to_vec())
}

async fn graph_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    tracing::debug!(app_id = %id, "graph requested");
    Json(state.catalog.graph(&id))
}
