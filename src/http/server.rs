//! HTTP server setup and gateway routes.
//!
//! # Responsibilities
//! - Create Axum Router with the /bnet handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve logical resource names against the path table
//! - Delegate to the BNet client and relay its responses
//!
//! # Responses
//! - `GET /bnet/{resource_path}`: backend status + JSON value, or
//!   404 `{"error": ...}` for a name outside the path table
//! - `POST /bnet/trigger/{transition_id}`: backend response, verbatim
//! - `POST /bnet/add_token`: backend response, verbatim

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::bnet::{BNetClient, RelayedResponse, Resource};
use crate::config::GatewayConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

/// Application state injected into handlers.
///
/// The client handle is constructed once at startup and read-only
/// afterwards; handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub bnet: Arc<BNetClient>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let bnet = Arc::new(BNetClient::new(&config.backend, &config.timeouts));
        let state = AppState { bnet };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let request_id_header = HeaderName::from_static(X_REQUEST_ID);
        Router::new()
            .route("/bnet/{resource_path}", get(fetch_resource))
            .route("/bnet/trigger/{transition_id}", post(trigger_transition))
            .route("/bnet/add_token", post(add_token))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(
                        request_id_header.clone(),
                        MakeRequestUuid,
                    ))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::new(request_id_header)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET /bnet/{resource_path}`: fetch a JSON resource from the backend.
async fn fetch_resource(
    State(state): State<AppState>,
    Path(resource_path): Path<String>,
) -> Response {
    let Some(resource) = Resource::from_name(&resource_path) else {
        tracing::warn!(resource = %resource_path, "Unknown resource name");
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown resource `{resource_path}`") })),
        )
            .into_response();
    };

    tracing::debug!(resource = resource.name(), "Forwarding resource fetch");
    let (status, value) = state.bnet.fetch_json(resource).await;
    (status, Json(value)).into_response()
}

/// `POST /bnet/trigger/{transition_id}`: trigger a manual transition.
async fn trigger_transition(
    State(state): State<AppState>,
    Path(transition_id): Path<String>,
) -> RelayedResponse {
    tracing::debug!(transition_id = %transition_id, "Forwarding transition trigger");
    state.bnet.trigger_transition(&transition_id).await
}

/// `POST /bnet/add_token`: forward a token payload to the backend.
async fn add_token(State(state): State<AppState>, Json(payload): Json<Value>) -> RelayedResponse {
    tracing::debug!("Forwarding token add");
    state.bnet.add_token(payload).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
