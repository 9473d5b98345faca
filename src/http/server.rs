//! Axum server for the intake API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::appeal::{validate, AppealDraft};
use crate::observability::Logger;
use crate::store::{AppealStore, StoreBackend};

use super::config::HttpConfig;
use super::errors::ApiError;
use super::response::{ListResponse, SubmitResponse};

/// HTTP server over an appeal store.
pub struct ApiServer<B: StoreBackend> {
    config: HttpConfig,
    store: Arc<AppealStore<B>>,
}

/// Shared state type
type ServerState<B> = Arc<AppealStore<B>>;

impl<B: StoreBackend + 'static> ApiServer<B> {
    pub fn new(store: AppealStore<B>, config: HttpConfig) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Build the axum router.
    pub fn router(&self) -> Router {
        let cors = if self.config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = self
                .config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/appeals", post(submit_handler::<B>))
            .route("/appeals", get(list_handler::<B>))
            .with_state(self.store.clone())
            .layer(cors)
    }

    /// Start the server (async).
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{e}")))?;

        let router = self.router();

        Logger::info("SERVER_STARTED", &[("addr", &addr.to_string())]);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Liveness probe.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Submit appeal handler.
///
/// Validation failures carry the full field-error list; nothing is
/// persisted unless every field passed.
async fn submit_handler<B: StoreBackend + 'static>(
    State(store): State<ServerState<B>>,
    Json(draft): Json<AppealDraft>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let record = validate(&draft, store.policy()).map_err(ApiError::Validation)?;
    let id = store.append(&record)?;

    Logger::info("APPEAL_ACCEPTED", &[("id", &id.to_string())]);

    Ok((StatusCode::CREATED, Json(SubmitResponse { id, appeal: record })))
}

/// List appeals handler.
async fn list_handler<B: StoreBackend + 'static>(
    State(store): State<ServerState<B>>,
) -> Result<Json<ListResponse>, ApiError> {
    let records = store.list_all()?;
    Ok(Json(ListResponse::new(records)))
}
