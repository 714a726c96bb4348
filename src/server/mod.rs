//! HTTP API server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/brief` | Strategy brief with referral sources and local news |
//! | `POST` | `/api/snapshot` | Referral snapshot (email required) |
//! | `GET`  | `/api/specialties` | Known specialties |
//! | `GET`  | `/api/adjacency/{specialty}` | Referral partners with fit scores |
//! | `GET` `PUT` `DELETE` | `/api/sessions/{id}` | Discovery-chat session state |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "location is required" } }
//! ```
//!
//! `bad_request` (400), `not_found` (404), `internal` (500). Internal error
//! details are logged, never returned.

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::{build_brief_service, build_jitter};
use crate::config::AppConfig;
use crate::core::brief::BriefService;
use crate::core::jitter::ThreadRngJitter;
use crate::core::sessions::SessionCache;
use crate::domain::ports::JitterSource;

pub use handlers::AppError;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub briefs: Arc<BriefService>,
    pub sessions: Arc<SessionCache>,
    pub jitter: Arc<dyn JitterSource>,
}

impl AppState {
    pub fn new(briefs: BriefService, sessions: Arc<SessionCache>) -> Self {
        Self {
            briefs: Arc::new(briefs),
            sessions,
            jitter: Arc::new(ThreadRngJitter),
        }
    }

    pub fn from_config(config: &AppConfig) -> crate::utils::error::Result<Self> {
        let briefs = build_brief_service(config)?;
        let sessions = Arc::new(SessionCache::new(config.session_ttl()));
        let mut state = Self::new(briefs, sessions);
        state.jitter = build_jitter(config.search.seed);
        Ok(state)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/brief", post(handlers::handle_brief))
        .route("/api/snapshot", post(handlers::handle_snapshot))
        .route("/api/specialties", get(handlers::handle_specialties))
        .route("/api/adjacency/{specialty}", get(handlers::handle_adjacency))
        .route(
            "/api/sessions/{id}",
            get(handlers::handle_get_session)
                .put(handlers::handle_put_session)
                .delete(handlers::handle_delete_session),
        )
        .route("/health", get(handlers::handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `[server].bind`, starts the session sweeper and serves until
/// Ctrl-C.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let sweeper = state.sessions.spawn_sweeper(config.sweep_interval());

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("🚀 Sleft API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;

    sweeper.abort();
    Ok(())
}
