//! Lienify API Server - Backend for the lien waiver wizard
//!
//! Provides REST endpoints for:
//! - Template listing
//! - Wizard sessions (step answers, back navigation, generation)
//! - Document delivery
//! - One-shot generation without a session

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;

pub use config::ApiConfig;
pub use state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/api/templates", get(handlers::list_templates))
        // Wizard sessions
        .route("/api/session", post(handlers::create_session))
        .route(
            "/api/session/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/session/:id/step", post(handlers::apply_step))
        .route("/api/session/:id/back", post(handlers::go_back))
        .route("/api/session/:id/generate", post(handlers::generate_session))
        // Document delivery
        .route("/api/session/:id/document", get(handlers::get_document))
        .route("/api/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
