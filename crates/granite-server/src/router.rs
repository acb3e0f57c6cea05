//! Router configuration.
//!
//! Combines the revocation API, session lifecycle routes, the
//! step-up-gated account routes, and the health probe into the main
//! application router.

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{account, auth, health, revocation};
use crate::middleware::require_step_up;
use crate::state::AppState;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    // Revocation API, mounted under the API prefix.
    let api = Router::new().route(
        "/global-token-revocation",
        post(revocation::global_token_revocation),
    );

    // Session lifecycle hooks for the external login/step-up flows.
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/step-up", get(auth::step_up_begin))
        .route("/step-up/complete", post(auth::step_up_complete));

    // Sensitive operations sit behind the step-up gate. Merged at full
    // path rather than nested so the gate records the real request URI
    // as the return destination.
    let account_routes = Router::new()
        .route("/account/transfer", post(account::transfer))
        .layer(from_fn_with_state(state.clone(), require_step_up));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .nest("/auth", auth_routes)
        .merge(account_routes)
        .route("/health", get(health::health))
        .route("/", get(root))
        .route("/health/live", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Server information response.
#[derive(Serialize)]
pub struct ServerInfo {
    name: &'static str,
    version: &'static str,
}

/// Root endpoint handler.
async fn root() -> Json<ServerInfo> {
    Json(ServerInfo {
        name: "Granite Bank",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Kubernetes liveness probe.
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
