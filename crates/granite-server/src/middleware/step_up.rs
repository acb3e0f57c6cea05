//! Step-up authentication gate.
//!
//! Sensitive routes sit behind this middleware. A session whose
//! elevated-assurance marker is missing or older than the freshness
//! window never reaches the protected handler; it is redirected into the
//! re-authentication flow after the originally requested destination is
//! recorded in session state, so the flow can resume there on success.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use granite_session::record::notes;
use granite_session::Freshness;

use crate::session_cookie::extract_session_cookie;
use crate::state::AppState;

/// Fixed re-authentication path the gate redirects to.
pub const STEP_UP_PATH: &str = "/auth/step-up";

/// Login path for requests with no session at all.
pub const LOGIN_PATH: &str = "/auth/login";

/// Gate guarding sensitive routes behind a fresh step-up check.
pub async fn require_step_up(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = extract_session_cookie(request.headers()) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let record = match state.store.get(&session_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Redirect::to(LOGIN_PATH).into_response(),
        Err(err) => {
            tracing::error!(session_id = %session_id, error = %err, "session lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if Freshness::check(&record, state.config.step_up_window_secs).is_fresh() {
        return next.run(request).await;
    }

    // Remember where the caller was headed so the re-auth completion
    // flow can send them back.
    let destination = request
        .uri()
        .path_and_query()
        .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());

    let mut record = record;
    record.set_note(notes::RETURN_TO, destination);
    if let Err(err) = state.store.insert(record).await {
        tracing::warn!(session_id = %session_id, error = %err, "failed to record return destination");
    }

    tracing::info!(session_id = %session_id, "step-up required; redirecting");
    Redirect::to(STEP_UP_PATH).into_response()
}
