//! Session lifecycle handlers.
//!
//! Thin wrappers around the session store and directory. Primary
//! authentication and the step-up challenge itself are delegated to the
//! external identity provider; these handlers model the completion hooks
//! the provider's flows call back into:
//!
//! - login registers the new session under the normalized email
//! - logout unregisters and destroys it
//! - step-up completion is the only writer of the elevated-assurance
//!   marker

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use granite_session::record::notes;
use granite_session::{Principal, SessionRecord};

use crate::session_cookie::{clear_session_cookie, extract_session_cookie, set_session_cookie};
use crate::state::AppState;

/// Login request: the principal established by the external identity
/// provider.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Authenticated email address.
    pub email: String,

    /// Subject identifier at the identity provider.
    #[serde(default)]
    pub sub: Option<String>,

    /// Preferred username, if the provider supplies one.
    #[serde(default)]
    pub preferred_username: Option<String>,
}

/// Step-up hand-off response.
#[derive(Debug, Serialize)]
pub struct StepUpChallenge {
    /// Where the identity provider's step-up flow reports back.
    pub complete_url: &'static str,
    /// Human-readable prompt.
    pub message: &'static str,
}

/// POST `/auth/login`
///
/// Establishes a session for an externally-authenticated principal and
/// registers it in the directory.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    if body.email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "invalid_request",
                "error_description": "email must not be empty",
            })),
        )
            .into_response();
    }

    let mut principal = Principal::from_email(&body.email);
    if let Some(sub) = body.sub {
        principal = principal.with_sub(sub);
    }
    if let Some(username) = body.preferred_username {
        principal = principal.with_preferred_username(username);
    }

    let record = SessionRecord::new(principal);
    let session_id = record.id.clone();

    if let Err(err) = state.store.insert(record).await {
        tracing::error!(error = %err, "failed to persist session");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state.directory.register(&body.email, &session_id);

    let mut headers = HeaderMap::new();
    set_session_cookie(&mut headers, &session_id, state.config.cookie_secure);
    (StatusCode::NO_CONTENT, headers).into_response()
}

/// POST `/auth/logout`
///
/// Destroys the cookie's session and unregisters it from the directory.
/// Always succeeds; logging out without a session is a no-op.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut response_headers = HeaderMap::new();
    clear_session_cookie(&mut response_headers);

    let Some(session_id) = extract_session_cookie(&headers) else {
        return (StatusCode::NO_CONTENT, response_headers).into_response();
    };

    match state.store.get(&session_id).await {
        Ok(Some(record)) => {
            if let Some(email) = record.principal.primary_email() {
                state.directory.unregister(email, &session_id);
            }
            if let Err(err) = state.store.destroy(&session_id).await {
                tracing::warn!(session_id = %session_id, error = %err, "logout destroy failed");
            }
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(session_id = %session_id, error = %err, "logout lookup failed");
        }
    }

    (StatusCode::NO_CONTENT, response_headers).into_response()
}

/// GET `/auth/step-up`
///
/// Demo stand-in for the hand-off to the identity provider's step-up
/// flow; a production deployment would redirect to the provider with the
/// appropriate authentication context parameters.
pub async fn step_up_begin() -> Json<StepUpChallenge> {
    Json(StepUpChallenge {
        complete_url: "/auth/step-up/complete",
        message: "complete second-factor verification, then continue",
    })
}

/// POST `/auth/step-up/complete`
///
/// Demo stand-in for the identity provider's step-up callback. Stamps
/// the session's elevated-assurance marker - the only place freshness is
/// ever established - and resumes at the recorded destination.
pub async fn step_up_complete(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = extract_session_cookie(&headers) else {
        return Redirect::to(crate::middleware::step_up::LOGIN_PATH).into_response();
    };

    let mut record = match state.store.get(&session_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Redirect::to(crate::middleware::step_up::LOGIN_PATH).into_response(),
        Err(err) => {
            tracing::error!(session_id = %session_id, error = %err, "session lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    record.mark_step_up_verified();
    let destination = record
        .remove_note(notes::RETURN_TO)
        .unwrap_or_else(|| "/".to_string());

    if let Err(err) = state.store.insert(record).await {
        tracing::error!(session_id = %session_id, error = %err, "failed to persist step-up marker");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    tracing::info!(session_id = %session_id, "step-up verification recorded");
    Redirect::to(&destination).into_response()
}
