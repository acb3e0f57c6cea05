//! Global token revocation endpoint.
//!
//! Implements POST `/global-token-revocation`: the identity authority
//! presents a signed revocation token and a subject identifier, and the
//! application destroys every session belonging to that subject.
//!
//! One pass per request, no persisted state:
//! authenticate bearer → parse subject → resolve & destroy → respond.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use granite_revocation::{RawSubjectId, SubjectId};
use granite_session::{scan_and_destroy, SessionMatcher};

use crate::state::AppState;

/// Revocation request body.
#[derive(Debug, Deserialize)]
pub struct RevocationRequest {
    /// Subject identifier naming whose sessions to revoke.
    #[serde(default)]
    pub sub_id: Option<RawSubjectId>,
}

/// Error body returned for every non-204 response.
#[derive(Debug, Serialize)]
pub struct RevocationErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error description.
    pub error_description: String,
}

/// Failures of the revocation endpoint, mapped onto the fixed wire
/// contract. Validation internals are logged where they occur; the
/// caller sees only these coarse categories.
#[derive(Debug, Error)]
pub enum RevocationApiError {
    /// Missing or malformed `Authorization` header.
    #[error("missing or malformed bearer credentials")]
    Unauthenticated,

    /// Bearer token failed validation.
    #[error("token validation failed")]
    InvalidToken {
        /// Whether the failure was an expired token, which the response
        /// body distinguishes from other invalidity.
        expired: bool,
    },

    /// Missing body, missing `sub_id`, or unusable subject identifier.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Unexpected failure while resolving or destroying sessions.
    #[error("unable to revoke: {0}")]
    Unprocessable(String),
}

impl RevocationApiError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidToken { .. } => "invalid_token",
            Self::MalformedRequest(_) => "invalid_request",
            Self::Unprocessable(_) => "unable_to_revoke",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn description(&self) -> String {
        match self {
            Self::Unauthenticated => "missing or malformed Authorization header".to_string(),
            Self::InvalidToken { expired: true } => "token has expired".to_string(),
            Self::InvalidToken { expired: false } => "token validation failed".to_string(),
            Self::MalformedRequest(detail) | Self::Unprocessable(detail) => detail.clone(),
        }
    }
}

impl IntoResponse for RevocationApiError {
    fn into_response(self) -> Response {
        let body = RevocationErrorBody {
            error: self.error_code(),
            error_description: self.description(),
        };
        (self.http_status(), Json(body)).into_response()
    }
}

/// POST `/global-token-revocation`
///
/// # Responses
///
/// - 204: revocation processed, including the zero-matches case - a
///   subject with no sessions is indistinguishable from an unknown
///   subject, so existence is never revealed to the caller
/// - 400: missing body, missing `sub_id`, or unrecognized/incomplete
///   format (named in the description)
/// - 401: missing/malformed auth header or token validation failure,
///   expiry distinguished in the description
/// - 422: unexpected failure while resolving/destroying sessions
pub async fn global_token_revocation(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RevocationRequest>, JsonRejection>,
) -> Response {
    match handle_revocation(&state, &headers, body).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle_revocation(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Json<RevocationRequest>, JsonRejection>,
) -> Result<(), RevocationApiError> {
    // AuthenticateBearer
    let token = bearer_token(headers).ok_or(RevocationApiError::Unauthenticated)?;

    state.validator.validate(token).await.map_err(|err| {
        tracing::warn!(error = %err, "revocation token rejected");
        RevocationApiError::InvalidToken {
            expired: err.is_expired(),
        }
    })?;

    // ParseSubject
    let Json(request) = body.map_err(|rejection| {
        RevocationApiError::MalformedRequest(format!("request body must be JSON: {rejection}"))
    })?;
    let raw = request.sub_id.ok_or_else(|| {
        RevocationApiError::MalformedRequest("request body is missing sub_id".to_string())
    })?;
    let subject = SubjectId::parse(raw)
        .map_err(|err| RevocationApiError::MalformedRequest(err.to_string()))?;

    // Resolve & Destroy
    let revoked = match &subject {
        SubjectId::Email { email } => {
            let via_directory = state
                .directory
                .destroy_all_for_identity(state.store.as_ref(), email)
                .await;

            // Deliberate second pass over the whole store: the directory
            // misses sessions registered before a restart or racing a
            // login, and store destroy is idempotent, so the counts may
            // overlap.
            let via_scan =
                scan_and_destroy(state.store.as_ref(), &SessionMatcher::Email(email.clone()))
                    .await
                    .map_err(|err| RevocationApiError::Unprocessable(err.to_string()))?;

            via_directory + via_scan
        }
        // The directory is keyed by email only; issuer+subject
        // resolution always goes through the store scan.
        SubjectId::IssSub { sub, .. } => {
            scan_and_destroy(state.store.as_ref(), &SessionMatcher::Subject(sub.clone()))
                .await
                .map_err(|err| RevocationApiError::Unprocessable(err.to_string()))?
        }
    };

    tracing::info!(
        subject = %subject.composite_key(),
        revoked,
        "global token revocation processed"
    );
    Ok(())
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
