//! End-to-end tests of the global token revocation endpoint.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use tower::ServiceExt;

use granite_session::{Principal, SessionStore};

use common::{
    body_json, expired_token, seed_session, sign_claims, test_app, valid_token, AUDIENCE, ISSUER,
    KID,
};

const REVOCATION_PATH: &str = "/api/global-token-revocation";

fn revocation_request(token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(REVOCATION_PATH);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn email_body(email: &str) -> serde_json::Value {
    serde_json::json!({"sub_id": {"format": "email", "email": email}})
}

#[tokio::test]
async fn missing_authorization_header_is_401() {
    let harness = test_app();

    let response = harness
        .app
        .oneshot(revocation_request(None, Some(email_body("a@b.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    let harness = test_app();

    let request = Request::builder()
        .method("POST")
        .uri(REVOCATION_PATH)
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(email_body("a@b.com").to_string()))
        .unwrap();

    let response = harness.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_signature_is_401() {
    let harness = test_app();

    // Signed by a freshly generated key claiming the published kid.
    let rogue = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let rogue_pem = rogue.to_pkcs8_pem(LineEnding::LF).unwrap().to_string();
    let token = sign_claims(
        &rogue_pem,
        KID,
        &serde_json::json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "exp": chrono::Utc::now().timestamp() + 300,
        }),
    );

    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), Some(email_body("a@b.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
    assert!(
        !body["error_description"]
            .as_str()
            .unwrap()
            .contains("expired")
    );
}

#[tokio::test]
async fn expired_token_is_401_and_names_expiry() {
    let harness = test_app();

    let token = expired_token();
    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), Some(email_body("a@b.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
    assert!(
        body["error_description"]
            .as_str()
            .unwrap()
            .contains("expired")
    );
}

#[tokio::test]
async fn missing_body_is_400() {
    let harness = test_app();

    let token = valid_token();
    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn missing_sub_id_is_400() {
    let harness = test_app();

    let token = valid_token();
    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), Some(serde_json::json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error_description"]
            .as_str()
            .unwrap()
            .contains("sub_id")
    );
}

#[tokio::test]
async fn unknown_format_is_400_and_named() {
    let harness = test_app();

    let token = valid_token();
    let body = serde_json::json!({"sub_id": {"format": "phone", "phone": "+15551234"}});
    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_request");
    assert!(body["error_description"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn incomplete_iss_sub_is_400() {
    let harness = test_app();

    let token = valid_token();
    let body = serde_json::json!({"sub_id": {"format": "iss_sub", "iss": ISSUER}});
    let response = harness
        .app
        .oneshot(revocation_request(Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error_description"].as_str().unwrap().contains("sub"));
}

#[tokio::test]
async fn zero_matches_still_succeeds() {
    let harness = test_app();

    let token = valid_token();
    let response = harness
        .app
        .clone()
        .oneshot(revocation_request(
            Some(&token),
            Some(email_body("nobody@example.com")),
        ))
        .await
        .unwrap();

    // Anti-enumeration: an unknown subject is indistinguishable from one
    // with no sessions.
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn email_revocation_destroys_directory_and_stray_sessions() {
    let harness = test_app();

    // Two sessions registered normally, one only present in the store
    // (as after a process restart lost the directory).
    let registered_a = seed_session(
        &harness,
        Principal::from_email("victim@example.com"),
        true,
    )
    .await;
    let registered_b = seed_session(
        &harness,
        Principal::from_email("victim@example.com"),
        true,
    )
    .await;
    let stray = seed_session(
        &harness,
        Principal::from_email("victim@example.com"),
        false,
    )
    .await;
    let bystander = seed_session(&harness, Principal::from_email("other@example.com"), true).await;

    let token = valid_token();
    let response = harness
        .app
        .clone()
        .oneshot(revocation_request(
            Some(&token),
            Some(email_body("victim@example.com")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    for id in [&registered_a, &registered_b, &stray] {
        assert!(harness.store.get(id).await.unwrap().is_none());
    }
    assert!(harness.store.get(&bystander).await.unwrap().is_some());
    assert!(harness.directory.sessions_for("victim@example.com").is_empty());
    assert_eq!(harness.directory.sessions_for("other@example.com").len(), 1);
}

#[tokio::test]
async fn email_revocation_is_case_insensitive() {
    let harness = test_app();

    let id = seed_session(&harness, Principal::from_email("Foo@Bar.com"), true).await;

    let token = valid_token();
    let response = harness
        .app
        .clone()
        .oneshot(revocation_request(
            Some(&token),
            Some(email_body("foo@bar.com")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(harness.store.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn iss_sub_revocation_matches_subject_only() {
    let harness = test_app();

    let target = seed_session(
        &harness,
        Principal::from_email("victim@example.com").with_sub("user-42"),
        true,
    )
    .await;
    let other = seed_session(
        &harness,
        Principal::from_email("other@example.com").with_sub("user-43"),
        true,
    )
    .await;

    let token = valid_token();
    let body = serde_json::json!({
        "sub_id": {"format": "iss_sub", "iss": ISSUER, "sub": "user-42"}
    });
    let response = harness
        .app
        .clone()
        .oneshot(revocation_request(Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(harness.store.get(&target).await.unwrap().is_none());
    assert!(harness.store.get(&other).await.unwrap().is_some());
}

#[tokio::test]
async fn health_probe_reports_contract() {
    let harness = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = harness.app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "granite-bank");
    assert_eq!(body["sub_id_formats"], serde_json::json!(["email", "iss_sub"]));
    assert!(body["timestamp"].is_string());
}
