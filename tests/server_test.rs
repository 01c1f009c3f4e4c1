mod common;

use std::{sync::Arc, time::Duration};

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use sportop::{
    Error,
    server::{CallbackState, callback_path, router},
    spotify::{self, auth::begin_authorization},
    store::{KeyValueStore, MemoryStore, VERIFIER_KEY},
};

async fn token() -> Json<Value> {
    Json(json!({ "access_token": "BQC-token", "token_type": "Bearer", "expires_in": 3600 }))
}

/// Callback server backed by a fake token endpoint, plus the state to await on.
async fn callback_server() -> (String, CallbackState<MemoryStore>) {
    let token_base = common::spawn(Router::new().route("/api/token", post(token))).await;
    let config = common::test_config(&token_base);
    let http = spotify::http_client(&config).unwrap();

    let state = CallbackState::new(Arc::new(config), http, MemoryStore::new());
    let base = common::spawn(router(state.clone()).unwrap()).await;
    (base, state)
}

#[test]
fn test_callback_path() {
    assert_eq!(
        callback_path("http://localhost:5173/callback").unwrap(),
        "/callback"
    );
    assert_eq!(
        callback_path("http://127.0.0.1:8888/auth/spotify").unwrap(),
        "/auth/spotify"
    );
    assert!(matches!(callback_path("not a url"), Err(Error::InvalidUrl(_))));
}

#[test]
fn test_redirect_to_health_path_is_rejected() {
    assert!(matches!(
        callback_path("http://127.0.0.1:5173/health"),
        Err(Error::InvalidConfig {
            key: "SPOTIFY_API_REDIRECT_URI",
            ..
        })
    ));

    let mut config = common::test_config("http://127.0.0.1:1");
    config.redirect_uri = "http://127.0.0.1:5173/health".to_string();
    let http = spotify::http_client(&config).unwrap();
    let state = CallbackState::new(Arc::new(config), http, MemoryStore::new());

    // Refused up front instead of clashing with the health route
    assert!(matches!(router(state), Err(Error::InvalidConfig { .. })));
}

#[tokio::test]
async fn test_health() {
    let (base, _) = callback_server().await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_callback_completes_flow() {
    let (base, state) = callback_server().await;
    begin_authorization(&state.config, &state.store).await.unwrap();

    let res = reqwest::get(format!("{base}/callback?code=abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let token = state.wait_for_token(Duration::from_secs(2)).await.unwrap();
    assert_eq!(token.access_token, "BQC-token");
    assert_eq!(state.store.get(VERIFIER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_reloaded_callback_keeps_first_outcome() {
    let (base, state) = callback_server().await;
    begin_authorization(&state.config, &state.store).await.unwrap();

    reqwest::get(format!("{base}/callback?code=abc")).await.unwrap();

    // Verifier is consumed, so the reload fails, but the token is kept
    let res = reqwest::get(format!("{base}/callback?code=abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let token = state.wait_for_token(Duration::from_secs(2)).await.unwrap();
    assert_eq!(token.access_token, "BQC-token");
}

#[tokio::test]
async fn test_callback_without_verifier() {
    let (base, state) = callback_server().await;

    let res = reqwest::get(format!("{base}/callback?code=abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let err = state.wait_for_token(Duration::from_secs(2)).await.unwrap_err();
    assert!(matches!(err, Error::MissingVerifier));
}

#[tokio::test]
async fn test_callback_access_denied() {
    let (base, state) = callback_server().await;

    let res = reqwest::get(format!("{base}/callback?error=access_denied"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    match state.wait_for_token(Duration::from_secs(2)).await {
        Err(Error::AuthorizationDenied(reason)) => assert_eq!(reason, "access_denied"),
        other => panic!("expected AuthorizationDenied, got {:?}", other),
    }
}

#[tokio::test]
async fn test_callback_without_code() {
    let (base, state) = callback_server().await;

    let res = reqwest::get(format!("{base}/callback")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Nothing recorded, so waiting runs into the timeout
    let err = state
        .wait_for_token(Duration::from_millis(300))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
}
