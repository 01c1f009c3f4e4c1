use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use serde::Deserialize;

use crate::{
    error::Error, server::CallbackState, spotify::auth::exchange_code_for_token,
    store::KeyValueStore, warning,
};

/// Query string the authorization server redirects back with.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code, present when the user approved.
    pub code: Option<String>,
    /// Error code such as `access_denied`, present when they did not.
    pub error: Option<String>,
}

/// Handles the redirect back from the authorization server.
///
/// The outcome is recorded in the [`CallbackState`] so the waiting `auth`
/// command can pick it up; the browser only gets a short HTML note.
///
/// # Responses
///
/// - `200` after a successful exchange, or when the user denied access
///   (recorded as [`Error::AuthorizationDenied`])
/// - `400` if neither `code` nor `error` is present; nothing is recorded
/// - `502` if the token exchange failed; the error is recorded
pub async fn callback<S>(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<CallbackState<S>>,
) -> (StatusCode, Html<&'static str>)
where
    S: KeyValueStore + Clone + 'static,
{
    if let Some(reason) = params.error {
        warning!("Authorization was not granted: {}", reason);
        state.record(Err(Error::AuthorizationDenied(reason))).await;
        return (
            StatusCode::OK,
            Html("<h4>Authorization denied.</h4><p>You can close this window.</p>"),
        );
    }

    let Some(code) = params.code else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>"),
        );
    };

    match exchange_code_for_token(&state.http, &state.config, &state.store, &code).await {
        Ok(token) => {
            state.record(Ok(token)).await;
            (
                StatusCode::OK,
                Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>"),
            )
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.record(Err(e)).await;
            (StatusCode::BAD_GATEWAY, Html("<h4>Login failed.</h4>"))
        }
    }
}
