use axum::response::Json;
use serde_json::{Value, json};

/// `GET /health`: `{"status": "ok", "version": "<crate version>"}`.
///
/// Lets a user check that the callback server is up while `sportop auth`
/// is waiting.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
