use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe. Does not touch the completion service or Spotify.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
