use std::{net::SocketAddr, str::FromStr};

use axum::{
    Extension, Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    Error, Res,
    api::{self, AppState},
    config::Config,
    info, warning,
};

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/playlist", post(api::playlist))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/spotify_playlist", post(api::spotify_playlist))
        .route("/save_to_spotify", post(api::save_to_spotify))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warning!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Binds the gateway and serves until the process is stopped.
///
/// `addr` overrides the configured `SERVER_ADDRESS`.
pub async fn start_api_server(config: Config, addr: Option<String>) -> Res<()> {
    let addr_str = addr.unwrap_or_else(|| config.server_addr.clone());
    let addr = SocketAddr::from_str(&addr_str)
        .map_err(|e| Error::InvalidConfig("SERVER_ADDRESS", e.to_string()))?;

    let app = router(AppState::new(&config), &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
