use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    Error,
    oauth::CallbackErrorBody,
    success,
    types::CallbackQuery,
    warning,
};

use super::{AppState, error::status_for, found};

pub async fn callback(
    Extension(state): Extension<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Response {
    if let Some(denied) = params.error {
        warning!("Spotify authorization denied: {}", denied);
        return error_response(
            StatusCode::BAD_GATEWAY,
            CallbackErrorBody {
                error: format!("authorization denied: {denied}"),
                token_info: Value::Null,
            },
        );
    }

    let (Some(code), Some(encoded_state)) = (params.code, params.state) else {
        let err = Error::InvalidRequest("callback requires both code and state".to_string());
        return error_response(
            StatusCode::BAD_REQUEST,
            CallbackErrorBody {
                error: err.to_string(),
                token_info: Value::Null,
            },
        );
    };

    let mut handshake = state.oauth.resume();
    match handshake.handle_callback(&code, &encoded_state).await {
        Ok(result) => {
            success!("Redirecting to playlist {}", result.url);
            found(&result.url)
        }
        Err(e) => error_response(status_for(&e.error), e.body()),
    }
}

fn error_response(status: StatusCode, body: CallbackErrorBody) -> Response {
    (status, Json(body)).into_response()
}
