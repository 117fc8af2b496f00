use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{Error, warning};

/// Error returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::MalformedState(_) | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        Error::UpstreamCallFailed { .. }
        | Error::ResponseParseFailed { .. }
        | Error::TokenExchangeFailed { .. }
        | Error::TrackNotFound(_) => StatusCode::BAD_GATEWAY,
        Error::MissingConfig(_) | Error::InvalidConfig(..) | Error::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        warning!("{} {}", status, self.0);

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
