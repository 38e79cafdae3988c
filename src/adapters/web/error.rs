//! HTTP error responses for the web adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::error::HunterError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<HunterError> for WebError {
    fn from(err: HunterError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

pub fn status_from_error(err: &HunterError) -> StatusCode {
    match err {
        HunterError::ConfigMissing { .. }
        | HunterError::ConfigInvalid { .. }
        | HunterError::ConfigParse { .. }
        | HunterError::UnknownStrategy(_)
        | HunterError::Universe(_) => StatusCode::BAD_REQUEST,
        HunterError::Http { .. } | HunterError::Api { .. } | HunterError::DataParse { .. } => {
            StatusCode::BAD_GATEWAY
        }
        HunterError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
