/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inertia_server::InertiaError;

/// `InertiaError` as an Axum response: its status plus a JSON error body.
#[derive(Debug)]
pub struct AxumError(pub InertiaError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    tracing::error!(code = err.code(), message = err.message(), "inertia render failed");
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<InertiaError> for AxumError {
  fn from(err: InertiaError) -> Self {
    Self(err)
  }
}
