/* src/server/adapter/axum/src/response.rs */

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use inertia_server::{PageObject, ResponseParts, header};

/// A rendered Inertia page.
#[derive(Debug, Clone)]
pub enum InertiaResponse {
  /// Page object for an Inertia visit.
  Json(PageObject),
  /// Full HTML document for a first visit.
  Html(String),
}

impl IntoResponse for InertiaResponse {
  fn into_response(self) -> Response {
    match self {
      Self::Json(page) => (
        [(header::INERTIA, "true"), ("Vary", header::INERTIA)],
        axum::Json(page),
      )
        .into_response(),
      Self::Html(html) => Html(html).into_response(),
    }
  }
}

/// Build an empty-bodied response from framework-neutral parts.
pub(crate) fn parts_into_response(parts: &ResponseParts) -> Response {
  let status = StatusCode::from_u16(parts.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
  let mut response = status.into_response();
  apply_headers(&mut response, parts);
  response
}

pub(crate) fn apply_headers(response: &mut Response, parts: &ResponseParts) {
  let headers = response.headers_mut();
  for (name, value) in &parts.headers {
    match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
      (Ok(name), Ok(value)) => {
        headers.insert(name, value);
      }
      _ => tracing::warn!(%name, %value, "dropping invalid response header"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parts_become_response() {
    let parts = ResponseParts::new(409).with_header(header::LOCATION, "/login");
    let response = parts_into_response(&parts);
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response.headers()["x-inertia-location"], "/login");
  }

  #[test]
  fn json_response_headers() {
    let page: PageObject = serde_json::from_value(serde_json::json!({
      "component": "Home",
      "props": {},
      "url": "/",
      "version": "",
      "clearHistory": false,
      "encryptHistory": false,
    }))
    .unwrap();
    let response = InertiaResponse::Json(page).into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-inertia"], "true");
    assert_eq!(response.headers()["vary"], "X-Inertia");
    assert_eq!(response.headers()["content-type"], "application/json");
  }
}
