/* src/server/adapter/axum/src/middleware.rs */

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use inertia_server::{InertiaError, InertiaParts, ResponseParts, negotiate};

use crate::error::AxumError;
use crate::extract::{EncryptHistory, request_info};
use crate::response::{apply_headers, parts_into_response};

/// Layer installed by [`crate::InertiaRouterExt::inertia`]. Makes the parts
/// available to the [`crate::Inertia`] extractor and applies the protocol
/// rules to whatever the handler returns.
pub(crate) async fn handle(
  State(parts): State<Arc<InertiaParts>>,
  mut req: Request,
  next: Next,
) -> Response {
  let info = request_info(req.method(), req.uri(), req.headers());
  let server_version = parts.version.resolve();

  // Stale client on GET: skip the handler entirely.
  if info.is_inertia() && info.is_get() && info.headers.client_version() != server_version {
    let out = negotiate(&info, &server_version, ResponseParts::new(200));
    return parts_into_response(&out.parts);
  }

  req.extensions_mut().insert(parts);
  let response = next.run(req).await;

  let (mut head, body) = response.into_parts();
  let mut observed = ResponseParts::new(head.status.as_u16());

  // Only a 200 to an Inertia visit needs the body inspected.
  let body = if info.is_inertia() && head.status == StatusCode::OK {
    match body.collect().await {
      Ok(collected) => {
        let bytes = collected.to_bytes();
        observed.body_empty = bytes.is_empty();
        Body::from(bytes)
      }
      Err(e) => {
        return AxumError(InertiaError::internal(format!("failed to read response body: {e}")))
          .into_response();
      }
    }
  } else {
    observed.body_empty = false;
    body
  };

  let out = negotiate(&info, &server_version, observed);
  if out.replaced {
    return parts_into_response(&out.parts);
  }

  head.status = StatusCode::from_u16(out.parts.status).unwrap_or(head.status);
  let mut response = Response::from_parts(head, body);
  apply_headers(&mut response, &out.parts);
  response
}

/// Turn on history encryption for every page rendered behind this layer.
pub async fn encrypt_history(mut req: Request, next: Next) -> Response {
  req.extensions_mut().insert(EncryptHistory);
  next.run(req).await
}
