/* src/server/adapter/axum/src/extract.rs */

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri, header};
use axum::response::Response;
use inertia_server::{
  InertiaContext, InertiaError, InertiaHeaders, InertiaParts, PropBag, Rendered, RequestInfo,
  render_document,
};

use crate::error::AxumError;
use crate::response::{InertiaResponse, parts_into_response};

/// Request extension set by [`crate::encrypt_history`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct EncryptHistory;

pub(crate) fn request_info(method: &Method, uri: &Uri, headers: &HeaderMap) -> RequestInfo {
  let url = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
  let mut info = RequestInfo::new(method.as_str(), url)
    .with_headers(InertiaHeaders::from_lookup(|name| headers.get(name)?.to_str().ok()));
  if let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) {
    info = info.with_referer(referer);
  }
  info
}

/// Per-request Inertia handle. Derefs to [`InertiaContext`] for sharing
/// props and setting history flags before rendering.
pub struct Inertia {
  ctx: InertiaContext,
  request: RequestInfo,
  parts: Arc<InertiaParts>,
}

impl Inertia {
  pub fn request(&self) -> &RequestInfo {
    &self.request
  }

  /// Render `component` as JSON for Inertia visits or as a full document otherwise.
  pub async fn render(
    &mut self,
    component: &str,
    props: PropBag,
  ) -> Result<InertiaResponse, AxumError> {
    match self.ctx.render(component, props, &self.request)? {
      Rendered::Json(page) => Ok(InertiaResponse::Json(page)),
      Rendered::Document { page, root_view } => {
        let template = self.parts.root_view_template(&root_view).ok_or_else(|| {
          InertiaError::config(format!("root view '{root_view}' is not registered"))
        })?;
        let html =
          render_document(&page, template, self.parts.gateway.as_ref(), &self.parts.config).await?;
        Ok(InertiaResponse::Html(html))
      }
    }
  }

  /// Full page visit to `url`: `409` + `X-Inertia-Location` or a `303` redirect.
  pub fn location(&self, url: &str) -> Response {
    parts_into_response(&self.ctx.location(url, &self.request))
  }
}

impl Deref for Inertia {
  type Target = InertiaContext;

  fn deref(&self) -> &Self::Target {
    &self.ctx
  }
}

impl DerefMut for Inertia {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.ctx
  }
}

impl<S: Send + Sync> FromRequestParts<S> for Inertia {
  type Rejection = AxumError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let inertia_parts = parts
      .extensions
      .get::<Arc<InertiaParts>>()
      .cloned()
      .ok_or_else(|| InertiaError::internal("inertia layer is not installed on this router"))?;

    let request = request_info(&parts.method, &parts.uri, &parts.headers);
    let mut ctx = inertia_parts.context_for(&request);
    if parts.extensions.get::<EncryptHistory>().is_some() {
      ctx.encrypt_history(true);
    }

    Ok(Self { ctx, request, parts: inertia_parts })
  }
}
