/* src/server/core/rust/src/negotiate.rs */

//! Post-processing rules applied to every response.

use inertia_engine::header;

use crate::request::RequestInfo;

/// Framework-neutral view of a response: status, headers, and whether the
/// body is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParts {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  pub body_empty: bool,
}

impl ResponseParts {
  pub fn new(status: u16) -> Self {
    Self { status, headers: Vec::new(), body_empty: true }
  }

  /// Case-insensitive header lookup.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v.as_str())
  }

  /// Replace every header named `name` with a single value.
  pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
    self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    self.headers.push((name.to_string(), value.into()));
  }

  #[must_use]
  pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
    self.set_header(name, value);
    self
  }
}

/// Result of [`negotiate`]. When `replaced` is set the original body must be
/// dropped; the response was swapped for a redirect or conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
  pub parts: ResponseParts,
  pub replaced: bool,
}

/// Send the client to `url` with a full page visit: `409` plus
/// `X-Inertia-Location` for Inertia requests, a `303` redirect otherwise.
pub fn location(url: &str, request: &RequestInfo) -> ResponseParts {
  if request.is_inertia() {
    ResponseParts::new(409).with_header(header::LOCATION, url)
  } else {
    ResponseParts::new(303).with_header("Location", url)
  }
}

/// The client's assets are stale: force a hard visit to the same URL.
pub fn on_version_change(request: &RequestInfo) -> ResponseParts {
  location(&request.url, request)
}

/// A successful but empty response: redirect back to the referring page.
pub fn on_empty_response(request: &RequestInfo) -> ResponseParts {
  let target = request.referer.as_deref().filter(|r| !r.is_empty()).unwrap_or("/");
  ResponseParts::new(302).with_header("Location", target)
}

/// `302` after PUT/PATCH/DELETE becomes `303` so the browser follows with GET.
pub fn normalize_redirect(request: &RequestInfo, parts: &mut ResponseParts) {
  if parts.status == 302 && request.is_unsafe_redirect_method() {
    parts.status = 303;
  }
}

/// Apply the protocol rules to an outgoing response.
///
/// Inertia requests get the version check (GET only) and empty-body repair,
/// in that order. The redirect normalization applies to every request.
/// `Vary: X-Inertia` is always set.
pub fn negotiate(request: &RequestInfo, server_version: &str, parts: ResponseParts) -> Negotiated {
  let mut parts = parts;
  let mut replaced = false;

  if request.is_inertia() {
    if request.is_get() && request.headers.client_version() != server_version {
      tracing::debug!(
        client = request.headers.client_version(),
        server = server_version,
        url = %request.url,
        "asset version changed, forcing full visit"
      );
      parts = on_version_change(request);
      replaced = true;
    }

    if parts.status == 200 && parts.body_empty {
      tracing::debug!(url = %request.url, "empty inertia response, redirecting back");
      parts = on_empty_response(request);
      replaced = true;
    }
  }

  normalize_redirect(request, &mut parts);
  parts.set_header("Vary", header::INERTIA);

  Negotiated { parts, replaced }
}
