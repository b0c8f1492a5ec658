/* src/server/core/rust/src/request.rs */

use inertia_engine::InertiaHeaders;

/// The parts of an incoming request the protocol looks at.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
  /// Upper-case HTTP method.
  pub method: String,
  pub path: String,
  /// Path plus query string, used as the hard-navigation target.
  pub url: String,
  pub referer: Option<String>,
  pub headers: InertiaHeaders,
}

impl RequestInfo {
  pub fn new(method: &str, url: &str) -> Self {
    let path = url.split(['?', '#']).next().unwrap_or("").to_string();
    Self {
      method: method.to_ascii_uppercase(),
      path,
      url: url.to_string(),
      referer: None,
      headers: InertiaHeaders::default(),
    }
  }

  #[must_use]
  pub fn with_headers(mut self, headers: InertiaHeaders) -> Self {
    self.headers = headers;
    self
  }

  #[must_use]
  pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
    self.referer = Some(referer.into());
    self
  }

  pub fn is_inertia(&self) -> bool {
    self.headers.inertia
  }

  pub fn is_get(&self) -> bool {
    self.method == "GET"
  }

  /// PUT, PATCH and DELETE.
  pub fn is_unsafe_redirect_method(&self) -> bool {
    matches!(self.method.as_str(), "PUT" | "PATCH" | "DELETE")
  }
}
