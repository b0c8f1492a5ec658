/* src/server/engine/rust/src/errors.rs */

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InertiaError {
  code: String,
  message: String,
  status: u16,
}

/// Status carried by every error.
const SERVER_FAULT: u16 = 500;

impl InertiaError {
  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self { code: code.into(), message: message.into(), status: SERVER_FAULT }
  }

  /// A prop thunk failed while the page was being resolved.
  pub fn prop_resolution(msg: impl Into<String>) -> Self {
    Self::with_code("PROP_RESOLUTION", msg)
  }

  pub fn serialization(msg: impl Into<String>) -> Self {
    Self::with_code("SERIALIZATION", msg)
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::with_code("CONFIG", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for InertiaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for InertiaError {}

impl From<serde_json::Error> for InertiaError {
  fn from(err: serde_json::Error) -> Self {
    Self::serialization(err.to_string())
  }
}
