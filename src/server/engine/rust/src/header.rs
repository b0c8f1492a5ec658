/* src/server/engine/rust/src/header.rs */

//! Inertia wire headers and a parsed snapshot of the ones a request carries.

pub const INERTIA: &str = "X-Inertia";
pub const ERROR_BAG: &str = "X-Inertia-Error-Bag";
pub const LOCATION: &str = "X-Inertia-Location";
pub const VERSION: &str = "X-Inertia-Version";
pub const PARTIAL_COMPONENT: &str = "X-Inertia-Partial-Component";
pub const PARTIAL_ONLY: &str = "X-Inertia-Partial-Data";
pub const PARTIAL_EXCEPT: &str = "X-Inertia-Partial-Except";

/// Inertia headers extracted from a request.
///
/// Header names are matched case-insensitively by the lookup the caller
/// supplies. Missing or malformed list headers parse as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InertiaHeaders {
  pub inertia: bool,
  pub version: Option<String>,
  pub partial_component: Option<String>,
  pub only: Vec<String>,
  pub except: Vec<String>,
  pub error_bag: Option<String>,
}

impl InertiaHeaders {
  /// Build from any header lookup, e.g. `|name| headers.get(name)?.to_str().ok()`.
  pub fn from_lookup<'a, F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<&'a str>,
  {
    Self {
      inertia: lookup(INERTIA).is_some(),
      version: lookup(VERSION).map(str::to_string),
      partial_component: lookup(PARTIAL_COMPONENT).map(str::to_string),
      only: lookup(PARTIAL_ONLY).map(split_list).unwrap_or_default(),
      except: lookup(PARTIAL_EXCEPT).map(split_list).unwrap_or_default(),
      error_bag: lookup(ERROR_BAG).filter(|s| !s.is_empty()).map(str::to_string),
    }
  }

  /// True when the request is a partial reload of exactly `component`.
  pub fn is_partial_for(&self, component: &str) -> bool {
    self.partial_component.as_deref() == Some(component)
  }

  /// The client's version, `""` when the header is absent.
  pub fn client_version(&self) -> &str {
    self.version.as_deref().unwrap_or("")
  }
}

fn split_list(raw: &str) -> Vec<String> {
  raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
