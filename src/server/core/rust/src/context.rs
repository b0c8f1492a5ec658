/* src/server/core/rust/src/context.rs */

use std::sync::Arc;

use indexmap::IndexMap;
use inertia_engine::{
  HistoryFlags, InertiaError, PageObject, PageRequest, Prop, PropBag, PropValue, build_page,
};

use crate::config::DEFAULT_ROOT_VIEW;
use crate::negotiate::{ResponseParts, location};
use crate::request::RequestInfo;

pub type VersionFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Current asset version: nothing, a fixed string, or computed per render.
#[derive(Clone, Default)]
pub enum Version {
  #[default]
  None,
  Fixed(String),
  Dynamic(VersionFn),
}

impl Version {
  pub fn dynamic<F>(f: F) -> Self
  where
    F: Fn() -> Option<String> + Send + Sync + 'static,
  {
    Self::Dynamic(Arc::new(f))
  }

  /// Resolve to the wire string; absent versions are `""`.
  pub fn resolve(&self) -> String {
    match self {
      Self::None => String::new(),
      Self::Fixed(v) => v.clone(),
      Self::Dynamic(f) => f().unwrap_or_default(),
    }
  }
}

impl From<&str> for Version {
  fn from(v: &str) -> Self {
    Self::Fixed(v.to_string())
  }
}

impl From<String> for Version {
  fn from(v: String) -> Self {
    Self::Fixed(v)
  }
}

/// The outcome of [`InertiaContext::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
  /// Inertia request: send the page object as JSON.
  Json(PageObject),
  /// Plain browser request: embed the page in `root_view`.
  Document { page: PageObject, root_view: String },
}

impl Rendered {
  pub fn page(&self) -> &PageObject {
    match self {
      Self::Json(page) | Self::Document { page, .. } => page,
    }
  }
}

/// Per-request Inertia state: shared props, version, root view, and the
/// one-shot history flags. Build one per request and drop it afterwards;
/// it is not meant to be shared between concurrent requests.
#[derive(Clone)]
pub struct InertiaContext {
  shared: PropBag,
  version: Version,
  root_view: String,
  clear_history: bool,
  encrypt_history: Option<bool>,
  encrypt_history_default: bool,
}

impl Default for InertiaContext {
  fn default() -> Self {
    Self::new()
  }
}

impl InertiaContext {
  pub fn new() -> Self {
    Self {
      shared: PropBag::new(),
      version: Version::None,
      root_view: DEFAULT_ROOT_VIEW.to_string(),
      clear_history: false,
      encrypt_history: None,
      encrypt_history_default: false,
    }
  }

  /// History encryption used when no per-response override is set.
  #[must_use]
  pub fn with_encrypt_history_default(mut self, encrypt: bool) -> Self {
    self.encrypt_history_default = encrypt;
    self
  }

  pub fn share(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
    self.shared.insert(key.into(), prop.into());
  }

  pub fn share_many(&mut self, props: PropBag) {
    self.shared.extend(props);
  }

  /// Share a value under a dotted path, e.g. `"auth.user"`, nesting maps as
  /// needed. A non-map prop in the way is replaced.
  pub fn share_path(&mut self, path: &str, value: impl Into<PropValue>) {
    let mut segments = path.split('.');
    let Some(first) = segments.next() else { return };
    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
      self.shared.insert(first.to_string(), Prop::Plain(value.into()));
      return;
    }

    let entry = self
      .shared
      .entry(first.to_string())
      .or_insert_with(|| Prop::Plain(PropValue::Map(IndexMap::new())));
    if !matches!(entry, Prop::Plain(PropValue::Map(_))) {
      *entry = Prop::Plain(PropValue::Map(IndexMap::new()));
    }
    if let Prop::Plain(PropValue::Map(map)) = entry {
      insert_path(map, &rest, value.into());
    }
  }

  pub fn shared(&self, key: &str) -> Option<&Prop> {
    self.shared.get(key)
  }

  /// Look up a shared value by dotted path, walking nested maps written by
  /// [`Self::share_path`]. Optional and deferred props have no value to walk.
  pub fn shared_path(&self, path: &str) -> Option<&PropValue> {
    let mut segments = path.split('.');
    let root = match self.shared.get(segments.next()?)? {
      Prop::Plain(value) | Prop::Always(value) | Prop::Merge { value, .. } => value,
      Prop::Optional(_) | Prop::Deferred { .. } => return None,
    };
    segments.try_fold(root, |node, key| match node {
      PropValue::Map(map) => map.get(key),
      PropValue::Value(_) | PropValue::Thunk(_) => None,
    })
  }

  pub fn shared_props(&self) -> &PropBag {
    &self.shared
  }

  pub fn flush_shared(&mut self) {
    self.shared.clear();
  }

  pub fn set_version(&mut self, version: impl Into<Version>) {
    self.version = version.into();
  }

  pub fn current_version(&self) -> String {
    self.version.resolve()
  }

  pub fn set_root_view(&mut self, name: impl Into<String>) {
    self.root_view = name.into();
  }

  pub fn root_view(&self) -> &str {
    &self.root_view
  }

  /// Clear the browser history on the next render only.
  pub fn clear_history(&mut self) {
    self.clear_history = true;
  }

  /// Override history encryption for the next render.
  pub fn encrypt_history(&mut self, encrypt: bool) {
    self.encrypt_history = Some(encrypt);
  }

  /// Build the response payload for `component`.
  ///
  /// Per-call props win over shared props with the same key. Both history
  /// flags are consumed before anything can fail, so they never leak into
  /// the next render.
  pub fn render(
    &mut self,
    component: &str,
    props: PropBag,
    request: &RequestInfo,
  ) -> Result<Rendered, InertiaError> {
    let history = HistoryFlags {
      clear: std::mem::take(&mut self.clear_history),
      encrypt: self.encrypt_history.take().unwrap_or(self.encrypt_history_default),
    };

    let mut all = self.shared.clone();
    all.extend(props);

    let version = self.current_version();
    let page = build_page(
      component,
      &all,
      PageRequest { headers: &request.headers, url: &request.path, version: &version, history },
    )?;

    if request.is_inertia() {
      Ok(Rendered::Json(page))
    } else {
      Ok(Rendered::Document { page, root_view: self.root_view.clone() })
    }
  }

  /// Redirect the client to `url` with a full page visit.
  pub fn location(&self, url: &str, request: &RequestInfo) -> ResponseParts {
    location(url, request)
  }
}

fn insert_path(map: &mut IndexMap<String, PropValue>, path: &[&str], value: PropValue) {
  let Some((head, tail)) = path.split_first() else { return };
  if tail.is_empty() {
    map.insert((*head).to_string(), value);
    return;
  }
  let child = map.entry((*head).to_string()).or_insert_with(|| PropValue::Map(IndexMap::new()));
  if !matches!(child, PropValue::Map(_)) {
    *child = PropValue::Map(IndexMap::new());
  }
  if let PropValue::Map(inner) = child {
    insert_path(inner, tail, value);
  }
}
