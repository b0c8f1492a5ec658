/* src/server/engine/rust/src/prop.rs */

//! Prop descriptors: how a single page prop is treated on first load,
//! on partial reloads, and by the client-side merge/defer machinery.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::InertiaError;

pub const DEFAULT_DEFER_GROUP: &str = "default";

pub type ThunkFn = Arc<dyn Fn() -> Result<Value, InertiaError> + Send + Sync>;

/// A zero-argument computation producing a prop value.
///
/// Thunks are an explicit closure type. A `String` is always data and is never
/// looked up or invoked as a function name.
#[derive(Clone)]
pub struct Thunk(ThunkFn);

impl Thunk {
  pub fn new<F>(f: F) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self(Arc::new(f))
  }

  /// Wrap an infallible closure.
  pub fn infallible<F>(f: F) -> Self
  where
    F: Fn() -> Value + Send + Sync + 'static,
  {
    Self(Arc::new(move || Ok(f())))
  }

  pub fn call(&self) -> Result<Value, InertiaError> {
    (self.0)()
  }
}

impl fmt::Debug for Thunk {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Thunk(..)")
  }
}

/// An unresolved prop payload: concrete JSON, a thunk, or a map whose
/// leaves may themselves be thunks.
#[derive(Debug, Clone)]
pub enum PropValue {
  Value(Value),
  Thunk(Thunk),
  Map(IndexMap<String, PropValue>),
}

impl PropValue {
  pub fn thunk<F>(f: F) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self::Thunk(Thunk::new(f))
  }
}

impl From<Value> for PropValue {
  fn from(value: Value) -> Self {
    Self::Value(value)
  }
}

impl From<Thunk> for PropValue {
  fn from(thunk: Thunk) -> Self {
    Self::Thunk(thunk)
  }
}

impl From<IndexMap<String, PropValue>> for PropValue {
  fn from(map: IndexMap<String, PropValue>) -> Self {
    Self::Map(map)
  }
}

impl From<&str> for PropValue {
  fn from(s: &str) -> Self {
    Self::Value(Value::String(s.to_string()))
  }
}

impl From<String> for PropValue {
  fn from(s: String) -> Self {
    Self::Value(Value::String(s))
  }
}

/// How the client combines a freshly resolved value with its cached copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
  Shallow,
  Deep,
}

#[derive(Debug, Clone)]
pub enum Prop {
  /// Always resolved, included unless filtered out by a partial reload.
  Plain(PropValue),
  /// Included on every response; survives `only` and `except` filtering.
  Always(PropValue),
  /// Left out of the first load; sent only when named by a partial reload.
  Optional(Thunk),
  /// Left out of the first load and announced under `deferredProps`.
  Deferred { thunk: Thunk, group: String, merge: Option<MergeMode> },
  /// Included like `Plain`, announced under `mergeProps`/`deepMergeProps`.
  Merge { value: PropValue, mode: MergeMode },
}

impl Prop {
  pub fn value(value: impl Into<PropValue>) -> Self {
    Self::Plain(value.into())
  }

  pub fn always(value: impl Into<PropValue>) -> Self {
    Self::Always(value.into())
  }

  pub fn optional<F>(f: F) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self::Optional(Thunk::new(f))
  }

  /// Older name for [`Prop::optional`].
  #[deprecated(note = "use Prop::optional")]
  pub fn lazy<F>(f: F) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self::optional(f)
  }

  pub fn defer<F>(f: F) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self::defer_in(f, DEFAULT_DEFER_GROUP)
  }

  pub fn defer_in<F>(f: F, group: impl Into<String>) -> Self
  where
    F: Fn() -> Result<Value, InertiaError> + Send + Sync + 'static,
  {
    Self::Deferred { thunk: Thunk::new(f), group: group.into(), merge: None }
  }

  pub fn merge(value: impl Into<PropValue>) -> Self {
    Self::Merge { value: value.into(), mode: MergeMode::Shallow }
  }

  pub fn deep_merge(value: impl Into<PropValue>) -> Self {
    Self::Merge { value: value.into(), mode: MergeMode::Deep }
  }

  /// Mark a deferred or merge prop for shallow merging. No-op on other kinds.
  #[must_use]
  pub fn merged(self) -> Self {
    self.with_merge_mode(MergeMode::Shallow)
  }

  /// Mark a deferred or merge prop for deep merging. No-op on other kinds.
  #[must_use]
  pub fn deep_merged(self) -> Self {
    self.with_merge_mode(MergeMode::Deep)
  }

  fn with_merge_mode(self, mode: MergeMode) -> Self {
    match self {
      Self::Deferred { thunk, group, .. } => Self::Deferred { thunk, group, merge: Some(mode) },
      Self::Merge { value, .. } => Self::Merge { value, mode },
      other => other,
    }
  }

  pub fn is_always(&self) -> bool {
    matches!(self, Self::Always(_))
  }

  pub fn excluded_from_first_load(&self) -> bool {
    matches!(self, Self::Optional(_) | Self::Deferred { .. })
  }

  pub fn merge_mode(&self) -> Option<MergeMode> {
    match self {
      Self::Merge { mode, .. } => Some(*mode),
      Self::Deferred { merge, .. } => *merge,
      _ => None,
    }
  }

  pub fn defer_group(&self) -> Option<&str> {
    match self {
      Self::Deferred { group, .. } => Some(group),
      _ => None,
    }
  }
}

macro_rules! impl_plain_from {
  ($($ty:ty),+) => {
    $(
      impl From<$ty> for Prop {
        fn from(value: $ty) -> Self {
          Self::Plain(value.into())
        }
      }
    )+
  };
}

impl_plain_from!(Value, PropValue, Thunk, IndexMap<String, PropValue>, &str, String);

/// Page props keyed by name, in insertion order.
pub type PropBag = IndexMap<String, Prop>;

/// Build a [`PropBag`] from `key => prop` pairs; bare values become `Prop::Plain`.
#[macro_export]
macro_rules! props {
  () => { $crate::PropBag::new() };
  ($($key:expr => $value:expr),+ $(,)?) => {{
    let mut bag = $crate::PropBag::new();
    $( bag.insert(::std::string::String::from($key), $crate::Prop::from($value)); )+
    bag
  }};
}
